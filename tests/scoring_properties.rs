use std::time::Duration;

use proptest::prelude::*;
use redpick::{
    GameEvent, GameSettings, Outcome, RoundScheduler, ScoreEngine, ScriptedPicker, SessionStats,
};

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        (0u64..3000).prop_map(|ms| Outcome::Correct(Duration::from_millis(ms))),
        Just(Outcome::Wrong),
        Just(Outcome::Timeout),
    ]
}

#[derive(Debug, Clone)]
enum Input {
    Tick(u64),
    Select(usize),
    Stop,
    Start,
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (0u64..800).prop_map(Input::Tick),
        3 => (0usize..4).prop_map(Input::Select),
        1 => Just(Input::Stop),
        1 => Just(Input::Start),
    ]
}

#[test]
fn points_table_boundaries() {
    let engine = ScoreEngine::default();
    let secs = Duration::from_secs_f64;

    assert_eq!(engine.points_for(secs(0.49)), 100);
    assert_eq!(engine.points_for(secs(0.5)), 80);
    assert_eq!(engine.points_for(secs(0.99)), 80);
    assert_eq!(engine.points_for(secs(1.0)), 60);
    assert_eq!(engine.points_for(secs(1.5)), 40);
    assert_eq!(engine.points_for(secs(2.0)), 20);
}

proptest! {
    #[test]
    fn clicks_always_balance(outcomes in prop::collection::vec(outcome_strategy(), 0..64)) {
        let engine = ScoreEngine::default();
        let mut stats = SessionStats::default();

        for outcome in &outcomes {
            stats = engine.apply_outcome(*outcome, &stats);
            prop_assert_eq!(stats.total_clicks, stats.correct_clicks + stats.wrong_clicks);
        }
        let hits = outcomes.iter().filter(|o| o.is_correct()).count() as u32;
        prop_assert_eq!(stats.correct_clicks, hits);
    }

    #[test]
    fn best_reaction_is_minimum_of_hits(outcomes in prop::collection::vec(outcome_strategy(), 0..64)) {
        let engine = ScoreEngine::default();
        let stats = outcomes
            .iter()
            .fold(SessionStats::default(), |s, o| engine.apply_outcome(*o, &s));

        let expected = outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Correct(r) => Some(*r),
                _ => None,
            })
            .min();
        prop_assert_eq!(stats.best_reaction, expected);
    }

    #[test]
    fn accuracy_stays_in_percent_range(outcomes in prop::collection::vec(outcome_strategy(), 0..64)) {
        let engine = ScoreEngine::default();
        let stats = outcomes
            .iter()
            .fold(SessionStats::default(), |s, o| engine.apply_outcome(*o, &s));
        let summary = engine.summarize(&stats);

        prop_assert!((0.0..=100.0).contains(&summary.accuracy_pct));
        prop_assert!(summary.avg_reaction <= Duration::from_millis(3000));
    }

    #[test]
    fn scheduler_resolves_each_round_once(
        script in prop::collection::vec(0usize..3, 1..8),
        inputs in prop::collection::vec(input_strategy(), 0..200),
    ) {
        let mut s = RoundScheduler::new(
            GameSettings::new(3, Duration::from_millis(1500)),
            ScriptedPicker::new(script),
        );
        s.start().unwrap();

        let mut live_round = false;
        let mut resolutions = 0u32;

        for input in inputs {
            let events = match input {
                Input::Tick(ms) => s.tick(Duration::from_millis(ms)),
                Input::Select(idx) => s.select(idx),
                Input::Stop => s.stop(),
                Input::Start => {
                    live_round = false;
                    resolutions = 0;
                    s.start().unwrap()
                }
            };

            for event in events {
                match event {
                    GameEvent::RoundArmed { target } => {
                        prop_assert!(!live_round);
                        prop_assert!(target < 3);
                        live_round = true;
                    }
                    GameEvent::RoundResolved { stats, .. } => {
                        prop_assert!(live_round);
                        live_round = false;
                        resolutions += 1;
                        prop_assert_eq!(stats.total_clicks, resolutions);
                    }
                    GameEvent::SessionEnded { summary } => {
                        live_round = false;
                        prop_assert_eq!(summary.correct + summary.wrong, resolutions);
                    }
                }
            }

            let stats = s.stats();
            prop_assert_eq!(stats.total_clicks, stats.correct_clicks + stats.wrong_clicks);
            prop_assert_eq!(stats.total_clicks, resolutions);
            prop_assert_eq!(s.round().is_some(), live_round);
        }
    }
}
