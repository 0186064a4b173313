use crate::score::{Outcome, SessionStats, SessionSummary};

/// Notifications produced by the scheduler for its display collaborator
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    RoundArmed { target: usize },
    RoundResolved { outcome: Outcome, stats: SessionStats },
    SessionEnded { summary: SessionSummary },
}

/// Callback view of [`GameEvent`]; implement only what you render.
pub trait GameListener {
    fn on_round_armed(&mut self, _target: usize) {}
    fn on_round_resolved(&mut self, _outcome: Outcome, _stats: &SessionStats) {}
    fn on_session_ended(&mut self, _summary: &SessionSummary) {}
}

impl GameEvent {
    pub fn dispatch<L: GameListener + ?Sized>(&self, listener: &mut L) {
        match self {
            GameEvent::RoundArmed { target } => listener.on_round_armed(*target),
            GameEvent::RoundResolved { outcome, stats } => {
                listener.on_round_resolved(*outcome, stats)
            }
            GameEvent::SessionEnded { summary } => listener.on_session_ended(summary),
        }
    }
}

/// Forwards every event, in order
pub fn dispatch_all<L: GameListener + ?Sized>(events: &[GameEvent], listener: &mut L) {
    for event in events {
        event.dispatch(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        armed: Vec<usize>,
        resolved: Vec<Outcome>,
        ended: usize,
    }

    impl GameListener for Recorder {
        fn on_round_armed(&mut self, target: usize) {
            self.armed.push(target);
        }

        fn on_round_resolved(&mut self, outcome: Outcome, _stats: &SessionStats) {
            self.resolved.push(outcome);
        }

        fn on_session_ended(&mut self, _summary: &SessionSummary) {
            self.ended += 1;
        }
    }

    #[test]
    fn dispatch_routes_each_variant() {
        let events = vec![
            GameEvent::RoundArmed { target: 2 },
            GameEvent::RoundResolved {
                outcome: Outcome::Correct(Duration::from_millis(200)),
                stats: SessionStats::default(),
            },
            GameEvent::SessionEnded {
                summary: crate::score::ScoreEngine::default().summarize(&SessionStats::default()),
            },
        ];

        let mut recorder = Recorder::default();
        dispatch_all(&events, &mut recorder);

        assert_eq!(recorder.armed, vec![2]);
        assert_eq!(
            recorder.resolved,
            vec![Outcome::Correct(Duration::from_millis(200))]
        );
        assert_eq!(recorder.ended, 1);
    }

    #[test]
    fn default_listener_ignores_everything() {
        struct Silent;
        impl GameListener for Silent {}

        GameEvent::RoundArmed { target: 0 }.dispatch(&mut Silent);
    }
}
