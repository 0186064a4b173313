use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{GameError, Result};
use crate::events::GameEvent;
use crate::picker::TargetPicker;
use crate::score::{Outcome, ScoreEngine, SessionStats, SessionSummary};

pub const DEFAULT_TARGET_COUNT: usize = 3;
pub const DEFAULT_MAX_REACTION: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Stopped,
    Running,
}

/// Per-round lifecycle. `Presenting` and `Resolving` only exist for the
/// duration of a single call; callers observe `Idle` or `Armed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum RoundPhase {
    Idle,
    Presenting,
    Armed,
    Resolving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub index: usize,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub active: bool,
    pub active_target_index: usize,
    /// Session clock reading when the round armed
    pub start_time: Duration,
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub target_count: usize,
    pub max_reaction_time: Duration,
    /// Idle dwell before each round arms; zero arms on the next tick
    pub round_gap: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            max_reaction_time: DEFAULT_MAX_REACTION,
            round_gap: Duration::ZERO,
        }
    }
}

impl GameSettings {
    pub fn new(target_count: usize, max_reaction_time: Duration) -> Self {
        Self {
            target_count,
            max_reaction_time,
            ..Self::default()
        }
    }

    pub fn with_round_gap(mut self, round_gap: Duration) -> Self {
        self.round_gap = round_gap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            return Err(GameError::NoTargets);
        }
        if self.max_reaction_time.is_zero() {
            return Err(GameError::InvalidReactionWindow(0.0));
        }
        Ok(())
    }
}

/// Drives the repeating rounds of one session from discrete `tick` calls.
///
/// Every operation returns the events it caused, in order. Input that arrives
/// in the wrong state (a `select` between rounds, a `tick` after `stop`) is
/// dropped and yields no events.
#[derive(Debug)]
pub struct RoundScheduler<P: TargetPicker> {
    settings: GameSettings,
    picker: P,
    engine: ScoreEngine,
    session: SessionState,
    phase: RoundPhase,
    targets: Vec<Target>,
    round: Option<RoundState>,
    stats: SessionStats,
    clock: Duration,
    idle_elapsed: Duration,
    rounds_armed: u32,
    final_summary: Option<SessionSummary>,
}

impl<P: TargetPicker> RoundScheduler<P> {
    pub fn new(settings: GameSettings, picker: P) -> Self {
        Self::with_engine(settings, picker, ScoreEngine::default())
    }

    pub fn with_engine(settings: GameSettings, picker: P, engine: ScoreEngine) -> Self {
        Self {
            settings,
            picker,
            engine,
            session: SessionState::Stopped,
            phase: RoundPhase::Idle,
            targets: Vec::new(),
            round: None,
            stats: SessionStats::default(),
            clock: Duration::ZERO,
            idle_elapsed: Duration::ZERO,
            rounds_armed: 0,
            final_summary: None,
        }
    }

    /// Begins a fresh session. Restarting a running session abandons its
    /// in-flight round without recording an outcome.
    pub fn start(&mut self) -> Result<Vec<GameEvent>> {
        if let Err(e) = self.settings.validate() {
            warn!("refusing to start session: {e}");
            return Err(e);
        }
        if self.session == SessionState::Running {
            info!(
                "restarting running session from {} phase, abandoning current round",
                self.phase
            );
        }

        self.session = SessionState::Running;
        self.phase = RoundPhase::Idle;
        self.stats = SessionStats::default();
        self.targets = (0..self.settings.target_count)
            .map(|index| Target {
                index,
                is_active: false,
            })
            .collect();
        self.round = None;
        self.clock = Duration::ZERO;
        self.idle_elapsed = Duration::ZERO;
        self.rounds_armed = 0;
        self.final_summary = None;

        info!(
            "session started: {} targets, {:.2}s reaction window",
            self.settings.target_count,
            self.settings.max_reaction_time.as_secs_f64()
        );
        Ok(Vec::new())
    }

    /// Ends the session. An armed round is dropped without an outcome.
    pub fn stop(&mut self) -> Vec<GameEvent> {
        if self.session == SessionState::Stopped {
            return Vec::new();
        }

        if self.round.is_some() {
            debug!("stop during {} round, no outcome recorded", self.phase);
        }
        self.disarm();
        self.session = SessionState::Stopped;

        let summary = self.engine.summarize(&self.stats);
        info!(
            "session ended: score {}, {} correct, {} wrong",
            summary.score, summary.correct, summary.wrong
        );
        self.final_summary = Some(summary.clone());
        vec![GameEvent::SessionEnded { summary }]
    }

    pub fn tick(&mut self, delta: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.session == SessionState::Stopped {
            return events;
        }

        self.clock = self.clock.saturating_add(delta);
        match self.phase {
            RoundPhase::Idle => {
                self.idle_elapsed = self.idle_elapsed.saturating_add(delta);
                if self.idle_elapsed >= self.settings.round_gap {
                    events.push(self.arm());
                }
            }
            RoundPhase::Armed => {
                let timed_out = match self.round.as_mut() {
                    Some(round) => {
                        round.elapsed = round.elapsed.saturating_add(delta);
                        round.elapsed >= self.settings.max_reaction_time
                    }
                    None => false,
                };
                if timed_out {
                    events.push(self.resolve(Outcome::Timeout));
                }
            }
            RoundPhase::Presenting | RoundPhase::Resolving => {}
        }

        events
    }

    /// Judges a pick against the state as of the most recent tick.
    pub fn select(&mut self, index: usize) -> Vec<GameEvent> {
        if self.session == SessionState::Stopped || self.phase != RoundPhase::Armed {
            return Vec::new();
        }
        let Some(round) = self.round else {
            return Vec::new();
        };

        let outcome = if index == round.active_target_index {
            Outcome::Correct(round.elapsed)
        } else {
            Outcome::Wrong
        };
        vec![self.resolve(outcome)]
    }

    fn arm(&mut self) -> GameEvent {
        self.phase = RoundPhase::Presenting;
        let target = self.picker.pick(self.settings.target_count);
        for t in self.targets.iter_mut() {
            t.is_active = t.index == target;
        }

        self.round = Some(RoundState {
            active: true,
            active_target_index: target,
            start_time: self.clock,
            elapsed: Duration::ZERO,
        });
        self.rounds_armed += 1;
        self.phase = RoundPhase::Armed;

        debug!("round {} armed, target {target}", self.rounds_armed);
        GameEvent::RoundArmed { target }
    }

    fn resolve(&mut self, outcome: Outcome) -> GameEvent {
        self.phase = RoundPhase::Resolving;
        self.stats = self.engine.apply_outcome(outcome, &self.stats);
        self.disarm();

        debug!(
            "round {} resolved: {outcome}, score {}",
            self.rounds_armed, self.stats.total_score
        );
        GameEvent::RoundResolved {
            outcome,
            stats: self.stats.clone(),
        }
    }

    fn disarm(&mut self) {
        for t in self.targets.iter_mut() {
            t.is_active = false;
        }
        self.round = None;
        self.idle_elapsed = Duration::ZERO;
        self.phase = RoundPhase::Idle;
    }

    pub fn session_state(&self) -> SessionState {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.session == SessionState::Running
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn active_target(&self) -> Option<usize> {
        self.round.map(|r| r.active_target_index)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn summary(&self) -> SessionSummary {
        self.engine.summarize(&self.stats)
    }

    /// Summary frozen by the last `stop`, cleared by `start`
    pub fn final_summary(&self) -> Option<&SessionSummary> {
        self.final_summary.as_ref()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    pub fn rounds_armed(&self) -> u32 {
        self.rounds_armed
    }

    /// Remaining reaction window for the armed round
    pub fn time_left(&self) -> Option<Duration> {
        self.round
            .map(|r| self.settings.max_reaction_time.saturating_sub(r.elapsed))
    }
}
