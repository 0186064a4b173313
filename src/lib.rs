// Library surface for the binary and for headless/integration tests.
// The core is `scheduler` + `score`; everything else hosts it in a terminal.
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod picker;
pub mod runtime;
pub mod scheduler;
pub mod score;
pub mod ui;

pub use error::{GameError, Result};
pub use events::{GameEvent, GameListener};
pub use picker::{RandomPicker, ScriptedPicker, TargetPicker};
pub use scheduler::{GameSettings, RoundPhase, RoundScheduler, RoundState, SessionState, Target};
pub use score::{Outcome, ScoreEngine, ScoreRules, SessionStats, SessionSummary};
