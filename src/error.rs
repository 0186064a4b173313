use thiserror::Error;

/// Errors surfaced to the host. Invalid-state input (a click between rounds,
/// a tick while stopped) is never an error and is dropped silently instead.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("at least one target is required")]
    NoTargets,
    #[error("reaction window must be a positive number of seconds, got {0}")]
    InvalidReactionWindow(f64),
    #[error("round gap must be zero or a positive number of seconds, got {0}")]
    InvalidRoundGap(f64),
    #[error("config io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config json failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
