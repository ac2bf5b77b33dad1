use thiserror::Error;

use crate::stage::GameStage;

/// Rejected match configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("Damping must lie in (0, 1), got {0}")]
    DampingOutOfRange(f32),

    #[error("Pocket radius {pocket} must exceed ball radius {ball}")]
    PocketTooSmall { pocket: f32, ball: f32 },

    #[error("Player {seat} has an empty name")]
    EmptyName { seat: usize },
}

/// Rejected host command
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("{command} is not allowed during {stage:?}")]
    WrongStage {
        command: &'static str,
        stage: GameStage,
    },

    #[error("Balls are still moving")]
    BallsMoving,

    #[error("A shot is already in progress")]
    ShotInProgress,

    #[error("The match is over")]
    MatchOver,
}
