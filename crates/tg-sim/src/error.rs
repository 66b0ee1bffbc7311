use tg_core::{AgentId, TgError, TileCoord};
use tg_motion::MotionError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("tile {tile} is already claimed by {by}")]
    TileOccupied { tile: TileCoord, by: AgentId },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("motion error: {0}")]
    Motion(MotionError),

    #[error(transparent)]
    Core(#[from] TgError),
}

impl From<MotionError> for SimError {
    fn from(e: MotionError) -> Self {
        match e {
            MotionError::SpawnBlocked { tile, by } => SimError::TileOccupied { tile, by },
            MotionError::Core(core) => SimError::Core(core),
            other => SimError::Motion(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
