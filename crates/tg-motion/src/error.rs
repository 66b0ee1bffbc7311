use tg_core::{AgentId, TgError, TileCoord};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("spawn tile {tile} is already claimed by {by}")]
    SpawnBlocked { tile: TileCoord, by: AgentId },

    #[error("agent {0} has been torn down")]
    TornDown(AgentId),

    #[error("motion configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] TgError),
}

pub type MotionResult<T> = Result<T, MotionError>;
