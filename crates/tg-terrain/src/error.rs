use thiserror::Error;

use tg_core::TileCoord;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("terrain parse error: {0}")]
    Parse(String),

    #[error("tile {tile} has invalid traversal cost {cost}")]
    InvalidCost { tile: TileCoord, cost: f32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TerrainResult<T> = Result<T, TerrainError>;
