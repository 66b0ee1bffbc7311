//! Planner error type.

use thiserror::Error;

use tg_core::{TgError, TileCoord};

/// Why a path request produced no route.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: TileCoord, to: TileCoord },

    #[error("goal tile {0} is not walkable")]
    Unwalkable(TileCoord),

    #[error("search gave up after {0} expansions")]
    SearchLimit(usize),

    #[error("planner returned an empty route")]
    Empty,

    #[error(transparent)]
    Core(#[from] TgError),
}

pub type PathResult<T> = Result<T, PathError>;
