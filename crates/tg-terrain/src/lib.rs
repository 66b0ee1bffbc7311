//! `tg-terrain`: static terrain properties baked once, queried many times.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`cell`]    | `TerrainCell`, `TerrainFlags`                                 |
//! | [`index`]   | `TerrainIndex` (sparse lookup), `TerrainIndexBuilder`         |
//! | [`loader`]  | `load_terrain_csv`, `load_terrain_reader`                     |
//! | [`error`]   | `TerrainError`, `TerrainResult<T>`                            |
//!
//! The index is immutable once built.  A tile absent from the bake is
//! reported as `None` by [`TerrainIndex::cell`] and as not walkable by
//! [`TerrainIndex::is_walkable`].

pub mod cell;
pub mod error;
pub mod index;
pub mod loader;

#[cfg(test)]
mod tests;

pub use cell::{TerrainCell, TerrainFlags};
pub use error::{TerrainError, TerrainResult};
pub use index::{TerrainIndex, TerrainIndexBuilder};
pub use loader::{load_terrain_csv, load_terrain_reader};
