//! `tg-core`: foundational types for the `tilegrid` movement coordinator.
//!
//! This crate is a dependency of every other `tg-*` crate.  It intentionally
//! has no `tg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                  |
//! | [`geometry`]    | `TileCoord`, `WorldPos`, world ↔ tile conversions          |
//! | [`graph`]       | `GraphSelector` (diagonal vs orthogonal path graph)        |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]         | `SimRng` (seeded scenario randomness)                      |
//! | [`error`]       | `TgError`, `TgResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TgError, TgResult};
pub use geometry::{TileCoord, WorldPos, snap_to_center, tile_to_world, world_to_tile};
pub use graph::GraphSelector;
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
