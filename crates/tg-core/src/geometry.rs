//! Grid coordinates and world ↔ tile conversions.
//!
//! Tile `(x, y)` covers the half-open square `[x, x+1) × [y, y+1)` in world
//! units, so its centre sits at `(x + 0.5, y + 0.5)`.  All conversions are
//! pure; the only failure mode is a malformed world position (NaN, infinite,
//! or beyond the `i32` tile range), which is rejected with
//! [`TgError::InvalidCoordinate`] before it can reach the claim table.

use std::fmt;

use crate::{TgError, TgResult};

/// Half a tile in world units.
pub const HALF_TILE: f64 = 0.5;

// ── TileCoord ─────────────────────────────────────────────────────────────────

/// Integer address of one grid cell.  Equality and hashing are by value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tile `(dx, dy)` away from `self`, or `None` on `i32` overflow.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<TileCoord> {
        Some(TileCoord::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// `true` when a step from `self` to `to` changes both axes.
    #[inline]
    pub fn is_diagonal_to(self, to: TileCoord) -> bool {
        self.x != to.x && self.y != to.y
    }

    /// The two orthogonal tiles a diagonal step from `self` to `to` passes
    /// between: `(to.x, self.y)` and `(self.x, to.y)`.
    #[inline]
    pub fn corners_toward(self, to: TileCoord) -> [TileCoord; 2] {
        [TileCoord::new(to.x, self.y), TileCoord::new(self.x, to.y)]
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn chebyshev(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for TileCoord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        TileCoord::new(x, y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// A continuous position in world units (1 unit = 1 tile edge).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance in world units.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Step from `self` toward `target` by at most `max_step`, landing exactly
    /// on `target` when it is within reach.
    pub fn move_towards(self, target: WorldPos, max_step: f64) -> WorldPos {
        let dist = self.distance(target);
        if dist <= max_step || dist == 0.0 {
            return target;
        }
        let t = max_step / dist;
        WorldPos::new(self.x + (target.x - self.x) * t, self.y + (target.y - self.y) * t)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

fn axis_to_tile(v: f64) -> Option<i32> {
    if !v.is_finite() {
        return None;
    }
    let t = v.floor();
    if t < i32::MIN as f64 || t > i32::MAX as f64 {
        return None;
    }
    Some(t as i32)
}

/// The tile containing `world`.
///
/// # Errors
///
/// [`TgError::InvalidCoordinate`] if either axis is NaN, infinite, or maps
/// outside the `i32` range.
pub fn world_to_tile(world: WorldPos) -> TgResult<TileCoord> {
    match (axis_to_tile(world.x), axis_to_tile(world.y)) {
        (Some(x), Some(y)) => Ok(TileCoord::new(x, y)),
        _ => Err(TgError::InvalidCoordinate { x: world.x, y: world.y }),
    }
}

/// World-space centre of `tile`.
#[inline]
pub fn tile_to_world(tile: TileCoord) -> WorldPos {
    WorldPos::new(tile.x as f64 + HALF_TILE, tile.y as f64 + HALF_TILE)
}

/// Centre of the tile containing `world`.
pub fn snap_to_center(world: WorldPos) -> TgResult<WorldPos> {
    world_to_tile(world).map(tile_to_world)
}
