//! Hard-obstacle probing.
//!
//! A sensor answers one question: does a circle of `radius` around `point`
//! touch anything an agent must not walk into?  The controller asks it about
//! goals (to choose the route graph) and about the centre of every tile it is
//! about to enter (to abort before walking into an obstacle).

use std::collections::BTreeSet;
use std::sync::Arc;

use tg_core::{TileCoord, WorldPos};
use tg_terrain::TerrainIndex;

use crate::MAX_PROBE_RADIUS;

/// Source of hard-obstacle information.
pub trait ObstacleSensor {
    /// `true` if a hard obstacle intersects the circle.
    fn overlaps(&self, point: WorldPos, radius: f64) -> bool;
}

impl<S: ObstacleSensor + ?Sized> ObstacleSensor for &S {
    fn overlaps(&self, point: WorldPos, radius: f64) -> bool {
        (**self).overlaps(point, radius)
    }
}

impl<S: ObstacleSensor + ?Sized> ObstacleSensor for Box<S> {
    fn overlaps(&self, point: WorldPos, radius: f64) -> bool {
        (**self).overlaps(point, radius)
    }
}

/// Either sensor reporting an obstacle counts.
impl<A: ObstacleSensor, B: ObstacleSensor> ObstacleSensor for (A, B) {
    fn overlaps(&self, point: WorldPos, radius: f64) -> bool {
        self.0.overlaps(point, radius) || self.1.overlaps(point, radius)
    }
}

/// A world with no hard obstacles.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObstacles;

impl ObstacleSensor for NoObstacles {
    fn overlaps(&self, _point: WorldPos, _radius: f64) -> bool {
        false
    }
}

/// Treats every absent or unwalkable terrain tile as a solid unit square.
#[derive(Clone, Debug)]
pub struct TerrainObstacles {
    terrain: Arc<TerrainIndex>,
}

impl TerrainObstacles {
    pub fn new(terrain: Arc<TerrainIndex>) -> Self {
        Self { terrain }
    }
}

impl ObstacleSensor for TerrainObstacles {
    fn overlaps(&self, point: WorldPos, radius: f64) -> bool {
        any_tile_in_circle(point, radius, |tile| !self.terrain.is_walkable(tile))
    }
}

/// A mutable set of blocked tiles (doors, placed structures, debris).
#[derive(Clone, Debug, Default)]
pub struct TileObstacles {
    blocked: BTreeSet<TileCoord>,
}

impl TileObstacles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the tile was not already blocked.
    pub fn block(&mut self, tile: TileCoord) -> bool {
        self.blocked.insert(tile)
    }

    /// Returns `true` if the tile was blocked.
    pub fn unblock(&mut self, tile: TileCoord) -> bool {
        self.blocked.remove(&tile)
    }

    pub fn is_blocked(&self, tile: TileCoord) -> bool {
        self.blocked.contains(&tile)
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}

impl ObstacleSensor for TileObstacles {
    fn overlaps(&self, point: WorldPos, radius: f64) -> bool {
        !self.blocked.is_empty() && any_tile_in_circle(point, radius, |tile| self.is_blocked(tile))
    }
}

// ── Circle / tile-square intersection ────────────────────────────────────────

/// Visit every tile whose unit square intersects the closed circle and
/// return `true` as soon as `solid` does.  The radius is capped at
/// [`MAX_PROBE_RADIUS`].
fn any_tile_in_circle(point: WorldPos, radius: f64, mut solid: impl FnMut(TileCoord) -> bool) -> bool {
    if !point.is_finite() || !radius.is_finite() || radius < 0.0 {
        return false;
    }
    let radius = radius.min(MAX_PROBE_RADIUS);
    let min_x = (point.x - radius).floor();
    let max_x = (point.x + radius).floor();
    let min_y = (point.y - radius).floor();
    let max_y = (point.y + radius).floor();
    if min_x < i32::MIN as f64 || max_x > i32::MAX as f64
        || min_y < i32::MIN as f64 || max_y > i32::MAX as f64
    {
        return false;
    }

    let r2 = radius * radius;
    for ty in (min_y as i32)..=(max_y as i32) {
        for tx in (min_x as i32)..=(max_x as i32) {
            // Closest point of the square [tx, tx+1] x [ty, ty+1] to the centre.
            let cx = point.x.clamp(tx as f64, tx as f64 + 1.0);
            let cy = point.y.clamp(ty as f64, ty as f64 + 1.0);
            let (dx, dy) = (point.x - cx, point.y - cy);
            if dx * dx + dy * dy <= r2 && solid(TileCoord::new(tx, ty)) {
                return true;
            }
        }
    }
    false
}
