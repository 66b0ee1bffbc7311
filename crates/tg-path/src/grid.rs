//! Default planner: A* over a baked [`TerrainIndex`].
//!
//! # Cost units
//!
//! Step costs are integers in **milli-tiles**: an orthogonal step onto a
//! cell of cost `c` costs `round(1000 * c)`, a diagonal one
//! `round(1414 * c)`.  Integer costs keep the heap ordering exact and the
//! search deterministic.
//!
//! # Graphs
//!
//! - [`GraphSelector::Diagonal`]: 8-connected.  A diagonal step is only legal
//!   when both orthogonal corner tiles are walkable, so routes never clip a
//!   wall corner.
//! - [`GraphSelector::Orthogonal`]: 4-connected.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use tg_core::{GraphSelector, TileCoord, tile_to_world, world_to_tile};
use tg_terrain::TerrainIndex;

use crate::{CompletionQueue, PathCompletion, PathError, PathPlanner, PathRequest, PathResult, PathTicket};

const ORTHO_MILLI: f64 = 1_000.0;
const DIAG_MILLI:  f64 = 1_414.0;

const ORTHO_STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAG_STEPS:  [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Tuning for [`GridPlanner`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AStarConfig {
    /// Ticks between a request and the delivery of its result.  0 delivers
    /// on the next poll of the issuing tick.
    pub latency_ticks: u64,
    /// Give up after expanding this many nodes.
    pub max_expansions: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            latency_ticks:  1,
            max_expansions: 200_000,
        }
    }
}

/// Grid A* planner with simulated asynchronous delivery.
///
/// Routes are computed when requested and parked in a [`CompletionQueue`]
/// for `latency_ticks`.  Cancelled tickets never complete.
pub struct GridPlanner {
    terrain: Arc<TerrainIndex>,
    config:  AStarConfig,
    pending: CompletionQueue,
    /// Smallest walkable cell cost, in milli-units; scales the heuristic so it
    /// stays admissible on cheap terrain.
    min_cost_milli: u64,
}

impl GridPlanner {
    pub fn new(terrain: Arc<TerrainIndex>, config: AStarConfig) -> Self {
        let min_cost = terrain
            .iter()
            .filter(|(_, c)| c.walkable)
            .map(|(_, c)| c.cost)
            .fold(f32::INFINITY, f32::min);
        let min_cost_milli = if min_cost.is_finite() {
            (f64::from(min_cost) * ORTHO_MILLI).floor() as u64
        } else {
            0
        };
        Self {
            terrain,
            config,
            pending: CompletionQueue::new(),
            min_cost_milli,
        }
    }

    pub fn terrain(&self) -> &TerrainIndex {
        &self.terrain
    }

    /// Number of results computed but not yet delivered.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Synchronous A* from `from` to `to`.  The returned tiles start with
    /// `from` and end with `to`.
    pub fn find_path(&self, from: TileCoord, to: TileCoord, graph: GraphSelector) -> PathResult<Vec<TileCoord>> {
        if !self.terrain.is_walkable(to) {
            return Err(PathError::Unwalkable(to));
        }
        if from == to {
            return Ok(vec![from]);
        }

        let mut g_cost: HashMap<TileCoord, u64> = HashMap::new();
        let mut came_from: HashMap<TileCoord, TileCoord> = HashMap::new();
        // Min-heap on (f, g, tile); the tile's Ord breaks ties deterministically.
        let mut open: BinaryHeap<Reverse<(u64, u64, TileCoord)>> = BinaryHeap::new();

        g_cost.insert(from, 0);
        open.push(Reverse((self.heuristic(from, to), 0, from)));

        let mut expansions = 0usize;
        while let Some(Reverse((_, g, tile))) = open.pop() {
            if tile == to {
                return Ok(reconstruct(&came_from, from, to));
            }
            if g > g_cost.get(&tile).copied().unwrap_or(u64::MAX) {
                continue;
            }
            expansions += 1;
            if expansions > self.config.max_expansions {
                return Err(PathError::SearchLimit(self.config.max_expansions));
            }

            for (next, step) in self.neighbours(tile, graph) {
                let new_g = g.saturating_add(step);
                if new_g < g_cost.get(&next).copied().unwrap_or(u64::MAX) {
                    g_cost.insert(next, new_g);
                    came_from.insert(next, tile);
                    open.push(Reverse((new_g.saturating_add(self.heuristic(next, to)), new_g, next)));
                }
            }
        }

        Err(PathError::NoRoute { from, to })
    }

    fn neighbours(&self, tile: TileCoord, graph: GraphSelector) -> Vec<(TileCoord, u64)> {
        let mut out = Vec::with_capacity(8);
        for (dx, dy) in ORTHO_STEPS {
            if let Some(next) = tile.checked_offset(dx, dy) {
                if let Some(cost) = self.terrain.cost(next) {
                    out.push((next, (f64::from(cost) * ORTHO_MILLI).round() as u64));
                }
            }
        }
        if graph.allows_diagonal() {
            for (dx, dy) in DIAG_STEPS {
                let Some(next) = tile.checked_offset(dx, dy) else { continue };
                let Some(cost) = self.terrain.cost(next) else { continue };
                let [a, b] = tile.corners_toward(next);
                if self.terrain.is_walkable(a) && self.terrain.is_walkable(b) {
                    out.push((next, (f64::from(cost) * DIAG_MILLI).round() as u64));
                }
            }
        }
        out
    }

    /// Octile distance scaled by the cheapest walkable cost.
    fn heuristic(&self, a: TileCoord, b: TileCoord) -> u64 {
        let dx = u64::from(a.x.abs_diff(b.x));
        let dy = u64::from(a.y.abs_diff(b.y));
        let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
        // 414 = DIAG_MILLI - ORTHO_MILLI; admissible for both graphs.
        let milli_tiles = hi * 1_000 + lo * 414;
        milli_tiles.saturating_mul(self.min_cost_milli) / 1_000
    }

    fn solve(&self, request: &PathRequest) -> PathResult<Vec<tg_core::WorldPos>> {
        let from = world_to_tile(request.from)?;
        let to = world_to_tile(request.to)?;
        let tiles = self.find_path(from, to, request.graph)?;
        Ok(tiles.into_iter().map(tile_to_world).collect())
    }
}

fn reconstruct(came_from: &HashMap<TileCoord, TileCoord>, from: TileCoord, to: TileCoord) -> Vec<TileCoord> {
    let mut tiles = vec![to];
    let mut cur = to;
    while cur != from {
        match came_from.get(&cur) {
            Some(&prev) => {
                tiles.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    tiles.reverse();
    tiles
}

impl PathPlanner for GridPlanner {
    fn request_path(&mut self, request: PathRequest) {
        let result = self.solve(&request);
        if let Err(e) = &result {
            tracing::debug!(ticket = %request.ticket, error = %e, "path search failed");
        }
        let due = request.issued_at.offset(self.config.latency_ticks);
        self.pending.push(due, PathCompletion { ticket: request.ticket, result });
    }

    fn cancel(&mut self, ticket: PathTicket) {
        if self.pending.cancel(ticket) {
            tracing::trace!(%ticket, "cancelled pending path");
        }
    }

    fn poll_completed(&mut self, now: tg_core::Tick) -> Vec<PathCompletion> {
        self.pending.drain_due(now)
    }
}
