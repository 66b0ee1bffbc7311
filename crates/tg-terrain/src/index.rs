//! Sparse terrain lookup and its builder.

use std::collections::HashMap;

use tg_core::TileCoord;

use crate::{TerrainCell, TerrainError, TerrainFlags, TerrainResult};

// ── TerrainIndex ──────────────────────────────────────────────────────────────

/// Immutable map from tile to baked [`TerrainCell`].
///
/// Do not construct directly; use [`TerrainIndexBuilder`], [`TerrainIndex::from_ascii`]
/// or the CSV loader.
#[derive(Clone, Debug, Default)]
pub struct TerrainIndex {
    cells: HashMap<TileCoord, TerrainCell>,
    /// Inclusive `(min, max)` corners of all baked tiles.
    bounds: Option<(TileCoord, TileCoord)>,
}

impl TerrainIndex {
    /// An index with no baked tiles; every query reports "absent".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Baked properties of `tile`, or `None` if the bake never saw it.
    #[inline]
    pub fn cell(&self, tile: TileCoord) -> Option<&TerrainCell> {
        self.cells.get(&tile)
    }

    /// `false` if `tile` is absent from the bake or explicitly unwalkable.
    #[inline]
    pub fn is_walkable(&self, tile: TileCoord) -> bool {
        self.cells.get(&tile).is_some_and(|c| c.walkable)
    }

    /// Traversal cost of a walkable tile.
    #[inline]
    pub fn cost(&self, tile: TileCoord) -> Option<f32> {
        self.cells.get(&tile).filter(|c| c.walkable).map(|c| c.cost)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Inclusive bounding corners of the baked area.
    pub fn bounds(&self) -> Option<(TileCoord, TileCoord)> {
        self.bounds
    }

    /// `(width, height)` of the baked bounding box, `(0, 0)` when empty.
    pub fn size(&self) -> (u32, u32) {
        match self.bounds {
            None => (0, 0),
            Some((lo, hi)) => (lo.x.abs_diff(hi.x) + 1, lo.y.abs_diff(hi.y) + 1),
        }
    }

    /// Nearest walkable tile to `tile`, searching square rings of growing
    /// Chebyshev radius up to `max_radius`.  Within a ring the Euclidean-closest
    /// tile wins; remaining ties go to the smallest `(y, x)`.
    pub fn nearest_walkable(&self, tile: TileCoord, max_radius: u32) -> Option<TileCoord> {
        if self.is_walkable(tile) {
            return Some(tile);
        }
        let max_radius = i32::try_from(max_radius).unwrap_or(i32::MAX);
        for r in 1..=max_radius {
            let mut best: Option<(i64, TileCoord)> = None;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs() != r && dy.abs() != r {
                        continue;
                    }
                    let Some(candidate) = tile.checked_offset(dx, dy) else {
                        continue;
                    };
                    if !self.is_walkable(candidate) {
                        continue;
                    }
                    let d2 = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
                    let better = match best {
                        None => true,
                        Some((bd, bt)) => d2 < bd || (d2 == bd && (candidate.y, candidate.x) < (bt.y, bt.x)),
                    };
                    if better {
                        best = Some((d2, candidate));
                    }
                }
            }
            if let Some((_, t)) = best {
                return Some(t);
            }
        }
        None
    }

    /// Iterator over every baked `(tile, cell)` pair in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &TerrainCell)> + '_ {
        self.cells.iter().map(|(t, c)| (*t, c))
    }

    /// Build an index from an ASCII map.  Line `n` is row `y = n`, column
    /// `m` is `x = m`.
    ///
    /// | Char | Cell                         |
    /// |------|------------------------------|
    /// | `.`  | walkable ground              |
    /// | `#`  | wall (baked, not walkable)   |
    /// | `~`  | walkable water, cost 2       |
    /// | `^`  | walkable spikes, cost 4      |
    /// | `/`  | walkable slippery ground     |
    /// | ` `  | absent from the bake         |
    pub fn from_ascii(map: &str) -> TerrainResult<TerrainIndex> {
        let mut b = TerrainIndexBuilder::new();
        for (y, line) in map.lines().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    ' ' => continue,
                    '.' => TerrainCell::ground(),
                    '#' => TerrainCell::wall(),
                    '~' => TerrainCell::ground().with_cost(2.0).with_flags(TerrainFlags::WATER),
                    '^' => TerrainCell::ground().with_cost(4.0).with_flags(TerrainFlags::SPIKE),
                    '/' => TerrainCell::ground().with_flags(TerrainFlags::SLIPPERY),
                    other => {
                        return Err(TerrainError::Parse(format!(
                            "unknown map character {other:?} at column {x}, line {y}"
                        )));
                    }
                };
                let tile = TileCoord::new(to_i32(x)?, to_i32(y)?);
                b.set_cell(tile, cell)?;
            }
        }
        Ok(b.build())
    }
}

fn to_i32(n: usize) -> TerrainResult<i32> {
    i32::try_from(n).map_err(|_| TerrainError::Parse(format!("map coordinate {n} exceeds i32")))
}

// ── TerrainIndexBuilder ───────────────────────────────────────────────────────

/// Collects cells, then freezes them into a [`TerrainIndex`].
///
/// Setting the same tile twice overwrites the earlier cell.
#[derive(Default)]
pub struct TerrainIndexBuilder {
    cells: HashMap<TileCoord, TerrainCell>,
}

impl TerrainIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `cell` for `tile`.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidCost`] if the cost is negative or not finite.
    pub fn set_cell(&mut self, tile: TileCoord, cell: TerrainCell) -> TerrainResult<()> {
        if !cell.cost.is_finite() || cell.cost < 0.0 {
            return Err(TerrainError::InvalidCost { tile, cost: cell.cost });
        }
        self.cells.insert(tile, cell);
        Ok(())
    }

    /// Fill the inclusive rectangle `lo..=hi` with `cell`.
    pub fn fill(&mut self, lo: TileCoord, hi: TileCoord, cell: TerrainCell) -> TerrainResult<()> {
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                self.set_cell(TileCoord::new(x, y), cell)?;
            }
        }
        Ok(())
    }

    pub fn build(self) -> TerrainIndex {
        let bounds = self.cells.keys().fold(None, |acc: Option<(TileCoord, TileCoord)>, &t| {
            Some(match acc {
                None => (t, t),
                Some((lo, hi)) => (
                    TileCoord::new(lo.x.min(t.x), lo.y.min(t.y)),
                    TileCoord::new(hi.x.max(t.x), hi.y.max(t.y)),
                ),
            })
        });
        TerrainIndex { cells: self.cells, bounds }
    }
}
