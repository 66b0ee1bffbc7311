//! CSV terrain bake loader.
//!
//! # CSV format
//!
//! One row per baked tile.  Tiles not listed are absent from the index.
//!
//! ```csv
//! x,y,walkable,cost,flags
//! 0,0,true,1.0,
//! 1,0,true,2.0,water
//! 2,0,false,1.0,
//! 3,0,true,1.5,water|slippery
//! ```
//!
//! `flags` is a `|`-separated subset of `water`, `spike`, `slippery` and may
//! be empty.  A repeated `(x, y)` overwrites the earlier row.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tg_core::TileCoord;

use crate::{TerrainCell, TerrainError, TerrainFlags, TerrainIndex, TerrainIndexBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CellRecord {
    x:        i32,
    y:        i32,
    walkable: bool,
    cost:     f32,
    #[serde(default)]
    flags:    String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a baked terrain index from a CSV file.
pub fn load_terrain_csv(path: &Path) -> Result<TerrainIndex, TerrainError> {
    let file = std::fs::File::open(path).map_err(TerrainError::Io)?;
    load_terrain_reader(file)
}

/// Like [`load_terrain_csv`] but accepts any `Read` source.
pub fn load_terrain_reader<R: Read>(reader: R) -> Result<TerrainIndex, TerrainError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = TerrainIndexBuilder::new();

    for result in csv_reader.deserialize::<CellRecord>() {
        let row = result.map_err(|e| TerrainError::Parse(e.to_string()))?;
        let flags = TerrainFlags::parse(&row.flags).ok_or_else(|| {
            TerrainError::Parse(format!(
                "invalid flags {:?} at ({}, {}): expected water|spike|slippery",
                row.flags, row.x, row.y
            ))
        })?;
        builder.set_cell(
            TileCoord::new(row.x, row.y),
            TerrainCell { walkable: row.walkable, cost: row.cost, flags },
        )?;
    }

    Ok(builder.build())
}
