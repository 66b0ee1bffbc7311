//! Unit tests for tg-terrain.

// ── TerrainFlags / TerrainCell ────────────────────────────────────────────────

#[cfg(test)]
mod cell {
    use crate::{TerrainCell, TerrainFlags};

    #[test]
    fn parse_flag_lists() {
        assert_eq!(TerrainFlags::parse(""), Some(TerrainFlags::NONE));
        assert_eq!(
            TerrainFlags::parse("water|slippery"),
            Some(TerrainFlags::WATER | TerrainFlags::SLIPPERY)
        );
        assert_eq!(TerrainFlags::parse(" spike "), Some(TerrainFlags::SPIKE));
        assert_eq!(TerrainFlags::parse("lava"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let f = TerrainFlags::SPIKE | TerrainFlags::WATER;
        assert_eq!(f.to_string(), "water|spike");
        assert_eq!(TerrainFlags::parse(&f.to_string()), Some(f));
    }

    #[test]
    fn default_cell_is_unit_cost_ground() {
        let c = TerrainCell::default();
        assert!(c.walkable);
        assert_eq!(c.cost, 1.0);
        assert!(c.flags.is_empty());
    }
}

// ── TerrainIndex ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use tg_core::TileCoord;

    use crate::{TerrainCell, TerrainError, TerrainFlags, TerrainIndex, TerrainIndexBuilder};

    #[test]
    fn absent_is_distinct_from_unwalkable() {
        let mut b = TerrainIndexBuilder::new();
        b.set_cell(TileCoord::new(0, 0), TerrainCell::wall()).unwrap();
        let idx = b.build();

        assert!(idx.cell(TileCoord::new(0, 0)).is_some());
        assert!(!idx.is_walkable(TileCoord::new(0, 0)));
        assert!(idx.cell(TileCoord::new(5, 5)).is_none());
        assert!(!idx.is_walkable(TileCoord::new(5, 5)));
    }

    #[test]
    fn empty_index_walks_nothing() {
        let idx = TerrainIndex::empty();
        assert!(idx.is_empty());
        assert_eq!(idx.size(), (0, 0));
        assert!(!idx.is_walkable(TileCoord::new(0, 0)));
    }

    #[test]
    fn negative_cost_rejected() {
        let mut b = TerrainIndexBuilder::new();
        let err = b
            .set_cell(TileCoord::new(1, 1), TerrainCell::ground().with_cost(-1.0))
            .unwrap_err();
        assert!(matches!(err, TerrainError::InvalidCost { .. }));
    }

    #[test]
    fn ascii_map_parses() {
        let idx = TerrainIndex::from_ascii("..#\n~^/\n . ").unwrap();
        assert!(idx.is_walkable(TileCoord::new(0, 0)));
        assert!(!idx.is_walkable(TileCoord::new(2, 0)));
        assert_eq!(idx.cost(TileCoord::new(0, 1)), Some(2.0));
        assert!(idx.cell(TileCoord::new(0, 1)).unwrap().flags.contains(TerrainFlags::WATER));
        assert!(idx.cell(TileCoord::new(1, 1)).unwrap().flags.contains(TerrainFlags::SPIKE));
        assert!(idx.cell(TileCoord::new(2, 1)).unwrap().flags.contains(TerrainFlags::SLIPPERY));
        assert!(idx.cell(TileCoord::new(0, 2)).is_none());
        assert!(idx.is_walkable(TileCoord::new(1, 2)));
        assert_eq!(idx.len(), 7);
        assert_eq!(idx.size(), (3, 3));
    }

    #[test]
    fn ascii_unknown_char_errors() {
        assert!(TerrainIndex::from_ascii("..X").is_err());
    }

    #[test]
    fn cost_of_wall_is_none() {
        let idx = TerrainIndex::from_ascii(".#").unwrap();
        assert_eq!(idx.cost(TileCoord::new(0, 0)), Some(1.0));
        assert_eq!(idx.cost(TileCoord::new(1, 0)), None);
    }

    #[test]
    fn nearest_walkable_prefers_orthogonal_neighbour() {
        let idx = TerrainIndex::from_ascii(
            "...\n\
             .#.\n\
             ...",
        )
        .unwrap();
        // All four orthogonal neighbours tie on distance; smallest (y, x) wins.
        assert_eq!(idx.nearest_walkable(TileCoord::new(1, 1), 3), Some(TileCoord::new(1, 0)));
        assert_eq!(idx.nearest_walkable(TileCoord::new(0, 0), 3), Some(TileCoord::new(0, 0)));
    }

    #[test]
    fn nearest_walkable_respects_radius() {
        let idx = TerrainIndex::from_ascii("####.").unwrap();
        assert_eq!(idx.nearest_walkable(TileCoord::new(0, 0), 3), None);
        assert_eq!(idx.nearest_walkable(TileCoord::new(0, 0), 4), Some(TileCoord::new(4, 0)));
    }

    #[test]
    fn fill_covers_rectangle() {
        let mut b = TerrainIndexBuilder::new();
        b.fill(TileCoord::new(-1, -1), TileCoord::new(1, 1), TerrainCell::ground()).unwrap();
        let idx = b.build();
        assert_eq!(idx.len(), 9);
        assert_eq!(idx.bounds(), Some((TileCoord::new(-1, -1), TileCoord::new(1, 1))));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tg_core::TileCoord;

    use crate::{TerrainFlags, load_terrain_reader};

    const CSV: &[u8] = b"\
x,y,walkable,cost,flags
0,0,true,1.0,
1,0,true,2.0,water
2,0,false,1.0,
3,0,true,1.5,water|slippery
";

    #[test]
    fn loads_cells() {
        let idx = load_terrain_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(idx.len(), 4);
        assert!(idx.is_walkable(TileCoord::new(0, 0)));
        assert!(!idx.is_walkable(TileCoord::new(2, 0)));
        assert_eq!(idx.cost(TileCoord::new(1, 0)), Some(2.0));
    }

    #[test]
    fn flags_parsed() {
        let idx = load_terrain_reader(Cursor::new(CSV)).unwrap();
        let flags = idx.cell(TileCoord::new(3, 0)).unwrap().flags;
        assert!(flags.contains(TerrainFlags::WATER));
        assert!(flags.contains(TerrainFlags::SLIPPERY));
        assert!(!flags.contains(TerrainFlags::SPIKE));
    }

    #[test]
    fn unknown_flag_errors() {
        let bad = b"x,y,walkable,cost,flags\n0,0,true,1.0,lava\n";
        assert!(load_terrain_reader(Cursor::new(bad.as_slice())).is_err());
    }

    #[test]
    fn negative_cost_errors() {
        let bad = b"x,y,walkable,cost,flags\n0,0,true,-3.0,\n";
        assert!(load_terrain_reader(Cursor::new(bad.as_slice())).is_err());
    }

    #[test]
    fn malformed_row_errors() {
        let bad = b"x,y,walkable,cost,flags\nzero,0,true,1.0,\n";
        assert!(load_terrain_reader(Cursor::new(bad.as_slice())).is_err());
    }
}
