//! Unit tests for tg-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_matches_slot() {
        assert_eq!(AgentId(42).index(), 42);
        assert!(AgentId(3) < AgentId(4));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geometry {
    use crate::{TgError, TileCoord, WorldPos, snap_to_center, tile_to_world, world_to_tile};

    #[test]
    fn tile_center_round_trip() {
        for &(x, y) in &[(0, 0), (3, -2), (-7, -7), (1_000, 250), (-1, 0)] {
            let t = TileCoord::new(x, y);
            assert_eq!(world_to_tile(tile_to_world(t)).unwrap(), t);
        }
    }

    #[test]
    fn extreme_tiles_round_trip() {
        for t in [TileCoord::new(i32::MAX, i32::MIN), TileCoord::new(i32::MIN, i32::MAX)] {
            assert_eq!(world_to_tile(tile_to_world(t)).unwrap(), t);
        }
    }

    #[test]
    fn containing_tile_uses_floor() {
        assert_eq!(world_to_tile(WorldPos::new(0.99, 0.01)).unwrap(), TileCoord::new(0, 0));
        assert_eq!(world_to_tile(WorldPos::new(1.0, 2.5)).unwrap(), TileCoord::new(1, 2));
        assert_eq!(world_to_tile(WorldPos::new(-0.2, -1.7)).unwrap(), TileCoord::new(-1, -2));
    }

    #[test]
    fn tile_center_offset() {
        assert_eq!(tile_to_world(TileCoord::new(2, -3)), WorldPos::new(2.5, -2.5));
    }

    #[test]
    fn snap_to_center_snaps() {
        assert_eq!(snap_to_center(WorldPos::new(4.1, 7.9)).unwrap(), WorldPos::new(4.5, 7.5));
    }

    #[test]
    fn nan_rejected() {
        let err = world_to_tile(WorldPos::new(f64::NAN, 1.0)).unwrap_err();
        assert!(matches!(err, TgError::InvalidCoordinate { .. }));
    }

    #[test]
    fn infinite_rejected() {
        assert!(world_to_tile(WorldPos::new(1.0, f64::INFINITY)).is_err());
        assert!(snap_to_center(WorldPos::new(f64::NEG_INFINITY, 0.0)).is_err());
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(world_to_tile(WorldPos::new(1.0e12, 0.0)).is_err());
        assert!(world_to_tile(WorldPos::new(0.0, -1.0e12)).is_err());
    }

    #[test]
    fn diagonal_and_corners() {
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(1, 1);
        assert!(a.is_diagonal_to(b));
        assert!(!a.is_diagonal_to(TileCoord::new(1, 0)));
        assert_eq!(a.corners_toward(b), [TileCoord::new(1, 0), TileCoord::new(0, 1)]);
        assert_eq!(a.chebyshev(TileCoord::new(-3, 2)), 3);
    }

    #[test]
    fn move_towards_clamps_to_target() {
        let a = WorldPos::new(0.0, 0.0);
        let b = WorldPos::new(3.0, 4.0);
        let half = a.move_towards(b, 2.5);
        assert!((half.x - 1.5).abs() < 1e-6 && (half.y - 2.0).abs() < 1e-6);
        assert_eq!(a.move_towards(b, 10.0), b);
        assert_eq!(b.move_towards(b, 0.1), b);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_offset() {
        assert_eq!(Tick(10).offset(3), Tick(13));
        assert_eq!(Tick::ZERO.offset(0), Tick(0));
        assert_eq!(Tick(7).to_string(), "T7");
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(3));
        assert!((clock.elapsed_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.end_tick(), Tick(cfg.total_ticks));
    }

    #[test]
    fn zero_step_rejected() {
        let cfg = SimConfig { step_secs: 0.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.tile_in(20, 20), b.tile_in(20, 20));
        }
    }

    #[test]
    fn tile_in_bounds() {
        let mut r = SimRng::new(1);
        for _ in 0..200 {
            let t = r.tile_in(5, 3);
            assert!((0..5).contains(&t.x) && (0..3).contains(&t.y));
        }
    }
}

#[cfg(test)]
mod graph {
    use crate::GraphSelector;

    #[test]
    fn selector_flags() {
        assert!(GraphSelector::Diagonal.allows_diagonal());
        assert!(!GraphSelector::Orthogonal.allows_diagonal());
        assert_eq!(GraphSelector::default(), GraphSelector::Diagonal);
        assert_eq!(GraphSelector::Orthogonal.to_string(), "orthogonal");
    }
}
