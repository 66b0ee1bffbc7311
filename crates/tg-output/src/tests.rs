//! Tests for tg-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;
    use tg_claims::ClaimKind;
    use tg_core::TileCoord;
    use tg_motion::MovementState;

    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, ClaimRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64, reserved: Option<TileCoord>) -> AgentSnapshotRow {
        AgentSnapshotRow {
            tick,
            agent_id,
            x:     agent_id as f64 + 0.5,
            y:     0.5,
            tile:  TileCoord::new(agent_id as i32, 0),
            state: if reserved.is_some() { MovementState::Advancing } else { MovementState::Idle },
            reserved,
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("claims.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("agent_snapshots.csv")),
            ["tick", "agent_id", "x", "y", "tile_x", "tile_y", "state", "reserved_x", "reserved_y"]
        );
        assert_eq!(
            headers(dir.path().join("claims.csv")),
            ["tick", "tile_x", "tile_y", "kind", "agent_id"]
        );
        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            ["tick", "elapsed_secs", "moving_agents", "arrivals", "path_failures"]
        );
    }

    #[test]
    fn snapshot_reserved_columns() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5, None), snap_row(1, 5, Some(TileCoord::new(2, -1)))]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5");
        assert_eq!(&rows[0][2], "0.5000");
        assert_eq!(&rows[0][6], "idle");
        assert_eq!(&rows[0][7], "");
        assert_eq!(&rows[1][6], "advancing");
        assert_eq!(&rows[1][7], "2");
        assert_eq!(&rows[1][8], "-1");
    }

    #[test]
    fn claim_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = ClaimRow { tick: 4, tile: TileCoord::new(3, 7), kind: ClaimKind::Reserved, agent_id: 9 };
        w.write_claims(&[row]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("claims.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["4", "3", "7", "reserved", "9"]);
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow { tick: 50, elapsed_secs: 1.0, moving_agents: 3, arrivals: 1, path_failures: 0 };
        w.write_tick_summary(&row).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["50", "1.0000", "3", "1", "0"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use tg_core::{AgentId, SimConfig, WorldPos, tile_to_world, TileCoord};
    use tg_path::AStarConfig;
    use tg_sim::{SimBuilder, SimObserver};
    use tg_terrain::TerrainIndex;

    use crate::row::{AgentSnapshotRow, ClaimRow, TickSummaryRow};
    use crate::{CsvWriter, OutputError, OutputResult, OutputWriter, SnapshotObserver};

    fn c(x: i32, y: i32) -> WorldPos {
        tile_to_world(TileCoord::new(x, y))
    }

    /// Collects rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        snapshots: Vec<AgentSnapshotRow>,
        claims:    Vec<ClaimRow>,
        summaries: Vec<TickSummaryRow>,
        finished:  usize,
    }

    impl OutputWriter for MemoryWriter {
        fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.snapshots.extend_from_slice(rows);
            Ok(())
        }

        fn write_claims(&mut self, rows: &[ClaimRow]) -> OutputResult<()> {
            self.claims.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every write with a distinct message.
    #[derive(Default)]
    struct FailingWriter {
        calls: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.fail()
        }

        fn write_claims(&mut self, _rows: &[ClaimRow]) -> OutputResult<()> {
            self.fail()
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.fail()
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    impl FailingWriter {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }
    }

    fn config(total_ticks: u64, snapshot_interval_ticks: u64) -> SimConfig {
        SimConfig { total_ticks, snapshot_interval_ticks, ..SimConfig::default() }
    }

    fn terrain() -> Arc<TerrainIndex> {
        Arc::new(TerrainIndex::from_ascii("......").unwrap())
    }

    #[test]
    fn snapshots_capture_agents_and_claims() {
        let cfg = config(6, 2);
        let mut sim = SimBuilder::grid(cfg.clone(), terrain(), AStarConfig::default())
            .agents(vec![c(0, 0), c(3, 0), c(5, 0)])
            .build()
            .unwrap();
        let mut obs = SnapshotObserver::new(MemoryWriter::default(), &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        // Interval 2 over 6 ticks: snapshots at 0, 2, 4.
        assert_eq!(w.snapshots.len(), 9);
        assert_eq!(w.claims.len(), 9);
        assert_eq!(w.summaries.len(), 6);
        assert_eq!(w.finished, 1);
        assert_eq!(w.snapshots[1].agent_id, 1);
        assert_eq!(w.snapshots[1].tile, TileCoord::new(3, 0));
    }

    #[test]
    fn summary_counts_arrivals() {
        let cfg = config(200, 0);
        let mut sim = SimBuilder::grid(cfg.clone(), terrain(), AStarConfig::default())
            .agents(vec![c(0, 0)])
            .build()
            .unwrap();
        sim.request_move(AgentId(0), c(2, 0)).unwrap();

        let mut obs = SnapshotObserver::new(MemoryWriter::default(), &cfg);
        sim.run(&mut obs).unwrap();

        let w = obs.into_writer();
        let arrivals: u64 = w.summaries.iter().map(|r| r.arrivals).sum();
        assert_eq!(arrivals, 2);
        assert!(w.summaries.iter().all(|r| r.path_failures == 0));
        assert_eq!(w.summaries[50].elapsed_secs, 50.0 * cfg.step_secs);
    }

    #[test]
    fn first_error_kept() {
        let cfg = config(3, 1);
        let mut obs = SnapshotObserver::new(FailingWriter::default(), &cfg);
        let mut sim = SimBuilder::grid(cfg.clone(), terrain(), AStarConfig::default())
            .agents(vec![c(0, 0)])
            .build()
            .unwrap();
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn csv_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(4, 2);
        let mut sim = SimBuilder::grid(cfg.clone(), terrain(), AStarConfig::default())
            .agents(vec![c(0, 0), c(1, 0)])
            .build()
            .unwrap();
        let mut obs = SnapshotObserver::new(CsvWriter::new(dir.path()).unwrap(), &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 4);
        let mut rdr = csv::Reader::from_path(dir.path().join("claims.csv")).unwrap();
        assert_eq!(rdr.records().count(), 4);
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 4);
    }

    #[test]
    fn noop_hooks_do_not_write() {
        let cfg = config(1, 0);
        let mut obs = SnapshotObserver::new(MemoryWriter::default(), &cfg);
        obs.on_tick_start(tg_core::Tick(0));
        let w = obs.into_writer();
        assert!(w.summaries.is_empty());
    }
}
