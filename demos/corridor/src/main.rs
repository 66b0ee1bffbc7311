//! corridor: two squads swap rooms through a narrow doorway.
//!
//! Each squad spawns at random tiles in its own room and is sent to random
//! tiles in the other room.  Every agent has to pass the two-tile door in
//! the dividing wall, so the run exercises reservations, diagonal squeeze
//! checks and blocked re-planning under heavy contention.
//!
//! ```text
//! cargo run -p corridor -- [config.json]
//! RUST_LOG=tg_motion=debug cargo run -p corridor
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use tg_core::{AgentId, SimConfig, SimRng, TileCoord, WorldPos, tile_to_world};
use tg_motion::MotionConfig;
use tg_output::{CsvWriter, SnapshotObserver};
use tg_path::AStarConfig;
use tg_sim::{SimBuilder, SimObserver};
use tg_terrain::TerrainIndex;

// ── Map ───────────────────────────────────────────────────────────────────────

// 21 × 7: west room x 0..=9, wall at x = 10 with a door at y 3..=4,
// east room x 11..=20.
const MAP: &str = "\
..........#..........
..........#..........
..........#..........
.....................
.....................
..........#..........
..........#..........";

const ROOM_WIDTH:  i32 = 10;
const ROOM_HEIGHT: i32 = 7;
const EAST_ROOM_X: i32 = 11;

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:        SimConfig,
    motion:     MotionConfig,
    astar:      AStarConfig,
    squad_size: usize,
    output_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                total_ticks:             6_000, // 2 minutes at 50 Hz
                snapshot_interval_ticks: 25,
                ..SimConfig::default()
            },
            motion:     MotionConfig::default(),
            astar:      AStarConfig::default(),
            squad_size: 6,
            output_dir: PathBuf::from("output/corridor"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing {}", path.display()))
}

fn parse_config(text: &str) -> Result<DemoConfig> {
    let cfg: DemoConfig = serde_json::from_str(text)?;
    let room_tiles = (ROOM_WIDTH * ROOM_HEIGHT) as usize;
    if cfg.squad_size > room_tiles {
        bail!("squad_size {} does not fit a {room_tiles}-tile room", cfg.squad_size);
    }
    Ok(cfg)
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A random free tile centre inside the room starting at `x0`.
fn room_tile(rng: &mut SimRng, x0: i32) -> WorldPos {
    let t = rng.tile_in(ROOM_WIDTH, ROOM_HEIGHT);
    tile_to_world(TileCoord::new(x0 + t.x, t.y))
}

/// Tallies tile steps and planner failures for the run summary.
#[derive(Default)]
struct ArrivalLog {
    tiles_stepped: u64,
    path_failures: u64,
}

impl SimObserver for ArrivalLog {
    fn on_arrival(&mut self, _tick: tg_core::Tick, _agent: AgentId, _tile: TileCoord) {
        self.tiles_stepped += 1;
    }

    fn on_path_failed(&mut self, tick: tg_core::Tick, agent: AgentId, error: &tg_path::PathError) {
        self.path_failures += 1;
        tracing::warn!(%tick, %agent, %error, "path failed");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg = std::env::args().nth(1).map(PathBuf::from);
    let cfg = load_config(arg.as_deref())?;
    let mut rng = SimRng::new(cfg.sim.seed);

    // 1. Terrain.
    let terrain = Arc::new(TerrainIndex::from_ascii(MAP)?);
    tracing::info!(tiles = terrain.len(), size = ?terrain.size(), "terrain loaded");

    // 2. Sim.
    let mut sim = SimBuilder::grid(cfg.sim.clone(), terrain, cfg.astar.clone())
        .motion(cfg.motion.clone())
        .build()?;

    // 3. Squads: west agents first, then east.
    let mut squads: Vec<(AgentId, i32)> = Vec::with_capacity(cfg.squad_size * 2);
    for home_x in [0, EAST_ROOM_X] {
        let mut placed = 0;
        while placed < cfg.squad_size {
            // Occupied picks are simply retried.
            if let Ok(id) = sim.spawn_agent(room_tile(&mut rng, home_x)) {
                squads.push((id, home_x));
                placed += 1;
            }
        }
    }

    // 4. Goals in the opposite room.
    let mut goals: Vec<(AgentId, TileCoord)> = Vec::with_capacity(squads.len());
    for &(id, home_x) in &squads {
        let target_x = if home_x == 0 { EAST_ROOM_X } else { 0 };
        let goal = room_tile(&mut rng, target_x);
        sim.request_move(id, goal)?;
        goals.push((id, tg_core::world_to_tile(goal)?));
    }

    // 5. Output.
    std::fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("creating {}", cfg.output_dir.display()))?;
    let writer = CsvWriter::new(&cfg.output_dir)?;
    let mut obs = (SnapshotObserver::new(writer, &cfg.sim), ArrivalLog::default());

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.0.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    let reached = goals
        .iter()
        .filter(|&&(id, goal)| sim.current_tile(id).is_ok_and(|t| t == goal))
        .count();
    println!("Simulated {} in {:.3} s wall time", sim.clock, elapsed.as_secs_f64());
    println!(
        "  {reached}/{} agents on their goal tile, {} tile steps, {} path failures",
        goals.len(),
        obs.1.tiles_stepped,
        obs.1.path_failures
    );
    println!("  output written to {}", cfg.output_dir.display());
    println!();

    println!("{:<10} {:<12} {:<12} {:<10}", "Agent", "Tile", "Goal", "State");
    println!("{}", "-".repeat(46));
    for &(id, goal) in &goals {
        println!(
            "{:<10} {:<12} {:<12} {:<10}",
            id.to_string(),
            sim.current_tile(id)?.to_string(),
            goal.to_string(),
            sim.movement(id)?.as_str(),
        );
    }

    Ok(())
}
