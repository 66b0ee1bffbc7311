//! `tg-motion`: turns a planned route into claimed single-tile steps.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`config`]     | `MotionConfig`: speed, arrival tolerance, re-plan delay       |
//! | [`state`]      | `MovementState`, `MotionState`: per-agent route and phase      |
//! | [`sensor`]     | `ObstacleSensor` trait, `NoObstacles`, `TerrainObstacles`, `TileObstacles` |
//! | [`controller`] | `AgentMotionController`, `StepEvent`, `CompletionOutcome`       |
//! | [`error`]      | `MotionError`, `MotionResult<T>`                               |
//!
//! # Movement model
//!
//! ```text
//!            request_move            path ok, tiles left
//!   Idle ──────────────────▶ (await) ───────────────────▶ Reserving
//!    ▲                                                      │   ▲
//!    │ path done / failed / abort          reserve ok       ▼   │ tiles left
//!    └──────────────────────────────────────────────── Advancing┘
//!                                         reserve denied │
//!                                                        ▼
//!                                    Blocked ── retry every tick ──▶ Reserving
//!                                       └── delay elapsed ──▶ re-plan
//! ```
//!
//! 1. `request_move` drops the agent's reservations and asks the planner for
//!    a route.  Only the newest request's completion is ever applied.
//! 2. Each tick in `Reserving`/`Blocked` the controller tries to reserve the
//!    next tile; on success it walks toward the tile centre.
//! 3. On arrival it hands its occupation over to the new tile
//!    ([`tg_claims::ClaimTable::transfer`]) and moves on.

pub mod config;
pub mod controller;
pub mod error;
pub mod sensor;
pub mod state;


pub use config::{MAX_PROBE_RADIUS, MotionConfig};
pub use controller::{AgentMotionController, CompletionOutcome, StepEvent};
pub use error::{MotionError, MotionResult};
pub use sensor::{NoObstacles, ObstacleSensor, TerrainObstacles, TileObstacles};
pub use state::{MotionState, MovementState};
