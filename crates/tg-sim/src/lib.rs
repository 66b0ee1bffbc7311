//! `tg-sim`: fixed-step tick loop for the tilegrid movement coordinator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in now..config.total_ticks:
//!   ① Deliver: drain PathPlanner::poll_completed(tick); each completion goes
//!               to its agent, which discards it unless it is the newest.
//!   ② Move   : for each live agent in ascending AgentId order:
//!                 Reserving/Blocked → try to reserve the next tile
//!                 Advancing         → walk; on arrival transfer occupation
//!   ③ Observe: on_arrival / on_path_failed as they happen, then
//!               on_tick_end and (every N ticks) on_snapshot.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                          |
//! |-----------|-------------------------------------------------|
//! | `fx-hash` | FxHash maps in the claim table.                 |
//! | `serde`   | Serde derives on configs and value types.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tg_sim::{NoopObserver, SimBuilder};
//!
//! let terrain = Arc::new(TerrainIndex::from_ascii("..........")?);
//! let mut sim = SimBuilder::grid(SimConfig::default(), terrain, AStarConfig::default())
//!     .agents(vec![WorldPos::new(0.5, 0.5)])
//!     .build()?;
//! sim.request_move(AgentId(0), WorldPos::new(9.5, 0.5))?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod arena;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use arena::AgentArena;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
