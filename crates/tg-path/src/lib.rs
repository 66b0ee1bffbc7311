//! `tg-path`: path planning as an asynchronous capability.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`planner`] | `PathPlanner` trait, `PathTicket`, `PathRequest`, `PathCompletion` |
//! | [`queue`]   | `CompletionQueue`: results held until their delivery tick      |
//! | [`grid`]    | `GridPlanner`: A* over a `TerrainIndex`, `AStarConfig`          |
//! | [`manual`]  | `ManualPlanner`: records requests, completes them on demand    |
//! | [`error`]   | `PathError`, `PathResult<T>`                                    |
//!
//! # Request lifecycle
//!
//! 1. A motion controller calls [`PathPlanner::request_path`] with a ticket
//!    carrying its agent id and a fresh request generation.
//! 2. On some later tick the host drains [`PathPlanner::poll_completed`] and
//!    hands each completion back to the owning controller.
//! 3. The controller discards completions whose generation is not its
//!    latest; a cancelled ticket may never complete at all.

pub mod error;
pub mod grid;
pub mod manual;
pub mod planner;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{PathError, PathResult};
pub use grid::{AStarConfig, GridPlanner};
pub use manual::ManualPlanner;
pub use planner::{PathCompletion, PathPlanner, PathRequest, PathTicket};
pub use queue::CompletionQueue;
