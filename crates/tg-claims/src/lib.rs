//! `tg-claims`: who stands on, and who is about to enter, each tile.
//!
//! # Crate layout
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`claim`]  | `ClaimKind`, `Claim`                              |
//! | [`table`]  | `ClaimTable`: the shared authoritative table     |
//!
//! # Claim model
//!
//! Every tile has at most one **Occupied** claim (an agent is standing there)
//! and at most one **Reserved** claim (an agent will step there next).  Every
//! agent holds at most one claim of each kind.  Agents consult the table
//! before each step; it is the only agent state visible to other agents.
//!
//! # Concurrency
//!
//! `ClaimTable` is a plain owned value.  The sim hands `&mut ClaimTable` to
//! one agent update at a time, so a `can_reserve` check followed by
//! `reserve`, and the three writes of [`ClaimTable::transfer`], never
//! interleave with another agent.  A multi-threaded host must wrap the table
//! in a lock and use the fused [`ClaimTable::try_reserve`] /
//! [`ClaimTable::transfer`] calls under that lock.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `fx-hash` | Use `rustc_hash::FxHashMap` for the claim maps.      |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Claim`.        |

pub mod claim;
pub mod table;


pub use claim::{Claim, ClaimKind};
pub use table::ClaimTable;
