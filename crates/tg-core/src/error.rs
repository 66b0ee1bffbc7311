//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `TgError` as one variant
//! via `#[from]`, so an `InvalidCoordinate` raised at a geometry boundary
//! reaches the caller unchanged.

use thiserror::Error;

/// The top-level error type for `tg-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TgError {
    /// A world position was NaN, infinite, or outside the `i32` tile range.
    #[error("invalid world coordinate ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `tg-*` crates.
pub type TgResult<T> = Result<T, TgError>;
