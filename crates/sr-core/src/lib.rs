//! # sr-core
//!
//! Core types and error definitions for shortrate-rs.
//!
//! This crate provides the building blocks shared across all other crates
//! in the workspace: the numeric type aliases, the error taxonomy with its
//! `ensure!` family of macros, and the non-fatal [`NumericWarning`] flags
//! that numerical routines attach to their results.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

/// Non-fatal numerical warnings.
pub mod warnings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in (0, 1] for positive rates.
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

/// Mean-reversion speeds below this use the `alpha → 0` limits
/// (`B(s,T) = T − s`, Brownian variance `σ²Δt`).
pub const DEGENERATE_ALPHA: Real = 1e-6;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use warnings::NumericWarning;
