//! # sr-methods
//!
//! Numerical methods for short-rate models.
//!
//! # Modules
//!
//! * [`monte_carlo`]: time grids, path simulation under Euler–Maruyama or
//!   exact Gaussian stepping, and ensemble statistics

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: time grids, path generation, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{
    terminal_statistics, Discretization, Path, PathSimulator, SimulationConfig, GRID_TOLERANCE,
};
