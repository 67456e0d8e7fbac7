//! # sr-math
//!
//! Mathematical utilities: the normal distribution (via statrs), a
//! Nelder–Mead optimizer over nalgebra vectors, seedable Gaussian random
//! number generators, a statistics accumulator and float comparison.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// Derivative-free optimization.
pub mod optimization;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

/// Dense real vector used by the optimizers.
pub type Array = nalgebra::DVector<sr_core::Real>;

/// Dense real matrix.
pub type Matrix = nalgebra::DMatrix<sr_core::Real>;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::close;
pub use distributions::normal_cdf;
pub use random_numbers::{GaussianRng, InverseCumulativeNormalRng, PseudoRandomNormalRng};
pub use statistics::Statistics;
