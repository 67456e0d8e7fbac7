//! Probability distributions.
//!
//! The standard normal is the only distribution the pricing and
//! calibration code needs; it delegates the error function to `statrs`.

pub mod normal;

pub use normal::{normal_cdf, normal_log_pdf};
