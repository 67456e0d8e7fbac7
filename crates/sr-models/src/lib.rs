//! # sr-models
//!
//! One-factor affine short-rate models and what is built directly on
//! them.
//!
//! ## Layout
//!
//! ```text
//! ModelParameters ──┬── AffineAnalytics   (P(t,T), forwards, volatility, d1/d2)
//!                   ├── Vasicek, HullWhite (ShortRateModel + OneFactorModel)
//!                   └── VasicekCalibrator  (maximum likelihood, emits parameters)
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Inputs ───────────────────────────────────────────────────────────────
pub mod parameters;

// ── Closed-form analytics ────────────────────────────────────────────────
pub mod affine;

// ── Models ───────────────────────────────────────────────────────────────
pub mod hull_white_model;
pub mod short_rate_model;
pub mod vasicek;

// ── Calibration ──────────────────────────────────────────────────────────
pub mod calibration;

// ── Re-exports ───────────────────────────────────────────────────────────
pub use affine::{d1, d2, AffineAnalytics};
pub use calibration::{
    log_likelihood, CalibrationConfig, EstimatedParameters, ObservedSeries, StandardErrors,
    VasicekCalibrator,
};
pub use hull_white_model::HullWhite;
pub use parameters::{ModelParameters, PricingContext};
pub use short_rate_model::{OneFactorModel, ShortRateModel};
pub use vasicek::Vasicek;
