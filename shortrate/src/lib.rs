//! # shortrate
//!
//! One-factor affine short-rate models in Rust: Hull-White and Vasicek
//! path simulation, closed-form zero-coupon bond and caplet/floorlet
//! pricing, and maximum-likelihood calibration of Vasicek parameters.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `sr-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use shortrate::models::{ModelParameters, PricingContext};
//! use shortrate::pricingengines::CapletFloorletPricer;
//!
//! let params = ModelParameters::new(0.10, 0.09, 0.2, 0.05)?;
//! let pricer = CapletFloorletPricer::new(params, PricingContext::new(0.0, 1.25)?);
//! let caplet = pricer.caplet(0.5, 1.0, 0.01)?;
//! assert!((caplet - 0.0314).abs() < 1e-4);
//! # Ok::<(), shortrate::core::Error>(())
//! ```
//!
//! Simulation takes its randomness from the caller:
//!
//! ```rust
//! use shortrate::math::PseudoRandomNormalRng;
//! use shortrate::methods::{PathSimulator, SimulationConfig};
//! use shortrate::models::{ModelParameters, Vasicek};
//!
//! let model = Vasicek::new(ModelParameters::new(0.5, 0.01, 0.04, 0.03)?);
//! let sim = PathSimulator::from_model(&model, SimulationConfig::new(1.0, 1.0 / 252.0)?)?;
//! let path = sim.simulate(&mut PseudoRandomNormalRng::from_seed(42))?;
//! assert_eq!(path.steps(), 252);
//! # Ok::<(), shortrate::core::Error>(())
//! ```
//!
//! Library code logs through `tracing` and installs no subscriber.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error and warning definitions.
pub use sr_core as core;

/// Normal distribution, optimisation, RNG and statistics.
pub use sr_math as math;

/// Short-rate processes and forward curves.
pub use sr_processes as processes;

/// Models, affine analytics and calibration.
pub use sr_models as models;

/// Monte Carlo path simulation.
pub use sr_methods as methods;

/// Option pricing engines.
pub use sr_pricingengines as pricingengines;
