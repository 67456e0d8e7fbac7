//! # sr-processes
//!
//! One-dimensional stochastic processes for the short rate.
//!
//! * [`VasicekProcess`]: `dr = α(θ − r) dt + σ dW`
//! * [`HullWhiteProcess`]: `dr = (θ(t) − α r) dt + σ dW`, with `θ(t)`
//!   constant, caller-supplied, or fitted to a [`ForwardCurve`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod forward_curve;
pub mod hull_white_process;
pub mod stochastic_process;
pub mod vasicek_process;

pub use forward_curve::{FlatForward, ForwardCurve, LinearForwardCurve};
pub use hull_white_process::{HullWhiteProcess, ThetaFunction};
pub use stochastic_process::StochasticProcess1D;
pub use vasicek_process::VasicekProcess;
