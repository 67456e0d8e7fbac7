//! # sr-pricingengines
//!
//! Closed-form option pricing on top of the affine bond analytics.
//!
//! ## Engines
//!
//! - [`ForwardOptionPricer`]: Black-like calls and puts on the forward
//!   discount ratio `Z = P(t,T1)/P(t,T2)`
//! - [`CapletFloorletPricer`]: caplets and floorlets as puts and calls on
//!   `Z` at the adjusted strike `K* = 1/(1 + δK)`, plus cap/floor strips

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod caplet_floorlet_pricer;
pub mod forward_option_pricer;

pub use caplet_floorlet_pricer::{adjusted_strike, CapletFloorletPricer};
pub use forward_option_pricer::{ForwardOptionPricer, OptionType, PRICE_TOLERANCE};
