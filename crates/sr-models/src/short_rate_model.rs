//! Short-rate model traits.
//!
//! ```text
//! ShortRateModel
//! └── OneFactorModel
//! ```

use crate::parameters::ModelParameters;
use sr_core::{DiscountFactor, Real, Result, Time};
use sr_processes::StochasticProcess1D;

/// A short-rate model with a closed-form zero-coupon bond price.
pub trait ShortRateModel: std::fmt::Debug + Send + Sync {
    /// The model's parameter set.
    fn parameters(&self) -> &ModelParameters;

    /// Discount bond price `P(t, T)` given short rate `rate` at `t`.
    ///
    /// For affine models this is `A(t,T) exp(−B(t,T) r)`. Fails with
    /// `Error::TimeOrdering` when `T < t`.
    fn discount_bond(&self, t: Time, big_t: Time, rate: Real) -> Result<DiscountFactor>;
}

/// A one-factor short-rate model `dr = μ(t,r) dt + σ(t,r) dW`.
pub trait OneFactorModel: ShortRateModel {
    /// Instantaneous drift `μ(t, r)`.
    fn short_rate_drift(&self, t: Time, r: Real) -> Real;

    /// Instantaneous diffusion `σ(t, r)`.
    fn short_rate_diffusion(&self, t: Time, r: Real) -> Real;

    /// A process for the short rate, started at `r0`, for path simulation.
    fn dynamics_process(&self) -> Box<dyn StochasticProcess1D>;
}
