//! Vasicek short-rate model.
//!
//! ```text
//! dr = α(θ − r) dt + σ dW
//! ```
//!
//! Discount bond price: `P(t,T) = A(t,T) exp(−B(t,T) r(t))` with `A` and `B`
//! from [`crate::affine`].

use crate::affine::{bond_b, bond_log_a, AffineAnalytics};
use crate::parameters::{ModelParameters, PricingContext};
use crate::short_rate_model::{OneFactorModel, ShortRateModel};
use sr_core::{ensure_order, DiscountFactor, Real, Result, Time};
use sr_processes::{StochasticProcess1D, VasicekProcess};

/// Vasicek short-rate model: constant `α`, `θ`, `σ` and initial rate `r0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vasicek {
    params: ModelParameters,
}

impl Vasicek {
    /// Create a new Vasicek model.
    pub fn new(params: ModelParameters) -> Self {
        Self { params }
    }

    /// Affine analytics at the valuation time and strike in `context`.
    pub fn analytics(&self, context: PricingContext) -> AffineAnalytics {
        AffineAnalytics::new(self.params, context)
    }

    /// The underlying Ornstein-Uhlenbeck process.
    pub fn process(&self) -> VasicekProcess {
        let p = &self.params;
        VasicekProcess::new(p.alpha(), p.theta(), p.sigma(), p.r0())
    }
}

impl ShortRateModel for Vasicek {
    fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    fn discount_bond(&self, t: Time, big_t: Time, rate: Real) -> Result<DiscountFactor> {
        ensure_order!(big_t >= t, "maturity T ({big_t}) precedes t ({t})");
        let tau = big_t - t;
        Ok((bond_log_a(&self.params, tau) - bond_b(self.params.alpha(), tau) * rate).exp())
    }
}

impl OneFactorModel for Vasicek {
    fn short_rate_drift(&self, _t: Time, r: Real) -> Real {
        self.params.alpha() * (self.params.theta() - r)
    }

    fn short_rate_diffusion(&self, _t: Time, _r: Real) -> Real {
        self.params.sigma()
    }

    fn dynamics_process(&self) -> Box<dyn StochasticProcess1D> {
        Box::new(self.process())
    }
}
