//! Hull-White (extended Vasicek) model.
//!
//! ```text
//! dr = (θ(t) − α r) dt + σ dW
//! ```
//!
//! Discount bond price `P(t,T) = A(t,T) exp(−B(t,T) r(t))`, where `B` is
//! the Vasicek one and
//!
//! ```text
//! ln A(t,T) = −∫_t^T θ(s) B(s,T) ds + σ²/2 ∫_t^T B(s,T)² ds
//! ```
//!
//! For a drift fitted to an initial forward curve this collapses to the
//! curve-consistent form
//!
//! ```text
//! A(t,T) = P(0,T)/P(0,t) · exp(B(t,T) f(0,t) − σ²/(4α) (1 − e^{−2αt}) B(t,T)²)
//! ```

use crate::affine::bond_b;
use crate::parameters::ModelParameters;
use crate::short_rate_model::{OneFactorModel, ShortRateModel};
use sr_core::{ensure_order, ensure_post, DiscountFactor, Real, Result, Time, DEGENERATE_ALPHA};
use sr_processes::{HullWhiteProcess, StochasticProcess1D, ThetaFunction};

/// Simpson panels for `∫ θ(s) B(s,T) ds` with a caller-supplied `θ`.
const SIMPSON_INTERVALS: usize = 256;

/// Hull-White one-factor model.
///
/// `params.theta()` is only read by [`HullWhite::from_parameters`]; the
/// drift itself is the [`ThetaFunction`].
#[derive(Debug, Clone)]
pub struct HullWhite {
    params: ModelParameters,
    theta: ThetaFunction,
}

impl HullWhite {
    /// Create a model with drift `theta`.
    pub fn new(params: ModelParameters, theta: ThetaFunction) -> Self {
        Self { params, theta }
    }

    /// The Vasicek-equivalent model: `θ(t) = α · params.theta()`.
    pub fn from_parameters(params: ModelParameters) -> Self {
        Self::new(params, ThetaFunction::Constant(params.alpha() * params.theta()))
    }

    /// The drift function.
    pub fn theta_function(&self) -> &ThetaFunction {
        &self.theta
    }

    /// `θ(t)`.
    pub fn theta(&self, t: Time) -> Real {
        self.theta.value(t, self.params.alpha(), self.params.sigma())
    }

    /// The short-rate process.
    pub fn process(&self) -> HullWhiteProcess {
        let p = &self.params;
        HullWhiteProcess::new(p.alpha(), p.sigma(), p.r0(), self.theta.clone())
    }

    /// `σ²/2 ∫_t^T B(s,T)² ds` as a function of `τ = T − t`.
    fn convexity(&self, tau: Time) -> Real {
        let (alpha, sigma) = (self.params.alpha(), self.params.sigma());
        let s2 = sigma * sigma;
        if alpha < DEGENERATE_ALPHA {
            s2 * tau * tau * tau / 6.0
        } else {
            let b = bond_b(alpha, tau);
            s2 / (2.0 * alpha * alpha) * (tau - b) - s2 * b * b / (4.0 * alpha)
        }
    }

    /// `∫_t^T θ(s) B(s,T) ds`.
    fn drift_integral(&self, t: Time, big_t: Time) -> Real {
        let alpha = self.params.alpha();
        let tau = big_t - t;
        match &self.theta {
            ThetaFunction::Constant(c) => {
                if alpha < DEGENERATE_ALPHA {
                    c * tau * tau / 2.0
                } else {
                    c * (tau - bond_b(alpha, tau)) / alpha
                }
            }
            _ => {
                let n = SIMPSON_INTERVALS;
                let h = tau / n as Real;
                let f = |s: Time| self.theta(s) * bond_b(alpha, big_t - s);
                let inner: Real = (1..n)
                    .map(|i| {
                        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
                        w * f(t + i as Real * h)
                    })
                    .sum();
                h / 3.0 * (f(t) + inner + f(big_t))
            }
        }
    }

    fn log_a(&self, t: Time, big_t: Time) -> Real {
        match &self.theta {
            ThetaFunction::FittedToCurve(curve) => {
                let alpha = self.params.alpha();
                let s2 = self.params.sigma() * self.params.sigma();
                let b = bond_b(alpha, big_t - t);
                let spread = if alpha < DEGENERATE_ALPHA {
                    s2 * t / 2.0
                } else {
                    s2 / (4.0 * alpha) * (-(-2.0 * alpha * t).exp_m1())
                };
                (curve.discount(big_t) / curve.discount(t)).ln() + b * curve.forward_rate(t)
                    - spread * b * b
            }
            _ => -self.drift_integral(t, big_t) + self.convexity(big_t - t),
        }
    }
}

impl ShortRateModel for HullWhite {
    fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    fn discount_bond(&self, t: Time, big_t: Time, rate: Real) -> Result<DiscountFactor> {
        ensure_order!(big_t >= t, "maturity T ({big_t}) precedes t ({t})");
        let b = bond_b(self.params.alpha(), big_t - t);
        let p = (self.log_a(t, big_t) - b * rate).exp();
        ensure_post!(
            p.is_finite() && p > 0.0,
            "discount bond P({t}, {big_t}) = {p} is not a positive finite number"
        );
        Ok(p)
    }
}

impl OneFactorModel for HullWhite {
    fn short_rate_drift(&self, t: Time, r: Real) -> Real {
        self.theta(t) - self.params.alpha() * r
    }

    fn short_rate_diffusion(&self, _t: Time, _r: Real) -> Real {
        self.params.sigma()
    }

    fn dynamics_process(&self) -> Box<dyn StochasticProcess1D> {
        Box::new(self.process())
    }
}
