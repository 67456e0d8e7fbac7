//! Vasicek (Ornstein-Uhlenbeck) short-rate process.
//!
//! ```text
//! dr = α(θ − r) dt + σ dW
//! ```
//!
//! where `α` is the speed of mean reversion, `θ` the long-run level and `σ`
//! the constant volatility.

use crate::stochastic_process::StochasticProcess1D;
use sr_core::{Real, Time, DEGENERATE_ALPHA};

/// The Vasicek short-rate process.
///
/// Closed-form conditional moments:
/// ```text
/// E[r(t+dt) | r(t)]   = θ + (r(t) − θ) · exp(−α · dt)
/// Var[r(t+dt) | r(t)] = σ² / (2α) · (1 − exp(−2α · dt))
/// ```
/// Below [`DEGENERATE_ALPHA`] the variance is the Brownian `σ² · dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VasicekProcess {
    r0: Real,
    alpha: Real,
    theta: Real,
    sigma: Real,
}

impl VasicekProcess {
    /// Create a new Vasicek process. Parameter validation is the caller's
    /// job (see `sr_models::ModelParameters`).
    pub fn new(alpha: Real, theta: Real, sigma: Real, r0: Real) -> Self {
        Self {
            r0,
            alpha,
            theta,
            sigma,
        }
    }

    /// Speed of mean reversion.
    pub fn alpha(&self) -> Real {
        self.alpha
    }

    /// Long-run level.
    pub fn theta(&self) -> Real {
        self.theta
    }

    /// Volatility.
    pub fn sigma(&self) -> Real {
        self.sigma
    }
}

impl StochasticProcess1D for VasicekProcess {
    fn x0(&self) -> Real {
        self.r0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        self.alpha * (self.theta - x)
    }

    fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
        self.sigma
    }

    fn expectation_1d(&self, _t: Time, x: Real, dt: Time) -> Real {
        self.theta + (x - self.theta) * (-self.alpha * dt).exp()
    }

    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        self.variance_1d(t, x, dt).sqrt()
    }

    fn variance_1d(&self, _t: Time, _x: Real, dt: Time) -> Real {
        let s2 = self.sigma * self.sigma;
        if self.alpha < DEGENERATE_ALPHA {
            s2 * dt
        } else {
            s2 * (-(-2.0 * self.alpha * dt).exp_m1()) / (2.0 * self.alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn drift_vanishes_at_level() {
        let p = VasicekProcess::new(2.0, 0.05, 0.01, 0.05);
        assert_abs_diff_eq!(p.drift_1d(0.0, 0.05), 0.0, epsilon = 1e-15);
        // α(θ − r) = 2 · (0.05 − 0.03)
        assert_abs_diff_eq!(p.drift_1d(0.0, 0.03), 0.04, epsilon = 1e-15);
    }

    #[test]
    fn expectation_mean_reverts() {
        let p = VasicekProcess::new(1.0, 0.0, 0.2, 0.5);
        let e = p.expectation_1d(0.0, 0.5, 1.0);
        assert_abs_diff_eq!(e, 0.5 * (-1.0_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn variance_formula() {
        let (alpha, sigma, dt) = (2.0, 0.3, 0.5);
        let p = VasicekProcess::new(alpha, 0.0, sigma, 0.0);
        let expected = sigma * sigma * (1.0 - (-2.0 * alpha * dt).exp()) / (2.0 * alpha);
        assert_abs_diff_eq!(p.variance_1d(0.0, 0.0, dt), expected, epsilon = 1e-15);
        let std = p.std_deviation_1d(0.0, 0.0, dt);
        assert_abs_diff_eq!(std * std, expected, epsilon = 1e-15);
    }

    #[test]
    fn tiny_alpha_degenerates_to_brownian() {
        let sigma = 0.3;
        let p = VasicekProcess::new(1e-9, 0.04, sigma, 1.0);
        assert_abs_diff_eq!(p.variance_1d(0.0, 1.0, 0.25), sigma * sigma * 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(p.expectation_1d(0.0, 1.0, 0.25), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn closed_form_variance_approaches_limit() {
        let sigma = 0.02;
        let dt = 0.1;
        let near = VasicekProcess::new(1e-4, 0.0, sigma, 0.0).variance_1d(0.0, 0.0, dt);
        assert_abs_diff_eq!(near, sigma * sigma * dt, epsilon = 1e-9);
    }
}
