//! Hull-White (extended Vasicek) short-rate process.
//!
//! ```text
//! dr = (θ(t) − α r) dt + σ dW
//! ```
//!
//! `θ(t)` is deterministic. When fitted to an initial forward curve
//! `f(0, t)` it is
//!
//! ```text
//! θ(t) = ∂f(0,t)/∂t + α f(0,t) + σ²/(2α) · (1 − e^{−2αt})
//! ```

use crate::forward_curve::ForwardCurve;
use crate::stochastic_process::StochasticProcess1D;
use sr_core::{Real, Time, DEGENERATE_ALPHA};
use std::fmt;
use std::sync::Arc;

/// The time-dependent drift level `θ(t)` of a Hull-White process.
#[derive(Clone)]
pub enum ThetaFunction {
    /// `θ(t) = c`. With `c = α·θ_V` this reproduces Vasicek with long-run
    /// mean `θ_V`.
    Constant(Real),
    /// Any caller-supplied deterministic function of time.
    Custom(Arc<dyn Fn(Time) -> Real + Send + Sync>),
    /// Fitted to an initial forward curve.
    FittedToCurve(Arc<dyn ForwardCurve>),
}

impl ThetaFunction {
    /// Wrap a closure as a custom drift.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Time) -> Real + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Fit to `curve`.
    pub fn fitted<C: ForwardCurve + 'static>(curve: C) -> Self {
        Self::FittedToCurve(Arc::new(curve))
    }

    /// Evaluate `θ(t)` for mean reversion `alpha` and volatility `sigma`.
    pub fn value(&self, t: Time, alpha: Real, sigma: Real) -> Real {
        match self {
            Self::Constant(c) => *c,
            Self::Custom(f) => f(t),
            Self::FittedToCurve(curve) => {
                let convexity = if alpha < DEGENERATE_ALPHA {
                    sigma * sigma * t
                } else {
                    sigma * sigma / (2.0 * alpha) * (-(-2.0 * alpha * t).exp_m1())
                };
                curve.forward_slope(t) + alpha * curve.forward_rate(t) + convexity
            }
        }
    }
}

impl fmt::Debug for ThetaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => f.debug_tuple("Constant").field(c).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::FittedToCurve(curve) => f.debug_tuple("FittedToCurve").field(curve).finish(),
        }
    }
}

/// The Hull-White short-rate process.
#[derive(Debug, Clone)]
pub struct HullWhiteProcess {
    r0: Real,
    alpha: Real,
    sigma: Real,
    theta: ThetaFunction,
}

impl HullWhiteProcess {
    /// Create a new Hull-White process.
    pub fn new(alpha: Real, sigma: Real, r0: Real, theta: ThetaFunction) -> Self {
        Self {
            r0,
            alpha,
            sigma,
            theta,
        }
    }

    /// Speed of mean reversion.
    pub fn alpha(&self) -> Real {
        self.alpha
    }

    /// Volatility.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// The drift level `θ(t)`.
    pub fn theta(&self, t: Time) -> Real {
        self.theta.value(t, self.alpha, self.sigma)
    }
}

impl StochasticProcess1D for HullWhiteProcess {
    fn x0(&self) -> Real {
        self.r0
    }

    fn drift_1d(&self, t: Time, x: Real) -> Real {
        self.theta(t) - self.alpha * x
    }

    fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
        self.sigma
    }

    /// Exact for constant `θ`; otherwise `θ` is frozen at the step midpoint.
    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        let theta_mid = self.theta(t + 0.5 * dt);
        if self.alpha < DEGENERATE_ALPHA {
            x + theta_mid * dt
        } else {
            let ema = (-self.alpha * dt).exp();
            x * ema + theta_mid / self.alpha * (1.0 - ema)
        }
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
    use crate::forward_curve::{FlatForward, LinearForwardCurve};
    use crate::vasicek_process::VasicekProcess;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn constant_theta_reproduces_vasicek() {
        let (alpha, theta, sigma, r0) = (0.1, 0.2, 0.09, 0.05);
        let hw = HullWhiteProcess::new(alpha, sigma, r0, ThetaFunction::Constant(alpha * theta));
        let v = VasicekProcess::new(alpha, theta, sigma, r0);
        for (t, x) in [(0.0, 0.05), (0.7, 0.1), (2.0, -0.01)] {
            assert_abs_diff_eq!(hw.drift_1d(t, x), v.drift_1d(t, x), epsilon = 1e-15);
            assert_abs_diff_eq!(
                hw.expectation_1d(t, x, 0.25),
                v.expectation_1d(t, x, 0.25),
                epsilon = 1e-14
            );
            assert_abs_diff_eq!(hw.variance_1d(t, x, 0.25), v.variance_1d(t, x, 0.25), epsilon = 1e-15);
        }
    }

    #[test]
    fn fitted_theta_on_flat_curve() {
        let (alpha, sigma, f) = (0.1, 0.01, 0.05);
        let hw = HullWhiteProcess::new(alpha, sigma, f, ThetaFunction::fitted(FlatForward::new(f)));
        let t = 2.0;
        let expected = alpha * f + sigma * sigma / (2.0 * alpha) * (1.0 - (-2.0 * alpha * t).exp());
        assert_abs_diff_eq!(hw.theta(t), expected, epsilon = 1e-15);
        // θ(0) = α f(0,0) on a flat curve.
        assert_abs_diff_eq!(hw.theta(0.0), alpha * f, epsilon = 1e-15);
    }

    #[test]
    fn fitted_theta_picks_up_curve_slope() {
        let curve = LinearForwardCurve::new(vec![0.0, 10.0], vec![0.02, 0.04]).unwrap();
        let hw = HullWhiteProcess::new(0.2, 0.0, 0.02, ThetaFunction::fitted(curve));
        // slope 0.002, α f(0,5) = 0.2 · 0.03
        assert_abs_diff_eq!(hw.theta(5.0), 0.002 + 0.006, epsilon = 1e-12);
    }

    #[test]
    fn custom_theta_is_called_with_time() {
        let hw = HullWhiteProcess::new(0.5, 0.01, 0.0, ThetaFunction::custom(|t| 0.01 * t));
        assert_abs_diff_eq!(hw.drift_1d(3.0, 0.02), 0.03 - 0.01, epsilon = 1e-15);
        assert_eq!(format!("{:?}", ThetaFunction::custom(|_| 0.0)), "Custom(<fn>)");
    }

    proptest! {
        #[test]
        fn fitted_theta_is_continuous_in_alpha(t in 0.0f64..20.0, sigma in 0.001f64..0.05) {
            let theta = ThetaFunction::fitted(FlatForward::new(0.03));
            let limit = theta.value(t, 0.0, sigma);
            let near = theta.value(t, 2e-6, sigma);
            prop_assert!((limit - near).abs() < 1e-5);
        }
    }
}
