//! Model parameters and pricing context.

use sr_core::{ensure_domain, Rate, Real, Result, Time, Volatility};

/// Parameters of a one-factor affine short-rate model.
///
/// * `alpha`: mean-reversion speed, `> 0`
/// * `sigma`: volatility of the short rate, `> 0`
/// * `theta`: long-run mean (Vasicek) or constant drift level (Hull-White)
/// * `r0`: the current short rate
///
/// Validated once at construction and immutable afterwards; the type is
/// `Copy` so every component takes its own read-only copy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParameters {
    alpha: Real,
    sigma: Volatility,
    theta: Real,
    r0: Rate,
}

impl ModelParameters {
    /// Build and validate a parameter set.
    ///
    /// Fails with `Error::ParameterDomain` for non-positive or non-finite
    /// `alpha`/`sigma`, or a non-finite `theta`/`r0`.
    pub fn new(alpha: Real, sigma: Volatility, theta: Real, r0: Rate) -> Result<Self> {
        ensure_domain!(
            alpha > 0.0 && alpha.is_finite(),
            "mean-reversion speed alpha must be positive, got {alpha}"
        );
        ensure_domain!(
            sigma > 0.0 && sigma.is_finite(),
            "volatility sigma must be positive, got {sigma}"
        );
        ensure_domain!(theta.is_finite(), "theta must be finite, got {theta}");
        ensure_domain!(r0.is_finite(), "initial rate r0 must be finite, got {r0}");
        Ok(Self {
            alpha,
            sigma,
            theta,
            r0,
        })
    }

    /// Mean-reversion speed.
    pub fn alpha(&self) -> Real {
        self.alpha
    }

    /// Volatility.
    pub fn sigma(&self) -> Volatility {
        self.sigma
    }

    /// Long-run mean / drift level.
    pub fn theta(&self) -> Real {
        self.theta
    }

    /// Current short rate.
    pub fn r0(&self) -> Rate {
        self.r0
    }

    /// The same parameters with a different current short rate.
    pub fn with_r0(self, r0: Rate) -> Result<Self> {
        Self::new(self.alpha, self.sigma, self.theta, r0)
    }
}

/// Valuation time and strike for a pricing query.
///
/// Every two-time query against it must satisfy `t <= T1 <= T2`; the
/// analytics check that ordering per call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingContext {
    t: Time,
    strike: Real,
}

impl PricingContext {
    /// Build a context at valuation time `t` with strike `strike`.
    pub fn new(t: Time, strike: Real) -> Result<Self> {
        ensure_domain!(t.is_finite(), "valuation time must be finite, got {t}");
        ensure_domain!(
            strike > 0.0 && strike.is_finite(),
            "strike must be positive, got {strike}"
        );
        Ok(Self { t, strike })
    }

    /// Valuation time.
    pub fn t(&self) -> Time {
        self.t
    }

    /// Strike `K`.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// The same valuation time with another strike.
    pub fn with_strike(self, strike: Real) -> Result<Self> {
        Self::new(self.t, strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::Error;

    #[test]
    fn valid_parameters() {
        let p = ModelParameters::new(0.1, 0.09, 0.2, 0.05).unwrap();
        assert_eq!(p.alpha(), 0.1);
        assert_eq!(p.sigma(), 0.09);
        assert_eq!(p.theta(), 0.2);
        assert_eq!(p.r0(), 0.05);
        assert_eq!(p.with_r0(0.07).unwrap().r0(), 0.07);
    }

    #[test]
    fn rejects_out_of_domain_parameters() {
        for (alpha, sigma) in [(0.0, 0.1), (-0.1, 0.1), (0.1, 0.0), (0.1, -1.0), (f64::NAN, 0.1)] {
            assert!(matches!(
                ModelParameters::new(alpha, sigma, 0.0, 0.0),
                Err(Error::ParameterDomain(_))
            ));
        }
        assert!(ModelParameters::new(0.1, 0.1, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn context_requires_positive_strike() {
        assert!(PricingContext::new(0.0, 1.25).is_ok());
        assert!(matches!(
            PricingContext::new(0.0, 0.0),
            Err(Error::ParameterDomain(_))
        ));
        let ctx = PricingContext::new(0.5, 1.0).unwrap().with_strike(0.8).unwrap();
        assert_eq!(ctx.t(), 0.5);
        assert_eq!(ctx.strike(), 0.8);
    }
}
