//! Black-like options on the forward discount ratio.
//!
//! With `Z = P(t,T1)/P(t,T2)` and `v` the forward-ratio volatility from
//! [`AffineAnalytics::volatility`]:
//!
//! ```text
//! call = P(t,T2) · (Z Φ(d1) − K Φ(d2))
//! put  = P(t,T2) · (K Φ(−d2) − Z Φ(−d1))
//! ```
//!
//! `Φ` is [`normal_cdf`], built on `statrs`' complementary error function.

use sr_core::{ensure_post, Price, Real, Result, Time};
use sr_math::normal_cdf;
use sr_models::{d1, d2, AffineAnalytics, ModelParameters, PricingContext};

/// Negative prices down to this are rounding noise and floored to zero.
pub const PRICE_TOLERANCE: Real = 1e-12;

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Pays `max(Z − K, 0)` at `T2`.
    Call,
    /// Pays `max(K − Z, 0)` at `T2`.
    Put,
}

impl OptionType {
    /// `+1` for calls, `−1` for puts.
    pub fn sign(self) -> Real {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

/// Prices calls and puts on `Z` struck at the context's `K`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardOptionPricer {
    analytics: AffineAnalytics,
}

impl ForwardOptionPricer {
    /// Create a pricer for `params` at the valuation time and strike in
    /// `context`.
    pub fn new(params: ModelParameters, context: PricingContext) -> Self {
        Self::from_analytics(AffineAnalytics::new(params, context))
    }

    /// Wrap existing analytics.
    pub fn from_analytics(analytics: AffineAnalytics) -> Self {
        Self { analytics }
    }

    /// The bond analytics priced off.
    pub fn analytics(&self) -> &AffineAnalytics {
        &self.analytics
    }

    /// Strike `K`.
    pub fn strike(&self) -> Real {
        self.analytics.strike()
    }

    /// Call price for the period `[T1, T2]`, volatility grid step `dt`.
    pub fn call_price(&self, t1: Time, t2: Time, dt: Time) -> Result<Price> {
        self.price(OptionType::Call, t1, t2, dt)
    }

    /// Put price for the period `[T1, T2]`, volatility grid step `dt`.
    pub fn put_price(&self, t1: Time, t2: Time, dt: Time) -> Result<Price> {
        self.price(OptionType::Put, t1, t2, dt)
    }

    /// `φ · P(t,T2) · (Z Φ(φ d1) − K Φ(φ d2))` with `φ` the option sign.
    ///
    /// Fails with `Error::TimeOrdering` unless `t <= T1 < T2`, with
    /// `Error::ParameterDomain` for a bad `dt` or a zero volatility, and
    /// with `Error::Postcondition` if the result is negative beyond
    /// [`PRICE_TOLERANCE`].
    pub fn price(&self, option_type: OptionType, t1: Time, t2: Time, dt: Time) -> Result<Price> {
        let a = &self.analytics;
        let k = a.strike();
        let z = a.forward_ratio(t1, t2)?;
        let p2 = a.discount_factor(t2)?;
        let v = a.volatility(t1, t2, dt)?;
        let (d1, d2) = (d1(k, z, v)?, d2(k, z, v)?);

        let phi = option_type.sign();
        let price = phi * p2 * (z * normal_cdf(phi * d1) - k * normal_cdf(phi * d2));
        ensure_post!(
            price >= -PRICE_TOLERANCE,
            "{option_type:?} price {price} is negative (Z = {z}, K = {k}, v = {v})"
        );
        tracing::trace!(?option_type, t1, t2, z, v, price, "forward option priced");
        Ok(price.max(0.0))
    }

    /// Put-call parity residual `(call − put) − P(t,T2)(Z − K)`.
    pub fn parity_gap(&self, t1: Time, t2: Time, dt: Time) -> Result<Real> {
        let a = &self.analytics;
        let forward_value = a.discount_factor(t2)? * (a.forward_ratio(t1, t2)? - a.strike());
        Ok(self.call_price(t1, t2, dt)? - self.put_price(t1, t2, dt)? - forward_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use sr_core::Error;

    fn reference(strike: Real) -> ForwardOptionPricer {
        let params = ModelParameters::new(0.10, 0.09, 0.2, 0.05).unwrap();
        ForwardOptionPricer::new(params, PricingContext::new(0.0, strike).unwrap())
    }

    #[test]
    fn reference_call_and_put() {
        let p = reference(1.25);
        assert_abs_diff_eq!(p.call_price(0.5, 1.0, 0.01).unwrap(), 0.100_766_510, epsilon = 1e-8);
        assert_abs_diff_eq!(p.put_price(0.5, 1.0, 0.01).unwrap(), 0.309_015_863, epsilon = 1e-8);
    }

    #[test]
    fn parity_holds_at_reference() {
        assert_abs_diff_eq!(reference(1.25).parity_gap(0.5, 1.0, 0.01).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn deep_strikes() {
        // Far out of the money: price vanishes but stays non-negative.
        let call = reference(50.0).call_price(0.5, 1.0, 0.01).unwrap();
        assert!((0.0..1e-12).contains(&call));
        let put = reference(1e-3).put_price(0.5, 1.0, 0.01).unwrap();
        assert!((0.0..1e-12).contains(&put));
    }

    #[test]
    fn vanishing_volatility_gives_intrinsic_value() {
        for sigma in [1e-6, 1e-9, 1e-12] {
            let params = ModelParameters::new(0.10, sigma, 0.2, 0.05).unwrap();
            for strike in [0.9, 1.0, 1.1] {
                let p = ForwardOptionPricer::new(params, PricingContext::new(0.0, strike).unwrap());
                let a = p.analytics();
                let forward_value =
                    a.discount_factor(1.0).unwrap() * (a.forward_ratio(0.5, 1.0).unwrap() - strike);
                let call = p.call_price(0.5, 1.0, 0.01).unwrap();
                let put = p.put_price(0.5, 1.0, 0.01).unwrap();
                assert_abs_diff_eq!(call, forward_value.max(0.0), epsilon = 1e-12);
                assert_abs_diff_eq!(put, (-forward_value).max(0.0), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn errors_propagate() {
        let p = reference(1.25);
        assert!(matches!(p.call_price(1.0, 1.0, 0.01), Err(Error::TimeOrdering(_))));
        assert!(matches!(p.put_price(0.5, 1.0, 0.0), Err(Error::ParameterDomain(_))));
        assert!(matches!(p.parity_gap(1.0, 0.5, 0.01), Err(Error::TimeOrdering(_))));
    }

    #[test]
    fn option_sign() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }

    proptest! {
        #[test]
        fn put_call_parity(
            alpha in 0.01f64..2.0,
            sigma in 0.001f64..0.2,
            theta in -0.02f64..0.2,
            r0 in -0.01f64..0.15,
            strike in 0.5f64..1.5,
            t1 in 0.1f64..5.0,
            tenor in 0.1f64..2.0,
        ) {
            let params = ModelParameters::new(alpha, sigma, theta, r0).unwrap();
            let p = ForwardOptionPricer::new(params, PricingContext::new(0.0, strike).unwrap());
            let t2 = t1 + tenor;
            let dt = t2 / 100.0;
            let call = p.call_price(t1, t2, dt).unwrap();
            let put = p.put_price(t1, t2, dt).unwrap();
            prop_assert!(call >= 0.0 && put >= 0.0);
            let scale = 1.0 + call.abs() + put.abs();
            prop_assert!(p.parity_gap(t1, t2, dt).unwrap().abs() < 1e-9 * scale);
        }

        #[test]
        fn call_decreases_with_strike(k in 0.5f64..1.5, bump in 0.01f64..0.5) {
            let lo = reference(k).call_price(0.5, 1.0, 0.01).unwrap();
            let hi = reference(k + bump).call_price(0.5, 1.0, 0.01).unwrap();
            prop_assert!(hi <= lo);
        }
    }
}
