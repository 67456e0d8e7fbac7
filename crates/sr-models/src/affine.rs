//! Closed-form affine term-structure analytics.
//!
//! For the short rate `dr = α(θ − r) dt + σ dW` the zero-coupon bond price
//! seen at time `t` is
//!
//! ```text
//! P(t,T) = A(T) · exp(−B(t,T) · r)
//! B(s,T) = (1 − e^{−α(T−s)}) / α
//! ln A(T) = (θ − σ²/(2α²)) · (B(t,T) − (T−t)) − σ² B(t,T)² / (4α)
//! ```
//!
//! Below [`DEGENERATE_ALPHA`] the no-reversion limits `B = T − s` and
//! `ln A = σ²(T−t)³/6` are used instead; the closed forms divide by `α`
//! and `α²` and lose all precision there.

use crate::parameters::{ModelParameters, PricingContext};
use sr_core::{
    ensure_domain, ensure_order, ensure_post, DiscountFactor, NumericWarning, Rate, Real, Result,
    Size, Time, Volatility, DEGENERATE_ALPHA,
};

/// `B(s,T)` as a function of `τ = T − s`.
pub fn bond_b(alpha: Real, tau: Time) -> Real {
    if alpha < DEGENERATE_ALPHA {
        tau
    } else {
        -(-alpha * tau).exp_m1() / alpha
    }
}

/// `ln A` as a function of `τ = T − t`.
pub fn bond_log_a(params: &ModelParameters, tau: Time) -> Real {
    let (alpha, sigma, theta) = (params.alpha(), params.sigma(), params.theta());
    let s2 = sigma * sigma;
    if alpha < DEGENERATE_ALPHA {
        s2 * tau * tau * tau / 6.0
    } else {
        let b = bond_b(alpha, tau);
        (theta - s2 / (2.0 * alpha * alpha)) * (b - tau) - s2 * b * b / (4.0 * alpha)
    }
}

/// Bond-pricing building blocks for one parameter set at one valuation
/// time.
///
/// The current short rate defaults to `params.r0()`; see
/// [`AffineAnalytics::with_rate`]. The type is a plain value: it holds
/// copies of its inputs and no cached state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineAnalytics {
    params: ModelParameters,
    context: PricingContext,
    rate: Rate,
}

impl AffineAnalytics {
    /// Analytics for `params` at the valuation time in `context`.
    pub fn new(params: ModelParameters, context: PricingContext) -> Self {
        if params.alpha() < DEGENERATE_ALPHA {
            tracing::debug!(
                alpha = params.alpha(),
                "mean reversion below threshold, using no-reversion bond formulas"
            );
        }
        Self {
            params,
            context,
            rate: params.r0(),
        }
    }

    /// Price off `rate` instead of `params.r0()`.
    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Model parameters.
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Pricing context.
    pub fn context(&self) -> &PricingContext {
        &self.context
    }

    /// Valuation time `t`.
    pub fn valuation_time(&self) -> Time {
        self.context.t()
    }

    /// Strike `K`.
    pub fn strike(&self) -> Real {
        self.context.strike()
    }

    /// Short rate used for pricing.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Whether the no-reversion limits are in use.
    pub fn is_degenerate(&self) -> bool {
        self.params.alpha() < DEGENERATE_ALPHA
    }

    /// Numerical conditions worth reporting alongside prices.
    pub fn warnings(&self) -> Vec<NumericWarning> {
        if self.is_degenerate() {
            vec![NumericWarning::DegenerateAlpha {
                alpha: self.params.alpha(),
            }]
        } else {
            Vec::new()
        }
    }

    /// `B(s, T)`.
    pub fn b(&self, s: Time, big_t: Time) -> Real {
        bond_b(self.params.alpha(), big_t - s)
    }

    /// `A(T)`.
    pub fn a(&self, big_t: Time) -> Real {
        bond_log_a(&self.params, big_t - self.context.t()).exp()
    }

    /// Discount factor `P(t, T) = A(T) · exp(−B(t,T) · r)`.
    ///
    /// Requires `T >= t`.
    ///
    /// `P` falls with `T` only while the instantaneous forward
    ///
    /// ```text
    /// f(t,T) = θ(1 − e^{−ατ}) + r e^{−ατ} − σ²/(2α²) (1 − e^{−ατ})²
    /// ```
    ///
    /// stays positive. Its long end is `θ − σ²/(2α²)`; when that is negative
    /// (`α = 0.1, σ = 0.09, θ = 0.2` gives `−0.205`) bond prices turn up and
    /// exceed one at long maturities.
    pub fn discount_factor(&self, big_t: Time) -> Result<DiscountFactor> {
        let t = self.context.t();
        ensure_order!(
            big_t >= t,
            "maturity T ({big_t}) precedes valuation time t ({t})"
        );
        let log_p = bond_log_a(&self.params, big_t - t) - self.b(t, big_t) * self.rate;
        let p = log_p.exp();
        ensure_post!(
            p.is_finite() && p > 0.0,
            "discount factor P({t}, {big_t}) = {p} is not a positive finite number"
        );
        Ok(p)
    }

    /// Continuously compounded zero yield `−ln P(t,T) / (T − t)`.
    pub fn zero_yield(&self, big_t: Time) -> Result<Rate> {
        let t = self.context.t();
        ensure_order!(big_t > t, "maturity T ({big_t}) must follow t ({t})");
        Ok(-self.discount_factor(big_t)?.ln() / (big_t - t))
    }

    /// Simply compounded forward rate `(P(t,T1)/P(t,T2) − 1) / (T2 − T1)`.
    pub fn forward_rate(&self, t1: Time, t2: Time) -> Result<Rate> {
        let z = self.forward_ratio(t1, t2)?;
        Ok((z - 1.0) / (t2 - t1))
    }

    /// Forward discount ratio `Z = P(t,T1) / P(t,T2)`.
    pub fn forward_ratio(&self, t1: Time, t2: Time) -> Result<Real> {
        self.check_period(t1, t2)?;
        Ok(self.discount_factor(t1)? / self.discount_factor(t2)?)
    }

    /// Volatility of the forward ratio over `[t, T2]`:
    ///
    /// ```text
    /// v = sqrt( Σ_{i=0}^{n−1} σ² (B(s_i,T1) − B(s_i,T2))² ),  s_i = t + i·dt
    /// ```
    ///
    /// a left-endpoint point sum with `n = (T2 − t)/dt` points. The sum is
    /// not weighted by `dt`, which is the convention the option formulas
    /// are quoted in; see [`AffineAnalytics::integrated_volatility`] for the
    /// quadrature of the continuous integral.
    pub fn volatility(&self, t1: Time, t2: Time, dt: Time) -> Result<Volatility> {
        Ok(self.squared_difference_sum(t1, t2, dt)?.sqrt())
    }

    /// Left-endpoint Riemann approximation of
    /// `sqrt(∫_t^{T2} σ² (B(s,T1) − B(s,T2))² ds)`.
    ///
    /// Converges to the integral with first-order error in `dt`.
    pub fn integrated_volatility(&self, t1: Time, t2: Time, dt: Time) -> Result<Volatility> {
        Ok((self.squared_difference_sum(t1, t2, dt)? * dt).sqrt())
    }

    fn squared_difference_sum(&self, t1: Time, t2: Time, dt: Time) -> Result<Real> {
        self.check_period(t1, t2)?;
        let t = self.context.t();
        let n = grid_points(t2 - t, dt)?;
        let s2 = self.params.sigma() * self.params.sigma();
        Ok((0..n)
            .map(|i| {
                let s = t + i as Real * dt;
                let d = self.b(s, t1) - self.b(s, t2);
                s2 * d * d
            })
            .sum())
    }

    fn check_period(&self, t1: Time, t2: Time) -> Result<()> {
        let t = self.context.t();
        ensure_order!(
            t <= t1,
            "period start T1 ({t1}) precedes valuation time t ({t})"
        );
        ensure_order!(t1 < t2, "period start T1 ({t1}) must precede end T2 ({t2})");
        Ok(())
    }
}

/// Number of left endpoints of step `dt` covering `span`.
fn grid_points(span: Time, dt: Time) -> Result<Size> {
    ensure_domain!(
        dt > 0.0 && dt.is_finite(),
        "integration step dt must be positive, got {dt}"
    );
    ensure_domain!(
        dt <= span * (1.0 + 1e-12),
        "integration step dt ({dt}) exceeds the interval length ({span})"
    );
    Ok(((span / dt).round() as Size).max(1))
}

/// Black-style `d1 = (ln(F/K) + v²/2) / v`.
///
/// Fails with `Error::ParameterDomain` unless `F`, `K` and `v` are all
/// positive. A zero volatility has no `d1`; callers price that case as
/// intrinsic value themselves.
pub fn d1(strike: Real, forward: Real, vol: Volatility) -> Result<Real> {
    ensure_domain!(
        vol > 0.0 && vol.is_finite(),
        "volatility must be positive for d1/d2, got {vol}"
    );
    ensure_domain!(
        forward > 0.0 && forward.is_finite(),
        "forward must be positive, got {forward}"
    );
    ensure_domain!(
        strike > 0.0 && strike.is_finite(),
        "strike must be positive, got {strike}"
    );
    Ok(((forward / strike).ln() + 0.5 * vol * vol) / vol)
}

/// `d2 = d1 − v`.
pub fn d2(strike: Real, forward: Real, vol: Volatility) -> Result<Real> {
    Ok(d1(strike, forward, vol)? - vol)
}
