//! Caplets and floorlets on simply compounded forward rates.
//!
//! For a period `[T1, T2]` with `δ = T2 − T1` and cap rate `K`, the strike
//! is moved to `K* = 1/(1 + δK)` and
//!
//! ```text
//! caplet   = put_{K*}(T1, T2)  / K*
//! floorlet = call_{K*}(T1, T2) / K*
//! ```
//!
//! with the options on `Z` priced by [`ForwardOptionPricer`].

use crate::forward_option_pricer::ForwardOptionPricer;
use sr_core::{ensure_data, ensure_order, Price, Real, Result, Time};
use sr_models::{ModelParameters, PricingContext};

/// `K* = 1 / (1 + δ K)`.
pub fn adjusted_strike(strike: Real, delta: Time) -> Real {
    1.0 / (1.0 + delta * strike)
}

/// Prices caplets, floorlets and their strips for one cap rate `K`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapletFloorletPricer {
    params: ModelParameters,
    context: PricingContext,
}

impl CapletFloorletPricer {
    /// Create a pricer; `context.strike()` is the cap rate `K`.
    pub fn new(params: ModelParameters, context: PricingContext) -> Self {
        Self { params, context }
    }

    /// Cap rate `K`.
    pub fn strike(&self) -> Real {
        self.context.strike()
    }

    /// Option pricer on `Z` struck at `K*` for the period `[T1, T2]`.
    fn adjusted_pricer(&self, t1: Time, t2: Time) -> Result<(ForwardOptionPricer, Real)> {
        ensure_order!(t1 < t2, "period start T1 ({t1}) must precede end T2 ({t2})");
        let k_star = adjusted_strike(self.context.strike(), t2 - t1);
        let context = self.context.with_strike(k_star)?;
        Ok((ForwardOptionPricer::new(self.params, context), k_star))
    }

    /// Caplet on `[T1, T2]`: `put_{K*}(T1,T2,dt) / K*`.
    pub fn caplet(&self, t1: Time, t2: Time, dt: Time) -> Result<Price> {
        let (pricer, k_star) = self.adjusted_pricer(t1, t2)?;
        Ok(pricer.put_price(t1, t2, dt)? / k_star)
    }

    /// Floorlet on `[T1, T2]`: `call_{K*}(T1,T2,dt) / K*`.
    pub fn floorlet(&self, t1: Time, t2: Time, dt: Time) -> Result<Price> {
        let (pricer, k_star) = self.adjusted_pricer(t1, t2)?;
        Ok(pricer.call_price(t1, t2, dt)? / k_star)
    }

    /// Cap over consecutive reset dates `T0 < T1 < … < Tn`: the sum of the
    /// caplets on each `[T(i), T(i+1)]`.
    pub fn cap(&self, reset_times: &[Time], dt: Time) -> Result<Price> {
        self.strip(reset_times, |t1, t2| self.caplet(t1, t2, dt))
    }

    /// Floor over consecutive reset dates: the sum of the floorlets.
    pub fn floor(&self, reset_times: &[Time], dt: Time) -> Result<Price> {
        self.strip(reset_times, |t1, t2| self.floorlet(t1, t2, dt))
    }

    fn strip<F>(&self, reset_times: &[Time], leg: F) -> Result<Price>
    where
        F: Fn(Time, Time) -> Result<Price>,
    {
        ensure_data!(
            reset_times.len() >= 2,
            "a strip needs at least 2 reset times, got {}",
            reset_times.len()
        );
        let total = reset_times
            .windows(2)
            .try_fold(0.0, |acc, w| Ok::<_, sr_core::Error>(acc + leg(w[0], w[1])?))?;
        tracing::debug!(periods = reset_times.len() - 1, total, "strip priced");
        Ok(total)
    }
}
