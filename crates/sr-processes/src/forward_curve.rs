//! Instantaneous forward-rate curves `f(0, t)`.
//!
//! Hull-White fits its drift `θ(t)` to one of these and prices bonds off
//! the curve's discount factors.

use sr_core::{ensure_data, ensure_order, DiscountFactor, Rate, Real, Result, Time};

/// An initial instantaneous forward curve `t ↦ f(0, t)`.
pub trait ForwardCurve: std::fmt::Debug + Send + Sync {
    /// Instantaneous forward rate `f(0, t)`.
    fn forward_rate(&self, t: Time) -> Rate;

    /// Discount factor `P(0, t) = exp(−∫₀ᵗ f(0, s) ds)`.
    fn discount(&self, t: Time) -> DiscountFactor;

    /// Slope `∂f(0, t)/∂t`.
    ///
    /// Default: one-sided finite difference with a `1e-4` step.
    fn forward_slope(&self, t: Time) -> Real {
        let h = 1e-4;
        (self.forward_rate(t + h) - self.forward_rate(t)) / h
    }
}

/// A flat forward curve: `f(0, t) = rate` for all `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForward {
    rate: Rate,
}

impl FlatForward {
    /// Create a flat curve at `rate` (continuously compounded).
    pub fn new(rate: Rate) -> Self {
        Self { rate }
    }
}

impl ForwardCurve for FlatForward {
    fn forward_rate(&self, _t: Time) -> Rate {
        self.rate
    }

    fn discount(&self, t: Time) -> DiscountFactor {
        (-self.rate * t).exp()
    }

    fn forward_slope(&self, _t: Time) -> Real {
        0.0
    }
}

/// Forward curve linearly interpolated between nodes and flat beyond
/// either end.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearForwardCurve {
    times: Vec<Time>,
    forwards: Vec<Rate>,
}

impl LinearForwardCurve {
    /// Build from node times (strictly increasing) and forward rates.
    pub fn new(times: Vec<Time>, forwards: Vec<Rate>) -> Result<Self> {
        ensure_data!(
            !times.is_empty() && times.len() == forwards.len(),
            "need matching non-empty node vectors, got {} times and {} forwards",
            times.len(),
            forwards.len()
        );
        ensure_order!(
            times.windows(2).all(|w| w[0] < w[1]),
            "node times must be strictly increasing"
        );
        Ok(Self { times, forwards })
    }

    /// Index `i` of the segment `[times[i], times[i+1]]` containing `t`,
    /// or `None` when `t` lies outside the nodes.
    fn segment(&self, t: Time) -> Option<usize> {
        let last = self.times.len() - 1;
        if last == 0 || t < self.times[0] || t >= self.times[last] {
            return None;
        }
        Some(self.times.partition_point(|&x| x <= t) - 1)
    }
}

impl ForwardCurve for LinearForwardCurve {
    fn forward_rate(&self, t: Time) -> Rate {
        match self.segment(t) {
            Some(i) => {
                let w = (t - self.times[i]) / (self.times[i + 1] - self.times[i]);
                self.forwards[i] + w * (self.forwards[i + 1] - self.forwards[i])
            }
            None if t < self.times[0] => self.forwards[0],
            None => self.forwards[self.forwards.len() - 1],
        }
    }

    /// Trapezoidal integration over the nodes, exact for this curve.
    fn discount(&self, t: Time) -> DiscountFactor {
        let mut integral = 0.0;
        let (mut prev_t, mut prev_f) = (0.0, self.forward_rate(0.0));
        for (&ti, &fi) in self.times.iter().zip(&self.forwards) {
            if ti <= 0.0 {
                continue;
            }
            if ti >= t {
                break;
            }
            integral += 0.5 * (prev_f + fi) * (ti - prev_t);
            prev_t = ti;
            prev_f = fi;
        }
        integral += 0.5 * (prev_f + self.forward_rate(t)) * (t - prev_t);
        (-integral).exp()
    }

    fn forward_slope(&self, t: Time) -> Real {
        match self.segment(t) {
            Some(i) => {
                (self.forwards[i + 1] - self.forwards[i]) / (self.times[i + 1] - self.times[i])
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn flat_curve_is_flat() {
        let c = FlatForward::new(0.03);
        assert_eq!(c.forward_rate(0.0), 0.03);
        assert_eq!(c.forward_rate(30.0), 0.03);
        assert_eq!(c.forward_slope(5.0), 0.0);
    }

    #[test]
    fn linear_curve_interpolates_and_extrapolates_flat() {
        let c = LinearForwardCurve::new(vec![0.0, 1.0, 3.0], vec![0.01, 0.02, 0.06]).unwrap();
        assert_abs_diff_eq!(c.forward_rate(0.5), 0.015, epsilon = 1e-15);
        assert_abs_diff_eq!(c.forward_rate(2.0), 0.04, epsilon = 1e-15);
        assert_abs_diff_eq!(c.forward_rate(-1.0), 0.01, epsilon = 1e-15);
        assert_abs_diff_eq!(c.forward_rate(10.0), 0.06, epsilon = 1e-15);
        assert_abs_diff_eq!(c.forward_slope(2.0), 0.02, epsilon = 1e-15);
        assert_abs_diff_eq!(c.forward_slope(10.0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn default_slope_matches_analytic_slope_inside_segment() {
        #[derive(Debug)]
        struct Wrapped(LinearForwardCurve);
        impl ForwardCurve for Wrapped {
            fn forward_rate(&self, t: Time) -> Rate {
                self.0.forward_rate(t)
            }

            fn discount(&self, t: Time) -> DiscountFactor {
                self.0.discount(t)
            }
        }
        let c = Wrapped(LinearForwardCurve::new(vec![0.0, 2.0], vec![0.02, 0.03]).unwrap());
        assert_abs_diff_eq!(c.forward_slope(1.0), 0.005, epsilon = 1e-10);
    }

    #[test]
    fn flat_discount_is_exponential() {
        assert_abs_diff_eq!(FlatForward::new(0.04).discount(2.5), (-0.1_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn linear_discount_integrates_piecewise() {
        let c = LinearForwardCurve::new(vec![1.0, 3.0], vec![0.02, 0.06]).unwrap();
        // ∫₀¹ 0.02 + ∫₁² (0.02 → 0.04) = 0.02 + 0.03
        assert_abs_diff_eq!(c.discount(2.0), (-0.05_f64).exp(), epsilon = 1e-14);
        // ... + ∫₂³ (0.04 → 0.06) + ∫₃⁴ 0.06 = 0.05 + 0.05 + 0.06
        assert_abs_diff_eq!(c.discount(4.0), (-0.16_f64).exp(), epsilon = 1e-14);
        assert_abs_diff_eq!(c.discount(0.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn linear_curve_rejects_unsorted_nodes() {
        assert!(LinearForwardCurve::new(vec![1.0, 0.5], vec![0.01, 0.02]).is_err());
        assert!(LinearForwardCurve::new(vec![], vec![]).is_err());
    }
}
