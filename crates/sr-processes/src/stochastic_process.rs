//! Base trait for one-dimensional stochastic processes.
//!
//! A process `dX = μ(t,X) dt + σ(t,X) dW` is described by its drift and
//! diffusion. Two ways of stepping it forward are offered: the plain
//! Euler–Maruyama step, and [`StochasticProcess1D::evolve_1d`], which uses
//! whatever conditional moments the process overrides (exact ones for
//! Gaussian processes).

use sr_core::{Real, Time};

/// A 1-dimensional stochastic process `dX = μ(t,X) dt + σ(t,X) dW`.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift_1d(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion_1d(&self, t: Time, x: Real) -> Real;

    /// Expected value `E[x(t+Δt) | x(t) = x]`.
    ///
    /// Default: first-order Euler `x + μ(t,x)·Δt`.
    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift_1d(t, x) * dt
    }

    /// Standard deviation of `x(t+Δt)` given `x(t) = x`.
    ///
    /// Default: `σ(t,x) · √Δt`.
    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        self.diffusion_1d(t, x) * dt.sqrt()
    }

    /// Variance of `x(t+Δt)` given `x(t) = x`.
    fn variance_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        let s = self.std_deviation_1d(t, x, dt);
        s * s
    }

    /// Euler–Maruyama step: `x + μ(t,x)·Δt + σ(t,x)·√Δt·dw`.
    ///
    /// Always first-order, regardless of any conditional moments the
    /// process overrides.
    fn euler_step_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        x + self.drift_1d(t, x) * dt + self.diffusion_1d(t, x) * dt.sqrt() * dw
    }

    /// Moment-matched step: `E[x(t+Δt)] + std·dw`.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.expectation_1d(t, x, dt) + self.std_deviation_1d(t, x, dt) * dw
    }
}

impl<P: StochasticProcess1D + ?Sized> StochasticProcess1D for Box<P> {
    fn x0(&self) -> Real {
        (**self).x0()
    }

    fn drift_1d(&self, t: Time, x: Real) -> Real {
        (**self).drift_1d(t, x)
    }

    fn diffusion_1d(&self, t: Time, x: Real) -> Real {
        (**self).diffusion_1d(t, x)
    }

    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        (**self).expectation_1d(t, x, dt)
    }

    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        (**self).std_deviation_1d(t, x, dt)
    }

    fn variance_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        (**self).variance_1d(t, x, dt)
    }
}
