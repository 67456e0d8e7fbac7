//! Monte Carlo simulation of short-rate paths.
//!
//! # Overview
//!
//! * [`SimulationConfig`]: horizon, step and discretisation scheme
//! * [`PathSimulator`]: steps a [`StochasticProcess1D`] over a uniform grid
//! * [`Path`]: a single realisation (times + rates)
//! * [`terminal_statistics`]: summary of terminal rates over an ensemble
//!
//! Randomness is always supplied by the caller as a [`GaussianRng`]; two
//! simulators fed identically seeded generators produce identical paths.

use sr_core::{ensure_domain, ensure_post, NumericWarning, Rate, Real, Result, Size, Time};
use sr_math::{close, GaussianRng, Statistics};
use sr_models::OneFactorModel;
use sr_processes::StochasticProcess1D;

/// Slack allowed when fitting a whole number of steps into the horizon.
pub const GRID_TOLERANCE: Real = 1e-9;

// ─── Configuration ────────────────────────────────────────────────────────────

/// How a step of the short-rate SDE is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Discretization {
    /// Euler–Maruyama: `r + μ(t,r)Δt + σ√Δt·Z`.
    #[default]
    Euler,
    /// The process's own conditional mean and standard deviation. Exact
    /// for Vasicek and for Hull-White with constant `θ`.
    Exact,
}

/// Time grid and scheme for a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Simulation horizon in years.
    pub horizon: Time,
    /// Step size in years.
    pub dt: Time,
    /// Stepping scheme.
    pub scheme: Discretization,
}

impl SimulationConfig {
    /// Euler–Maruyama over `[0, horizon]` in steps of `dt`.
    pub fn new(horizon: Time, dt: Time) -> Result<Self> {
        let config = Self {
            horizon,
            dt,
            scheme: Discretization::Euler,
        };
        config.validate()?;
        Ok(config)
    }

    /// The same grid with another scheme.
    pub fn with_scheme(mut self, scheme: Discretization) -> Self {
        self.scheme = scheme;
        self
    }

    /// Check `0 < dt <= horizon`, both finite.
    pub fn validate(&self) -> Result<()> {
        let (horizon, dt) = (self.horizon, self.dt);
        ensure_domain!(
            horizon > 0.0 && horizon.is_finite(),
            "simulation horizon must be positive, got {horizon}"
        );
        ensure_domain!(
            dt > 0.0 && dt.is_finite(),
            "simulation step must be positive, got {dt}"
        );
        ensure_domain!(
            dt <= horizon * (1.0 + GRID_TOLERANCE),
            "simulation step {dt} exceeds the horizon {horizon}"
        );
        Ok(())
    }

    /// Number of whole steps that fit in the horizon.
    pub fn steps(&self) -> Size {
        (self.horizon / self.dt + GRID_TOLERANCE).floor() as Size
    }

    /// Horizon covered by [`steps`](Self::steps) steps.
    pub fn achieved_horizon(&self) -> Time {
        self.steps() as Real * self.dt
    }

    /// Whether the horizon is not a whole number of steps.
    pub fn is_truncated(&self) -> bool {
        !close(self.achieved_horizon(), self.horizon, GRID_TOLERANCE)
    }
}

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A single simulated short-rate path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    times: Vec<Time>,
    rates: Vec<Rate>,
    requested_horizon: Time,
    achieved_horizon: Time,
    truncated: bool,
}

impl Path {
    /// Time points, starting at 0.
    pub fn time_grid(&self) -> &[Time] {
        &self.times
    }

    /// Rates at each time point.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// `(time, rate)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (Time, Rate)> + '_ {
        self.times.iter().copied().zip(self.rates.iter().copied())
    }

    /// Number of points including the initial one.
    pub fn len(&self) -> Size {
        self.rates.len()
    }

    /// Never true: a path holds at least its initial rate.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Number of steps (= len − 1).
    pub fn steps(&self) -> Size {
        self.rates.len() - 1
    }

    /// The initial rate.
    pub fn front(&self) -> Rate {
        self.rates[0]
    }

    /// The terminal rate.
    pub fn back(&self) -> Rate {
        self.rates[self.rates.len() - 1]
    }

    /// Horizon of the last time point.
    pub fn achieved_horizon(&self) -> Time {
        self.achieved_horizon
    }

    /// Whether the grid stopped short of the requested horizon.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Conditions met while simulating.
    pub fn warnings(&self) -> Vec<NumericWarning> {
        if self.truncated {
            vec![NumericWarning::TruncatedGrid {
                requested: self.requested_horizon,
                achieved: self.achieved_horizon,
            }]
        } else {
            Vec::new()
        }
    }
}

// ─── PathSimulator ────────────────────────────────────────────────────────────

/// Generates short-rate paths of a 1-D process on a uniform grid.
#[derive(Debug)]
pub struct PathSimulator<P = Box<dyn StochasticProcess1D>> {
    process: P,
    config: SimulationConfig,
}

impl PathSimulator {
    /// Simulate the dynamics of `model`, started at its `r0`.
    pub fn from_model(model: &dyn OneFactorModel, config: SimulationConfig) -> Result<Self> {
        Self::new(model.dynamics_process(), config)
    }
}

impl<P: StochasticProcess1D> PathSimulator<P> {
    /// Create a simulator for `process`.
    pub fn new(process: P, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if config.is_truncated() {
            tracing::warn!(
                horizon = config.horizon,
                dt = config.dt,
                achieved = config.achieved_horizon(),
                "horizon is not a multiple of dt, paths will stop short"
            );
        }
        Ok(Self { process, config })
    }

    /// The process being simulated.
    pub fn process(&self) -> &P {
        &self.process
    }

    /// Grid and scheme.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generate one path, drawing one normal per step from `rng`.
    ///
    /// Fails with `Error::Postcondition` if the rate leaves the finite range.
    pub fn simulate<G: GaussianRng + ?Sized>(&self, rng: &mut G) -> Result<Path> {
        let steps = self.config.steps();
        let dt = self.config.dt;
        let mut times = Vec::with_capacity(steps + 1);
        let mut rates = Vec::with_capacity(steps + 1);

        let mut r = self.process.x0();
        times.push(0.0);
        rates.push(r);
        for i in 0..steps {
            let t = i as Real * dt;
            let z = rng.next_gaussian();
            r = match self.config.scheme {
                Discretization::Euler => self.process.euler_step_1d(t, r, dt, z),
                Discretization::Exact => self.process.evolve_1d(t, r, dt, z),
            };
            ensure_post!(r.is_finite(), "short rate became non-finite at t = {t}");
            times.push((i + 1) as Real * dt);
            rates.push(r);
        }

        Ok(Path {
            times,
            rates,
            requested_horizon: self.config.horizon,
            achieved_horizon: self.config.achieved_horizon(),
            truncated: self.config.is_truncated(),
        })
    }

    /// Generate `n` paths one after another from the same generator.
    pub fn simulate_paths<G: GaussianRng + ?Sized>(&self, n: Size, rng: &mut G) -> Result<Vec<Path>> {
        tracing::debug!(paths = n, steps = self.config.steps(), "simulating path ensemble");
        (0..n).map(|_| self.simulate(&mut *rng)).collect()
    }
}

/// Statistics of the terminal rates of `paths`.
pub fn terminal_statistics(paths: &[Path]) -> Statistics {
    paths.iter().map(Path::back).collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
