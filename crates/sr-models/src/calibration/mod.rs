//! Maximum-likelihood calibration of Vasicek parameters.
//!
//! One-step transitions of the Vasicek process are Gaussian:
//!
//! ```text
//! r_{i+1} | r_i ~ N( r_i e^{−αΔt} + θ (1 − e^{−αΔt}),  σ² (1 − e^{−2αΔt}) / (2α) )
//! ```
//!
//! [`VasicekCalibrator`] maximises the sum of these log-densities with a
//! Nelder–Mead simplex over `(ln α, θ, ln σ)`, started from the AR(1)
//! least-squares fit of the series.

use crate::parameters::ModelParameters;
use nalgebra::DVector;
use sr_core::{
    ensure_data, ensure_domain, fail, NumericWarning, Rate, Real, Result, Size, Time, DEGENERATE_ALPHA,
};
use sr_math::distributions::normal_log_pdf;
use sr_math::optimization::{numerical_hessian, EndCriteria, NoConstraint, Simplex};
use sr_math::{close, Array};

/// Relative tolerance on the spacing of `(time, rate)` samples.
const SPACING_TOLERANCE: Real = 1e-9;

/// An evenly spaced series of observed short rates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedSeries {
    dt: Time,
    rates: Vec<Rate>,
}

impl ObservedSeries {
    /// Rates observed every `dt` years.
    ///
    /// Fails with `Error::InsufficientData` for fewer than two rates, a
    /// non-positive `dt` or a non-finite rate.
    pub fn new(dt: Time, rates: Vec<Rate>) -> Result<Self> {
        ensure_data!(
            rates.len() >= 2,
            "need at least 2 observations, got {}",
            rates.len()
        );
        ensure_data!(
            dt > 0.0 && dt.is_finite(),
            "sampling step must be positive, got {dt}"
        );
        ensure_data!(
            rates.iter().all(|r| r.is_finite()),
            "observed rates must be finite"
        );
        Ok(Self { dt, rates })
    }

    /// Build from `(time, rate)` samples, checking the spacing is uniform.
    pub fn from_samples(samples: &[(Time, Rate)]) -> Result<Self> {
        ensure_data!(
            samples.len() >= 2,
            "need at least 2 observations, got {}",
            samples.len()
        );
        let dt = samples[1].0 - samples[0].0;
        ensure_data!(
            dt > 0.0 && dt.is_finite(),
            "sampling step must be positive, got {dt}"
        );
        if let Some(w) = samples
            .windows(2)
            .find(|w| !close(w[1].0 - w[0].0, dt, SPACING_TOLERANCE))
        {
            return Err(sr_core::Error::InsufficientData(format!(
                "samples are not evenly spaced: step {} at t = {} differs from {dt}",
                w[1].0 - w[0].0,
                w[0].0
            )));
        }
        Self::new(dt, samples.iter().map(|&(_, r)| r).collect())
    }

    /// Sampling step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Observed rates.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Number of observations.
    pub fn len(&self) -> Size {
        self.rates.len()
    }

    /// Always `false`: a series holds at least two observations.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Consecutive `(r_i, r_{i+1})` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (Rate, Rate)> + '_ {
        self.rates.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Decay factor `e^{−αΔt}` and variance of one transition.
fn transition_moments(alpha: Real, sigma: Real, dt: Time) -> (Real, Real) {
    let decay = (-alpha * dt).exp();
    let variance = if alpha < DEGENERATE_ALPHA {
        sigma * sigma * dt
    } else {
        sigma * sigma * (-(-2.0 * alpha * dt).exp_m1()) / (2.0 * alpha)
    };
    (decay, variance)
}

/// Exact log-likelihood of `series` under Vasicek `(alpha, theta, sigma)`,
/// conditional on the first observation.
pub fn log_likelihood(series: &ObservedSeries, alpha: Real, theta: Real, sigma: Real) -> Result<Real> {
    ensure_domain!(
        alpha > 0.0 && alpha.is_finite(),
        "alpha must be positive, got {alpha}"
    );
    ensure_domain!(
        sigma > 0.0 && sigma.is_finite(),
        "sigma must be positive, got {sigma}"
    );
    ensure_domain!(theta.is_finite(), "theta must be finite, got {theta}");
    let (decay, variance) = transition_moments(alpha, sigma, series.dt());
    series.transitions().try_fold(0.0, |acc, (prev, next)| {
        let mean = prev * decay + theta * (1.0 - decay);
        Ok(acc + normal_log_pdf(next, mean, variance)?)
    })
}

/// Asymptotic standard errors of the estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardErrors {
    /// Standard error of `alpha`.
    pub alpha: Real,
    /// Standard error of `theta`.
    pub theta: Real,
    /// Standard error of `sigma`.
    pub sigma: Real,
}

/// Output of [`VasicekCalibrator::calibrate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatedParameters {
    /// Mean-reversion speed.
    pub alpha: Real,
    /// Long-run mean.
    pub theta: Real,
    /// Volatility.
    pub sigma: Real,
    /// Log-likelihood attained at the estimate.
    pub log_likelihood: Real,
    /// From the inverse observed information; `None` when that matrix is
    /// singular or not positive on its diagonal.
    pub std_errors: Option<StandardErrors>,
    /// Simplex iterations used.
    pub iterations: Size,
    /// Conditions met along the way.
    pub warnings: Vec<NumericWarning>,
}

impl EstimatedParameters {
    /// Whether the optimizer met a convergence test.
    pub fn converged(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, NumericWarning::NotConverged { .. }))
    }

    /// Model parameters starting from short rate `r0`.
    pub fn into_model_parameters(&self, r0: Rate) -> Result<ModelParameters> {
        ModelParameters::new(self.alpha, self.sigma, self.theta, r0)
    }
}

/// Settings for [`VasicekCalibrator`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig {
    /// Simplex stopping rules.
    pub end_criteria: EndCriteria,
    /// Initial simplex size in `(ln α, θ, ln σ)` coordinates.
    pub simplex_lambda: Real,
    /// Relative finite-difference step for the standard-error Hessian.
    pub hessian_step: Real,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            end_criteria: EndCriteria::default(),
            simplex_lambda: 0.1,
            hessian_step: 1e-4,
        }
    }
}

/// Vasicek maximum-likelihood estimator.
///
/// Each call to [`calibrate`](Self::calibrate) builds a fresh optimizer;
/// nothing is retained between calls.
///
/// # Limitations
///
/// The simplex is a local method. The result maximises the likelihood
/// near the AR(1) starting point and is not guaranteed to be the global
/// maximum. Series with little mean reversion over their span give flat
/// likelihoods in `α`; check `std_errors` before trusting `alpha`.
#[derive(Debug, Clone, Default)]
pub struct VasicekCalibrator {
    config: CalibrationConfig,
}

impl VasicekCalibrator {
    /// Create a calibrator.
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Estimate `(alpha, theta, sigma)` from `series`.
    pub fn calibrate(&self, series: &ObservedSeries) -> Result<EstimatedParameters> {
        let start = starting_point(series);
        tracing::debug!(
            alpha = start[0].exp(),
            theta = start[1],
            sigma = start[2].exp(),
            "calibration starting point"
        );

        let negative_ll = |x: &Array| -> Real {
            log_likelihood(series, x[0].exp(), x[1], x[2].exp()).map_or(Real::MAX, |ll| -ll)
        };
        let result = Simplex::new(self.config.simplex_lambda).minimize(
            &negative_ll,
            &NoConstraint,
            &start,
            &self.config.end_criteria,
        )?;

        let (alpha, theta, sigma) = (result.x[0].exp(), result.x[1], result.x[2].exp());
        let log_likelihood = log_likelihood(series, alpha, theta, sigma)?;
        if !log_likelihood.is_finite() {
            fail!("log-likelihood at alpha = {alpha}, theta = {theta}, sigma = {sigma} is not finite");
        }

        let mut warnings = Vec::new();
        if !result.end_type.converged() {
            tracing::warn!(
                iterations = result.iterations,
                "likelihood maximisation hit its iteration limit, returning best estimate"
            );
            warnings.push(NumericWarning::NotConverged {
                iterations: result.iterations,
            });
        }
        if alpha < DEGENERATE_ALPHA {
            tracing::debug!(alpha, "estimated mean reversion below threshold");
            warnings.push(NumericWarning::DegenerateAlpha { alpha });
        }

        let std_errors = self.standard_errors(series, alpha, theta, sigma)?;
        tracing::info!(
            alpha,
            theta,
            sigma,
            log_likelihood,
            iterations = result.iterations,
            observations = series.len(),
            "vasicek calibration finished"
        );

        Ok(EstimatedParameters {
            alpha,
            theta,
            sigma,
            log_likelihood,
            std_errors,
            iterations: result.iterations,
            warnings,
        })
    }

    /// Square roots of the diagonal of the inverse Hessian of the negative
    /// log-likelihood in `(α, θ, σ)`.
    fn standard_errors(
        &self,
        series: &ObservedSeries,
        alpha: Real,
        theta: Real,
        sigma: Real,
    ) -> Result<Option<StandardErrors>> {
        let negative_ll = |x: &Array| -> Real {
            log_likelihood(series, x[0], x[1], x[2]).map_or(Real::MAX, |ll| -ll)
        };
        let at = DVector::from_vec(vec![alpha, theta, sigma]);
        let hessian = numerical_hessian(&negative_ll, &at, self.config.hessian_step)?;
        if hessian.iter().any(|h| !h.is_finite()) {
            return Ok(None);
        }
        let Some(covariance) = hessian.try_inverse() else {
            return Ok(None);
        };
        let variances = covariance.diagonal();
        if variances.iter().any(|&v| v <= 0.0 || !v.is_finite()) {
            return Ok(None);
        }
        Ok(Some(StandardErrors {
            alpha: variances[0].sqrt(),
            theta: variances[1].sqrt(),
            sigma: variances[2].sqrt(),
        }))
    }
}

/// AR(1) least-squares start in `(ln α, θ, ln σ)`.
///
/// `r_{i+1} = a + b r_i + ε` gives `α = −ln b / Δt`, `θ = a / (1 − b)` and
/// `σ² = Var(ε) · 2α / (1 − b²)`. A slope outside `(0, 1)` has no Vasicek
/// reading; the start then falls back to `α = 1`, the sample mean and the
/// increment volatility.
fn starting_point(series: &ObservedSeries) -> Array {
    let dt = series.dt();
    let n = (series.len() - 1) as Real;
    let (sx, sy) = series
        .transitions()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mx, my) = (sx / n, sy / n);
    let (sxx, sxy) = series.transitions().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        (sxx + (x - mx) * (x - mx), sxy + (x - mx) * (y - my))
    });

    let floor_sigma = |s: Real| if s > 1e-8 && s.is_finite() { s } else { 1e-4 };

    if sxx > 0.0 {
        let b = sxy / sxx;
        if b > 0.0 && b < 1.0 {
            let a = my - b * mx;
            let residual_var = series
                .transitions()
                .map(|(x, y)| {
                    let e = y - a - b * x;
                    e * e
                })
                .sum::<Real>()
                / n;
            let alpha = -b.ln() / dt;
            let theta = a / (1.0 - b);
            let sigma = (residual_var * 2.0 * alpha / (1.0 - b * b)).sqrt();
            return DVector::from_vec(vec![alpha.ln(), theta, floor_sigma(sigma).ln()]);
        }
    }

    let rates = series.rates();
    let mean = rates.iter().sum::<Real>() / rates.len() as Real;
    let increment_var = series
        .transitions()
        .map(|(x, y)| (y - x) * (y - x))
        .sum::<Real>()
        / n;
    let sigma = floor_sigma((increment_var / dt).sqrt());
    DVector::from_vec(vec![0.0, mean, sigma.ln()])
}
