//! Optimization framework.
//!
//! Provides scalar cost functions, parameter constraints, end criteria, the
//! Nelder–Mead [`Simplex`] minimizer and a finite-difference Hessian used to
//! attach standard errors to maximum-likelihood estimates.

use crate::{Array, Matrix};
use sr_core::{ensure, Real, Result, Size};

// ── Cost function trait ───────────────────────────────────────────────────────

/// A scalar objective to be minimized.
pub trait CostFunction {
    /// Evaluate the objective at `x`.
    ///
    /// Non-finite values are treated as infeasible by the optimizers.
    fn value(&self, x: &Array) -> Real;
}

impl<F> CostFunction for F
where
    F: Fn(&Array) -> Real,
{
    fn value(&self, x: &Array) -> Real {
        self(x)
    }
}

// ── Constraints ───────────────────────────────────────────────────────────────

/// A constraint on the parameter space.
pub trait Constraint {
    /// Return `true` if `x` satisfies the constraint.
    fn test(&self, x: &Array) -> bool;
}

/// No constraint: all parameter values are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraint;

impl Constraint for NoConstraint {
    fn test(&self, _x: &Array) -> bool {
        true
    }
}

// ── End criteria ──────────────────────────────────────────────────────────────

/// Criteria to stop an optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndCriteria {
    /// Maximum number of iterations.
    pub max_iterations: Size,
    /// Maximum number of iterations without improvement of the best value.
    pub max_stationary_state_iterations: Size,
    /// Relative spread of the simplex values below which it has converged.
    pub function_epsilon: Real,
}

impl EndCriteria {
    /// Create new end criteria.
    pub fn new(
        max_iterations: Size,
        max_stationary_state_iterations: Size,
        function_epsilon: Real,
    ) -> Self {
        Self {
            max_iterations,
            max_stationary_state_iterations,
            function_epsilon,
        }
    }
}

impl Default for EndCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 5_000,
            max_stationary_state_iterations: 500,
            function_epsilon: 1e-12,
        }
    }
}

/// The reason an optimization terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndCriteriaType {
    /// Maximum iterations reached.
    MaxIterations,
    /// Spread of the simplex values fell below the function epsilon.
    FunctionEpsilon,
    /// Best value did not improve for the stationary-state budget.
    StationaryPoint,
}

impl EndCriteriaType {
    /// Whether the optimizer stopped because it met a convergence test
    /// rather than running out of iterations.
    pub fn converged(self) -> bool {
        !matches!(self, Self::MaxIterations)
    }
}

/// Result of an optimization.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Final parameter values.
    pub x: Array,
    /// Final function value.
    pub value: Real,
    /// Number of iterations performed.
    pub iterations: Size,
    /// Reason for termination.
    pub end_type: EndCriteriaType,
}

// ── Simplex (Nelder–Mead) ─────────────────────────────────────────────────────

const TINY: Real = 1e-300;

/// Nelder–Mead simplex optimizer.
///
/// Carries no state between calls to [`Simplex::minimize`]; the simplex is
/// rebuilt from the starting point every time.
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    lambda: Real,
}

impl Simplex {
    /// Create a new simplex optimizer whose initial vertices are offset by
    /// `lambda` along each axis.
    pub fn new(lambda: Real) -> Self {
        Self { lambda }
    }

    /// Minimize `cost_fn` subject to `constraint`, starting from `initial_values`.
    ///
    /// Points that violate the constraint or evaluate to a non-finite value
    /// are ranked worst, so the simplex walks away from them.
    pub fn minimize<C, K>(
        &self,
        cost_fn: &C,
        constraint: &K,
        initial_values: &Array,
        end_criteria: &EndCriteria,
    ) -> Result<OptimizationResult>
    where
        C: CostFunction + ?Sized,
        K: Constraint + ?Sized,
    {
        let n = initial_values.len();
        ensure!(n > 0, "cannot optimize over an empty parameter vector");
        ensure!(
            self.lambda > 0.0,
            "simplex step must be positive, got {}",
            self.lambda
        );
        ensure!(
            constraint.test(initial_values),
            "initial values violate the constraint"
        );

        let evaluate = |x: &Array| -> Real {
            if !constraint.test(x) {
                return Real::MAX;
            }
            let v = cost_fn.value(x);
            if v.is_finite() {
                v
            } else {
                Real::MAX
            }
        };

        let mut vertices: Vec<Array> = Vec::with_capacity(n + 1);
        vertices.push(initial_values.clone());
        for i in 0..n {
            let mut v = initial_values.clone();
            v[i] += self.lambda;
            if !constraint.test(&v) {
                v[i] = initial_values[i] - self.lambda;
            }
            vertices.push(v);
        }
        let mut values: Vec<Real> = vertices.iter().map(&evaluate).collect();

        let mut iterations = 0;
        let mut stationary_count = 0;
        let mut prev_best = Real::MAX;

        loop {
            let mut order: Vec<usize> = (0..=n).collect();
            order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
            let (ilo, inhi, ihi) = (order[0], order[n - 1], order[n]);

            iterations += 1;
            let finish = |end_type| OptimizationResult {
                x: vertices[ilo].clone(),
                value: values[ilo],
                iterations,
                end_type,
            };

            let spread = (values[ihi] - values[ilo]).abs();
            let scale = values[ihi].abs() + values[ilo].abs();
            if spread <= end_criteria.function_epsilon * scale + TINY {
                return Ok(finish(EndCriteriaType::FunctionEpsilon));
            }
            if (prev_best - values[ilo]).abs() <= end_criteria.function_epsilon * values[ilo].abs()
            {
                stationary_count += 1;
                if stationary_count >= end_criteria.max_stationary_state_iterations {
                    return Ok(finish(EndCriteriaType::StationaryPoint));
                }
            } else {
                stationary_count = 0;
            }
            prev_best = values[ilo];
            if iterations >= end_criteria.max_iterations {
                return Ok(finish(EndCriteriaType::MaxIterations));
            }
            tracing::trace!(iterations, best = values[ilo], spread, "simplex step");

            // Centroid of every vertex but the worst.
            let mut centroid = Array::zeros(n);
            for (i, v) in vertices.iter().enumerate() {
                if i != ihi {
                    centroid += v;
                }
            }
            centroid /= n as Real;

            let reflected = &centroid * 2.0 - &vertices[ihi];
            let fr = evaluate(&reflected);

            if fr < values[ilo] {
                let expanded = &reflected * 2.0 - &centroid;
                let fe = evaluate(&expanded);
                if fe < fr {
                    vertices[ihi] = expanded;
                    values[ihi] = fe;
                } else {
                    vertices[ihi] = reflected;
                    values[ihi] = fr;
                }
            } else if fr < values[inhi] {
                vertices[ihi] = reflected;
                values[ihi] = fr;
            } else {
                let contracted = if fr < values[ihi] {
                    (&centroid + &reflected) / 2.0
                } else {
                    (&centroid + &vertices[ihi]) / 2.0
                };
                let fc = evaluate(&contracted);
                if fc < fr.min(values[ihi]) {
                    vertices[ihi] = contracted;
                    values[ihi] = fc;
                } else {
                    // Shrink everything towards the best vertex.
                    let best = vertices[ilo].clone();
                    for i in 0..=n {
                        if i != ilo {
                            vertices[i] = (&best + &vertices[i]) / 2.0;
                            values[i] = evaluate(&vertices[i]);
                        }
                    }
                }
            }
        }
    }
}

// ── Finite-difference curvature ───────────────────────────────────────────────

/// Central-difference Hessian of `cost_fn` at `x`.
///
/// The step along axis `i` is `relative_step * max(|x_i|, 0.01)`.
pub fn numerical_hessian<C>(cost_fn: &C, x: &Array, relative_step: Real) -> Result<Matrix>
where
    C: CostFunction + ?Sized,
{
    ensure!(
        relative_step > 0.0,
        "finite-difference step must be positive, got {relative_step}"
    );
    let n = x.len();
    let h: Vec<Real> = x.iter().map(|xi| relative_step * xi.abs().max(0.01)).collect();
    let shifted = |moves: &[(usize, Real)]| {
        let mut y = x.clone();
        for &(i, d) in moves {
            y[i] += d;
        }
        cost_fn.value(&y)
    };

    let f0 = cost_fn.value(x);
    let mut hess = Matrix::zeros(n, n);
    for i in 0..n {
        let fp = shifted(&[(i, h[i])]);
        let fm = shifted(&[(i, -h[i])]);
        hess[(i, i)] = (fp - 2.0 * f0 + fm) / (h[i] * h[i]);
        for j in (i + 1)..n {
            let fpp = shifted(&[(i, h[i]), (j, h[j])]);
            let fpm = shifted(&[(i, h[i]), (j, -h[j])]);
            let fmp = shifted(&[(i, -h[i]), (j, h[j])]);
            let fmm = shifted(&[(i, -h[i]), (j, -h[j])]);
            let hij = (fpp - fpm - fmp + fmm) / (4.0 * h[i] * h[j]);
            hess[(i, j)] = hij;
            hess[(j, i)] = hij;
        }
    }
    Ok(hess)
}
