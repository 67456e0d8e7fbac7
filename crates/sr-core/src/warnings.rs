//! Non-fatal numerical conditions.
//!
//! These are attached to results rather than raised as errors: the value
//! returned alongside them is still the best the routine could produce.

use crate::{Real, Size};
use std::fmt;

/// A numerical condition worth reporting that does not invalidate a result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericWarning {
    /// Mean reversion fell below the degenerate threshold and the
    /// no-reversion limit was used instead of the closed form.
    DegenerateAlpha {
        /// The mean-reversion speed that triggered the limit.
        alpha: Real,
    },
    /// The optimizer stopped on its iteration budget.
    NotConverged {
        /// Iterations performed.
        iterations: Size,
    },
    /// The simulation horizon is not a whole number of steps; the grid was
    /// truncated.
    TruncatedGrid {
        /// Horizon asked for.
        requested: Real,
        /// Horizon actually simulated.
        achieved: Real,
    },
}

impl fmt::Display for NumericWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateAlpha { alpha } => {
                write!(f, "alpha = {alpha:e} below threshold, using no-reversion limit")
            }
            Self::NotConverged { iterations } => {
                write!(f, "optimizer did not converge after {iterations} iterations")
            }
            Self::TruncatedGrid {
                requested,
                achieved,
            } => write!(
                f,
                "horizon {requested} is not a multiple of dt, simulated to {achieved}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_iterations() {
        let w = NumericWarning::NotConverged { iterations: 42 };
        assert!(w.to_string().contains("42"));
    }
}
