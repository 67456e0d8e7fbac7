//! Error types for shortrate-rs.
//!
//! A single `thiserror`-derived enum covers every fatal condition. Domain,
//! time-ordering and data-sufficiency failures each have their own variant
//! so callers can tell a bad model parameter from a bad query. The
//! `ensure_*!` macros return early with the matching variant.

use thiserror::Error;

/// The top-level error type used throughout shortrate-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A parameter lies outside its admissible domain: non-positive
    /// `alpha`/`sigma`, non-positive strike or forward, or a zero volatility
    /// passed to `d1`/`d2`.
    #[error("parameter out of domain: {0}")]
    ParameterDomain(String),

    /// Times are not ordered as `t <= T1 < T2`.
    #[error("time ordering violated: {0}")]
    TimeOrdering(String),

    /// Too few observations, or a non-uniform / non-positive sampling step.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A computation produced a value it cannot continue from.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),
}

/// Shorthand `Result` type used throughout shortrate-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> sr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sr_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> sr_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::ParameterDomain(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sr_core::{ensure_domain, errors::Error};
/// fn vol(sigma: f64) -> sr_core::errors::Result<f64> {
///     ensure_domain!(sigma > 0.0, "sigma must be positive, got {sigma}");
///     Ok(sigma)
/// }
/// assert!(matches!(vol(0.0), Err(Error::ParameterDomain(_))));
/// ```
#[macro_export]
macro_rules! ensure_domain {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::ParameterDomain(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::TimeOrdering(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sr_core::{ensure_order, errors::Error};
/// fn tenor(t1: f64, t2: f64) -> sr_core::errors::Result<f64> {
///     ensure_order!(t1 < t2, "T1 ({t1}) must precede T2 ({t2})");
///     Ok(t2 - t1)
/// }
/// assert!(matches!(tenor(1.0, 1.0), Err(Error::TimeOrdering(_))));
/// ```
#[macro_export]
macro_rules! ensure_order {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::TimeOrdering(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InsufficientData(...))` if `$cond` is false.
#[macro_export]
macro_rules! ensure_data {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InsufficientData(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use sr_core::{fail, errors::Error};
/// fn always_err() -> sr_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
