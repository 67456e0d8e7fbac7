//! Normal (Gaussian) distribution.

use sr_core::{ensure_domain, Error, Real, Result};
use statrs::distribution::{Continuous, Normal};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// The standard normal cumulative distribution function Φ(x).
///
/// Written as `erfc(-x/√2)/2`, so the lower tail does not go through the
/// `1 - Φ(-x)` cancellation. Accuracy is that of `statrs`' `erfc`, about
/// `1e-11` absolute near the centre.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// Log-density of `N(mean, variance)` evaluated at `x`.
///
/// Fails with [`Error::ParameterDomain`] unless `variance` is positive and
/// finite.
pub fn normal_log_pdf(x: Real, mean: Real, variance: Real) -> Result<Real> {
    ensure_domain!(
        variance > 0.0 && variance.is_finite(),
        "variance must be positive and finite, got {variance}"
    );
    let dist = Normal::new(mean, variance.sqrt())
        .map_err(|e| Error::ParameterDomain(format!("normal({mean}, {variance}): {e}")))?;
    Ok(dist.ln_pdf(x))
}

/// Peter J. Acklam's rational approximation to the inverse normal CDF.
///
/// Maximum absolute error < 1.15e-9. Callers guarantee `0 < p < 1`.
pub(crate) fn acklam_inverse(p: Real) -> Real {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e+01,
        2.209_460_984_245_205e+02,
        -2.759_285_104_469_687e+02,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e+01,
        2.506_628_277_459_239e+00,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e+01,
        1.615_858_368_580_409e+02,
        -1.556_989_798_598_866e+02,
        6.680_131_188_771_972e+01,
        -1.328_068_155_288_572e+01,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-03,
        -3.223_964_580_411_365e-01,
        -2.400_758_277_161_838e+00,
        -2.549_732_539_343_734e+00,
        4.374_664_141_464_968e+00,
        2.938_163_982_698_783e+00,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-03,
        3.224_671_290_700_398e-01,
        2.445_134_137_142_996e+00,
        3.754_408_661_907_416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: Real| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normal_cdf_reference_values() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        // statrs' erfc is accurate to roughly 1e-11 here.
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_746_068_543, epsilon = 1e-10);
        assert_abs_diff_eq!(normal_cdf(-1.959_963_984_540_054), 0.025, epsilon = 1e-10);
    }

    #[test]
    fn normal_cdf_symmetry() {
        for x in [0.1, 0.7, 1.3, 2.9, 5.0] {
            assert_abs_diff_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn log_pdf_matches_closed_form() {
        let (x, m, v) = (0.3, 0.1, 0.04);
        let expected = -0.5 * (2.0 * std::f64::consts::PI * v).ln() - (x - m) * (x - m) / (2.0 * v);
        assert_abs_diff_eq!(normal_log_pdf(x, m, v).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn log_pdf_rejects_zero_variance() {
        assert!(matches!(
            normal_log_pdf(0.0, 0.0, 0.0),
            Err(Error::ParameterDomain(_))
        ));
    }

    #[test]
    fn acklam_inverse_roundtrip() {
        for p in [0.001, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 0.999] {
            assert_abs_diff_eq!(normal_cdf(acklam_inverse(p)), p, epsilon = 1e-8);
        }
    }
}
