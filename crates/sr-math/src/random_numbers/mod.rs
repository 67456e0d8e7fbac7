//! Random number generators.
//!
//! Simulation code draws standard-normal deviates through the
//! [`GaussianRng`] trait so that the generator is always an explicit,
//! caller-owned value. Two implementations are provided:
//!
//! * [`PseudoRandomNormalRng`]: any `rand` generator sampled through
//!   `rand_distr::StandardNormal`;
//! * [`InverseCumulativeNormalRng`]: a Mersenne Twister (MT19937-64)
//!   mapped through the inverse normal CDF.

use crate::distributions::normal::acklam_inverse;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;
use sr_core::Real;

/// A source of independent standard-normal deviates.
pub trait GaussianRng {
    /// Draw the next `N(0, 1)` deviate.
    fn next_gaussian(&mut self) -> Real;
}

impl<G: GaussianRng + ?Sized> GaussianRng for &mut G {
    fn next_gaussian(&mut self) -> Real {
        (**self).next_gaussian()
    }
}

/// Standard-normal deviates from any `rand` generator.
#[derive(Debug, Clone)]
pub struct PseudoRandomNormalRng<R = StdRng> {
    rng: R,
}

impl PseudoRandomNormalRng<StdRng> {
    /// Create a generator backed by `StdRng` seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> PseudoRandomNormalRng<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give back the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> GaussianRng for PseudoRandomNormalRng<R> {
    fn next_gaussian(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // Top 53 bits give every representable double in [0, 1) equal weight.
        (self.rng.next_u64() >> 11) as Real / (1u64 << 53) as Real
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a Mersenne Twister and transforms its output through the inverse
/// CDF of the standard normal distribution.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }
}

impl GaussianRng for InverseCumulativeNormalRng {
    fn next_gaussian(&mut self) -> Real {
        // Exact 0 would map to -∞.
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        acklam_inverse(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Statistics;

    fn moments<G: GaussianRng>(rng: &mut G, n: usize) -> (Real, Real) {
        let stats: Statistics = (0..n).map(|_| rng.next_gaussian()).collect();
        (stats.mean().unwrap(), stats.variance().unwrap())
    }

    #[test]
    fn mt_range() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        for _ in 0..1_000 {
            let x = rng.next_real();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn icn_rng_moments() {
        let (mean, var) = moments(&mut InverseCumulativeNormalRng::new(42), 20_000);
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn pseudo_random_moments() {
        let (mean, var) = moments(&mut PseudoRandomNormalRng::from_seed(7), 20_000);
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = PseudoRandomNormalRng::from_seed(11);
        let mut b = PseudoRandomNormalRng::from_seed(11);
        for _ in 0..100 {
            assert_eq!(a.next_gaussian().to_bits(), b.next_gaussian().to_bits());
        }
        let mut c = InverseCumulativeNormalRng::new(11);
        let mut d = InverseCumulativeNormalRng::new(11);
        for _ in 0..100 {
            assert_eq!(c.next_gaussian().to_bits(), d.next_gaussian().to_bits());
        }
    }

    #[test]
    fn borrowed_generator_advances_owner() {
        fn draw<G: GaussianRng>(mut rng: G) -> Real {
            rng.next_gaussian()
        }
        let mut owner = PseudoRandomNormalRng::from_seed(3);
        let mut reference = PseudoRandomNormalRng::from_seed(3);
        assert_eq!(draw(&mut owner), reference.next_gaussian());
        assert_eq!(owner.next_gaussian(), reference.next_gaussian());
    }
}
