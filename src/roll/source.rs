use crate::common::{Float, Int};
use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal, Pareto};

/// The capability every random primitive of the calculator draws from.
///
/// Implementations must be reproducible: restoring a previously captured
/// [`state`](RandomSource::state) and repeating the same calls yields the
/// same values.
pub trait RandomSource {
    type State: Clone;

    /// A float in `[lo, hi]`. `lo > hi` is allowed and mirrors the range.
    fn uniform_float(&mut self, lo: Float, hi: Float) -> Float;

    /// An integer in `[lo, hi]`, both inclusive.
    fn uniform_int(&mut self, lo: Int, hi: Int) -> Result<Int>;

    fn gaussian(&mut self, mean: Float, sd: Float) -> Result<Float>;

    fn pareto(&mut self, shape: Float) -> Result<Float>;

    fn state(&self) -> Self::State;

    fn set_state(&mut self, state: Self::State);

    /// `1.0` or `-1.0` with equal odds.
    fn choose_sign(&mut self) -> Float {
        if self.uniform_float(0.0, 1.0) < 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// A Gaussian draw centred between `min` and `max`, clamped into that
    /// range.
    fn bell(&mut self, min: Float, max: Float) -> Result<Float> {
        let mean = max - (max - min) / 2.0;
        let sd = (max - min).abs() / 2.0;
        let x = self.gaussian(mean, sd)?;
        Ok(x.min(max).max(min))
    }

    fn bell_int(&mut self, min: Int, max: Int) -> Result<Int> {
        Ok(self.bell(min as Float, max as Float)?.round() as Int)
    }

    /// Offsets `value` by up to `distance` in a random direction. A distance
    /// below 1 is a ratio of `value` rather than an absolute amount.
    fn fuzz(&mut self, value: Float, distance: Float) -> Float {
        let sign = self.choose_sign();
        let distance = if distance < 1.0 {
            distance * value
        } else {
            distance
        };
        value + self.uniform_float(0.0, distance) * sign
    }
}

impl<R: Rng + Clone> RandomSource for R {
    type State = R;

    fn uniform_float(&mut self, lo: Float, hi: Float) -> Float {
        lo + (hi - lo) * self.gen::<Float>()
    }

    fn uniform_int(&mut self, lo: Int, hi: Int) -> Result<Int> {
        if lo > hi {
            return Err(Error::range_error(format!(
                "empty range for random integer: [{} {}]",
                lo, hi
            )));
        }
        Ok(self.gen_range(lo..=hi))
    }

    fn gaussian(&mut self, mean: Float, sd: Float) -> Result<Float> {
        if !(sd >= 0.0) {
            return Err(Error::range_error(format!(
                "gaussian standard deviation must be >= 0, got {}",
                sd
            )));
        }
        let normal = Normal::new(mean, sd).map_err(|e| {
            Error::range_error(format!("invalid gaussian (mean {}, sd {}): {}", mean, sd, e))
        })?;
        Ok(normal.sample(self))
    }

    fn pareto(&mut self, shape: Float) -> Result<Float> {
        let pareto = Pareto::new(1.0, shape)
            .map_err(|e| Error::range_error(format!("invalid pareto shape {}: {}", shape, e)))?;
        Ok(pareto.sample(self))
    }

    fn state(&self) -> Self::State {
        self.clone()
    }

    fn set_state(&mut self, state: Self::State) {
        *self = state;
    }
}

#[cfg(test)]
pub(crate) use step::StepSource;

#[cfg(test)]
mod step {
    use super::*;

    /// A predictable source: integers walk upwards by `step` and wrap
    /// within the requested range, floats sit at a fixed fraction of theirs.
    #[derive(Debug, Clone)]
    pub(crate) struct StepSource {
        current: Int,
        step: Int,
        pub fraction: Float,
        pub deviation: Float,
        pub pareto: Float,
    }

    impl StepSource {
        pub fn new(initial: Int, step: Int) -> Self {
            Self {
                current: initial,
                step,
                fraction: 0.5,
                deviation: 0.0,
                pareto: 1.0,
            }
        }
    }

    impl RandomSource for StepSource {
        type State = Int;

        fn uniform_float(&mut self, lo: Float, hi: Float) -> Float {
            lo + (hi - lo) * self.fraction
        }

        fn uniform_int(&mut self, lo: Int, hi: Int) -> Result<Int> {
            if lo > hi {
                return Err(Error::range_error("empty range"));
            }
            let ret = lo + (self.current - 1).rem_euclid(hi - lo + 1);
            self.current += self.step;
            Ok(ret)
        }

        fn gaussian(&mut self, mean: Float, sd: Float) -> Result<Float> {
            Ok(mean + self.deviation * sd)
        }

        fn pareto(&mut self, _shape: Float) -> Result<Float> {
            Ok(self.pareto)
        }

        fn state(&self) -> Self::State {
            self.current
        }

        fn set_state(&mut self, state: Self::State) {
            self.current = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_int_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let x = rng.uniform_int(-3, 3).unwrap();
            assert!((-3..=3).contains(&x));
        }
        assert!(matches!(rng.uniform_int(4, 3), Err(Error::Range(_))));
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let saved = rng.state();
        let first: Vec<_> = (0..5).map(|_| rng.uniform_int(1, 100).unwrap()).collect();
        rng.set_state(saved);
        let second: Vec<_> = (0..5).map(|_| rng.uniform_int(1, 100).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bell_clamps() {
        let mut src = StepSource::new(1, 1);
        src.deviation = 5.0;
        assert_eq!(src.bell(1.0, 3.0).unwrap(), 3.0);
        src.deviation = -5.0;
        assert_eq!(src.bell(1.0, 3.0).unwrap(), 1.0);
        src.deviation = 0.0;
        assert_eq!(src.bell(2.0, 8.0).unwrap(), 5.0);
        assert_eq!(src.bell_int(1, 4).unwrap(), 3);
    }

    #[test]
    fn test_bell_within_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let x = rng.bell(10.0, 20.0).unwrap();
            assert!((10.0..=20.0).contains(&x));
        }
    }

    #[test]
    fn test_fuzz_ratio_and_distance() {
        let mut src = StepSource::new(1, 1);
        src.fraction = 0.25;
        // ratio: distance is 0.5 * 20 = 10, draw is a quarter of that
        assert_eq!(src.fuzz(20.0, 0.5), 20.0 + 2.5);
        src.fraction = 0.75;
        // negative sign, absolute distance of 4
        assert_eq!(src.fuzz(20.0, 4.0), 20.0 - 3.0);
    }

    #[test]
    fn test_fuzz_stays_within_distance() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let x = rng.fuzz(10.0, 2.0);
            assert!((8.0..=12.0).contains(&x));
        }
    }

    #[test]
    fn test_invalid_distributions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(rng.gaussian(0.0, -1.0), Err(Error::Range(_))));
        assert!(matches!(rng.gaussian(0.0, Float::NAN), Err(Error::Range(_))));
        assert_eq!(rng.gaussian(3.0, 0.0).unwrap(), 3.0);
        assert!(matches!(rng.pareto(0.0), Err(Error::Range(_))));
        assert!(rng.pareto(10.0).unwrap() >= 1.0);
    }
}
