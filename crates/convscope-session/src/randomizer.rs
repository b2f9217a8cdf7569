// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Uniform random grid generation.

use convscope_config::RandomizerConfig;
use convscope_structures::{round2, Field};
use rand::Rng;
use serde::Serialize;

use crate::{SessionError, SessionResult};

/// Closed interval `[min, max]` of cell values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomRange {
    min: f64,
    max: f64,
}

impl RandomRange {
    pub fn new(min: f64, max: f64) -> SessionResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SessionError::InvalidInput(format!(
                "random range bounds must be finite (min={}, max={})",
                min, max
            )));
        }
        if min > max {
            return Err(SessionError::InvalidInput(format!(
                "random range min {} exceeds max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// One value from the range, rounded to two decimals. A rounded value that
    /// would fall outside the range is clamped back to the nearest bound.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        round2(rng.gen_range(self.min..=self.max)).clamp(self.min, self.max)
    }

    /// A fresh container with every cell drawn independently.
    pub fn fill<F: Field, R: Rng + ?Sized>(&self, shape: F::Shape, rng: &mut R) -> F {
        F::from_fn(shape, |_| self.sample(rng))
    }
}

/// Separate ranges for the input and the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomRanges {
    pub image: RandomRange,
    pub kernel: RandomRange,
}

impl RandomRanges {
    pub fn new(image: RandomRange, kernel: RandomRange) -> Self {
        Self { image, kernel }
    }

    pub fn from_config(config: &RandomizerConfig) -> SessionResult<Self> {
        Ok(Self {
            image: RandomRange::new(config.image_min, config.image_max)?,
            kernel: RandomRange::new(config.kernel_min, config.kernel_max)?,
        })
    }
}

impl Default for RandomRanges {
    /// Image values in `[0, 9]`, kernel values in `[-2, 2]`.
    fn default() -> Self {
        Self {
            image: RandomRange { min: 0.0, max: 9.0 },
            kernel: RandomRange {
                min: -2.0,
                max: 2.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convscope_structures::{Grid2D, GridShape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(RandomRange::new(3.0, 1.0).is_err());
        assert!(RandomRange::new(f64::NEG_INFINITY, 1.0).is_err());
        assert!(RandomRange::new(1.0, f64::NAN).is_err());
        assert!(RandomRange::new(2.0, 2.0).is_ok());
    }

    #[test]
    fn test_fill_stays_in_range_with_two_decimals() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = RandomRange::new(-2.0, 2.0).unwrap();
        let grid: Grid2D = range.fill(GridShape::new(4, 6).unwrap(), &mut rng);

        for value in grid.view().iter().copied() {
            assert!((-2.0..=2.0).contains(&value));
            assert_eq!(value, round2(value));
        }
    }

    #[test]
    fn test_narrow_range_never_rounds_out_of_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let range = RandomRange::new(0.001, 0.004).unwrap();
        for _ in 0..200 {
            let value = range.sample(&mut rng);
            assert!((0.001..=0.004).contains(&value), "{} escaped", value);
        }

        let near_edge = RandomRange::new(1.996, 1.999).unwrap();
        let grid: Grid2D = near_edge.fill(GridShape::new(5, 5).unwrap(), &mut rng);
        assert!(grid.view().iter().all(|v| (1.996..=1.999).contains(v)));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let range = RandomRange::new(0.0, 9.0).unwrap();
        let shape = GridShape::new(3, 3).unwrap();
        let first: Grid2D = range.fill(shape, &mut StdRng::seed_from_u64(42));
        let second: Grid2D = range.fill(shape, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let ranges = RandomRanges::from_config(&RandomizerConfig::default()).unwrap();
        assert_eq!(ranges, RandomRanges::default());
    }
}
