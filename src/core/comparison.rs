use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{ComparisonPoint, ComparisonSeries, SampleRange, Series};
use crate::error::{ChartError, ChartResult};

/// Default perturbation factor bounds, `[0.8, 1.2)`.
pub const DEFAULT_COMPARISON_FACTOR: SampleRange = SampleRange::new(0.8, 1.2);

/// Derives a price-only comparison overlay by scaling each base price with an
/// independent random factor.
#[derive(Debug, Clone)]
pub struct ComparisonDeriver<R: Rng = StdRng> {
    factor: SampleRange,
    rng: R,
}

impl ComparisonDeriver<StdRng> {
    pub fn new(factor: SampleRange) -> ChartResult<Self> {
        Self::with_rng(factor, StdRng::from_entropy())
    }

    pub fn seeded(factor: SampleRange, seed: u64) -> ChartResult<Self> {
        Self::with_rng(factor, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ComparisonDeriver<R> {
    pub fn with_rng(factor: SampleRange, rng: R) -> ChartResult<Self> {
        let factor = factor.validate("comparison factor")?;
        if factor.min <= 0.0 {
            return Err(ChartError::InvalidData(
                "comparison factor must be > 0".to_owned(),
            ));
        }
        Ok(Self { factor, rng })
    }

    #[must_use]
    pub fn factor_range(&self) -> SampleRange {
        self.factor
    }

    /// Fails with `InvalidInput` on an empty base; a shown comparison must
    /// never be empty.
    pub fn derive(&mut self, base: &Series) -> ChartResult<ComparisonSeries> {
        if base.is_empty() {
            return Err(ChartError::InvalidInput(
                "cannot derive a comparison series from an empty base series".to_owned(),
            ));
        }

        let factor = self.factor;
        Ok(base
            .points()
            .iter()
            .map(|point| ComparisonPoint {
                index: point.index,
                price: point.price * factor.sample(&mut self.rng),
            })
            .collect())
    }
}
