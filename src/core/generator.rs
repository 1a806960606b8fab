use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Series, SeriesPoint, TimeRange};
use crate::error::{ChartError, ChartResult};

/// Points produced per generation cycle.
pub const DEFAULT_POINT_COUNT: usize = 50;

/// Half-open sampling interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(self, name: &str) -> ChartResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ChartError::InvalidData(format!(
                "{name} range must be finite with min < max"
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    pub(crate) fn sample<R: Rng>(self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// Source of base series for a time range.
///
/// Asynchronous sources drive `ChartViewState::begin_load` /
/// `ChartViewState::complete_load` themselves; this trait is the synchronous
/// path used by `set_time_range`.
pub trait SeriesSource {
    fn generate(&mut self, range: TimeRange, point_count: usize) -> ChartResult<Series>;
}

/// Bounds used by [`SeriesGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub price: SampleRange,
    pub volume: SampleRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            price: SampleRange::new(60_000.0, 65_000.0),
            volume: SampleRange::new(0.0, 500_000.0),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(self) -> ChartResult<Self> {
        self.price.validate("price")?;
        self.volume.validate("volume")?;
        Ok(self)
    }
}

/// Synthetic price/volume generator. Range-agnostic.
#[derive(Debug, Clone)]
pub struct SeriesGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl SeriesGenerator<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn new(config: GeneratorConfig) -> ChartResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic generator for tests and reproducible snapshots.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> ChartResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SeriesGenerator<R> {
    pub fn with_rng(config: GeneratorConfig, rng: R) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> GeneratorConfig {
        self.config
    }

    /// Produces `point_count` points labelled `1..=point_count`.
    pub fn generate_points(&mut self, point_count: usize) -> Series {
        let GeneratorConfig { price, volume } = self.config;
        (1..=point_count)
            .map(|label| {
                let index = u32::try_from(label).unwrap_or(u32::MAX);
                SeriesPoint::new(
                    index,
                    price.sample(&mut self.rng),
                    volume.sample(&mut self.rng),
                )
            })
            .collect()
    }
}

impl<R: Rng> SeriesSource for SeriesGenerator<R> {
    fn generate(&mut self, range: TimeRange, point_count: usize) -> ChartResult<Series> {
        let series = self.generate_points(point_count);
        trace!(%range, point_count, "generated synthetic series");
        Ok(series)
    }
}
