use rand::Rng;
use rand::rngs::StdRng;

use crate::core::{ComparisonDeriver, Dataset, SeriesSource, TimeRange};
use crate::error::ChartResult;

/// Base series source plus comparison deriver, producing a full [`Dataset`]
/// for a range.
#[derive(Debug, Clone)]
pub struct DatasetPipeline<S: SeriesSource, R: Rng = StdRng> {
    source: S,
    deriver: ComparisonDeriver<R>,
    point_count: usize,
}

impl<S: SeriesSource, R: Rng> DatasetPipeline<S, R> {
    #[must_use]
    pub fn new(source: S, deriver: ComparisonDeriver<R>, point_count: usize) -> Self {
        Self {
            source,
            deriver,
            point_count,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Generates the base series, then derives its comparison. The comparison
    /// is produced even when the panel does not currently show it.
    pub fn produce(&mut self, range: TimeRange) -> ChartResult<Dataset> {
        let base = self.source.generate(range, self.point_count)?;
        let comparison = self.deriver.derive(&base)?;
        Ok(Dataset::new(base, Some(comparison)))
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetPipeline;
    use crate::core::{
        ComparisonDeriver, DEFAULT_COMPARISON_FACTOR, GeneratorConfig, SeriesGenerator, TimeRange,
    };

    #[test]
    fn produced_dataset_pairs_base_and_comparison() {
        let generator = SeriesGenerator::seeded(GeneratorConfig::default(), 11).expect("generator");
        let deriver = ComparisonDeriver::seeded(DEFAULT_COMPARISON_FACTOR, 12).expect("deriver");
        let mut pipeline = DatasetPipeline::new(generator, deriver, 50);

        let dataset = pipeline.produce(TimeRange::OneMonth).expect("dataset");
        let comparison = dataset.comparison.as_ref().expect("comparison");
        assert_eq!(dataset.base.len(), 50);
        assert_eq!(comparison.len(), 50);
    }

    #[test]
    fn zero_points_fail_in_the_deriver() {
        let generator = SeriesGenerator::seeded(GeneratorConfig::default(), 1).expect("generator");
        let deriver = ComparisonDeriver::seeded(DEFAULT_COMPARISON_FACTOR, 2).expect("deriver");
        let mut pipeline = DatasetPipeline::new(generator, deriver, 0);
        assert!(pipeline.produce(TimeRange::OneDay).is_err());
    }
}
