pub mod comparison;
pub mod generator;
pub mod pipeline;
pub mod scale;
pub mod series;
pub mod time_range;
pub mod types;

pub use comparison::{ComparisonDeriver, DEFAULT_COMPARISON_FACTOR};
pub use generator::{DEFAULT_POINT_COUNT, GeneratorConfig, SampleRange, SeriesGenerator, SeriesSource};
pub use pipeline::DatasetPipeline;
pub use scale::LinearScale;
pub use series::{ComparisonPoint, ComparisonSeries, Dataset, Series, SeriesPoint};
pub use time_range::TimeRange;
pub use types::{AxisBounds, Viewport};
