use chart_panel::core::{
    ComparisonDeriver, DEFAULT_COMPARISON_FACTOR, GeneratorConfig, Series, SeriesGenerator,
    SeriesPoint, SeriesSource, TimeRange,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn derived_prices_stay_within_factor_bounds(
        prices in prop::collection::vec(0.01f64..10_000_000.0, 1..200),
        seed in any::<u64>()
    ) {
        let base: Series = prices
            .iter()
            .enumerate()
            .map(|(offset, price)| SeriesPoint::new(offset as u32 + 1, *price, 0.0))
            .collect();
        let mut deriver = ComparisonDeriver::seeded(DEFAULT_COMPARISON_FACTOR, seed).expect("deriver");
        let comparison = deriver.derive(&base).expect("comparison");

        prop_assert_eq!(comparison.len(), base.len());
        for (derived, original) in comparison.prices().zip(base.prices()) {
            prop_assert!(derived >= 0.8 * original);
            prop_assert!(derived < 1.2 * original);
        }
    }

    #[test]
    fn generated_points_respect_default_bounds(
        point_count in 1usize..300,
        seed in any::<u64>(),
        range_index in 0usize..7
    ) {
        let mut generator = SeriesGenerator::seeded(GeneratorConfig::default(), seed).expect("generator");
        let series = generator
            .generate(TimeRange::ALL[range_index], point_count)
            .expect("series");

        prop_assert_eq!(series.len(), point_count);
        for point in series.points() {
            prop_assert!(point.price >= 60_000.0 && point.price < 65_000.0);
            prop_assert!(point.volume >= 0.0 && point.volume < 500_000.0);
        }
    }
}
