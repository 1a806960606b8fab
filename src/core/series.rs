use serde::{Deserialize, Serialize};

/// One generated sample. `index` is the 1-based category label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub index: u32,
    pub price: f64,
    pub volume: f64,
}

impl SeriesPoint {
    #[must_use]
    pub const fn new(index: u32, price: f64, volume: f64) -> Self {
        Self {
            index,
            price,
            volume,
        }
    }
}

/// Ordered price/volume series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    #[must_use]
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.price)
    }

    pub fn volumes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.volume)
    }
}

impl FromIterator<SeriesPoint> for Series {
    fn from_iter<I: IntoIterator<Item = SeriesPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Price-only sample of a comparison overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub index: u32,
    pub price: f64,
}

/// Price-only overlay derived from a base [`Series`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    points: Vec<ComparisonPoint>,
}

impl ComparisonSeries {
    #[must_use]
    pub fn new(points: Vec<ComparisonPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ComparisonPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.price)
    }
}

impl FromIterator<ComparisonPoint> for ComparisonSeries {
    fn from_iter<I: IntoIterator<Item = ComparisonPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Base series plus its optional comparison overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub base: Series,
    pub comparison: Option<ComparisonSeries>,
}

impl Dataset {
    #[must_use]
    pub fn new(base: Series, comparison: Option<ComparisonSeries>) -> Self {
        Self { base, comparison }
    }

    #[must_use]
    pub fn has_comparison(&self) -> bool {
        self.comparison.is_some()
    }
}
