use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Dataset;
use crate::error::{ChartError, ChartResult};

/// Which series set the panel hands to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Base,
    Comparison,
}

/// One drawable dataset inside a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Price,
    Volume,
    ComparisonPrice,
}

impl DatasetKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DatasetKind::Price => "Price (USD)",
            DatasetKind::Volume => "Volume",
            DatasetKind::ComparisonPrice => "Comparison Price (USD)",
        }
    }

    #[must_use]
    pub const fn is_price(self) -> bool {
        matches!(self, DatasetKind::Price | DatasetKind::ComparisonPrice)
    }
}

/// Borrowed series set for one draw request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSelection<'a> {
    kind: SelectionKind,
    dataset: &'a Dataset,
}

impl<'a> SeriesSelection<'a> {
    #[must_use]
    pub fn base(dataset: &'a Dataset) -> Self {
        Self {
            kind: SelectionKind::Base,
            dataset,
        }
    }

    /// Comparison selection; fails when the dataset carries no comparison.
    pub fn comparison(dataset: &'a Dataset) -> ChartResult<Self> {
        if !dataset.has_comparison() {
            return Err(ChartError::PreconditionFailed(
                "dataset has no comparison series".to_owned(),
            ));
        }
        Ok(Self {
            kind: SelectionKind::Comparison,
            dataset,
        })
    }

    #[must_use]
    pub fn kind(self) -> SelectionKind {
        self.kind
    }

    #[must_use]
    pub fn dataset(self) -> &'a Dataset {
        self.dataset
    }

    #[must_use]
    pub fn category_count(self) -> usize {
        self.dataset.base.len()
    }

    /// Datasets in draw/legend order.
    #[must_use]
    pub fn datasets(self) -> SmallVec<[DatasetKind; 3]> {
        let mut kinds: SmallVec<[DatasetKind; 3]> =
            SmallVec::from_slice(&[DatasetKind::Price, DatasetKind::Volume]);
        if self.kind == SelectionKind::Comparison {
            kinds.push(DatasetKind::ComparisonPrice);
        }
        kinds
    }

    /// Values of one dataset; empty when the dataset is not part of the selection.
    #[must_use]
    pub fn values(self, kind: DatasetKind) -> Vec<f64> {
        match kind {
            DatasetKind::Price => self.dataset.base.prices().collect(),
            DatasetKind::Volume => self.dataset.base.volumes().collect(),
            DatasetKind::ComparisonPrice if self.kind == SelectionKind::Comparison => self
                .dataset
                .comparison
                .as_ref()
                .map(|series| series.prices().collect())
                .unwrap_or_default(),
            DatasetKind::ComparisonPrice => Vec::new(),
        }
    }

    /// Category label (1-based point index) at `index`.
    #[must_use]
    pub fn label_at(self, index: usize) -> Option<u32> {
        self.dataset.base.points().get(index).map(|point| point.index)
    }
}
