//! This module contains the data structures the estimator is trained on.

use std::fmt::Debug;

use crate::error::{KnnError, Result};

/// A label attached to a training point.
///
/// Classification only needs equality. Regression averages labels, so it needs
/// `to_f64()` to return `Some`.
pub trait Label: Clone + PartialEq + Debug {
    fn to_f64(&self) -> Option<f64>;
}

macro_rules! impl_numeric_label {
    ($($t:ty),*) => {
        $(
            impl Label for $t {
                fn to_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_label!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Label for String {
    fn to_f64(&self) -> Option<f64> {
        None
    }
}

impl Label for &str {
    fn to_f64(&self) -> Option<f64> {
        None
    }
}

/// Represents a single data point, with features and a label.
///
/// - `F`: The type of the features (e.g., `f64`, `f32`).
/// - `L`: The type of the label (e.g., `i32`, `String`, `f64`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoint<F, L> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }
}

/// Feature rows paired by position with their labels.
///
/// Always holds at least one row, every row has the same non-zero length and
/// there is exactly one label per row.
#[derive(Debug, Clone)]
pub struct TrainingSet<F, L> {
    features: Vec<Vec<F>>,
    labels: Vec<L>,
    dimensions: usize,
}

impl<F, L> TrainingSet<F, L> {
    pub fn new(features: Vec<Vec<F>>, labels: Vec<L>) -> Result<Self> {
        if features.is_empty() {
            return Err(KnnError::InvalidInput(
                "training set must contain at least one sample".to_string(),
            ));
        }
        if features.len() != labels.len() {
            return Err(KnnError::InvalidInput(format!(
                "got {} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let dimensions = features[0].len();
        if dimensions == 0 {
            return Err(KnnError::InvalidInput(
                "feature vectors must have at least one dimension".to_string(),
            ));
        }
        if let Some((row, bad)) = features
            .iter()
            .enumerate()
            .find(|(_, f)| f.len() != dimensions)
        {
            return Err(KnnError::InvalidInput(format!(
                "feature row {} has {} dimensions, expected {}",
                row,
                bad.len(),
                dimensions
            )));
        }

        Ok(TrainingSet {
            features,
            labels,
            dimensions,
        })
    }

    pub fn from_points(points: Vec<DataPoint<F, L>>) -> Result<Self> {
        let (features, labels) = points.into_iter().map(|p| (p.features, p.label)).unzip();
        Self::new(features, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Never true for a constructed set; kept for the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn features(&self) -> &[Vec<F>] {
        &self.features
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn row(&self, index: usize) -> Option<(&[F], &L)> {
        Some((self.features.get(index)?.as_slice(), self.labels.get(index)?))
    }
}
