//! Error type shared by the estimator and its training data.

/// Errors reported by [`KnnEstimator`](crate::knn::KnnEstimator) and [`TrainingSet`](crate::common_types::TrainingSet).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Shapes or parameters that cannot be used (empty data, ragged rows, `k == 0`, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported problem type '{0}': expected 'classification' or 'regression'")]
    UnsupportedProblemType(String),

    #[error("estimator is not fitted, call fit() first")]
    NotFitted,

    /// Regression needs numeric labels; `index` points into the training set.
    #[error("label at training index {index} is not numeric, regression needs numeric labels")]
    NonNumericLabel { index: usize },
}

pub type Result<T> = std::result::Result<T, KnnError>;
