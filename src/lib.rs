//! K-Nearest-Neighbors classification and regression over Euclidean distance.
//!
//! ```
//! use knn_estimator::{KnnEstimator, Prediction, ProblemType};
//!
//! let mut knn = KnnEstimator::new(1, ProblemType::Classification)?;
//! knn.fit(vec![vec![0.0, 0.0], vec![9.0, 9.0]], vec![0, 1])?;
//! assert_eq!(knn.predict()?, vec![Prediction::Class(0), Prediction::Class(1)]);
//! # Ok::<(), knn_estimator::KnnError>(())
//! ```

pub mod common_types;
pub mod error;
pub mod knn;
#[cfg(feature = "python")]
mod python;

pub use common_types::{DataPoint, Label, TrainingSet};
pub use error::{KnnError, Result};
pub use knn::distance::euclidean_distance;
pub use knn::{KnnEstimator, Neighbor, Prediction, ProblemType};
