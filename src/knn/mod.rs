//! K-Nearest-Neighbors estimator for classification and regression.

pub mod distance;
pub mod heap_utils;

use std::fmt;
use std::str::FromStr;

use num_traits::{AsPrimitive, Float};
use tracing::{debug, warn};

use crate::common_types::{DataPoint, Label, TrainingSet};
use crate::error::{KnnError, Result};
use distance::euclidean_distance;
use heap_utils::KBestNeighbors;

/// How neighbor labels are turned into a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProblemType {
    /// Majority vote among the neighbor labels.
    #[default]
    Classification,
    /// Arithmetic mean of the neighbor labels.
    Regression,
}

impl FromStr for ProblemType {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "classification" => Ok(ProblemType::Classification),
            "regression" => Ok(ProblemType::Regression),
            _ => Err(KnnError::UnsupportedProblemType(s.to_string())),
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Classification => f.write_str("classification"),
            ProblemType::Regression => f.write_str("regression"),
        }
    }
}

/// One predicted label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prediction<L> {
    Class(L),
    Value(f64),
}

impl<L: Label> Prediction<L> {
    pub fn class(&self) -> Option<&L> {
        match self {
            Prediction::Class(label) => Some(label),
            Prediction::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Prediction::Class(_) => None,
            Prediction::Value(v) => Some(*v),
        }
    }

    /// Numeric view of either variant; `None` for non-numeric class labels.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Prediction::Class(label) => label.to_f64(),
            Prediction::Value(v) => Some(*v),
        }
    }
}

/// A training point selected as a neighbor of a query.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    /// Position in the training set.
    pub index: usize,
    pub distance: f64,
}

/// The K-Nearest-Neighbors estimator.
///
/// Nothing is computed at fit time: `fit` stores the training set and every
/// prediction scans it with Euclidean distance.
#[derive(Debug, Clone)]
pub struct KnnEstimator<F, L> {
    k: usize,
    problem: ProblemType,
    training_set: Option<TrainingSet<F, L>>,
}

impl<F, L> KnnEstimator<F, L>
where
    F: Float + AsPrimitive<f64>,
    L: Label,
{
    pub fn new(k: usize, problem: ProblemType) -> Result<Self> {
        if k == 0 {
            return Err(KnnError::InvalidInput(
                "k must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            k,
            problem,
            training_set: None,
        })
    }

    /// Builds an estimator from a problem name such as `"classification"`.
    pub fn with_problem_name(k: usize, problem: &str) -> Result<Self> {
        Self::new(k, problem.parse()?)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn problem(&self) -> ProblemType {
        self.problem
    }

    pub fn is_fitted(&self) -> bool {
        self.training_set.is_some()
    }

    pub fn training_set(&self) -> Option<&TrainingSet<F, L>> {
        self.training_set.as_ref()
    }

    /// Stores `features`/`labels` as the training set, replacing any previous one.
    /// On error the previous training set is kept.
    pub fn fit(&mut self, features: Vec<Vec<F>>, labels: Vec<L>) -> Result<()> {
        self.install(TrainingSet::new(features, labels)?);
        Ok(())
    }

    pub fn fit_points(&mut self, points: Vec<DataPoint<F, L>>) -> Result<()> {
        self.install(TrainingSet::from_points(points)?);
        Ok(())
    }

    fn install(&mut self, training_set: TrainingSet<F, L>) {
        debug!(
            n_samples = training_set.len(),
            dimensions = training_set.dimensions(),
            "fitted knn estimator"
        );
        if self.k > training_set.len() {
            warn!(
                k = self.k,
                n_samples = training_set.len(),
                "k exceeds the training set size, all samples will be used as neighbors"
            );
        }
        self.training_set = Some(training_set);
    }

    fn fitted(&self) -> Result<&TrainingSet<F, L>> {
        self.training_set.as_ref().ok_or(KnnError::NotFitted)
    }

    /// Predicts a label for every training point, using the training set itself
    /// as the query batch.
    pub fn predict(&self) -> Result<Vec<Prediction<L>>> {
        let training_set = self.fitted()?;
        debug!(n_queries = training_set.len(), k = self.k, problem = %self.problem, "predicting on training set");
        training_set
            .features()
            .iter()
            .map(|query| self.predict_with(training_set, query))
            .collect()
    }

    /// Predicts a label for each query, in query order. Either every query is
    /// answered or the call fails.
    pub fn predict_batch(&self, queries: &[Vec<F>]) -> Result<Vec<Prediction<L>>> {
        let training_set = self.fitted()?;
        debug!(n_queries = queries.len(), k = self.k, problem = %self.problem, "predicting batch");
        queries
            .iter()
            .map(|query| {
                check_dimensions(training_set, query)?;
                self.predict_with(training_set, query)
            })
            .collect()
    }

    pub fn predict_one(&self, query: &[F]) -> Result<Prediction<L>> {
        let training_set = self.fitted()?;
        check_dimensions(training_set, query)?;
        self.predict_with(training_set, query)
    }

    /// The `min(k, N)` nearest training points, nearest first.
    pub fn kneighbors(&self, query: &[F]) -> Result<Vec<Neighbor>> {
        let training_set = self.fitted()?;
        check_dimensions(training_set, query)?;
        Ok(self.nearest(training_set, query))
    }

    fn nearest(&self, training_set: &TrainingSet<F, L>, query: &[F]) -> Vec<Neighbor> {
        // k > N is capped here: all N points become neighbors.
        let mut best = KBestNeighbors::new(self.k.min(training_set.len()));
        // Indices are offered in ascending order, which the heap relies on for tie-breaking.
        for (index, row) in training_set.features().iter().enumerate() {
            best.add(euclidean_distance(query, row), index);
        }
        best.into_sorted()
            .into_iter()
            .map(|e| Neighbor {
                index: e.index,
                distance: e.distance.into_inner(),
            })
            .collect()
    }

    fn predict_with(&self, training_set: &TrainingSet<F, L>, query: &[F]) -> Result<Prediction<L>> {
        let neighbors = self.nearest(training_set, query);
        let labels = training_set.labels();
        match self.problem {
            ProblemType::Classification => {
                let winner = majority_vote(neighbors.iter().map(|n| &labels[n.index]))
                    .ok_or_else(|| KnnError::InvalidInput("no neighbors found".to_string()))?;
                Ok(Prediction::Class(winner.clone()))
            }
            ProblemType::Regression => {
                // Plain mean, not rounded even for integer labels.
                let mut sum = 0.0;
                for n in &neighbors {
                    sum += labels[n.index]
                        .to_f64()
                        .ok_or(KnnError::NonNumericLabel { index: n.index })?;
                }
                Ok(Prediction::Value(sum / neighbors.len() as f64))
            }
        }
    }
}

fn check_dimensions<F, L>(training_set: &TrainingSet<F, L>, query: &[F]) -> Result<()> {
    if query.len() != training_set.dimensions() {
        return Err(KnnError::InvalidInput(format!(
            "query has {} dimensions, training set has {}",
            query.len(),
            training_set.dimensions()
        )));
    }
    Ok(())
}

/// Most frequent label; on a tie the label seen first wins.
fn majority_vote<'a, L: PartialEq + 'a>(labels: impl Iterator<Item = &'a L>) -> Option<&'a L> {
    // Counts in first-seen order; labels only need PartialEq, so no HashMap here.
    let mut counts: Vec<(&L, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&L, usize)> = None;
    for (label, count) in counts {
        // Strictly greater, so an equal count never displaces an earlier label.
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
