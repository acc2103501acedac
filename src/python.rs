//! Python bindings, built with the `python` feature.

use pyo3::prelude::*;

use crate::error::KnnError;
use crate::knn::distance::euclidean_distance;
use crate::knn::{KnnEstimator, Prediction};

impl From<KnnError> for PyErr {
    fn from(err: KnnError) -> Self {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
    }
}

fn to_float(prediction: Prediction<f64>) -> f64 {
    match prediction {
        Prediction::Class(label) => label,
        Prediction::Value(value) => value,
    }
}

/// Calculates the Euclidean distance between two vectors of f64.
#[pyfunction(name = "euclidean_distance")]
fn euclidean_distance_py(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    if a.len() != b.len() {
        return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(
            "Input vectors must have the same length.",
        ));
    }
    Ok(euclidean_distance(&a, &b))
}

/// `KNN(k, problem="classification")`. Labels cross the boundary as floats.
#[pyclass(name = "KNN")]
struct PyKnn {
    estimator: KnnEstimator<f64, f64>,
}

#[pymethods]
impl PyKnn {
    #[new]
    #[pyo3(signature = (k, problem = "classification"))]
    fn new(k: usize, problem: &str) -> PyResult<Self> {
        Ok(PyKnn {
            estimator: KnnEstimator::with_problem_name(k, problem)?,
        })
    }

    fn fit(&mut self, features: Vec<Vec<f64>>, labels: Vec<f64>) -> PyResult<()> {
        self.estimator.fit(features, labels)?;
        Ok(())
    }

    /// Predicts on `queries`, or on the training set when omitted.
    #[pyo3(signature = (queries = None))]
    fn predict(&self, queries: Option<Vec<Vec<f64>>>) -> PyResult<Vec<f64>> {
        let predictions = match queries {
            Some(queries) => self.estimator.predict_batch(&queries)?,
            None => self.estimator.predict()?,
        };
        Ok(predictions.into_iter().map(to_float).collect())
    }

    fn kneighbors(&self, query: Vec<f64>) -> PyResult<Vec<(usize, f64)>> {
        Ok(self
            .estimator
            .kneighbors(&query)?
            .into_iter()
            .map(|n| (n.index, n.distance))
            .collect())
    }

    #[getter]
    fn k(&self) -> usize {
        self.estimator.k()
    }

    #[getter]
    fn problem(&self) -> String {
        self.estimator.problem().to_string()
    }
}

/// The name of this function must match the `lib.name` in `Cargo.toml`.
#[pymodule]
fn knn_estimator(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
    m.add_class::<PyKnn>()?;
    Ok(())
}
