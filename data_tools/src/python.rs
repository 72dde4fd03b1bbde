use crate::clean::{clean_batch, clean_text, CleanConfig};
use crate::tfidf::{TfidfConfig, TfidfVectorizer};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

/// Clean one document (letters only, lowercase, single spaces)
#[pyfunction]
#[pyo3(signature = (text, strip_leading=true))]
pub fn fast_clean_text(text: String, strip_leading: bool) -> String {
    clean_text(&text, &CleanConfig { strip_leading })
}

/// Clean a list of documents in parallel, keeping order and length
#[pyfunction]
#[pyo3(signature = (texts, strip_leading=true))]
pub fn fast_clean_batch(texts: Vec<String>, strip_leading: bool) -> Vec<String> {
    clean_batch(&texts, &CleanConfig { strip_leading })
}

/// TF-IDF vectorizer returning dense rows
#[pyclass(name = "TfidfVectorizer", module = "textvec_data_tools_rs")]
pub struct PyTfidfVectorizer {
    inner: TfidfVectorizer,
}

#[pymethods]
impl PyTfidfVectorizer {
    #[new]
    #[pyo3(signature = (max_features=Some(5000)))]
    pub fn new(max_features: Option<usize>) -> Self {
        let config = TfidfConfig {
            max_features,
            ..Default::default()
        };
        Self {
            inner: TfidfVectorizer::new(config),
        }
    }

    pub fn fit(&mut self, texts: Vec<String>) -> PyResult<()> {
        self.inner
            .fit(&texts)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    pub fn transform(&self, texts: Vec<String>) -> PyResult<Vec<Vec<f64>>> {
        let matrix = self
            .inner
            .transform(&texts)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((0..matrix.n_rows()).map(|r| matrix.to_dense_row(r)).collect())
    }

    /// Term → column index (empty before fit)
    #[getter]
    pub fn vocabulary(&self) -> HashMap<String, usize> {
        self.inner.vocabulary().cloned().unwrap_or_default()
    }
}
