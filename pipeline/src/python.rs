use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::error::PipelineError;
use crate::helper::TextHelper;

fn to_py_err(err: PipelineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Clean texts and turn them into series of numbers
#[pyclass(name = "TextHelper", module = "textvec_rs")]
pub struct PyTextHelper {
    inner: TextHelper,
}

#[pymethods]
impl PyTextHelper {
    #[new]
    pub fn new(train_data: Vec<String>, test_data: Vec<String>) -> Self {
        Self {
            inner: TextHelper::new(&train_data, &test_data),
        }
    }

    /// TF-IDF weight of each word within each document: (train, test)
    pub fn tfidf_weight(&self) -> PyResult<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
        self.inner.tfidf_weight().map_err(to_py_err)
    }

    /// (vocab, word_id_map, id_word_map)
    #[pyo3(name = "buildVocab")]
    pub fn build_vocab(
        &self,
    ) -> PyResult<(Vec<String>, HashMap<String, u32>, HashMap<u32, String>)> {
        let artifacts = self.inner.build_vocab().map_err(to_py_err)?;
        Ok((artifacts.vocab, artifacts.word_to_id, artifacts.id_to_word))
    }

    /// Each document as a list of word ids: (train, test)
    pub fn text2vecs(&self) -> PyResult<(Vec<Vec<u32>>, Vec<Vec<u32>>)> {
        self.inner.text2vecs().map_err(to_py_err)
    }

    #[getter]
    pub fn train_data(&self) -> Vec<String> {
        self.inner.cleaned_train().to_vec()
    }

    #[getter]
    pub fn test_data(&self) -> Vec<String> {
        self.inner.cleaned_test().to_vec()
    }
}
