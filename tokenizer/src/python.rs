use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::trainer::{Trainer, TrainerConfig};
use crate::vocab::{Vocab, DEFAULT_UNK_TOKEN};
use crate::words::tokenize_batch;

/// Python wrapper for the word vocabulary
#[pyclass(name = "Vocab", module = "textvec_tokenizer_rs")]
pub struct PyVocab {
    pub(crate) inner: Vocab,
}

#[pymethods]
impl PyVocab {
    #[new]
    #[pyo3(signature = (tokens, unk_token=DEFAULT_UNK_TOKEN))]
    pub fn new(tokens: Vec<String>, unk_token: &str) -> Self {
        Self {
            inner: Vocab::new(tokens, unk_token),
        }
    }

    /// Encode a list of tokens to ids (unknown tokens become the UNK id)
    pub fn encode(&self, tokens: Vec<String>) -> Vec<u32> {
        self.inner.encode(&tokens)
    }

    /// Decode ids back to tokens
    pub fn decode(&self, ids: Vec<u32>) -> PyResult<Vec<String>> {
        self.inner
            .decode(&ids)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    pub fn tokens(&self) -> Vec<String> {
        self.inner.tokens().to_vec()
    }

    #[getter]
    pub fn word_id_map(&self) -> HashMap<String, u32> {
        self.inner.forward_map()
    }

    #[getter]
    pub fn id_word_map(&self) -> HashMap<u32, String> {
        self.inner.inverse_map()
    }

    #[getter]
    pub fn unk_id(&self) -> u32 {
        self.inner.unk_id()
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Python wrapper for the vocabulary trainer
#[pyclass(name = "Trainer", module = "textvec_tokenizer_rs")]
pub struct PyTrainer {
    inner: Trainer,
}

#[pymethods]
impl PyTrainer {
    #[new]
    #[pyo3(signature = (frequency_threshold=3, unk_token=DEFAULT_UNK_TOKEN.to_string()))]
    pub fn new(frequency_threshold: u64, unk_token: String) -> Self {
        let config = TrainerConfig {
            frequency_threshold,
            unk_token,
            ..Default::default()
        };
        Self {
            inner: Trainer::new(config),
        }
    }

    /// Train from cleaned documents (whitespace-separated words)
    pub fn train(&self, texts: Vec<String>) -> PyResult<PyVocab> {
        let corpus = tokenize_batch(&texts);
        let vocab = self
            .inner
            .train(&corpus)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyVocab { inner: vocab })
    }
}
