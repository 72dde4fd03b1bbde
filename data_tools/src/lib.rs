//! textvec data tools: text cleaning and TF-IDF weighting.
//!
//! This crate turns raw train/test documents into model-ready text and
//! weights:
//!
//! - **Text Cleaning** (`clean`): keep ASCII letters only, lowercase,
//!   collapse whitespace. Batches are cleaned in parallel and stay aligned
//!   with their input.
//! - **Stop Words** (`stopwords`): the built-in English list and custom sets.
//! - **TF-IDF** (`tfidf`): fit on train, transform train and test, look up
//!   per-term weights from a sparse matrix.
//!
//! Python bindings are available behind the `python` feature.
//!
//! ## Usage
//!
//! ```rust
//! use textvec_data_tools::clean::{clean_text, CleanConfig};
//! use textvec_data_tools::tfidf::{TfidfConfig, TfidfVectorizer};
//!
//! let cleaned = clean_text("Stocks rallied 3% on Monday!", &CleanConfig::default());
//! assert_eq!(cleaned, "stocks rallied on monday");
//!
//! let mut vectorizer = TfidfVectorizer::new(TfidfConfig::default());
//! let weights = vectorizer.fit_transform(&[cleaned]).unwrap();
//! assert_eq!(weights.n_rows(), 1);
//! ```

pub mod clean;
pub mod stopwords;
pub mod tfidf;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn textvec_data_tools_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::fast_clean_text, m)?)?;
    m.add_function(wrap_pyfunction!(python::fast_clean_batch, m)?)?;
    m.add_class::<python::PyTfidfVectorizer>()?;
    Ok(())
}

// Re-export main types
pub use clean::{clean_batch, clean_text, CleanConfig};
pub use stopwords::{StopWords, StopWordsConfig};
pub use tfidf::{TfidfConfig, TfidfError, TfidfMatrix, TfidfVectorizer};
