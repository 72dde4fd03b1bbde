//! textvec tokenizer: frequency-pruned word vocabulary.
//!
//! This crate turns cleaned documents into integer id sequences:
//!
//! - Whitespace word splitting (`words`), identical for train and test
//! - Vocabulary training (`trainer`): keep tokens seen more than a
//!   threshold number of times in train, in first-occurrence order
//! - An `UNK` sentinel that is always in the vocabulary, so encoding never
//!   fails and test-only words collapse to one id
//! - Encode/decode between tokens and ids (`vocab`)
//!
//! ## Usage
//!
//! ```rust
//! use textvec_tokenizer::{tokenize_batch, Trainer, TrainerConfig};
//!
//! let train = tokenize_batch(&["the cat sat"; 4]);
//! let vocab = Trainer::new(TrainerConfig::default()).train(&train).unwrap();
//!
//! assert_eq!(vocab.tokens(), &["the", "cat", "sat", "UNK"]);
//! assert_eq!(vocab.encode(&["the", "dog", "sat"]), vec![0, 3, 2]);
//! ```

pub mod error;
pub mod trainer;
pub mod vocab;
pub mod words;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn textvec_tokenizer_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<python::PyVocab>()?;
    m.add_class::<python::PyTrainer>()?;
    Ok(())
}

// Re-export main types
pub use error::TokenizerError;
pub use trainer::{Trainer, TrainerConfig};
pub use vocab::{Vocab, DEFAULT_UNK_TOKEN};
pub use words::{tokenize, tokenize_batch};
