//! textvec: turn a train/test text split into model inputs.
//!
//! Given raw train and test documents, [`TextHelper`] produces:
//!
//! - cleaned text (lowercase ASCII words, single spaces)
//! - per-token TF-IDF weights, fitted on train and applied to test
//! - a vocabulary of train words seen more than three times, plus `UNK`
//! - per-document id sequences under that vocabulary
//!
//! Cleaning and TF-IDF live in `textvec_data_tools`; the vocabulary in
//! `textvec_tokenizer`. Python bindings are available behind the `python`
//! feature.
//!
//! ## Usage
//!
//! ```rust
//! use textvec::TextHelper;
//!
//! let train: Vec<String> = vec!["The cat sat.".into(); 4];
//! let test = vec!["The dog sat!".to_string()];
//!
//! let helper = TextHelper::new(&train, &test);
//! let vocab = helper.build_vocab().unwrap();
//! assert_eq!(vocab.vocab, vec!["the", "cat", "sat", "UNK"]);
//!
//! let (_, test_ids) = helper.text2vecs().unwrap();
//! assert_eq!(test_ids, vec![vec![0, 3, 2]]);
//!
//! let (_, test_weights) = helper.tfidf_weight().unwrap();
//! assert_eq!(test_weights[0].len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod helper;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn textvec_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<python::PyTextHelper>()?;
    Ok(())
}

// Re-export main types
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use helper::{TextHelper, VocabArtifacts};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_news_split_end_to_end() {
        let train: Vec<String> = [
            "Stocks rise as Fed holds rates; tech stocks lead.",
            "Fed signals rates cut, stocks rally 2%",
            "Oil falls; stocks mixed as Fed speaks",
            "Stocks close higher, Fed minutes due",
            "Rates steady: Fed chair speaks on stocks",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let test = vec!["Crypto surges while stocks stall; Fed quiet".to_string()];

        let config = PipelineConfig::from_json_str(r#"{ "tfidf": { "max_features": 10 } }"#)
            .unwrap();
        let helper = TextHelper::with_config(&train, &test, config);

        let artifacts = helper.build_vocab().unwrap();
        // stocks: 6, fed: 5, rates: 3 in train
        assert_eq!(artifacts.vocab, vec!["stocks", "fed", "UNK"]);

        let (train_ids, test_ids) = helper.text2vecs().unwrap();
        let (train_words, test_words) = helper.text2words();
        assert_eq!(train_ids.len(), train.len());
        assert_eq!(test_ids[0].len(), test_words[0].len());
        assert_eq!(train_ids[0].len(), train_words[0].len());

        let unk = artifacts.word_to_id["UNK"];
        let expected: Vec<u32> = test_words[0]
            .iter()
            .map(|w| artifacts.word_to_id.get(w).copied().unwrap_or(unk))
            .collect();
        assert_eq!(test_ids[0], expected);

        let (train_w, test_w) = helper.tfidf_weight().unwrap();
        assert_eq!(train_w.len(), train.len());
        assert_eq!(test_w[0].len(), test_words[0].len());
        // "crypto" never appears in train
        assert_eq!(test_w[0][0], 0.0);
        assert!(test_w.iter().flatten().all(|&w| w >= 0.0));
    }
}
