//! Pipeline configuration.
//!
//! Defaults reproduce the standard preprocessing run: English stop words,
//! unigrams, 5000 TF-IDF features, vocabulary threshold 3 and `"UNK"`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use textvec_data_tools::{CleanConfig, TfidfConfig};
use textvec_tokenizer::TrainerConfig;

use crate::error::PipelineError;

/// Settings for every stage of [`TextHelper`](crate::TextHelper).
///
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub clean: CleanConfig,
    pub vocab: TrainerConfig,
    pub tfidf: TfidfConfig,
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
