use thiserror::Error;

use textvec_data_tools::TfidfError;
use textvec_tokenizer::TokenizerError;

/// Errors surfaced by [`TextHelper`](crate::TextHelper).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("tf-idf: {0}")]
    Tfidf(#[from] TfidfError),

    #[error("vocabulary: {0}")]
    Vocab(#[from] TokenizerError),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
