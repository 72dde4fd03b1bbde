//! Errors produced by vocabulary training and decoding.

use thiserror::Error;

/// Errors from the tokenizer crate.
///
/// Encoding never fails: unknown tokens map to the UNK id. Only decoding
/// foreign ids and invalid trainer settings produce errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// An id outside `0..vocab.len()` was passed to `decode`.
    #[error("invalid token id {id} (vocabulary size {size})")]
    InvalidId { id: u32, size: usize },

    /// The UNK sentinel must be a non-empty token.
    #[error("unk_token must not be empty")]
    EmptyUnkToken,

    /// The UNK sentinel must survive whitespace tokenization as one token.
    #[error("unk_token {0:?} contains whitespace")]
    WhitespaceInUnkToken(String),
}
