//! Vocabulary training.
//!
//! Builds a frequency-pruned [`Vocab`] from a tokenized train corpus:
//!
//! 1. Count every token across all train documents, remembering the order
//!    in which tokens first appeared
//! 2. Keep tokens whose count is strictly greater than the threshold,
//!    in first-occurrence order
//! 3. Append the UNK sentinel unless it was kept naturally
//! 4. Number the result `0..N`
//!
//! Counting runs over document chunks in parallel. Chunk counters are
//! merged in chunk order, which yields the same first-occurrence order as
//! a single sequential pass.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::TokenizerError;
use crate::vocab::{Vocab, DEFAULT_UNK_TOKEN};

/// Configuration for vocabulary training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// A token needs strictly more occurrences than this to get its own id
    pub frequency_threshold: u64,
    /// Sentinel every unknown token encodes to
    pub unk_token: String,
    /// Documents per parallel counting chunk
    pub chunk_size: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            frequency_threshold: 3,
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
            chunk_size: 1000,
        }
    }
}

impl TrainerConfig {
    fn validate(&self) -> Result<(), TokenizerError> {
        if self.unk_token.is_empty() {
            return Err(TokenizerError::EmptyUnkToken);
        }
        if self.unk_token.chars().any(char::is_whitespace) {
            return Err(TokenizerError::WhitespaceInUnkToken(self.unk_token.clone()));
        }
        Ok(())
    }
}

/// Token counts in order of first occurrence.
#[derive(Debug, Default)]
struct OrderedCounts<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, u64)>,
}

impl<'a> OrderedCounts<'a> {
    fn add(&mut self, token: &'a str, count: u64) {
        match self.index.get(token) {
            Some(&pos) => self.entries[pos].1 += count,
            None => {
                self.index.insert(token, self.entries.len());
                self.entries.push((token, count));
            }
        }
    }

    /// Fold in counts from a later chunk.
    fn merge(mut self, later: OrderedCounts<'a>) -> Self {
        for (token, count) in later.entries {
            self.add(token, count);
        }
        self
    }
}

/// Vocabulary trainer: learns a pruned vocabulary from train documents.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a new trainer with the given configuration.
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train a vocabulary from a tokenized corpus.
    ///
    /// Fails only on an invalid UNK token; the default configuration
    /// always succeeds.
    pub fn train<S: AsRef<str> + Sync>(&self, corpus: &[Vec<S>]) -> Result<Vocab, TokenizerError> {
        self.config.validate()?;

        let counts = self.count_tokens(corpus);
        let distinct = counts.entries.len();

        let selected: Vec<String> = counts
            .entries
            .into_iter()
            .filter(|&(_, count)| count > self.config.frequency_threshold)
            .map(|(token, _)| token.to_string())
            .collect();

        debug!(
            distinct,
            kept = selected.len(),
            threshold = self.config.frequency_threshold,
            "pruned token counts"
        );

        let vocab = Vocab::new(selected, &self.config.unk_token);

        info!(
            documents = corpus.len(),
            vocab_size = vocab.len(),
            unk_id = vocab.unk_id(),
            "vocabulary trained"
        );

        Ok(vocab)
    }

    /// Token occurrence counts across the corpus, in first-occurrence order.
    pub fn token_counts<S: AsRef<str> + Sync>(&self, corpus: &[Vec<S>]) -> Vec<(String, u64)> {
        self.count_tokens(corpus)
            .entries
            .into_iter()
            .map(|(token, count)| (token.to_string(), count))
            .collect()
    }

    fn count_tokens<'a, S: AsRef<str> + Sync>(&self, corpus: &'a [Vec<S>]) -> OrderedCounts<'a> {
        let chunk_size = self.config.chunk_size.max(1);

        // Each chunk produces its own ordered counter; collect keeps chunk order
        let chunk_counts: Vec<OrderedCounts<'a>> = corpus
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut counts = OrderedCounts::default();
                for doc in chunk {
                    for token in doc {
                        counts.add(token.as_ref(), 1);
                    }
                }
                counts
            })
            .collect();

        chunk_counts
            .into_iter()
            .fold(OrderedCounts::default(), OrderedCounts::merge)
    }
}
