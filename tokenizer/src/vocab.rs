//! Word vocabulary with an out-of-vocabulary sentinel.
//!
//! Ids are contiguous: `0..len`. The order of ids is the order tokens were
//! selected during training. The UNK token always has an id, so encoding is
//! total over any token sequence.

use rayon::prelude::*;
use std::collections::HashMap;

use crate::error::TokenizerError;

/// Default out-of-vocabulary sentinel.
pub const DEFAULT_UNK_TOKEN: &str = "UNK";

/// A bijection between vocabulary tokens and ids `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocab {
    /// Id → token
    tokens: Vec<String>,
    /// Token → id
    token_to_id: HashMap<String, u32>,
    /// Id of the UNK sentinel
    unk_id: u32,
}

impl Vocab {
    /// Build a vocabulary from tokens in id order.
    ///
    /// Duplicates are skipped (first occurrence wins). If `unk_token` is not
    /// among `tokens` it is appended last; otherwise it keeps its position.
    pub fn new(tokens: impl IntoIterator<Item = String>, unk_token: &str) -> Self {
        let mut ordered = Vec::new();
        let mut token_to_id = HashMap::new();

        for token in tokens {
            if token_to_id.contains_key(&token) {
                continue;
            }
            token_to_id.insert(token.clone(), ordered.len() as u32);
            ordered.push(token);
        }

        let unk_id = match token_to_id.get(unk_token) {
            Some(&id) => id,
            None => {
                let id = ordered.len() as u32;
                token_to_id.insert(unk_token.to_string(), id);
                ordered.push(unk_token.to_string());
                id
            }
        };

        Vocab {
            tokens: ordered,
            token_to_id,
            unk_id,
        }
    }

    /// Number of tokens, UNK included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`: UNK is always present.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn unk_id(&self) -> u32 {
        self.unk_id
    }

    pub fn unk_token(&self) -> &str {
        &self.tokens[self.unk_id as usize]
    }

    /// Id of `token`, `None` if it is out of vocabulary.
    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Token for `id`, `None` if out of range.
    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Encode one tokenized document. Unknown tokens map to the UNK id.
    ///
    /// The output has exactly one id per input token, in order.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<u32> {
        tokens
            .iter()
            .map(|t| self.id_of(t.as_ref()).unwrap_or(self.unk_id))
            .collect()
    }

    /// Encode a tokenized corpus in parallel, preserving document order.
    pub fn encode_batch<S: AsRef<str> + Sync>(&self, documents: &[Vec<S>]) -> Vec<Vec<u32>> {
        documents.par_iter().map(|doc| self.encode(doc)).collect()
    }

    /// Map ids back to tokens.
    pub fn decode(&self, ids: &[u32]) -> Result<Vec<String>, TokenizerError> {
        ids.iter()
            .map(|&id| {
                self.token_of(id)
                    .map(str::to_string)
                    .ok_or(TokenizerError::InvalidId {
                        id,
                        size: self.len(),
                    })
            })
            .collect()
    }

    /// Owned token → id mapping.
    pub fn forward_map(&self) -> HashMap<String, u32> {
        self.token_to_id.clone()
    }

    /// Owned id → token mapping.
    pub fn inverse_map(&self) -> HashMap<u32, String> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (id as u32, token.clone()))
            .collect()
    }
}
