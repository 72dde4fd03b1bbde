//! Text cleaning for word-level vectorization.
//!
//! Normalizes raw documents into a canonical, token-friendly form:
//! - Punctuation, digits and every other non-ASCII-letter become spaces
//! - Newlines become spaces
//! - Everything is lowercased
//! - Runs of spaces collapse into one
//! - Trailing (and by default leading) whitespace is stripped
//!
//! The output alphabet is `[a-z ]`, so splitting it on whitespace yields
//! the exact token stream the vocabulary and TF-IDF stages consume.

use serde::{Deserialize, Serialize};

/// Configuration for text cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Strip leading whitespace as well as trailing whitespace.
    ///
    /// When `false`, a document that starts with removed characters
    /// (e.g. `"123 abc"`) keeps a single leading space.
    pub strip_leading: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            strip_leading: true,
        }
    }
}

impl CleanConfig {
    /// Trailing-only stripping, matching the historical output byte for byte.
    pub fn legacy() -> Self {
        Self {
            strip_leading: false,
        }
    }
}

/// Clean a single text document.
///
/// Never fails; an empty or all-symbol input yields an empty string.
pub fn clean_text(text: &str, config: &CleanConfig) -> String {
    // Steps 1-4: anything that is not an ASCII letter becomes a space.
    // Punctuation, digits, foreign characters and newlines are all covered.
    let letters_only = replace_non_letters(text);

    // Step 5: lowercase
    let lowered = letters_only.to_ascii_lowercase();

    // Step 6: collapse runs of spaces
    let collapsed = collapse_spaces(&lowered);

    // Step 7: strip
    let stripped = collapsed.trim_end();
    if config.strip_leading {
        stripped.trim_start().to_string()
    } else {
        stripped.to_string()
    }
}

/// Replace every character outside `[A-Za-z]` with a single space.
///
/// Multi-byte characters map to one space each, not one per byte.
fn replace_non_letters(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect()
}

/// Collapse every run of one or more spaces into a single space.
fn collapse_spaces(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_space = false;

    for ch in text.chars() {
        if ch == ' ' {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(ch);
            last_was_space = false;
        }
    }

    result
}

/// Batch clean multiple documents in parallel.
///
/// Output is aligned with input: same length, same order.
pub fn clean_batch(texts: &[String], config: &CleanConfig) -> Vec<String> {
    use rayon::prelude::*;

    texts
        .par_iter()
        .map(|text| clean_text(text, config))
        .collect()
}
