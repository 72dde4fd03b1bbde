//! Whitespace word splitting.
//!
//! Cleaned documents are already `[a-z ]` only, so whitespace is the sole
//! delimiter. Train and test go through the same function.

use rayon::prelude::*;

/// Split a document into its ordered tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Tokenize every document of a corpus in parallel, preserving order.
pub fn tokenize_batch<S: AsRef<str> + Sync>(texts: &[S]) -> Vec<Vec<String>> {
    texts.par_iter().map(|t| tokenize(t.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("the cat sat"), vec!["the", "cat", "sat"]);
        assert_eq!(tokenize(" padded  text "), vec!["padded", "text"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_batch_order() {
        let docs = ["b a", "", "c"];
        assert_eq!(
            tokenize_batch(&docs),
            vec![vec!["b", "a"], vec![], vec!["c"]]
        );
    }
}
