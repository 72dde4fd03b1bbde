//! TF-IDF vectorization.
//!
//! Fits term statistics on one corpus (train) and applies them, without
//! refitting, to any other corpus (test). Semantics follow the usual
//! vectorizer conventions so weights match common Python pipelines:
//!
//! - Tokens are lowercase runs of two or more word characters
//! - Stop words are dropped before counting
//! - The vocabulary keeps the `max_features` most frequent terms,
//!   indexed in alphabetical order
//! - IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`
//! - Rows are L2-normalized

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::stopwords::{StopWords, StopWordsConfig};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Errors from fitting or applying a [`TfidfVectorizer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TfidfError {
    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,

    #[error("after pruning, no terms remain; try a lower min_df or a higher max_df")]
    NoTermsAfterPruning,

    #[error("vectorizer is not fitted")]
    NotFitted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for TF-IDF vectorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfConfig {
    /// Stop words removed before counting
    pub stop_words: StopWordsConfig,
    /// Keep only this many terms, ranked by total count across the corpus
    pub max_features: Option<usize>,
    /// Ignore terms appearing in fewer documents than this
    pub min_df: usize,
    /// Ignore terms appearing in more than this fraction of documents
    pub max_df: f64,
    /// Add one to document frequencies, as if an extra document held every term
    pub smooth_idf: bool,
    /// Replace raw counts with `1 + ln(count)`
    pub sublinear_tf: bool,
    /// L2-normalize each row
    pub normalize: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWordsConfig::English,
            max_features: Some(5000),
            min_df: 1,
            max_df: 1.0,
            smooth_idf: true,
            sublinear_tf: false,
            normalize: true,
        }
    }
}

/// Sparse document-term weight matrix.
///
/// Each row holds `(feature_index, weight)` pairs sorted by index.
/// Missing entries are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    n_features: usize,
}

impl TfidfMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Non-zero entries of one row.
    pub fn row(&self, row: usize) -> Option<&[(usize, f64)]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Stored weight at `(row, col)`, `None` when out of range or not stored.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let entries = self.rows.get(row)?;
        entries
            .binary_search_by_key(&col, |&(idx, _)| idx)
            .ok()
            .map(|pos| entries[pos].1)
    }

    /// Weight at `(row, col)`, or `default` when there is none.
    pub fn get_or(&self, row: usize, col: usize, default: f64) -> f64 {
        self.get(row, col).unwrap_or(default)
    }

    /// Dense copy of one row.
    pub fn to_dense_row(&self, row: usize) -> Vec<f64> {
        let mut dense = vec![0.0; self.n_features];
        if let Some(entries) = self.rows.get(row) {
            for &(idx, w) in entries {
                dense[idx] = w;
            }
        }
        dense
    }
}

/// Fitted term statistics.
#[derive(Debug, Clone)]
struct Fitted {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

/// TF-IDF vectorizer: `fit` on train, `transform` anything.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    stop_words: Option<StopWords>,
    fitted: Option<Fitted>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer with the given configuration.
    pub fn new(config: TfidfConfig) -> Self {
        let stop_words = config.stop_words.build();
        Self {
            config,
            stop_words,
            fitted: None,
        }
    }

    /// Split a document into the terms this vectorizer counts.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| self.stop_words.as_ref().map_or(true, |sw| !sw.contains(t)))
            .map(str::to_string)
            .collect()
    }

    fn validate(&self) -> Result<(), TfidfError> {
        if self.config.max_features == Some(0) {
            return Err(TfidfError::InvalidConfig(
                "max_features must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.config.max_df) {
            return Err(TfidfError::InvalidConfig(format!(
                "max_df must be within [0, 1], got {}",
                self.config.max_df
            )));
        }
        Ok(())
    }

    /// Learn vocabulary and IDF from `documents`.
    pub fn fit<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Result<(), TfidfError> {
        self.validate()?;

        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.analyze(doc.as_ref()))
            .collect();

        // Term → (total count, document frequency)
        let mut stats: HashMap<&str, (u64, usize)> = HashMap::new();
        for terms in &analyzed {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(term.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        if stats.is_empty() {
            return Err(TfidfError::EmptyVocabulary);
        }

        let n_docs = analyzed.len();
        let max_doc_count = (self.config.max_df * n_docs as f64).floor() as usize;
        if max_doc_count < self.config.min_df {
            return Err(TfidfError::InvalidConfig(
                "max_df corresponds to fewer documents than min_df".into(),
            ));
        }

        let mut terms: Vec<(&str, u64, usize)> = stats
            .into_iter()
            .filter(|&(_, (_, df))| df >= self.config.min_df && df <= max_doc_count)
            .map(|(term, (count, df))| (term, count, df))
            .collect();

        if terms.is_empty() {
            return Err(TfidfError::NoTermsAfterPruning);
        }

        if let Some(limit) = self.config.max_features {
            // Most frequent first; ties resolved alphabetically
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            terms.truncate(limit);
        }
        terms.sort_by(|a, b| a.0.cmp(b.0));

        let smooth = if self.config.smooth_idf { 1.0 } else { 0.0 };
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, (term, _, df)) in terms.iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            idf.push(((n_docs as f64 + smooth) / (*df as f64 + smooth)).ln() + 1.0);
        }

        info!(
            documents = n_docs,
            features = vocabulary.len(),
            "fitted tf-idf vocabulary"
        );

        self.fitted = Some(Fitted { vocabulary, idf });
        Ok(())
    }

    /// Weight `documents` with the fitted statistics.
    pub fn transform<S: AsRef<str> + Sync>(
        &self,
        documents: &[S],
    ) -> Result<TfidfMatrix, TfidfError> {
        let fitted = self.fitted.as_ref().ok_or(TfidfError::NotFitted)?;

        let rows: Vec<Vec<(usize, f64)>> = documents
            .par_iter()
            .map(|doc| self.weigh(fitted, doc.as_ref()))
            .collect();

        debug!(rows = rows.len(), "transformed documents");

        Ok(TfidfMatrix {
            rows,
            n_features: fitted.idf.len(),
        })
    }

    /// `fit` followed by `transform` on the same documents.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        &mut self,
        documents: &[S],
    ) -> Result<TfidfMatrix, TfidfError> {
        self.fit(documents)?;
        self.transform(documents)
    }

    fn weigh(&self, fitted: &Fitted, document: &str) -> Vec<(usize, f64)> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = fitted.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.config.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * fitted.idf[idx])
            })
            .collect();

        if self.config.normalize {
            let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for entry in &mut row {
                    entry.1 /= norm;
                }
            }
        }

        row
    }

    /// Term → feature index. Empty before `fit`.
    pub fn vocabulary(&self) -> Option<&HashMap<String, usize>> {
        self.fitted.as_ref().map(|f| &f.vocabulary)
    }

    /// IDF per feature index.
    pub fn idf(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.idf.as_slice())
    }

    /// Feature names ordered by index.
    pub fn feature_names(&self) -> Vec<&str> {
        let Some(fitted) = &self.fitted else {
            return Vec::new();
        };
        let mut names = vec![""; fitted.idf.len()];
        for (term, &idx) in &fitted.vocabulary {
            names[idx] = term.as_str();
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn no_stop_words() -> TfidfConfig {
        TfidfConfig {
            stop_words: StopWordsConfig::None,
            ..Default::default()
        }
    }

    #[test]
    fn test_analyze_drops_short_tokens_and_stop_words() {
        let v = TfidfVectorizer::new(TfidfConfig::default());
        assert_eq!(v.analyze("The cat a sat on X mat"), vec!["cat", "sat", "mat"]);
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let mut v = TfidfVectorizer::new(no_stop_words());
        v.fit(&["zebra apple", "mango apple"]).unwrap();
        assert_eq!(v.feature_names(), vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let mut v = TfidfVectorizer::new(no_stop_words());
        v.fit(&["apple banana", "apple"]).unwrap();
        let idf = v.idf().unwrap();
        // apple: df=2, n=2 → ln(3/3)+1 = 1
        assert_relative_eq!(idf[0], 1.0);
        // banana: df=1 → ln(3/2)+1
        assert_relative_eq!(idf[1], (1.5f64).ln() + 1.0);
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let mut v = TfidfVectorizer::new(no_stop_words());
        let m = v.fit_transform(&["apple banana banana", "apple cherry"]).unwrap();
        for r in 0..m.n_rows() {
            let norm: f64 = m.row(r).unwrap().iter().map(|(_, w)| w * w).sum();
            assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unknown_terms_are_zero() {
        let mut v = TfidfVectorizer::new(no_stop_words());
        v.fit(&["apple banana"]).unwrap();
        let m = v.transform(&["durian apple"]).unwrap();
        let apple = v.vocabulary().unwrap()["apple"];
        assert_relative_eq!(m.get_or(0, apple, 0.0), 1.0);
        assert!(v.vocabulary().unwrap().get("durian").is_none());
        assert_eq!(m.get_or(0, 99, 0.0), 0.0);
        assert_eq!(m.get_or(5, 0, 0.0), 0.0);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let config = TfidfConfig {
            max_features: Some(2),
            ..no_stop_words()
        };
        let mut v = TfidfVectorizer::new(config);
        v.fit(&["aa aa aa bb bb cc", "dd bb"]).unwrap();
        assert_eq!(v.feature_names(), vec!["aa", "bb"]);
    }

    #[test]
    fn test_min_df_pruning() {
        let config = TfidfConfig {
            min_df: 2,
            ..no_stop_words()
        };
        let mut v = TfidfVectorizer::new(config);
        v.fit(&["aa bb", "aa cc"]).unwrap();
        assert_eq!(v.feature_names(), vec!["aa"]);
    }

    #[test]
    fn test_only_stop_words_is_empty_vocabulary() {
        let mut v = TfidfVectorizer::new(TfidfConfig::default());
        assert_eq!(
            v.fit(&["the and of", "is it"]),
            Err(TfidfError::EmptyVocabulary)
        );
    }

    #[test]
    fn test_pruning_everything() {
        let config = TfidfConfig {
            min_df: 2,
            ..no_stop_words()
        };
        let mut v = TfidfVectorizer::new(config);
        assert_eq!(
            v.fit(&["aa", "bb"]),
            Err(TfidfError::NoTermsAfterPruning)
        );
    }

    #[test]
    fn test_invalid_config() {
        let mut v = TfidfVectorizer::new(TfidfConfig {
            max_features: Some(0),
            ..Default::default()
        });
        assert!(matches!(v.fit(&["aa"]), Err(TfidfError::InvalidConfig(_))));

        let mut v = TfidfVectorizer::new(TfidfConfig {
            min_df: 3,
            ..no_stop_words()
        });
        assert!(matches!(v.fit(&["aa", "aa"]), Err(TfidfError::InvalidConfig(_))));
    }

    #[test]
    fn test_transform_before_fit() {
        let v = TfidfVectorizer::new(TfidfConfig::default());
        assert_eq!(v.transform(&["aa"]), Err(TfidfError::NotFitted));
    }

    #[test]
    fn test_empty_document_row() {
        let mut v = TfidfVectorizer::new(no_stop_words());
        v.fit(&["apple"]).unwrap();
        let m = v.transform(&[""]).unwrap();
        assert!(m.row(0).unwrap().is_empty());
        assert_eq!(m.to_dense_row(0), vec![0.0]);
    }
}
