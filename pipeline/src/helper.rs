//! Train/test text preprocessing.
//!
//! [`TextHelper`] cleans both corpora once at construction. Each public
//! operation then derives its artifacts fresh from the cleaned text:
//!
//! - [`TextHelper::tfidf_weight`]: one weight per token, aligned with the
//!   tokenized document
//! - [`TextHelper::build_vocab`]: the pruned vocabulary and its mappings
//! - [`TextHelper::text2vecs`]: one id per token
//!
//! Every statistic is fitted on train only. Test never influences the
//! vocabulary or the TF-IDF fit.

use std::collections::HashMap;
use tracing::{debug, info};

use textvec_data_tools::{clean_batch, TfidfError, TfidfMatrix, TfidfVectorizer};
use textvec_tokenizer::{tokenize_batch, Trainer, Vocab};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// Vocabulary plus both directions of its id mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabArtifacts {
    /// Tokens in id order
    pub vocab: Vec<String>,
    pub word_to_id: HashMap<String, u32>,
    pub id_to_word: HashMap<u32, String>,
}

impl From<&Vocab> for VocabArtifacts {
    fn from(vocab: &Vocab) -> Self {
        Self {
            vocab: vocab.tokens().to_vec(),
            word_to_id: vocab.forward_map(),
            id_to_word: vocab.inverse_map(),
        }
    }
}

/// Cleans a train/test split and turns it into numeric features.
#[derive(Debug, Clone)]
pub struct TextHelper {
    config: PipelineConfig,
    train: Vec<String>,
    test: Vec<String>,
}

impl TextHelper {
    /// Clean both corpora with the default configuration.
    pub fn new(train: &[String], test: &[String]) -> Self {
        Self::with_config(train, test, PipelineConfig::default())
    }

    pub fn with_config(train: &[String], test: &[String], config: PipelineConfig) -> Self {
        let cleaned_train = clean_batch(train, &config.clean);
        let cleaned_test = clean_batch(test, &config.clean);

        info!(
            train = cleaned_train.len(),
            test = cleaned_test.len(),
            "cleaned corpora"
        );

        Self {
            config,
            train: cleaned_train,
            test: cleaned_test,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cleaned_train(&self) -> &[String] {
        &self.train
    }

    pub fn cleaned_test(&self) -> &[String] {
        &self.test
    }

    /// Split every cleaned document into words: `(train, test)`.
    pub fn text2words(&self) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
        (tokenize_batch(&self.train), tokenize_batch(&self.test))
    }

    /// TF-IDF weight of every token of every document: `(train, test)`.
    ///
    /// The vectorizer is fitted on train and applied to test without
    /// refitting. Tokens outside the fitted vocabulary (stop words,
    /// single letters, pruned or test-only words) weigh exactly `0.0`.
    pub fn tfidf_weight(&self) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>), PipelineError> {
        let (train_words, test_words) = self.text2words();

        let mut vectorizer = TfidfVectorizer::new(self.config.tfidf.clone());
        let train_matrix = vectorizer.fit_transform(&self.train)?;
        let test_matrix = vectorizer.transform(&self.test)?;
        let vocabulary = vectorizer.vocabulary().ok_or(TfidfError::NotFitted)?;

        info!(features = vocabulary.len(), "tf-idf fitted on train");

        let train_weights = token_weights(&train_words, &train_matrix, vocabulary);
        let test_weights = token_weights(&test_words, &test_matrix, vocabulary);
        Ok((train_weights, test_weights))
    }

    /// Train the pruned vocabulary on the train corpus.
    pub fn vocab(&self) -> Result<Vocab, PipelineError> {
        let (train_words, _) = self.text2words();
        let vocab = Trainer::new(self.config.vocab.clone()).train(&train_words)?;
        Ok(vocab)
    }

    /// Vocabulary tokens with their forward and inverse id mappings.
    pub fn build_vocab(&self) -> Result<VocabArtifacts, PipelineError> {
        let vocab = self.vocab()?;
        Ok(VocabArtifacts::from(&vocab))
    }

    /// Encode every document as ids: `(train, test)`.
    pub fn text2vecs(&self) -> Result<(Vec<Vec<u32>>, Vec<Vec<u32>>), PipelineError> {
        let (train_words, test_words) = self.text2words();
        let vocab = Trainer::new(self.config.vocab.clone()).train(&train_words)?;

        let train_vecs = vocab.encode_batch(&train_words);
        let test_vecs = vocab.encode_batch(&test_words);

        debug!(
            vocab_size = vocab.len(),
            train = train_vecs.len(),
            test = test_vecs.len(),
            "encoded corpora"
        );
        Ok((train_vecs, test_vecs))
    }
}

/// Look up each token's weight in its document's row, `0.0` when unknown.
fn token_weights(
    documents: &[Vec<String>],
    matrix: &TfidfMatrix,
    vocabulary: &HashMap<String, usize>,
) -> Vec<Vec<f64>> {
    documents
        .iter()
        .enumerate()
        .map(|(row, words)| {
            words
                .iter()
                .map(|word| match vocabulary.get(word) {
                    Some(&col) => matrix.get_or(row, col, 0.0),
                    None => 0.0,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn docs(ds: &[&str]) -> Vec<String> {
        ds.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_construction_cleans() {
        let helper = TextHelper::new(
            &docs(&["Hello, World! 123\nFoo-Bar"]),
            &docs(&["42 Apples"]),
        );
        assert_eq!(helper.cleaned_train(), &["hello world foo bar"]);
        assert_eq!(helper.cleaned_test(), &["apples"]);
    }

    #[test]
    fn test_legacy_cleaning_keeps_leading_space() {
        let config = PipelineConfig {
            clean: textvec_data_tools::CleanConfig::legacy(),
            ..Default::default()
        };
        let helper = TextHelper::with_config(&docs(&["42 Apples"]), &[], config);
        assert_eq!(helper.cleaned_train(), &[" apples"]);
        let (words, _) = helper.text2words();
        assert_eq!(words, vec![vec!["apples"]]);
    }

    #[test]
    fn test_build_vocab_small_corpus() {
        let helper = TextHelper::new(&docs(&["a a a a b"]), &docs(&["a c"]));
        let artifacts = helper.build_vocab().unwrap();
        assert_eq!(artifacts.vocab, vec!["a", "UNK"]);

        let (_, test) = helper.text2vecs().unwrap();
        assert_eq!(
            test,
            vec![vec![artifacts.word_to_id["a"], artifacts.word_to_id["UNK"]]]
        );
    }

    #[test]
    fn test_vocab_ignores_test_corpus() {
        let train = docs(&["the cat sat"; 4]);
        let only_train = TextHelper::new(&train, &[]);
        let with_test = TextHelper::new(&train, &docs(&["dog dog dog dog dog"; 10]));
        assert_eq!(
            only_train.build_vocab().unwrap(),
            with_test.build_vocab().unwrap()
        );
        assert!(!with_test.build_vocab().unwrap().word_to_id.contains_key("dog"));
    }

    #[test]
    fn test_text2vecs_lengths_match_words() {
        let helper = TextHelper::new(
            &docs(&["the cat sat", "the cat sat", "the cat sat", "the cat sat!"]),
            &docs(&["The dog sat.", ""]),
        );
        let (train_words, test_words) = helper.text2words();
        let (train_vecs, test_vecs) = helper.text2vecs().unwrap();

        for (ids, words) in train_vecs.iter().zip(&train_words) {
            assert_eq!(ids.len(), words.len());
        }
        for (ids, words) in test_vecs.iter().zip(&test_words) {
            assert_eq!(ids.len(), words.len());
        }

        let vocab = helper.vocab().unwrap();
        assert_eq!(
            test_vecs[0],
            vec![
                vocab.id_of("the").unwrap(),
                vocab.unk_id(),
                vocab.id_of("sat").unwrap()
            ]
        );
        assert!(test_vecs[1].is_empty());
    }

    #[test]
    fn test_mappings_are_inverse() {
        let helper = TextHelper::new(&docs(&["x y x y x y x y z"]), &[]);
        let artifacts = helper.build_vocab().unwrap();
        for word in &artifacts.vocab {
            assert_eq!(&artifacts.id_to_word[&artifacts.word_to_id[word]], word);
        }
        assert_eq!(artifacts.word_to_id.len(), artifacts.vocab.len());
        assert_eq!(artifacts.id_to_word.len(), artifacts.vocab.len());
    }

    #[test]
    fn test_tfidf_weights_align_with_tokens() {
        let helper = TextHelper::new(
            &docs(&["Apple banana apple", "Banana cherry", "the apple"]),
            &docs(&["cherry durian apple", "a b c"]),
        );
        let (train_words, test_words) = helper.text2words();
        let (train_w, test_w) = helper.tfidf_weight().unwrap();

        assert_eq!(train_w.len(), train_words.len());
        assert_eq!(test_w.len(), test_words.len());
        let pairs = train_w
            .iter()
            .zip(&train_words)
            .chain(test_w.iter().zip(&test_words));
        for (ws, words) in pairs {
            assert_eq!(ws.len(), words.len());
            assert!(ws.iter().all(|&w| w >= 0.0));
        }

        // "the" is a stop word
        assert_eq!(train_w[2][0], 0.0);
        assert!(train_w[2][1] > 0.0);
        // Repeated tokens share the document's weight
        assert_relative_eq!(train_w[0][0], train_w[0][2]);
        // Test-only word weighs zero, known words do not
        assert!(test_w[0][0] > 0.0);
        assert_eq!(test_w[0][1], 0.0);
        assert!(test_w[0][2] > 0.0);
        // Single letters are never features
        assert_eq!(test_w[1], vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tfidf_only_stop_words_errors() {
        let helper = TextHelper::new(&docs(&["the and of"]), &docs(&["cat"]));
        assert!(matches!(
            helper.tfidf_weight(),
            Err(PipelineError::Tfidf(TfidfError::EmptyVocabulary))
        ));
        // Vocabulary path is independent and still succeeds
        assert_eq!(helper.build_vocab().unwrap().vocab, vec!["UNK"]);
    }

    #[test]
    fn test_empty_corpora() {
        let helper = TextHelper::new(&[], &[]);
        assert_eq!(helper.text2vecs().unwrap(), (vec![], vec![]));
        assert_eq!(helper.build_vocab().unwrap().vocab, vec!["UNK"]);
    }
}
