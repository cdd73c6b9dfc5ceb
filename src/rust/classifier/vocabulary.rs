use std::collections::HashMap;

use log::{info, warn};

use super::corpus::LabeledMessage;
use super::stop_words::StopWords;

/// The fixed set of attributes a model reasons about.
///
/// Every attribute has a dense index, assigned in the order tokens were
/// admitted, which addresses its row in the probability table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds the vocabulary from a training corpus.
    ///
    /// A running count is kept per token across the whole corpus, labels and
    /// stop words excluded. A token is admitted the moment its count reaches
    /// `min_frequency`; tokens seen fewer times are left out.
    pub fn build(corpus: &[LabeledMessage], stop_words: &StopWords, min_frequency: usize) -> Self {
        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        let mut vocabulary = Self::default();

        for token in corpus.iter().flat_map(|m| m.tokens.iter()) {
            if stop_words.contains(token) {
                continue;
            }
            let count = frequencies.entry(token.as_str()).or_insert(0);
            *count += 1;
            if *count == min_frequency {
                vocabulary.insert(token);
            }
        }

        if vocabulary.is_empty() {
            warn!("Vocabulary is empty; predictions will depend on label priors alone");
        }
        info!(
            "Built vocabulary of {} attributes from {} distinct tokens (k = {})",
            vocabulary.len(),
            frequencies.len(),
            min_frequency
        );
        vocabulary
    }

    fn insert(&mut self, token: &str) {
        if !self.index.contains_key(token) {
            self.index.insert(token.to_string(), self.tokens.len());
            self.tokens.push(token.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Row index of an attribute, if the token is one
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn token(&self, index: usize) -> &str {
        &self.tokens[index]
    }

    /// Attributes in admission order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}
