use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use log::info;

use super::corpus::{collect_lines, open};
use super::error::ClassifierError;
use super::tokenizer::normalize_word;

/// A set of normalised words excluded from the vocabulary.
///
/// Stop words only affect vocabulary construction and the per-label word
/// totals during training. At inference time they are simply absent from the
/// model, so they contribute nothing to any score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one stop word per line. Each entry is trimmed, lowercased and
    /// stripped of punctuation; entries that end up empty are ignored.
    pub fn from_reader<R: BufRead>(reader: R, origin: &Path) -> Result<Self, ClassifierError> {
        Ok(collect_lines(reader, origin)?.into_iter().collect())
    }

    /// Loads a stop-word list from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let stop_words = Self::from_reader(open(path)?, path)?;
        info!("Loaded {} stop words from {}", stop_words.len(), path.display());
        Ok(stop_words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .filter_map(|w| normalize_word(w.as_ref()))
                .collect(),
        }
    }
}
