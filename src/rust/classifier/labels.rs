use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::tokenizer::extract_words;

pub const SPAM: &str = "spam";
pub const HAM: &str = "ham";

/// An ordered, closed set of labels with one designated positive label.
///
/// Order matters: when two labels score the same, the one listed first wins.
/// The default set is `[ham, spam]` with `spam` as the positive class, so ham
/// wins ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    labels: Vec<String>,
    positive: String,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            labels: vec![HAM.to_string(), SPAM.to_string()],
            positive: SPAM.to_string(),
        }
    }
}

impl LabelSet {
    /// Creates a validated label set
    ///
    /// # Arguments
    /// * `labels` - The labels in tie-break order
    /// * `positive` - The label treated as the positive class during evaluation
    ///
    /// # Example
    /// ```
    /// use spamnb::LabelSet;
    ///
    /// let labels = LabelSet::new(vec!["spam", "ham"], "spam").unwrap();
    /// assert_eq!(labels.positive(), "spam");
    /// assert_eq!(labels.index_of("ham"), Some(1));
    /// ```
    pub fn new(
        labels: Vec<impl Into<String>>,
        positive: impl Into<String>,
    ) -> Result<Self, ClassifierError> {
        let set = Self {
            labels: labels.into_iter().map(Into::into).collect(),
            positive: positive.into(),
        };
        set.validate()?;
        Ok(set)
    }

    /// Checks the rules every label set must satisfy:
    /// - at least two labels, no duplicates
    /// - each label is a single normalised token, since training labels are read through the tokenizer
    /// - the positive label belongs to the set
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.labels.len() < 2 {
            return Err(ClassifierError::Validation(format!(
                "A label set needs at least 2 labels, found {}",
                self.labels.len()
            )));
        }
        for (i, label) in self.labels.iter().enumerate() {
            if extract_words(label) != [label.as_str()] {
                return Err(ClassifierError::Validation(format!(
                    "Label '{}' is not a single lowercase token",
                    label
                )));
            }
            if self.labels[..i].contains(label) {
                return Err(ClassifierError::Validation(format!(
                    "Duplicate label '{}'",
                    label
                )));
            }
        }
        if !self.labels.contains(&self.positive) {
            return Err(ClassifierError::Validation(format!(
                "Positive label '{}' is not in the label set",
                self.positive
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn positive(&self) -> &str {
        &self.positive
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn name(&self, index: usize) -> &str {
        &self.labels[index]
    }

    pub fn is_positive(&self, index: usize) -> bool {
        self.labels[index] == self.positive
    }
}
