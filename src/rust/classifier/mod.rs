use std::collections::BTreeMap;

use serde::Serialize;

mod error;
mod tokenizer;
mod labels;
mod config;
mod stop_words;
mod vocabulary;
mod model;
pub mod corpus;
pub mod trainer;
pub mod builder;
pub mod evaluator;
pub mod tuning;

pub use error::ClassifierError;
pub use tokenizer::extract_words;
pub use labels::{LabelSet, HAM, SPAM};
pub use config::{TrainingConfig, DEFAULT_MIN_FREQUENCY, DEFAULT_SMOOTHING};
pub use stop_words::StopWords;
pub use vocabulary::Vocabulary;
pub use model::{ClassificationScore, TrainedModel};
pub use builder::ClassifierBuilder;
pub use evaluator::{ConfusionCounts, EvaluationReport};

/// The classifier is the trained model itself
pub type Classifier = TrainedModel;

/// Information about a trained classifier
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierInfo {
    /// Labels in tie-break order
    pub labels: Vec<String>,
    /// Label treated as the positive class during evaluation
    pub positive_label: String,
    /// Prior probability of each label
    pub priors: BTreeMap<String, f64>,
    /// Training messages seen per label
    pub message_counts: BTreeMap<String, usize>,
    /// Number of attributes in the vocabulary
    pub vocabulary_size: usize,
    /// Number of stop words excluded from the vocabulary
    pub stop_word_count: usize,
    /// Minimum corpus frequency (k)
    pub min_frequency: usize,
    /// Smoothing constant (c)
    pub smoothing: f64,
}
