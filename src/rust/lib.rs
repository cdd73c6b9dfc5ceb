//! A Naive Bayes spam/ham text classifier with additive smoothing.
//!
//! Training runs in three stages: a vocabulary of attributes is selected by
//! corpus frequency (minus stop words), smoothed P(word | label) and label
//! priors are estimated over it, and new text is scored by summing log
//! probabilities per label.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use spamnb::Classifier;
//!
//! let classifier = Classifier::builder()
//!     .with_min_frequency(1)
//!     .with_smoothing(0.1)
//!     .add_training_lines(vec![
//!         "spam free money now",
//!         "ham see you tomorrow",
//!         "spam free prize now",
//!     ])
//!     .build()?;
//!
//! let (label, scores) = classifier.classify("free money");
//! println!("Predicted class: {}", label);
//! for (label, score) in scores.iter() {
//!     println!("{}: {:.3}", label, score);
//! }
//!
//! let report = classifier.evaluate_reader("spam\tfree money now\n".as_bytes())?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! A trained model is immutable and can be shared across threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use spamnb::Classifier;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let classifier = Arc::new(Classifier::builder()
//!     .with_min_frequency(1)
//!     .add_training_lines(vec!["spam win cash", "ham hello there"])
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = Arc::clone(&classifier);
//!     handles.push(thread::spawn(move || {
//!         classifier.predict("win cash");
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;

pub use classifier::{
    extract_words, ClassificationScore, Classifier, ClassifierBuilder, ClassifierError,
    ClassifierInfo, ConfusionCounts, EvaluationReport, LabelSet, StopWords, TrainedModel,
    TrainingConfig, Vocabulary, DEFAULT_MIN_FREQUENCY, DEFAULT_SMOOTHING, HAM, SPAM,
};
pub use classifier::corpus::{
    load_evaluation_set, load_training_corpus, parse_evaluation_lines, parse_training_lines,
    EvaluationExample, LabeledMessage,
};
pub use classifier::trainer::{
    estimate, train, train_with_vocabulary, ConditionalProbabilityTable, LabelPriors,
};
pub use classifier::tuning::{grid_search, TuningResult};

pub fn init_logger() {
    env_logger::init();
}
