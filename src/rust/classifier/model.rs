use serde::Serialize;

use super::config::TrainingConfig;
use super::labels::LabelSet;
use super::stop_words::StopWords;
use super::tokenizer::extract_words;
use super::trainer::{ConditionalProbabilityTable, LabelPriors, Parameters, TrainingStats};
use super::vocabulary::Vocabulary;
use super::ClassifierInfo;

/// A trained Naive Bayes model.
///
/// Built once by [`train`](crate::train) or [`ClassifierBuilder`](crate::ClassifierBuilder)
/// and never mutated afterwards, so it can be shared freely across threads.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use spamnb::{Classifier, TrainingConfig};
///
/// let classifier = Classifier::builder()
///     .with_config(TrainingConfig::default().with_min_frequency(1))
///     .add_training_lines(vec![
///         "spam free money now",
///         "ham see you tomorrow",
///         "spam free prize now",
///     ])
///     .build()?;
///
/// let (label, scores) = classifier.classify("free money");
/// assert_eq!(label, "spam");
/// assert!(scores.get("spam") > scores.get("ham"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrainedModel {
    vocabulary: Vocabulary,
    word_given_label: ConditionalProbabilityTable,
    priors: LabelPriors,
    log_priors: Vec<f64>,
    stats: TrainingStats,
    stop_words: StopWords,
    config: TrainingConfig,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<TrainedModel>();
    }
};

impl TrainedModel {
    pub(crate) fn new(
        vocabulary: Vocabulary,
        parameters: Parameters,
        stop_words: StopWords,
        config: TrainingConfig,
    ) -> Self {
        let log_priors = parameters.priors.iter().map(f64::ln).collect();
        Self {
            vocabulary,
            word_given_label: parameters.word_given_label,
            priors: parameters.priors,
            log_priors,
            stats: parameters.stats,
            stop_words,
            config,
        }
    }

    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Scores the text against every label.
    ///
    /// Each score starts at ln P(label) and adds ln P(token | label) for every
    /// token that is a model attribute. Other tokens, stop words included,
    /// contribute nothing. Empty text scores every label at its log-prior.
    pub fn predict(&self, text: &str) -> ClassificationScore {
        let mut scores = self.log_priors.clone();
        for token in extract_words(text) {
            if let Some(attribute) = self.vocabulary.index_of(&token) {
                for (label, score) in scores.iter_mut().enumerate() {
                    *score += self.word_given_label.ln(attribute, label);
                }
            }
        }
        ClassificationScore {
            labels: self.config.labels.clone(),
            scores,
        }
    }

    /// Predicts the most likely label for the text and returns it with all scores.
    pub fn classify(&self, text: &str) -> (&str, ClassificationScore) {
        let scores = self.predict(text);
        let best = scores.best_index();
        (self.config.labels.name(best), scores)
    }

    /// P(token | label), if the token is an attribute and the label is known
    pub fn word_given_label(&self, token: &str, label: &str) -> Option<f64> {
        let attribute = self.vocabulary.index_of(token)?;
        let label = self.config.labels.index_of(label)?;
        Some(self.word_given_label.get(attribute, label))
    }

    /// P(label), if the label is known
    pub fn prior(&self, label: &str) -> Option<f64> {
        let label = self.config.labels.index_of(label)?;
        Some(self.priors.get(label))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn probabilities(&self) -> &ConditionalProbabilityTable {
        &self.word_given_label
    }

    pub fn priors(&self) -> &LabelPriors {
        &self.priors
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn labels(&self) -> &LabelSet {
        &self.config.labels
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Returns information about the trained model
    pub fn info(&self) -> ClassifierInfo {
        let labels = self.config.labels.labels().to_vec();
        ClassifierInfo {
            priors: labels.iter().cloned().zip(self.priors.iter()).collect(),
            message_counts: labels.iter().cloned().zip(self.stats.message_counts.iter().copied()).collect(),
            labels,
            positive_label: self.config.labels.positive().to_string(),
            vocabulary_size: self.vocabulary.len(),
            stop_word_count: self.stop_words.len(),
            min_frequency: self.config.min_frequency,
            smoothing: self.config.smoothing,
        }
    }
}

/// Unnormalised log-likelihood per label for one text.
///
/// Scores are only meaningful relative to each other; they are not calibrated
/// probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationScore {
    labels: LabelSet,
    scores: Vec<f64>,
}

impl ClassificationScore {
    /// Score for a label, or `None` for a label outside the model's set
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels.index_of(label).map(|i| self.scores[i])
    }

    /// `(label, score)` pairs in label-set order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .labels()
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// Index of the label with the maximum score.
    ///
    /// Ties go to the label listed first in the label set.
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, &score) in self.scores.iter().enumerate().skip(1) {
            if score > self.scores[best] {
                best = i;
            }
        }
        best
    }

    /// Label with the maximum score, ties going to the label listed first
    pub fn best(&self) -> &str {
        self.labels.name(self.best_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::corpus::parse_training_lines;
    use crate::classifier::trainer::train;

    const EPSILON: f64 = 1e-12;

    fn scenario_model(stop_words: StopWords) -> TrainedModel {
        let config = TrainingConfig::default().with_min_frequency(1).with_smoothing(0.1);
        let corpus = parse_training_lines(
            vec!["spam free money now", "ham see you tomorrow", "spam free prize now"],
            &config.labels,
        )
        .unwrap();
        train(&corpus, stop_words, config).unwrap()
    }

    #[test]
    fn test_spam_scores_higher_for_spammy_text() {
        let model = scenario_model(StopWords::new());
        let scores = model.predict("free money");
        assert!(scores.get("spam").unwrap() > scores.get("ham").unwrap());
        assert_eq!(scores.best(), "spam");
    }

    #[test]
    fn test_empty_text_scores_log_priors() {
        let model = scenario_model(StopWords::new());
        let scores = model.predict("");
        assert!((scores.get("spam").unwrap() - (2.0f64 / 3.0).ln()).abs() < EPSILON);
        assert!((scores.get("ham").unwrap() - (1.0f64 / 3.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn test_unknown_tokens_contribute_nothing() {
        let model = scenario_model(StopWords::new());
        assert_eq!(model.predict("zebra quantum"), model.predict(""));
        assert_eq!(model.predict("free zebra"), model.predict("free"));
    }

    #[test]
    fn test_exact_score() {
        let model = scenario_model(StopWords::new());
        let scores = model.predict("Free!");
        let expected = (2.0f64 / 3.0).ln() + (2.1f64 / 6.7).ln();
        assert!((scores.get("spam").unwrap() - expected).abs() < EPSILON);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let model = scenario_model(StopWords::new());
        assert_eq!(model.predict("see you free now"), model.predict("see you free now"));
    }

    #[test]
    fn test_stop_words_absent_from_model() {
        let model = scenario_model(["now"].into_iter().collect());
        assert!(!model.vocabulary().contains("now"));
        assert_eq!(model.word_given_label("now", "spam"), None);
        assert_eq!(model.predict("now"), model.predict(""));
    }

    #[test]
    fn test_tie_goes_to_first_label() {
        let config = TrainingConfig::default().with_min_frequency(1);
        let corpus = parse_training_lines(vec!["spam hello", "ham hello"], &config.labels).unwrap();
        let model = train(&corpus, StopWords::new(), config).unwrap();
        let (label, scores) = model.classify("hello");
        assert_eq!(scores.get("spam"), scores.get("ham"));
        assert_eq!(label, "ham");
    }

    #[test]
    fn test_lookups() {
        let model = scenario_model(StopWords::new());
        assert!((model.prior("spam").unwrap() - 2.0 / 3.0).abs() < EPSILON);
        assert_eq!(model.prior("eggs"), None);
        assert!(model.word_given_label("free", "spam").unwrap() > model.word_given_label("free", "ham").unwrap());
        assert_eq!(model.word_given_label("zebra", "spam"), None);
    }

    #[test]
    fn test_info() {
        let model = scenario_model(["now", "see"].into_iter().collect());
        let info = model.info();
        assert_eq!(info.labels, vec!["ham", "spam"]);
        assert_eq!(info.positive_label, "spam");
        assert_eq!(info.vocabulary_size, 5);
        assert_eq!(info.stop_word_count, 2);
        assert_eq!(info.message_counts["spam"], 2);
        assert_eq!(info.min_frequency, 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let model = std::sync::Arc::new(scenario_model(StopWords::new()));
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let model = std::sync::Arc::clone(&model);
                std::thread::spawn(move || model.classify("free money").0.to_string())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "spam");
        }
    }
}
