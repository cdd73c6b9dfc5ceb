use ndarray::{Array1, Array2, Axis};
use log::{debug, info};

use super::config::TrainingConfig;
use super::corpus::LabeledMessage;
use super::error::ClassifierError;
use super::model::TrainedModel;
use super::stop_words::StopWords;
use super::vocabulary::Vocabulary;

/// Smoothed P(attribute | label) for every (attribute, label) pair.
///
/// Stored densely: one row per vocabulary attribute, one column per label.
/// Natural logarithms are computed once at construction for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalProbabilityTable {
    probabilities: Array2<f64>,
    log_probabilities: Array2<f64>,
}

impl ConditionalProbabilityTable {
    fn new(probabilities: Array2<f64>) -> Self {
        let log_probabilities = probabilities.mapv(f64::ln);
        Self { probabilities, log_probabilities }
    }

    pub fn get(&self, attribute: usize, label: usize) -> f64 {
        self.probabilities[[attribute, label]]
    }

    pub fn ln(&self, attribute: usize, label: usize) -> f64 {
        self.log_probabilities[[attribute, label]]
    }

    /// Number of (attribute, label) entries
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// The full attribute × label matrix
    pub fn as_array(&self) -> &Array2<f64> {
        &self.probabilities
    }
}

/// P(label) for every label, from training-set message frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPriors {
    priors: Array1<f64>,
}

impl LabelPriors {
    pub fn get(&self, label: usize) -> f64 {
        self.priors[label]
    }

    pub fn len(&self) -> usize {
        self.priors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.priors.iter().copied()
    }
}

/// Raw counts gathered in the estimation pass, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingStats {
    /// Messages per label
    pub message_counts: Vec<usize>,
    /// Non-stop-word tokens per label, in or out of the vocabulary
    pub word_totals: Vec<usize>,
}

impl TrainingStats {
    pub fn total_messages(&self) -> usize {
        self.message_counts.iter().sum()
    }
}

/// The estimated parameters of a Naive Bayes model.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub word_given_label: ConditionalProbabilityTable,
    pub priors: LabelPriors,
    pub stats: TrainingStats,
}

/// Estimates conditional probabilities and label priors over a fixed vocabulary.
///
/// For each label, P(w | label) = (count(w, label) + c) / (words(label) + c·|V|),
/// where words(label) counts every non-stop-word token seen under the label.
/// P(label) = messages(label) / messages.
///
/// # Errors
/// - `Validation` if the configuration is invalid or a message has a label index outside the label set
/// - `EmptyCorpus` if there are no messages
/// - `MissingLabel` if some label has no messages
pub fn estimate(
    corpus: &[LabeledMessage],
    vocabulary: &Vocabulary,
    stop_words: &StopWords,
    config: &TrainingConfig,
) -> Result<Parameters, ClassifierError> {
    config.validate()?;
    if corpus.is_empty() {
        return Err(ClassifierError::EmptyCorpus);
    }

    let num_labels = config.labels.len();
    let mut counts = Array2::<f64>::zeros((vocabulary.len(), num_labels));
    let mut word_totals = vec![0usize; num_labels];
    let mut message_counts = vec![0usize; num_labels];

    for message in corpus {
        let label = message.label;
        if label >= num_labels {
            return Err(ClassifierError::Validation(format!(
                "Message label index {} is outside the label set of size {}",
                label, num_labels
            )));
        }
        for token in message.tokens.iter().filter(|t| !stop_words.contains(t)) {
            word_totals[label] += 1;
            if let Some(attribute) = vocabulary.index_of(token) {
                counts[[attribute, label]] += 1.0;
            }
        }
        message_counts[label] += 1;
    }

    if let Some(missing) = message_counts.iter().position(|&n| n == 0) {
        return Err(ClassifierError::MissingLabel {
            label: config.labels.name(missing).to_string(),
        });
    }

    let c = config.smoothing;
    let smoothing_mass = c * vocabulary.len() as f64;
    let mut probabilities = counts.mapv(|n| n + c);
    for (mut column, &total) in probabilities.axis_iter_mut(Axis(1)).zip(&word_totals) {
        let denominator = total as f64 + smoothing_mass;
        column.mapv_inplace(|n| n / denominator);
    }

    let total_messages = corpus.len() as f64;
    let priors = Array1::from_iter(message_counts.iter().map(|&n| n as f64 / total_messages));

    for (i, label) in config.labels.labels().iter().enumerate() {
        debug!(
            "Label '{}': {} messages, {} words, prior {:.6}",
            label, message_counts[i], word_totals[i], priors[i]
        );
    }

    Ok(Parameters {
        word_given_label: ConditionalProbabilityTable::new(probabilities),
        priors: LabelPriors { priors },
        stats: TrainingStats { message_counts, word_totals },
    })
}

/// Trains a model from a parsed corpus: builds the vocabulary, then estimates
/// the parameters over it.
///
/// # Example
/// ```
/// use spamnb::{train, parse_training_lines, StopWords, TrainingConfig};
///
/// let config = TrainingConfig::default().with_min_frequency(1);
/// let corpus = parse_training_lines(
///     vec!["spam free money now", "ham see you tomorrow"],
///     &config.labels,
/// )?;
/// let model = train(&corpus, StopWords::new(), config)?;
/// assert_eq!(model.vocabulary().len(), 6);
/// # Ok::<(), spamnb::ClassifierError>(())
/// ```
pub fn train(
    corpus: &[LabeledMessage],
    stop_words: StopWords,
    config: TrainingConfig,
) -> Result<TrainedModel, ClassifierError> {
    config.validate()?;
    if corpus.is_empty() {
        return Err(ClassifierError::EmptyCorpus);
    }

    let vocabulary = Vocabulary::build(corpus, &stop_words, config.min_frequency);
    train_with_vocabulary(corpus, vocabulary, stop_words, config)
}

/// Estimates parameters over an already-built vocabulary and assembles the model.
///
/// Use this when vocabulary building and estimation should be reported as
/// separate stages; [`train`] does both.
pub fn train_with_vocabulary(
    corpus: &[LabeledMessage],
    vocabulary: Vocabulary,
    stop_words: StopWords,
    config: TrainingConfig,
) -> Result<TrainedModel, ClassifierError> {
    let parameters = estimate(corpus, &vocabulary, &stop_words, &config)?;

    info!(
        "Trained on {} messages: {} attributes x {} labels (c = {})",
        parameters.stats.total_messages(),
        vocabulary.len(),
        config.labels.len(),
        config.smoothing
    );

    Ok(TrainedModel::new(vocabulary, parameters, stop_words, config))
}
