use std::io::BufRead;
use std::path::Path;

use log::{error, info};

use super::config::TrainingConfig;
use super::corpus::{collect_lines, open, parse_training_lines};
use super::error::ClassifierError;
use super::labels::LabelSet;
use super::model::TrainedModel;
use super::stop_words::StopWords;
use super::trainer::train;

/// Raw training lines from one source, parsed once the label set is final
#[derive(Debug, Clone)]
struct TrainingSource {
    origin: String,
    lines: Vec<String>,
}

/// A builder for training a classifier with a fluent interface.
///
/// Inputs are read eagerly, so a missing file is reported as soon as it is
/// added. Parsing and training happen in [`build`](ClassifierBuilder::build),
/// once the configuration is final.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    config: TrainingConfig,
    stop_words: StopWords,
    sources: Vec<TrainingSource>,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use spamnb::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole training configuration
    ///
    /// # Example
    /// ```
    /// use spamnb::{ClassifierBuilder, TrainingConfig};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_config(TrainingConfig::default().with_smoothing(1.0));
    /// ```
    pub fn with_config(mut self, config: TrainingConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the minimum corpus frequency (k) a token needs to become an attribute
    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        self.config.min_frequency = min_frequency;
        self
    }

    /// Sets the additive smoothing constant (c)
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.config.smoothing = smoothing;
        self
    }

    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.config.labels = labels;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Loads stop words from a file with one word per line
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance, or an `Io` error if the file cannot be read
    pub fn with_stop_words_file(mut self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        self.stop_words = StopWords::from_file(path)?;
        Ok(self)
    }

    /// Adds training lines of the form `<label> <message>`
    pub fn add_training_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.push(TrainingSource {
            origin: "<lines>".to_string(),
            lines: lines.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Adds every line of a reader as training data
    pub fn add_training_reader<R: BufRead>(mut self, reader: R) -> Result<Self, ClassifierError> {
        let origin = "<reader>";
        let lines = collect_lines(reader, Path::new(origin))?;
        self.sources.push(TrainingSource { origin: origin.to_string(), lines });
        Ok(self)
    }

    /// Adds a training file with one `<label> <message>` line per message
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance, or an `Io` error if the file cannot be read
    pub fn add_training_file(mut self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let lines = collect_lines(open(path)?, path)?;
        info!("Read {} training lines from {}", lines.len(), path.display());
        self.sources.push(TrainingSource {
            origin: path.display().to_string(),
            lines,
        });
        Ok(self)
    }

    /// Parses the collected training data and trains the model
    ///
    /// # Returns
    /// * `Result<TrainedModel, ClassifierError>` - The trained model, or an error if:
    ///   - The configuration or label set is invalid
    ///   - A training line is malformed or has an unknown label, reported as `Input`
    ///     naming the source the line came from
    ///   - The corpus is empty or some label has no messages
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use spamnb::ClassifierBuilder;
    ///
    /// let model = ClassifierBuilder::new()
    ///     .with_min_frequency(1)
    ///     .add_training_lines(vec!["spam win cash", "ham lunch at noon"])
    ///     .build()?;
    /// assert_eq!(model.vocabulary().len(), 5);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<TrainedModel, ClassifierError> {
        self.config.validate()?;

        let mut corpus = Vec::new();
        for source in &self.sources {
            let messages = parse_training_lines(&source.lines, &self.config.labels).map_err(|e| {
                error!("Failed to parse training data from {}: {}", source.origin, e);
                ClassifierError::in_input(source.origin.clone(), e)
            })?;
            corpus.extend(messages);
        }

        train(&corpus, self.stop_words, self.config)
    }
}
