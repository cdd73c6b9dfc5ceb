use std::io;
use std::path::PathBuf;

/// Represents the different types of errors that can occur while training or evaluating the classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// A training, evaluation or stop-word file could not be opened or read
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A line of input does not have the expected layout
    #[error("Format error on line {line}: {message}")]
    Format { line: usize, message: String },
    /// A line carries a label that is not part of the configured label set
    #[error("Unknown label '{label}' on line {line}")]
    UnknownLabel { line: usize, label: String },
    /// A parse error in one of several named inputs
    #[error("{origin}: {source}")]
    Input {
        origin: String,
        #[source]
        source: Box<ClassifierError>,
    },
    /// Training was attempted on a corpus with no messages
    #[error("Training corpus is empty")]
    EmptyCorpus,
    /// A label never occurs in the training corpus, so its prior would be zero
    #[error("Label '{label}' has no training messages")]
    MissingLabel { label: String },
    /// Invalid configuration or label set
    #[error("Validation error: {0}")]
    Validation(String),
    /// A statistic whose denominator is zero
    #[error("{metric} is undefined: its denominator is zero")]
    UndefinedMetric { metric: &'static str },
}

impl ClassifierError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ClassifierError::Io { path: path.into(), source }
    }

    pub(crate) fn in_input(origin: impl Into<String>, source: ClassifierError) -> Self {
        ClassifierError::Input { origin: origin.into(), source: Box::new(source) }
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        ClassifierError::Format { line, message: message.into() }
    }
}
