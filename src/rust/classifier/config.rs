use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::labels::LabelSet;

/// Default minimum corpus frequency (k) for a token to become an attribute
pub const DEFAULT_MIN_FREQUENCY: usize = 2;
/// Default additive smoothing constant (c)
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Hyper-parameters and label set used to train a model.
///
/// The defaults (k = 2, c = 0.1) were picked on a validation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Occurrences a token needs across the corpus before it becomes an attribute (k >= 1)
    pub min_frequency: usize,
    /// Constant added to every (attribute, label) count before normalising (c > 0)
    pub smoothing: f64,
    /// Labels the model distinguishes
    pub labels: LabelSet,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_frequency: DEFAULT_MIN_FREQUENCY,
            smoothing: DEFAULT_SMOOTHING,
            labels: LabelSet::default(),
        }
    }
}

impl TrainingConfig {
    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.min_frequency == 0 {
            return Err(ClassifierError::Validation(
                "Minimum frequency must be at least 1".into(),
            ));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(ClassifierError::Validation(format!(
                "Smoothing constant must be a positive number, got {}",
                self.smoothing
            )));
        }
        self.labels.validate()
    }
}
