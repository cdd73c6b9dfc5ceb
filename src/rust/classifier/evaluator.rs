use std::fmt;
use std::io::BufRead;
use std::path::Path;

use log::info;
use serde::Serialize;

use super::corpus::{load_evaluation_set, read_evaluation_set, EvaluationExample};
use super::error::ClassifierError;
use super::model::TrainedModel;

/// Confusion-matrix tallies with the label set's positive label as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    /// Adds one outcome. Any label other than the positive one counts as negative.
    pub fn record(&mut self, predicted_positive: bool, actual_positive: bool) {
        match (predicted_positive, actual_positive) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_negatives += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> Result<f64, ClassifierError> {
        ratio("precision", self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN)
    pub fn recall(&self) -> Result<f64, ClassifierError> {
        ratio("recall", self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall
    pub fn f_score(&self) -> Result<f64, ClassifierError> {
        let precision = self.precision()?;
        let recall = self.recall()?;
        let sum = precision + recall;
        if sum == 0.0 {
            return Err(ClassifierError::UndefinedMetric { metric: "F-score" });
        }
        Ok(2.0 * precision * recall / sum)
    }

    /// (TP + TN) / total
    pub fn accuracy(&self) -> Result<f64, ClassifierError> {
        ratio("accuracy", self.true_positives + self.true_negatives, self.total())
    }

    /// Computes all four statistics, failing if any of them is undefined
    pub fn report(&self) -> Result<EvaluationReport, ClassifierError> {
        Ok(EvaluationReport {
            precision: self.precision()?,
            recall: self.recall()?,
            f_score: self.f_score()?,
            accuracy: self.accuracy()?,
            counts: *self,
        })
    }
}

fn ratio(metric: &'static str, numerator: usize, denominator: usize) -> Result<f64, ClassifierError> {
    if denominator == 0 {
        return Err(ClassifierError::UndefinedMetric { metric });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Aggregate statistics of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
    pub accuracy: f64,
    pub counts: ConfusionCounts,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Precision:{:?} Recall:{:?} F-Score:{:?} Accuracy:{:?}",
            self.precision, self.recall, self.f_score, self.accuracy
        )
    }
}

impl TrainedModel {
    /// Classifies every example and tallies the outcomes.
    ///
    /// # Errors
    /// - `Validation` if an example's label index is outside the model's label set
    pub fn confusion_counts(&self, examples: &[EvaluationExample]) -> Result<ConfusionCounts, ClassifierError> {
        let labels = self.labels();
        if let Some(example) = examples.iter().find(|e| e.label >= labels.len()) {
            return Err(ClassifierError::Validation(format!(
                "Example label index {} is outside the label set of size {}",
                example.label,
                labels.len()
            )));
        }

        let mut counts = ConfusionCounts::default();
        for example in examples {
            let predicted = self.predict(&example.text).best_index();
            counts.record(labels.is_positive(predicted), labels.is_positive(example.label));
        }
        info!(
            "Evaluated {} messages: TP={} FP={} TN={} FN={}",
            counts.total(),
            counts.true_positives,
            counts.false_positives,
            counts.true_negatives,
            counts.false_negatives
        );
        Ok(counts)
    }

    /// Evaluates the model on parsed examples
    pub fn evaluate(&self, examples: &[EvaluationExample]) -> Result<EvaluationReport, ClassifierError> {
        self.confusion_counts(examples)?.report()
    }

    /// Evaluates the model on `<label>\t<message>` lines from a reader
    pub fn evaluate_reader<R: BufRead>(&self, reader: R) -> Result<EvaluationReport, ClassifierError> {
        let examples = read_evaluation_set(reader, self.labels(), Path::new("<reader>"))?;
        self.evaluate(&examples)
    }

    /// Evaluates the model on a `<label>\t<message>` file
    pub fn evaluate_file(&self, path: impl AsRef<Path>) -> Result<EvaluationReport, ClassifierError> {
        let examples = load_evaluation_set(path, self.labels())?;
        self.evaluate(&examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::builder::ClassifierBuilder;

    fn model() -> TrainedModel {
        ClassifierBuilder::new()
            .with_min_frequency(1)
            .add_training_lines(vec![
                "spam free money now",
                "ham see you tomorrow",
                "spam free prize now",
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_true_positive() {
        let report = model().evaluate_reader("spam\tfree money now\n".as_bytes()).unwrap();
        assert_eq!(
            report.counts,
            ConfusionCounts { true_positives: 1, false_positives: 0, true_negatives: 0, false_negatives: 0 }
        );
        assert_eq!(report.precision, 1.0);
        assert_eq!(report.recall, 1.0);
        assert_eq!(report.f_score, 1.0);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_all_four_buckets() {
        let mut counts = ConfusionCounts::default();
        counts.record(true, true);
        counts.record(true, true);
        counts.record(true, false);
        counts.record(false, false);
        counts.record(false, false);
        counts.record(false, false);
        counts.record(false, true);
        let report = counts.report().unwrap();
        assert!((report.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.f_score - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.accuracy - 5.0 / 7.0).abs() < 1e-12);
        for value in [report.precision, report.recall, report.f_score, report.accuracy] {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_zero_denominators_are_errors() {
        let counts = ConfusionCounts::default();
        assert!(matches!(counts.precision(), Err(ClassifierError::UndefinedMetric { metric: "precision" })));
        assert!(matches!(counts.recall(), Err(ClassifierError::UndefinedMetric { metric: "recall" })));
        assert!(matches!(counts.accuracy(), Err(ClassifierError::UndefinedMetric { metric: "accuracy" })));

        let counts = ConfusionCounts { true_negatives: 3, ..Default::default() };
        assert!(counts.precision().is_err());
        assert_eq!(counts.accuracy().unwrap(), 1.0);

        let counts = ConfusionCounts { false_positives: 1, false_negatives: 1, ..Default::default() };
        assert_eq!(counts.precision().unwrap(), 0.0);
        assert!(matches!(counts.f_score(), Err(ClassifierError::UndefinedMetric { metric: "F-score" })));
    }

    #[test]
    fn test_display_format() {
        let report = ConfusionCounts { true_positives: 1, ..Default::default() }.report().unwrap();
        assert_eq!(report.to_string(), "Precision:1.0 Recall:1.0 F-Score:1.0 Accuracy:1.0");

        let report = ConfusionCounts { true_positives: 1, false_positives: 1, true_negatives: 2, ..Default::default() }
            .report()
            .unwrap();
        assert_eq!(report.to_string(), "Precision:0.5 Recall:1.0 F-Score:0.6666666666666666 Accuracy:0.75");
    }

    #[test]
    fn test_label_index_outside_label_set() {
        let model = model();
        let examples = vec![
            EvaluationExample { label: 1, text: "free money".into() },
            EvaluationExample { label: 7, text: "free".into() },
        ];
        assert!(matches!(model.confusion_counts(&examples), Err(ClassifierError::Validation(_))));
        assert!(matches!(model.evaluate(&examples), Err(ClassifierError::Validation(_))));
    }

    #[test]
    fn test_malformed_evaluation_line() {
        let result = model().evaluate_reader("spam\tfree money\nham no tab here\n".as_bytes());
        assert!(matches!(result, Err(ClassifierError::Format { line: 2, .. })));
    }

    #[test]
    fn test_message_with_extra_tabs() {
        let report = model()
            .evaluate_reader("spam\tfree\tmoney\tnow\nham\tsee you\ttomorrow\n".as_bytes())
            .unwrap();
        assert_eq!(report.counts.true_positives, 1);
        assert_eq!(report.counts.true_negatives, 1);
    }
}
