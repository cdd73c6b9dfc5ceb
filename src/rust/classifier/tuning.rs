//! Grid search over the minimum frequency (k) and smoothing constant (c).
//!
//! Every (k, c) pair trains a fresh model on the same corpus and is scored on
//! a held-out validation set. Results are ranked by F-score, then accuracy.

use std::cmp::Ordering;

use log::{debug, info};
use serde::Serialize;

use super::config::TrainingConfig;
use super::corpus::{EvaluationExample, LabeledMessage};
use super::error::ClassifierError;
use super::evaluator::{ConfusionCounts, EvaluationReport};
use super::stop_words::StopWords;
use super::trainer::train;

pub const DEFAULT_MIN_FREQUENCIES: [usize; 5] = [1, 2, 3, 5, 10];
pub const DEFAULT_SMOOTHINGS: [f64; 5] = [0.01, 0.05, 0.1, 0.5, 1.0];

/// Outcome for one (k, c) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningResult {
    pub min_frequency: usize,
    pub smoothing: f64,
    pub counts: ConfusionCounts,
    /// `None` when some statistic is undefined for this pair
    pub report: Option<EvaluationReport>,
}

/// Trains and evaluates one model per (k, c) pair, best first.
///
/// The label set comes from `base`; its k and c are overridden per pair.
/// Pairs whose statistics are undefined rank last.
///
/// # Errors
/// Any training error (invalid k or c, empty corpus, missing label) aborts the search.
pub fn grid_search(
    corpus: &[LabeledMessage],
    stop_words: &StopWords,
    validation: &[EvaluationExample],
    base: &TrainingConfig,
    min_frequencies: &[usize],
    smoothings: &[f64],
) -> Result<Vec<TuningResult>, ClassifierError> {
    let mut results = Vec::with_capacity(min_frequencies.len() * smoothings.len());

    for &min_frequency in min_frequencies {
        for &smoothing in smoothings {
            let config = base
                .clone()
                .with_min_frequency(min_frequency)
                .with_smoothing(smoothing);
            let model = train(corpus, stop_words.clone(), config)?;
            let counts = model.confusion_counts(validation)?;
            let report = counts.report().ok();
            debug!("k = {}, c = {}: {:?}", min_frequency, smoothing, report);
            results.push(TuningResult { min_frequency, smoothing, counts, report });
        }
    }

    results.sort_by(rank);
    if let Some(best) = results.first() {
        info!(
            "Best of {} settings: k = {}, c = {}",
            results.len(),
            best.min_frequency,
            best.smoothing
        );
    }
    Ok(results)
}

fn rank(a: &TuningResult, b: &TuningResult) -> Ordering {
    match (&a.report, &b.report) {
        (Some(x), Some(y)) => y
            .f_score
            .total_cmp(&x.f_score)
            .then(y.accuracy.total_cmp(&x.accuracy)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::corpus::{parse_evaluation_lines, parse_training_lines};

    fn data() -> (Vec<LabeledMessage>, Vec<EvaluationExample>, TrainingConfig) {
        let config = TrainingConfig::default();
        let corpus = parse_training_lines(
            vec![
                "spam win free cash now",
                "spam free prize claim now",
                "spam cash prize waiting",
                "ham lunch tomorrow at noon",
                "ham see you at the meeting",
                "ham notes from the meeting",
            ],
            &config.labels,
        )
        .unwrap();
        let validation = parse_evaluation_lines(
            vec!["spam\tclaim your free cash", "ham\tmeeting at noon", "ham\tsee you tomorrow"],
            &config.labels,
        )
        .unwrap();
        (corpus, validation, config)
    }

    #[test]
    fn test_every_pair_is_evaluated_and_ranked() {
        let (corpus, validation, config) = data();
        let results = grid_search(&corpus, &StopWords::new(), &validation, &config, &[1, 2], &[0.1, 1.0]).unwrap();
        assert_eq!(results.len(), 4);

        let best = results[0].report.as_ref().unwrap();
        for result in &results[1..] {
            if let Some(report) = &result.report {
                assert!(best.f_score >= report.f_score);
            }
        }
    }

    #[test]
    fn test_undefined_results_rank_last() {
        let defined = TuningResult {
            min_frequency: 1,
            smoothing: 0.1,
            counts: ConfusionCounts { true_positives: 1, ..Default::default() },
            report: ConfusionCounts { true_positives: 1, ..Default::default() }.report().ok(),
        };
        let undefined = TuningResult {
            min_frequency: 2,
            smoothing: 0.1,
            counts: ConfusionCounts::default(),
            report: None,
        };
        let mut results = vec![undefined, defined];
        results.sort_by(rank);
        assert_eq!(results[0].min_frequency, 1);
    }

    #[test]
    fn test_invalid_grid_value_fails() {
        let (corpus, validation, config) = data();
        let result = grid_search(&corpus, &StopWords::new(), &validation, &config, &[0], &[0.1]);
        assert!(matches!(result, Err(ClassifierError::Validation(_))));
    }
}
