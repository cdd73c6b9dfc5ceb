//! Parsing of labeled training and evaluation data.
//!
//! Training lines are `<label><whitespace><message>`; the label is the first
//! token after normalisation. Evaluation lines are `<label>\t<message>`; the
//! message is everything after the first tab, further tabs included.
//! Blank lines are not messages and are skipped in both formats.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::error::ClassifierError;
use super::labels::LabelSet;
use super::tokenizer::extract_words;

/// One training message: its label index and its normalised tokens, label excluded
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMessage {
    pub label: usize,
    pub tokens: Vec<String>,
}

/// One evaluation message: its true label index and the raw message text
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationExample {
    pub label: usize,
    pub text: String,
}

/// Parses a single training line. `line_no` is 1-based and only used in errors.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_training_line(
    line_no: usize,
    line: &str,
    labels: &LabelSet,
) -> Result<Option<LabeledMessage>, ClassifierError> {
    let mut tokens = extract_words(line);
    if tokens.is_empty() {
        if line.trim().is_empty() {
            return Ok(None);
        }
        return Err(ClassifierError::format(line_no, "line has no label"));
    }
    let label_token = tokens.remove(0);
    let label = labels
        .index_of(&label_token)
        .ok_or_else(|| ClassifierError::UnknownLabel { line: line_no, label: label_token })?;
    Ok(Some(LabeledMessage { label, tokens }))
}

/// Parses a single evaluation line. `line_no` is 1-based and only used in errors.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_evaluation_line(
    line_no: usize,
    line: &str,
    labels: &LabelSet,
) -> Result<Option<EvaluationExample>, ClassifierError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (label, text) = line
        .split_once('\t')
        .ok_or_else(|| ClassifierError::format(line_no, "missing tab between label and message"))?;
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return Err(ClassifierError::format(line_no, "line has no label"));
    }
    let label = labels
        .index_of(&label)
        .ok_or(ClassifierError::UnknownLabel { line: line_no, label })?;
    Ok(Some(EvaluationExample { label, text: text.to_string() }))
}

/// Parses every training line from an iterator of lines.
pub fn parse_training_lines<I, S>(lines: I, labels: &LabelSet) -> Result<Vec<LabeledMessage>, ClassifierError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut messages = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        match parse_training_line(i + 1, line.as_ref(), labels)? {
            Some(message) => messages.push(message),
            None => debug!("Skipping blank training line {}", i + 1),
        }
    }
    Ok(messages)
}

/// Parses every evaluation line from an iterator of lines.
pub fn parse_evaluation_lines<I, S>(lines: I, labels: &LabelSet) -> Result<Vec<EvaluationExample>, ClassifierError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut examples = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        match parse_evaluation_line(i + 1, line.as_ref(), labels)? {
            Some(example) => examples.push(example),
            None => debug!("Skipping blank evaluation line {}", i + 1),
        }
    }
    Ok(examples)
}

/// Reads a training corpus from any buffered reader.
pub fn read_training_corpus<R: BufRead>(
    reader: R,
    labels: &LabelSet,
    origin: &Path,
) -> Result<Vec<LabeledMessage>, ClassifierError> {
    let lines = collect_lines(reader, origin)?;
    parse_training_lines(lines, labels)
}

/// Reads an evaluation set from any buffered reader.
pub fn read_evaluation_set<R: BufRead>(
    reader: R,
    labels: &LabelSet,
    origin: &Path,
) -> Result<Vec<EvaluationExample>, ClassifierError> {
    let lines = collect_lines(reader, origin)?;
    parse_evaluation_lines(lines, labels)
}

/// Loads a training corpus from a file.
pub fn load_training_corpus(
    path: impl AsRef<Path>,
    labels: &LabelSet,
) -> Result<Vec<LabeledMessage>, ClassifierError> {
    let path = path.as_ref();
    read_training_corpus(open(path)?, labels, path)
}

/// Loads an evaluation set from a file.
pub fn load_evaluation_set(
    path: impl AsRef<Path>,
    labels: &LabelSet,
) -> Result<Vec<EvaluationExample>, ClassifierError> {
    let path = path.as_ref();
    read_evaluation_set(open(path)?, labels, path)
}

pub(crate) fn open(path: &Path) -> Result<BufReader<File>, ClassifierError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ClassifierError::io(path, e))
}

pub(crate) fn collect_lines<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<String>, ClassifierError> {
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ClassifierError::io(origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_line_label_is_first_token() {
        let labels = LabelSet::default();
        let message = parse_training_line(1, "Spam, FREE money now!", &labels)
            .unwrap()
            .unwrap();
        assert_eq!(message.label, labels.index_of("spam").unwrap());
        assert_eq!(message.tokens, vec!["free", "money", "now"]);
    }

    #[test]
    fn test_training_line_with_label_only() {
        let labels = LabelSet::default();
        let message = parse_training_line(1, "ham", &labels).unwrap().unwrap();
        assert!(message.tokens.is_empty());
    }

    #[test]
    fn test_training_line_errors() {
        let labels = LabelSet::default();
        assert!(matches!(
            parse_training_line(4, "eggs and bacon", &labels),
            Err(ClassifierError::UnknownLabel { line: 4, .. })
        ));
        assert!(matches!(
            parse_training_line(2, "!!! ...", &labels),
            Err(ClassifierError::Format { line: 2, .. })
        ));
        assert_eq!(parse_training_line(1, "   ", &labels).unwrap(), None);
    }

    #[test]
    fn test_evaluation_line_splits_on_first_tab_only() {
        let labels = LabelSet::default();
        let example = parse_evaluation_line(1, "spam\tfree\tmoney now", &labels)
            .unwrap()
            .unwrap();
        assert_eq!(example.label, labels.index_of("spam").unwrap());
        assert_eq!(example.text, "free\tmoney now");
    }

    #[test]
    fn test_evaluation_label_is_trimmed_and_lowercased() {
        let labels = LabelSet::default();
        let example = parse_evaluation_line(1, " Spam \tWIN cash", &labels)
            .unwrap()
            .unwrap();
        assert_eq!(example.label, labels.index_of("spam").unwrap());
        assert_eq!(example.text, "WIN cash");

        let example = parse_evaluation_line(2, "HAM\tsee you", &labels).unwrap().unwrap();
        assert_eq!(example.label, labels.index_of("ham").unwrap());
    }

    #[test]
    fn test_evaluation_line_errors() {
        let labels = LabelSet::default();
        assert!(matches!(
            parse_evaluation_line(7, "spam free money", &labels),
            Err(ClassifierError::Format { line: 7, .. })
        ));
        assert!(matches!(
            parse_evaluation_line(1, "\tfree money", &labels),
            Err(ClassifierError::Format { .. })
        ));
        assert!(matches!(
            parse_evaluation_line(3, "junk\tfree money", &labels),
            Err(ClassifierError::UnknownLabel { line: 3, .. })
        ));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let labels = LabelSet::default();
        let corpus = parse_training_lines(vec!["spam win", "", "ham hello", "  "], &labels).unwrap();
        assert_eq!(corpus.len(), 2);

        let examples = parse_evaluation_lines(vec!["", "ham\thello"], &labels).unwrap();
        assert_eq!(examples.len(), 1);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let labels = LabelSet::default();
        let result = parse_training_lines(vec!["spam win", "", "bogus line"], &labels);
        assert!(matches!(result, Err(ClassifierError::UnknownLabel { line: 3, .. })));
    }

    #[test]
    fn test_read_from_reader() {
        let labels = LabelSet::default();
        let data = "spam win cash\nham lunch today\n";
        let corpus = read_training_corpus(data.as_bytes(), &labels, Path::new("memory")).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[1].tokens, vec!["lunch", "today"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let labels = LabelSet::default();
        let result = load_training_corpus("/definitely/not/here.txt", &labels);
        assert!(matches!(result, Err(ClassifierError::Io { .. })));
    }
}
