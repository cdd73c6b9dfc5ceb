use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use spamnb::classifier::tuning::{DEFAULT_MIN_FREQUENCIES, DEFAULT_SMOOTHINGS};
use spamnb::{
    grid_search, load_evaluation_set, load_training_corpus, train_with_vocabulary, StopWords,
    TrainingConfig, Vocabulary, DEFAULT_MIN_FREQUENCY, DEFAULT_SMOOTHING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

/// Train a Naive Bayes spam filter and report precision, recall, F-score and accuracy
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Training file, one `<label> <message>` per line
    training: PathBuf,

    /// Evaluation file, one `<label>\t<message>` per line
    evaluation: PathBuf,

    /// Optional stop-word file, one word per line
    stop_words: Option<PathBuf>,

    /// Minimum corpus frequency for a token to become an attribute (k)
    #[arg(short = 'k', long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    min_frequency: usize,

    /// Additive smoothing constant (c)
    #[arg(short = 'c', long, default_value_t = DEFAULT_SMOOTHING)]
    smoothing: f64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Grid-search k and c, using the evaluation file as the validation set
    #[arg(long)]
    tune: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start_time = Instant::now();

    let config = TrainingConfig::default()
        .with_min_frequency(args.min_frequency)
        .with_smoothing(args.smoothing);
    config.validate().context("invalid training configuration")?;

    let stop_words = match &args.stop_words {
        Some(path) => StopWords::from_file(path)
            .with_context(|| format!("loading stop words from {}", path.display()))?,
        None => StopWords::new(),
    };

    let examples = load_evaluation_set(&args.evaluation, &config.labels)
        .with_context(|| format!("reading evaluation data from {}", args.evaluation.display()))?;

    if args.tune {
        return tune(&args, &config, &stop_words, &examples);
    }

    let corpus = load_training_corpus(&args.training, &config.labels)
        .with_context(|| format!("reading training data from {}", args.training.display()))?;

    let vocabulary = Vocabulary::build(&corpus, &stop_words, config.min_frequency);
    info!("Vocabulary built in {:.2?}: {} attributes", start_time.elapsed(), vocabulary.len());

    let classifier = train_with_vocabulary(&corpus, vocabulary, stop_words, config)
        .with_context(|| {
            format!("estimating parameters from {}", args.training.display())
        })?;
    info!("Trained in {:.2?}: {:?}", start_time.elapsed(), classifier.info());

    let report = classifier
        .evaluate(&examples)
        .with_context(|| format!("evaluating on {}", args.evaluation.display()))?;
    info!("Finished in {:.2?}", start_time.elapsed());

    match args.format {
        OutputFormat::Human => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn tune(
    args: &Args,
    config: &TrainingConfig,
    stop_words: &StopWords,
    examples: &[spamnb::EvaluationExample],
) -> Result<()> {
    let corpus = load_training_corpus(&args.training, &config.labels)
        .with_context(|| format!("reading training data from {}", args.training.display()))?;
    let results = grid_search(
        &corpus,
        stop_words,
        examples,
        config,
        &DEFAULT_MIN_FREQUENCIES,
        &DEFAULT_SMOOTHINGS,
    )
    .context("tuning k and c")?;

    match args.format {
        OutputFormat::Human => {
            for result in &results {
                match &result.report {
                    Some(report) => println!("k={} c={} {}", result.min_frequency, result.smoothing, report),
                    None => println!(
                        "k={} c={} undefined ({:?})",
                        result.min_frequency, result.smoothing, result.counts
                    ),
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }
    Ok(())
}
