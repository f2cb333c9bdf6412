use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use coherence::{
    discover_transcripts, load_stopwords, score_corpus, score_file, PipelineConfig,
    ScoreBreakdown, ScoreReport, ScoringContext, WordVectors,
};

#[derive(Parser)]
#[command(name = "coherence")]
#[command(author, version, about = "Turn-to-turn coherence scoring with word embeddings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every transcript in a directory, printing one total per file
    Score {
        /// Directory containing transcript files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Word vectors in GloVe/word2vec text format
        #[arg(short, long)]
        embeddings: PathBuf,

        /// Stopword list, one word per line
        #[arg(short, long)]
        stopwords: PathBuf,

        /// Transcript file extension
        #[arg(long, default_value = "json")]
        extension: String,

        /// Truncate the file list and each transcript
        #[arg(long)]
        debug: bool,

        /// Files processed in debug mode
        #[arg(long, default_value = "7")]
        max_files: usize,

        /// Records kept per transcript in debug mode
        #[arg(long, default_value = "3000")]
        max_records: usize,

        /// Scores kept per turn pair
        #[arg(long, default_value = "3", value_parser = parse_top_k())]
        top_k: usize,

        /// Also write a JSON report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the per-pair breakdown for a single transcript
    Inspect {
        /// Transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Word vectors in GloVe/word2vec text format
        #[arg(short, long)]
        embeddings: PathBuf,

        /// Stopword list, one word per line
        #[arg(short, long)]
        stopwords: PathBuf,

        /// Scores kept per turn pair
        #[arg(long, default_value = "3", value_parser = parse_top_k())]
        top_k: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input_dir,
            embeddings,
            stopwords,
            extension,
            debug,
            max_files,
            max_records,
            top_k,
            report,
            verbose,
        } => {
            setup_logging(verbose);
            let config = PipelineConfig {
                debug,
                max_files,
                max_records,
                top_k,
            };
            score_directory(input_dir, embeddings, stopwords, &extension, report, &config)
        }
        Commands::Inspect {
            input,
            embeddings,
            stopwords,
            top_k,
            verbose,
        } => {
            setup_logging(verbose);
            let config = PipelineConfig {
                top_k,
                ..Default::default()
            };
            inspect_transcript(input, embeddings, stopwords, &config)
        }
    }
}

fn parse_top_k() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn score_directory(
    input_dir: PathBuf,
    embeddings_path: PathBuf,
    stopwords_path: PathBuf,
    extension: &str,
    report: Option<PathBuf>,
    config: &PipelineConfig,
) -> Result<()> {
    let paths = discover_transcripts(&input_dir, extension)
        .with_context(|| format!("Failed to list transcripts in {:?}", input_dir))?;
    info!("Found {} transcripts in {:?}", paths.len(), input_dir);

    let embeddings =
        WordVectors::load(&embeddings_path).context("Failed to load word vectors")?;
    let stopwords = load_stopwords(&stopwords_path).context("Failed to load stopwords")?;
    let ctx = ScoringContext::new(&embeddings, &stopwords);

    let scores = score_corpus(&paths, ctx, config, |score| println!("{}", score.total))?;

    info!("Scored {} transcripts", scores.len());

    if let Some(path) = report {
        ScoreReport::new(&embeddings_path, config, scores).write_json(&path)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}

fn inspect_transcript(
    input: PathBuf,
    embeddings_path: PathBuf,
    stopwords_path: PathBuf,
    config: &PipelineConfig,
) -> Result<()> {
    let embeddings =
        WordVectors::load(&embeddings_path).context("Failed to load word vectors")?;
    let stopwords = load_stopwords(&stopwords_path).context("Failed to load stopwords")?;
    let ctx = ScoringContext::new(&embeddings, &stopwords);

    match score_file(&input, ctx, config).context("Failed to score transcript")? {
        Some(score) => print!("{}", ScoreBreakdown::new(&score).format()),
        None => println!("Transcript {:?} has no records", input),
    }

    Ok(())
}
