use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use docmatch::config::Config;
use docmatch::matching::MatchOptions;
use docmatch::output::terminal;
use docmatch::pipeline::{BulkRequest, ComparisonRequest};
use docmatch::text::stopwords::StopWordList;

/// docmatch: compare documents by the words they share.
///
/// Highlights the vocabulary one document shares with another, or scores
/// whole folders of documents by TF-IDF cosine similarity.
#[derive(Parser)]
#[command(name = "docmatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Highlight words in FILE1 that also appear in FILE2
    Highlight {
        /// Document to highlight (.docx, .pdf, .txt)
        file1: PathBuf,

        /// Document to match against (.docx, .pdf, .txt)
        file2: PathBuf,

        /// Output folder (default: DOCMATCH_OUTPUT_DIR or ./comparison-output)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Stop-word list to ignore when matching
        #[arg(long, value_enum)]
        stop_words: Option<StopWordList>,

        /// Number of matched words to show (default: 15)
        #[arg(long, default_value = "15")]
        top: usize,

        /// Print the result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Score a folder of documents by TF-IDF similarity and write a CSV
    Similarity {
        /// Folder containing the documents to compare
        #[arg(long, short)]
        input: PathBuf,

        /// Compare every file against this one instead of all pairs
        #[arg(long, short)]
        source: Option<PathBuf>,

        /// CSV report to write (overwritten if it exists)
        #[arg(long, short)]
        output: PathBuf,

        /// Extension of the files to compare (default: DOCMATCH_BULK_EXT or pdf)
        #[arg(long)]
        ext: Option<String>,

        /// Number of comparisons to run in parallel (default: available cores)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Print the TF-IDF similarity of two documents
    Score {
        file1: PathBuf,
        file2: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the tokens extracted from a document
    Extract {
        file: PathBuf,

        /// Also show each token's normalized form
        #[arg(long)]
        normalized: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docmatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Highlight {
            file1,
            file2,
            output,
            stop_words,
            top,
            json,
        } => {
            let output_folder = output.unwrap_or_else(|| config.output_dir.clone());
            let mut request = ComparisonRequest::new(&file1, &file2, output_folder);
            request.options = MatchOptions {
                stop_words: stop_words.unwrap_or(config.stop_words).set(),
                ..request.options
            };

            info!(file1 = %file1.display(), file2 = %file2.display(), "Running comparison");
            let outcome = tokio::task::spawn_blocking(move || docmatch::run_comparison(&request))
                .await?
                .with_context(|| {
                    format!(
                        "Comparison of {} and {} failed",
                        file1.display(),
                        file2.display()
                    )
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                terminal::display_comparison(&outcome, top);
            }
        }

        Commands::Similarity {
            input,
            source,
            output,
            ext,
            concurrency,
        } => {
            let mut request = BulkRequest::new(&input, &output);
            request.source = source;
            request.extension = ext.unwrap_or_else(|| config.bulk_extension.clone());
            request.concurrency = concurrency.unwrap_or(config.concurrency);
            request.show_progress = true;

            if request.concurrency == 0 {
                anyhow::bail!("--concurrency must be at least 1");
            }

            match &request.source {
                Some(source) => println!(
                    "Comparing {} files in {} against {}...",
                    request.extension.bold(),
                    input.display(),
                    source.display()
                ),
                None => println!(
                    "Comparing all pairs of {} files in {}...",
                    request.extension.bold(),
                    input.display()
                ),
            }

            let outcome = docmatch::run_bulk(&request)
                .await
                .with_context(|| format!("Bulk comparison of {} failed", input.display()))?;
            terminal::display_bulk(&outcome);
        }

        Commands::Score { file1, file2, json } => {
            let (doc1, doc2, score) = tokio::task::spawn_blocking(move || {
                let doc1 = docmatch::extract_text(&file1)?;
                let doc2 = docmatch::extract_text(&file2)?;
                let score = docmatch::compute_similarity(&doc1, &doc2)?;
                Ok::<_, docmatch::CompareError>((doc1, doc2, score))
            })
            .await??;

            if json {
                let value = serde_json::json!({
                    "file1": doc1.path,
                    "file2": doc2.path,
                    "score": score,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                terminal::display_score(&doc1, &doc2, score);
            }
        }

        Commands::Extract { file, normalized } => {
            let doc = docmatch::extract_text(&file)
                .with_context(|| format!("Could not extract {}", file.display()))?;
            terminal::display_tokens(&doc, normalized);
        }
    }

    Ok(())
}
