use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pipeline::bulk::default_concurrency;
use crate::text::stopwords::StopWordList;

/// Default folder for highlight output when neither the CLI nor the
/// environment names one.
pub const DEFAULT_OUTPUT_DIR: &str = "./comparison-output";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every value
/// has a default, and CLI flags take precedence over all of them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where `highlight` writes its DOCX and report (DOCMATCH_OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Maximum bulk comparisons in flight (DOCMATCH_CONCURRENCY)
    pub concurrency: usize,
    /// Stop-word list for vocabulary matching (DOCMATCH_STOP_WORDS)
    pub stop_words: StopWordList,
    /// Extension of the files a bulk run picks up (DOCMATCH_BULK_EXT)
    pub bulk_extension: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let concurrency = match env::var("DOCMATCH_CONCURRENCY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| {
                    format!("DOCMATCH_CONCURRENCY must be a positive integer, got '{raw}'")
                })?,
            Err(_) => default_concurrency(),
        };
        if concurrency == 0 {
            anyhow::bail!("DOCMATCH_CONCURRENCY must be at least 1");
        }

        let stop_words = match env::var("DOCMATCH_STOP_WORDS") {
            Ok(raw) => raw.parse::<StopWordList>().map_err(anyhow::Error::msg)?,
            Err(_) => StopWordList::default(),
        };

        Ok(Self {
            output_dir: env::var("DOCMATCH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            concurrency,
            stop_words,
            bulk_extension: env::var("DOCMATCH_BULK_EXT").unwrap_or_else(|_| "pdf".to_string()),
        })
    }
}
