// Bulk similarity scoring over a folder.
//
// Two modes:
//   - single source: one document scored against every matching file
//   - all pairs: every unordered pair of matching files
//
// Each comparison runs on tokio's blocking pool with at most `concurrency` in
// flight. `buffered` hands results back in submission order, and only this
// coordinator writes the CSV, so rows never interleave and their order is
// fixed (files sorted by name). A failed comparison is logged and recorded;
// the rest carry on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CompareError, Result};
use crate::extract::{display_name, extract_text};
use crate::matching::compute_similarity;
use crate::output::report::{ReportMode, ScoreRow, SimilarityReport};

/// Inputs for a bulk similarity run.
#[derive(Debug, Clone)]
pub struct BulkRequest {
    pub input_folder: PathBuf,
    /// When set, single-source mode; otherwise all-pairs mode.
    pub source: Option<PathBuf>,
    /// CSV report path (truncated if it exists).
    pub output_file: PathBuf,
    /// Only files with this extension (case-insensitive) are compared.
    pub extension: String,
    /// Maximum comparisons in flight.
    pub concurrency: usize,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl BulkRequest {
    pub fn new(input_folder: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
            source: None,
            output_file: output_file.into(),
            extension: "pdf".to_string(),
            concurrency: default_concurrency(),
            show_progress: false,
        }
    }
}

/// Available cores, or 1 when that cannot be determined.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A comparison that did not produce a row.
#[derive(Debug, Serialize)]
pub struct BulkFailure {
    /// The file name, or "a and b" for a pair.
    pub label: String,
    pub error: String,
}

/// Everything a bulk run produced.
#[derive(Debug, Serialize)]
pub struct BulkOutcome {
    pub mode: ReportMode,
    pub report: PathBuf,
    pub rows: Vec<ScoreRow>,
    pub failures: Vec<BulkFailure>,
}

/// Pick the mode from the request and run it.
pub async fn run_bulk(request: &BulkRequest) -> Result<BulkOutcome> {
    match &request.source {
        Some(source) => compare_with_source(source, request).await,
        None => compare_all_pairs(request).await,
    }
}

/// Score `source` against every matching file in the input folder.
///
/// The source itself must extract cleanly; failures on folder files are
/// recorded and skipped.
pub async fn compare_with_source(source: &Path, request: &BulkRequest) -> Result<BulkOutcome> {
    let source_path = source.to_path_buf();
    let source_doc = tokio::task::spawn_blocking(move || extract_text(&source_path))
        .await
        .map_err(|e| CompareError::extraction(source, e))??;
    let source_doc = Arc::new(source_doc);

    let files = list_documents(&request.input_folder, &request.extension)?;
    info!(
        source = %source_doc.file_name(),
        files = files.len(),
        "Comparing folder against source"
    );

    let jobs: Vec<Job> = files
        .into_iter()
        .map(|path| {
            let source_doc = Arc::clone(&source_doc);
            Job {
                path: path.clone(),
                row: ScoreRow {
                    file: display_name(&path),
                    other: None,
                    score: 0.0,
                },
                run: Box::new(move || {
                    let doc = extract_text(&path)?;
                    compute_similarity(&source_doc, &doc)
                }),
            }
        })
        .collect();

    run_jobs(jobs, ReportMode::SingleSource, request).await
}

/// Score every unordered pair of matching files in the input folder.
pub async fn compare_all_pairs(request: &BulkRequest) -> Result<BulkOutcome> {
    let files = list_documents(&request.input_folder, &request.extension)?;
    info!(
        files = files.len(),
        pairs = files.len() * files.len().saturating_sub(1) / 2,
        "Comparing all pairs"
    );

    let mut jobs = Vec::new();
    for (i, first) in files.iter().enumerate() {
        for second in &files[i + 1..] {
            let (a, b) = (first.clone(), second.clone());
            jobs.push(Job {
                path: first.clone(),
                row: ScoreRow {
                    file: display_name(first),
                    other: Some(display_name(second)),
                    score: 0.0,
                },
                run: Box::new(move || {
                    let doc1 = extract_text(&a)?;
                    let doc2 = extract_text(&b)?;
                    compute_similarity(&doc1, &doc2)
                }),
            });
        }
    }

    run_jobs(jobs, ReportMode::AllPairs, request).await
}

/// Files in `folder` with the given extension, sorted by file name.
pub fn list_documents(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.').to_ascii_lowercase();
    let entries = std::fs::read_dir(folder).map_err(|e| CompareError::io(folder, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CompareError::io(folder, e))?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&wanted));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by_key(|p| display_name(p));
    Ok(files)
}

type JobFn = Box<dyn FnOnce() -> Result<f64> + Send + 'static>;

/// One comparison waiting to run; `row.score` is filled in on success.
struct Job {
    /// Reported on the error when the job panics.
    path: PathBuf,
    row: ScoreRow,
    run: JobFn,
}

async fn run_jobs(
    jobs: Vec<Job>,
    mode: ReportMode,
    request: &BulkRequest,
) -> Result<BulkOutcome> {
    let mut report = SimilarityReport::create(&request.output_file, mode)?;

    let pb = if request.show_progress {
        let pb = ProgressBar::new(jobs.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  Comparing [{bar:30}] {pos}/{len} ({eta})")
        {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let concurrency = request.concurrency.max(1);
    let mut results = stream::iter(jobs.into_iter().map(|job| async move {
        let Job { path, row, run } = job;
        let score = match tokio::task::spawn_blocking(run).await {
            Ok(result) => result,
            Err(e) => Err(CompareError::extraction(&path, e)),
        };
        (row, score)
    }))
    .buffered(concurrency);

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    while let Some((mut row, score)) = results.next().await {
        match score {
            Ok(score) => {
                row.score = score;
                report.append(&row)?;
                let shown = format!("{score:.2}");
                info!(file = %row.label(), score = %shown, "Compared");
                rows.push(row);
            }
            Err(e) => {
                warn!(file = %row.label(), error = %e, "Comparison failed, skipping");
                failures.push(BulkFailure {
                    label: row.label(),
                    error: e.to_string(),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report_path = report.finish()?;
    info!(
        report = %report_path.display(),
        rows = rows.len(),
        failures = failures.len(),
        "Similarity report written"
    );

    Ok(BulkOutcome {
        mode,
        report: report_path,
        rows,
        failures,
    })
}
