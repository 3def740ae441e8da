// Two-file comparison: highlighted DOCX plus a matched-words report.
//
// Both inputs are extracted before anything touches the output folder, so a
// bad input never leaves a half-written result behind.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{CompareError, Result};
use crate::extract::extract_text;
use crate::highlight::highlight_docx;
use crate::matching::{match_words, MatchOptions, MatchResult};
use crate::output::report::write_match_report;
use crate::rich::convert::convert_to_docx;

/// Inputs for one highlight comparison.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    /// The document that gets highlighted.
    pub file1: PathBuf,
    /// The document whose vocabulary is matched against.
    pub file2: PathBuf,
    /// Created if it does not exist.
    pub output_folder: PathBuf,
    pub options: MatchOptions,
}

impl ComparisonRequest {
    pub fn new(
        file1: impl Into<PathBuf>,
        file2: impl Into<PathBuf>,
        output_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file1: file1.into(),
            file2: file2.into(),
            output_folder: output_folder.into(),
            options: MatchOptions {
                drop_empty: true,
                ..MatchOptions::default()
            },
        }
    }
}

/// Artifacts and results of a highlight comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    /// `<file1 stem>-compared.docx` in the output folder.
    pub highlighted: PathBuf,
    /// `comparison_report.txt` in the output folder.
    pub report: PathBuf,
    pub matches: MatchResult,
}

/// Output path for the highlighted copy of `file1`.
pub fn compared_path(file1: &Path, output_folder: &Path) -> PathBuf {
    let stem = file1
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_folder.join(format!("{stem}-compared.docx"))
}

/// Compare two documents and highlight `file1`'s words that also occur in
/// `file2`. Any extraction failure aborts before output is written.
pub fn run_comparison(request: &ComparisonRequest) -> Result<ComparisonOutcome> {
    let doc1 = extract_text(&request.file1)?;
    let doc2 = extract_text(&request.file2)?;

    let matches = match_words(&doc1.tokens, &doc2.tokens, &request.options);
    info!(
        file1 = %doc1.file_name(),
        file2 = %doc2.file_name(),
        common = matches.common.len(),
        occurrences = matches.total_matches(),
        "Matched vocabulary"
    );

    std::fs::create_dir_all(&request.output_folder)
        .map_err(|e| CompareError::io(&request.output_folder, e))?;

    let highlighted = compared_path(&request.file1, &request.output_folder);
    convert_to_docx(&request.file1, &highlighted)?;
    highlight_docx(&highlighted, &highlighted, &matches.common)?;

    let report = write_match_report(&request.output_folder, &matches)?;

    Ok(ComparisonOutcome {
        highlighted,
        report,
        matches,
    })
}
