// Text extraction — turns a source file into an ordered sequence of raw tokens.
//
// The format is chosen once from the file extension (see `DocumentFormat`),
// then the matching extractor produces text blocks. Blocks are split on
// whitespace and every token is stripped of banned control characters before
// anything downstream sees it.

pub mod control;
pub mod docx;
pub mod pdf;
pub mod plain;
pub mod traits;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{CompareError, Result};
use crate::text::normalize::normalize_all;

use control::strip_control_chars;
use traits::TextExtractor;

/// The three supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    RichText,
}

impl DocumentFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "txt" => Ok(DocumentFormat::PlainText),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::RichText),
            _ => Err(CompareError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            DocumentFormat::PlainText => &plain::PlainTextExtractor,
            DocumentFormat::Pdf => &pdf::PdfExtractor,
            DocumentFormat::RichText => &docx::DocxExtractor,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::PlainText => f.write_str("plain text"),
            DocumentFormat::Pdf => f.write_str("PDF"),
            DocumentFormat::RichText => f.write_str("DOCX"),
        }
    }
}

/// An extracted source document. Never modified after extraction.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
    /// Whitespace-delimited raw tokens in document order.
    pub tokens: Vec<String>,
    /// Per-paragraph tokens, only for rich-text sources.
    pub paragraphs: Option<Vec<Vec<String>>>,
}

impl Document {
    /// The extracted text with tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// One normalized form per raw token, in order.
    pub fn normalized(&self) -> Vec<String> {
        normalize_all(&self.tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// File name for display and report rows.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Extract a document, choosing the extractor from the file extension.
pub fn extract_text(path: &Path) -> Result<Document> {
    let format = DocumentFormat::from_path(path)?;
    let blocks = format.extractor().extract_blocks(path)?;

    let segmented: Vec<Vec<String>> = blocks.iter().map(|b| tokenize(b)).collect();
    let tokens: Vec<String> = segmented.iter().flatten().cloned().collect();

    debug!(
        path = %path.display(),
        format = %format,
        blocks = segmented.len(),
        tokens = tokens.len(),
        "Extracted document"
    );

    Ok(Document {
        path: path.to_path_buf(),
        format,
        tokens,
        paragraphs: (format == DocumentFormat::RichText).then_some(segmented),
    })
}

/// Split a text block on whitespace, strip control codes from each token,
/// and drop tokens that were nothing but control codes.
pub fn tokenize(block: &str) -> Vec<String> {
    block
        .split_whitespace()
        .map(strip_control_chars)
        .filter(|t| !t.is_empty())
        .collect()
}

/// The final path component, or the whole path when there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
