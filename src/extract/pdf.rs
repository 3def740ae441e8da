// PDF text-layer extraction using lopdf.
//
// Pages are read in ascending page-number order. A page whose text cannot be
// decoded, or which has no text at all (scanned images), contributes nothing.
// Only a document that fails to load is an error.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::error::{CompareError, Result};

use super::traits::TextExtractor;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Per-page text for every page that has any.
    pub fn page_texts(path: &Path) -> Result<Vec<String>> {
        let doc =
            Document::load(path).map_err(|e| CompareError::extraction(path, e.to_string()))?;

        let mut texts = Vec::new();
        // get_pages is a BTreeMap keyed by page number, so this is page order
        for page_num in doc.get_pages().keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) if !text.trim().is_empty() => texts.push(text),
                Ok(_) => debug!(page = page_num, path = %path.display(), "Page has no text"),
                Err(e) => debug!(
                    page = page_num,
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable page"
                ),
            }
        }
        Ok(texts)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_blocks(&self, path: &Path) -> Result<Vec<String>> {
        Self::page_texts(path)
    }
}
