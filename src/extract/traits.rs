// Text extractor trait — one implementation per supported file format.
//
// Extractors return raw text blocks (lines, pages, or paragraphs, depending
// on the format). Tokenizing and control-character stripping happen once, in
// `extract::extract_text`, so every format gets the same treatment.

use std::path::Path;

use crate::error::Result;

pub trait TextExtractor {
    /// Read the file at `path` and return its text blocks in document order.
    fn extract_blocks(&self, path: &Path) -> Result<Vec<String>>;
}
