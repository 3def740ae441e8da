// Plain-text extraction.
//
// Decoding is permissive: invalid UTF-8 sequences become U+FFFD instead of
// failing the whole file. Each line is one block.

use std::path::Path;

use crate::error::{CompareError, Result};

use super::traits::TextExtractor;

pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Read the file and decode it lossily.
    pub fn read_lossy(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| CompareError::extraction(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract_blocks(&self, path: &Path) -> Result<Vec<String>> {
        let text = Self::read_lossy(path)?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
