// DOCX extraction — one block per body-level paragraph.

use std::path::Path;

use crate::error::Result;
use crate::rich::{package, xml};

use super::traits::TextExtractor;

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_blocks(&self, path: &Path) -> Result<Vec<String>> {
        let document = package::read_document_xml(path)?;
        Ok(xml::body_paragraphs(&document)
            .into_iter()
            .map(|p| p.text)
            .collect())
    }
}
