// Build a fresh DOCX from plain-text or PDF input so it can be highlighted.
//
// Plain text becomes one paragraph per line (trimmed); PDF becomes one
// paragraph per page that has text. DOCX input is simply copied.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CompareError, Result};
use crate::extract::control::strip_control_chars;
use crate::extract::pdf::PdfExtractor;
use crate::extract::plain::PlainTextExtractor;
use crate::extract::DocumentFormat;

use super::package;
use super::xml::escape;

const DOCUMENT_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#
);
const DOCUMENT_CLOSE: &str = "<w:sectPr/></w:body></w:document>";

/// Produce a DOCX at `dst` holding the text of `src`.
pub fn convert_to_docx(src: &Path, dst: &Path) -> Result<PathBuf> {
    let format = DocumentFormat::from_path(src)?;
    let paragraphs: Vec<String> = match format {
        DocumentFormat::RichText => {
            std::fs::copy(src, dst).map_err(|e| CompareError::io(dst, e))?;
            return Ok(dst.to_path_buf());
        }
        DocumentFormat::PlainText => PlainTextExtractor::read_lossy(src)?
            .lines()
            .map(|line| line.trim().to_string())
            .collect(),
        DocumentFormat::Pdf => PdfExtractor::page_texts(src)?,
    };

    package::write_package(dst, &document_xml(&paragraphs))?;
    info!(
        src = %src.display(),
        dst = %dst.display(),
        paragraphs = paragraphs.len(),
        "Converted to DOCX"
    );
    Ok(dst.to_path_buf())
}

/// A minimal `word/document.xml` with one unstyled run per paragraph.
pub fn document_xml<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    for para in paragraphs {
        let text = strip_control_chars(para.as_ref());
        if text.is_empty() {
            xml.push_str("<w:p/>");
        } else {
            xml.push_str(r#"<w:p><w:r><w:t xml:space="preserve">"#);
            xml.push_str(&escape(&text));
            xml.push_str("</w:t></w:r></w:p>");
        }
    }
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich::xml::body_paragraphs;

    #[test]
    fn test_document_xml_paragraphs() {
        let xml = document_xml(&["first & <only>", "", "third\u{1}"]);
        let paras = body_paragraphs(&xml);
        // the empty line is a self-closing paragraph and has no text to find
        let texts: Vec<&str> = paras.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first & <only>", "third"]);
    }

    #[test]
    fn test_convert_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let dst = dir.path().join("out.docx");
        std::fs::write(&src, "  line one  \nline two\n").unwrap();

        convert_to_docx(&src, &dst).unwrap();

        let xml = package::read_document_xml(&dst).unwrap();
        let texts: Vec<String> = body_paragraphs(&xml).into_iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["line one", "line two"]);
    }
}
