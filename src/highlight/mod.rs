// Highlight annotation for DOCX documents.
//
// Each body-level paragraph is rebuilt token by token: the paragraph keeps its
// own properties (`<w:pPr>`), and everything else inside it is replaced by one
// run per token. Tokens whose normalized form is in the match set get a yellow
// highlight; all tokens keep their original text and are followed by a single
// space, so runs of whitespace in the source collapse to one space.
//
// Tables, section properties and every package part other than
// `word/document.xml` are left untouched.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::extract::tokenize;
use crate::rich::package;
use crate::rich::xml::{body_paragraphs, escape};
use crate::text::normalize::normalize;

const HIGHLIGHT_PROPS: &str = r#"<w:rPr><w:highlight w:val="yellow"/></w:rPr>"#;

/// Counts from one annotation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationStats {
    pub paragraphs: usize,
    pub tokens: usize,
    pub highlighted: usize,
}

/// Rewrite a `word/document.xml` string, highlighting tokens in `common`.
pub fn annotate(document_xml: &str, common: &BTreeSet<String>) -> (String, AnnotationStats) {
    let mut out = String::with_capacity(document_xml.len() + document_xml.len() / 4);
    let mut stats = AnnotationStats::default();
    let mut copied_to = 0;

    for para in body_paragraphs(document_xml) {
        out.push_str(&document_xml[copied_to..para.span.start]);
        out.push_str(&document_xml[para.open_tag.clone()]);
        if let Some(props) = &para.properties {
            out.push_str(&document_xml[props.clone()]);
        }

        for token in tokenize(&para.text) {
            let marked = common.contains(&normalize(&token));
            out.push_str("<w:r>");
            if marked {
                out.push_str(HIGHLIGHT_PROPS);
                stats.highlighted += 1;
            }
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape(&token));
            out.push_str(" </w:t></w:r>");
            stats.tokens += 1;
        }

        out.push_str("</w:p>");
        copied_to = para.span.end;
        stats.paragraphs += 1;
    }
    out.push_str(&document_xml[copied_to..]);

    (out, stats)
}

/// Write a highlighted copy of the DOCX at `src` to `dst`.
///
/// `src` and `dst` may be the same file.
pub fn highlight_docx(src: &Path, dst: &Path, common: &BTreeSet<String>) -> Result<PathBuf> {
    let mut stats = AnnotationStats::default();
    package::rewrite_document_xml(src, dst, |xml| {
        let (rewritten, s) = annotate(xml, common);
        stats = s;
        rewritten
    })?;

    info!(
        dst = %dst.display(),
        paragraphs = stats.paragraphs,
        tokens = stats.tokens,
        highlighted = stats.highlighted,
        "Highlighted document"
    );
    Ok(dst.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        r#"<w:document xmlns:w="urn:w"><w:body>"#,
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>The  Quick,</w:t></w:r><w:r><w:t xml:space="preserve"> brown fox</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>quick table</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:r><w:t>AT&amp;T</w:t></w:r></w:p>"#,
        r#"<w:sectPr/></w:body></w:document>"#
    );

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_marks_matching_tokens() {
        let (xml, stats) = annotate(DOC, &set(&["quick", "fox"]));
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.tokens, 5);
        assert_eq!(stats.highlighted, 2);
        assert!(xml.contains(concat!(
            r#"<w:r><w:rPr><w:highlight w:val="yellow"/></w:rPr>"#,
            r#"<w:t xml:space="preserve">Quick, </w:t></w:r>"#
        )));
        assert!(xml.contains(r#"<w:r><w:t xml:space="preserve">The </w:t></w:r>"#));
    }

    #[test]
    fn test_structure_outside_paragraph_text_is_kept() {
        let (xml, _) = annotate(DOC, &set(&["quick"]));
        assert!(xml.contains(r#"<w:pPr><w:jc w:val="center"/></w:pPr>"#));
        assert!(xml.contains(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>quick table</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#
        ));
        assert!(xml.ends_with(r#"<w:sectPr/></w:body></w:document>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve">AT&amp;T </w:t>"#));
    }

    #[test]
    fn test_empty_match_set_changes_no_text() {
        let (xml, stats) = annotate(DOC, &BTreeSet::new());
        assert_eq!(stats.highlighted, 0);
        assert!(!xml.contains("w:highlight"));

        let before: Vec<String> = body_paragraphs(DOC)
            .iter()
            .flat_map(|p| tokenize(&p.text))
            .collect();
        let after: Vec<String> = body_paragraphs(&xml)
            .iter()
            .flat_map(|p| tokenize(&p.text))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_annotating_twice_is_stable() {
        let common = set(&["brown"]);
        let (once, _) = annotate(DOC, &common);
        let (twice, _) = annotate(&once, &common);
        assert_eq!(once, twice);
    }
}
