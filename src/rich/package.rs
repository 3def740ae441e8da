// DOCX package I/O on top of the `zip` crate.
//
// A .docx file is a zip archive; the body text lives in `word/document.xml`.
// Rewrites read the whole source archive into memory first, so the source and
// destination may be the same path. New packages are built in a temp file next
// to the destination and renamed over it, so a failed write never leaves a
// truncated .docx behind.

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{CompareError, Result};

/// The package part holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Read `word/document.xml` out of a .docx file.
pub fn read_document_xml(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| CompareError::extraction(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| CompareError::extraction(path, e))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| CompareError::extraction(path, e))?;

    let mut bytes = Vec::new();
    part.read_to_end(&mut bytes)
        .map_err(|e| CompareError::extraction(path, e))?;
    let xml = String::from_utf8(bytes).map_err(|e| CompareError::extraction(path, e))?;

    debug!(path = %path.display(), bytes = xml.len(), "Read document part");
    Ok(xml)
}

/// Copy the package at `src` to `dst`, passing `word/document.xml` through
/// `rewrite`. Every other entry is copied without recompression.
pub fn rewrite_document_xml<F>(src: &Path, dst: &Path, rewrite: F) -> Result<()>
where
    F: FnOnce(&str) -> String,
{
    let bytes = std::fs::read(src).map_err(|e| CompareError::extraction(src, e))?;
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| CompareError::extraction(src, e))?;

    let original = {
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| CompareError::extraction(src, e))?;
        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| CompareError::extraction(src, e))?;
        xml
    };
    let rewritten = rewrite(&original);

    write_zip(dst, |writer| {
        for i in 0..archive.len() {
            let entry = archive
                .by_index_raw(i)
                .map_err(|e| CompareError::extraction(src, e))?;
            if entry.name() == DOCUMENT_PART {
                drop(entry);
                writer
                    .start_file(DOCUMENT_PART, deflated())
                    .map_err(|e| CompareError::io(dst, zip_io(e)))?;
                writer
                    .write_all(rewritten.as_bytes())
                    .map_err(|e| CompareError::io(dst, e))?;
            } else {
                writer
                    .raw_copy_file(entry)
                    .map_err(|e| CompareError::io(dst, zip_io(e)))?;
            }
        }
        Ok(())
    })?;

    debug!(src = %src.display(), dst = %dst.display(), "Rewrote document part");
    Ok(())
}

/// Write a minimal single-part package around `document_xml`.
pub fn write_package(dst: &Path, document_xml: &str) -> Result<()> {
    write_zip(dst, |writer| {
        for (name, body) in [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            (DOCUMENT_PART, document_xml),
        ] {
            writer
                .start_file(name, deflated())
                .map_err(|e| CompareError::io(dst, zip_io(e)))?;
            writer
                .write_all(body.as_bytes())
                .map_err(|e| CompareError::io(dst, e))?;
        }
        Ok(())
    })
}

/// Fill a zip in a temp file beside `dst`, then rename it over `dst`.
///
/// On any error the temp file is removed and `dst` is left as it was.
fn write_zip<F>(dst: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut ZipWriter<NamedTempFile>) -> Result<()>,
{
    let dir = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| CompareError::io(dst, e))?;

    let mut writer = ZipWriter::new(tmp);
    fill(&mut writer)?;
    let tmp = writer
        .finish()
        .map_err(|e| CompareError::io(dst, zip_io(e)))?;
    tmp.persist(dst).map_err(|e| CompareError::io(dst, e.error))?;
    Ok(())
}

fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn zip_io(err: zip::result::ZipError) -> std::io::Error {
    match err {
        zip::result::ZipError::Io(e) => e,
        other => std::io::Error::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t>hi</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        write_package(&path, BODY).unwrap();
        assert_eq!(read_document_xml(&path).unwrap(), BODY);
    }

    #[test]
    fn test_rewrite_in_place_keeps_other_parts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        write_package(&path, BODY).unwrap();

        rewrite_document_xml(&path, &path, |xml| xml.replace("hi", "bye")).unwrap();

        assert!(read_document_xml(&path).unwrap().contains("bye"));
        let archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"[Content_Types].xml"));
        assert!(names.contains(&"_rels/.rels"));
    }

    #[test]
    fn test_failed_rewrite_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("doc.docx");
        write_package(&src, BODY).unwrap();
        // a directory in the way makes the final rename fail
        let dst = dir.path().join("blocked.docx");
        std::fs::create_dir(&dst).unwrap();

        let err = rewrite_document_xml(&src, &dst, |xml| xml.replace("hi", "bye")).unwrap_err();
        assert!(matches!(err, CompareError::Io { .. }));

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["blocked.docx", "doc.docx"]);
        assert!(dst.is_dir());
        assert_eq!(read_document_xml(&src).unwrap(), BODY);
    }

    #[test]
    fn test_not_a_zip_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, b"definitely not a zip").unwrap();
        let err = read_document_xml(&path).unwrap_err();
        assert!(matches!(err, CompareError::ExtractionFailure { .. }));
    }
}
