// DOCX (WordprocessingML) support — package I/O, a minimal XML tag scanner,
// and conversion of plain text / PDF input into a fresh DOCX.
//
// Only `word/document.xml` is ever parsed or rewritten. Every other part of
// the package (styles, media, headers, relationships) is copied byte for byte.

pub mod convert;
pub mod package;
pub mod xml;
