// Typed errors for the comparison engine.
//
// Library entry points return `CompareError` so callers (the CLI, the bulk
// pipeline) can tell a bad extension from a corrupt file from an unwritable
// output folder. The binary wraps these in anyhow with extra context.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while extracting, scoring, or writing comparison output.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The file extension matches none of txt, pdf, docx.
    #[error("unsupported file type '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// A format-specific decoder could not read the file.
    #[error("failed to extract text from {}: {source}", path.display())]
    ExtractionFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Similarity scoring was asked to score a document with no text.
    #[error("no text extracted from {}", path.display())]
    EmptyDocument { path: PathBuf },

    /// An output folder or file could not be created or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    pub fn extraction(
        path: &Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ExtractionFailure {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file this error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::UnsupportedFormat { path, .. }
            | Self::ExtractionFailure { path, .. }
            | Self::EmptyDocument { path }
            | Self::Io { path, .. } => path,
        }
    }
}

pub type Result<T, E = CompareError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = CompareError::UnsupportedFormat {
            path: PathBuf::from("notes.odt"),
            extension: "odt".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file type 'odt' for notes.odt");

        let err = CompareError::extraction(Path::new("broken.pdf"), "bad xref");
        assert!(err.to_string().contains("broken.pdf"));
        assert!(err.to_string().contains("bad xref"));
        assert_eq!(err.path(), Path::new("broken.pdf"));
    }
}
