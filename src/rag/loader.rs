//! Source document loading.
//!
//! Plain-text and Markdown files are read directly; PDF extraction is
//! delegated to the `pdf-extract` crate behind the `pdf` cargo feature.
//! Loading problems are fatal setup errors for the RAG variant.

use crate::types::{AppError, Result};
use std::path::Path;

/// One page of a loaded source document.
#[derive(Debug, Clone)]
pub struct SourcePage {
    /// Raw text of the page.
    pub text: String,
    /// Originating file path.
    pub source: String,
    /// Page number, when the format has pages.
    pub page: Option<usize>,
}

/// Load a source document into pages.
pub fn load(path: &Path) -> Result<Vec<SourcePage>> {
    let source = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "md" | "markdown" | "text" => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| AppError::Document(format!("failed to read {}: {}", source, e)))?;
            Ok(vec![SourcePage {
                text,
                source,
                page: None,
            }])
        }
        "pdf" => load_pdf(path, source),
        other => Err(AppError::Document(format!(
            "unsupported document type '.{}' for {}",
            other, source
        ))),
    }
}

#[cfg(feature = "pdf")]
fn load_pdf(path: &Path, source: String) -> Result<Vec<SourcePage>> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| AppError::Document(format!("failed to extract text from {}: {}", source, e)))?;
    Ok(vec![SourcePage {
        text,
        source,
        page: None,
    }])
}

#[cfg(not(feature = "pdf"))]
fn load_pdf(_path: &Path, source: String) -> Result<Vec<SourcePage>> {
    Err(AppError::Document(format!(
        "{} is a PDF but this build has no PDF support (enable the 'pdf' feature)",
        source
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_plain_text() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "linked lists are sequences of nodes").unwrap();

        let pages = load(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.contains("linked lists"));
        assert!(pages[0].source.ends_with(".txt"));
        assert!(pages[0].page.is_none());
    }

    #[test]
    fn test_missing_file_is_document_error() {
        let err = load(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
    }

    #[test]
    fn test_unsupported_extension_is_document_error() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
        assert!(err.to_string().contains("docx"));
    }
}
