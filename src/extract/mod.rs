//! Document readers
//!
//! `read_document` turns a file into raw `DocumentData`. Format is chosen by
//! extension: `.pdf` and `.docx` have dedicated readers (behind the `pdf` and
//! `docx` features), everything else is read as UTF-8 text. PDFs can be
//! re-read through OCR (`pdftoppm` + `tesseract`) when configured.
//!
//! Text is returned as extracted; callers normalize it before auditing.

mod capabilities;
#[cfg(feature = "docx")]
mod docx;
mod ocr;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

pub use capabilities::Capabilities;
pub use ocr::ocr_tools_available;

use crate::config::{AuditOptions, OcrMode};
use crate::models::DocumentData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors reading a document
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{format} files are not supported by this build. {hint}")]
    FormatUnavailable {
        format: &'static str,
        hint: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("OCR failed: {0}")]
    Ocr(String),
}

/// Read a document from disk, applying OCR to PDFs when the options ask for it
pub fn read_document(path: &Path, options: &AuditOptions) -> Result<DocumentData, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let doc = match ext.as_str() {
        "docx" => read_docx(path)?,
        "pdf" => {
            let doc = read_pdf(path)?;
            apply_ocr(path, doc, options)
        }
        _ => text::read_text(path)?,
    };

    info!(
        "Read {} ({} chars, method {}{})",
        path.display(),
        doc.text.chars().count(),
        doc.extraction_method.as_deref().unwrap_or("unknown"),
        if doc.ocr_used { ", OCR" } else { "" }
    );
    Ok(doc)
}

#[cfg(feature = "docx")]
fn read_docx(path: &Path) -> Result<DocumentData, ExtractError> {
    docx::read_docx(path)
}

#[cfg(not(feature = "docx"))]
fn read_docx(_path: &Path) -> Result<DocumentData, ExtractError> {
    Err(ExtractError::FormatUnavailable {
        format: "DOCX",
        hint: "Rebuild with `--features docx`.",
    })
}

#[cfg(feature = "pdf")]
fn read_pdf(path: &Path) -> Result<DocumentData, ExtractError> {
    pdf::read_pdf(path)
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_path: &Path) -> Result<DocumentData, ExtractError> {
    Err(ExtractError::FormatUnavailable {
        format: "PDF",
        hint: "Rebuild with `--features pdf`.",
    })
}

/// Decide whether OCR replaces the extracted text. OCR failures keep the
/// extracted text and only warn.
fn apply_ocr(path: &Path, mut doc: DocumentData, options: &AuditOptions) -> DocumentData {
    let Some(reason) = ocr_reason(&doc.text, options) else {
        return doc;
    };

    if !ocr_tools_available() {
        warn!(
            "OCR requested for {} ({}) but pdftoppm/tesseract are not installed",
            path.display(),
            reason
        );
        return doc;
    }

    info!("Running OCR on {} ({})", path.display(), reason);
    match ocr::ocr_pdf_pages(path, &options.ocr_lang, options.ocr_dpi) {
        Ok(pages) => {
            doc.page_count = Some(pages.len());
            doc.text = pages.join("\x0c");
            doc.ocr_used = true;
            doc.ocr_reason = Some(reason);
            doc.extraction_method = Some("ocr".to_string());
        }
        Err(e) => warn!("OCR failed for {}: {}", path.display(), e),
    }
    doc
}

fn ocr_reason(text: &str, options: &AuditOptions) -> Option<String> {
    match options.ocr_mode {
        OcrMode::Off => None,
        OcrMode::Force => Some("forced".to_string()),
        OcrMode::Auto => {
            let stripped = text.trim().chars().count();
            (stripped < options.ocr_min_chars).then(|| format!("low text ({stripped} chars)"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file() {
        let err = read_document(Path::new("/no/such/file.txt"), &AuditOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound(_)));
    }

    #[test]
    fn test_text_and_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let md = dir.path().join("notes.MD");
        fs::write(&md, "# Title\n\nBody.").unwrap();
        let doc = read_document(&md, &AuditOptions::default()).unwrap();
        assert_eq!(doc.text, "# Title\n\nBody.");
        assert_eq!(doc.extraction_method.as_deref(), Some("text"));

        let other = dir.path().join("data.csv");
        fs::write(&other, b"a,b\xff\n").unwrap();
        let doc = read_document(&other, &AuditOptions::default()).unwrap();
        assert!(doc.text.starts_with("a,b"));
        assert!(!doc.ocr_used);
    }

    #[test]
    fn test_ocr_reason() {
        let mut options = AuditOptions::default();
        assert_eq!(ocr_reason("short", &options), None);

        options.ocr_mode = OcrMode::Auto;
        options.ocr_min_chars = 10;
        assert_eq!(ocr_reason("  short  ", &options).as_deref(), Some("low text (5 chars)"));
        assert_eq!(ocr_reason("long enough text", &options), None);

        options.ocr_mode = OcrMode::Force;
        assert_eq!(ocr_reason("long enough text", &options).as_deref(), Some("forced"));
    }
}
