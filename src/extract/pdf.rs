//! PDF reader
//!
//! Per-page text through lopdf keeps page boundaries (joined with `\f`).
//! When lopdf cannot load the file or finds no text at all, the whole
//! document goes through pdf-extract instead.

use super::ExtractError;
use crate::models::DocumentData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tracing::debug;

pub(super) fn read_pdf(path: &Path) -> Result<DocumentData, ExtractError> {
    let bytes = std::fs::read(path)?;

    let loaded = lopdf::Document::load_mem(&bytes);
    let page_count = match &loaded {
        Ok(doc) if doc.is_encrypted() => return Err(ExtractError::PasswordProtected),
        Ok(doc) => Some(doc.get_pages().len()),
        Err(e) => {
            debug!("lopdf could not load {}: {}", path.display(), e);
            None
        }
    };

    if let Ok(doc) = &loaded {
        let pages: Vec<String> = doc
            .get_pages()
            .keys()
            .map(|&n| doc.extract_text(&[n]).unwrap_or_default())
            .collect();
        if pages.iter().any(|p| !p.trim().is_empty()) {
            return Ok(DocumentData {
                text: pages.join("\x0c"),
                page_count,
                extraction_method: Some("lopdf".to_string()),
                ..Default::default()
            });
        }
        debug!("lopdf found no text in {}, trying pdf-extract", path.display());
    }

    let text = extract_whole(&bytes)?;
    Ok(DocumentData {
        text,
        page_count,
        extraction_method: Some("pdf-extract".to_string()),
        ..Default::default()
    })
}

/// pdf-extract panics on some malformed inputs; treat that as a read error
fn extract_whole(bytes: &[u8]) -> Result<String, ExtractError> {
    let outcome = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));
    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            let msg = e.to_string();
            let lower = msg.to_lowercase();
            if lower.contains("encrypted") || lower.contains("password") {
                Err(ExtractError::PasswordProtected)
            } else {
                Err(ExtractError::Pdf(msg))
            }
        }
        Err(_) => Err(ExtractError::Pdf("PDF parser crashed on this file".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        assert!(read_pdf(&path).is_err());
    }
}
