//! Startup probe of optional readers and external services

use crate::grammar::server_reachable;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// What this process can do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub pdf_reader: bool,
    pub docx_reader: bool,
    pub ocr_tools: bool,
    pub grammar_service: bool,
}

impl Capabilities {
    /// Probe everything. `languagetool_url` is `None` when the grammar tool is
    /// disabled, in which case the server is not contacted.
    pub fn probe(languagetool_url: Option<&str>) -> Self {
        let caps = Self {
            pdf_reader: cfg!(feature = "pdf"),
            docx_reader: cfg!(feature = "docx"),
            ocr_tools: super::ocr_tools_available(),
            grammar_service: languagetool_url
                .is_some_and(|url| server_reachable(url, Duration::from_secs(2))),
        };
        debug!("Capabilities: {:?}", caps);
        caps
    }

    /// `(label, available, remediation)` rows for `--doctor`
    pub fn rows(&self) -> Vec<(&'static str, bool, &'static str)> {
        vec![
            ("PDF reader", self.pdf_reader, "rebuild with --features pdf"),
            ("DOCX reader", self.docx_reader, "rebuild with --features docx"),
            (
                "OCR (pdftoppm + tesseract)",
                self.ocr_tools,
                "install poppler-utils and tesseract-ocr",
            ),
            (
                "LanguageTool server",
                self.grammar_service,
                "start a LanguageTool server or pass --no-langtool",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_without_grammar_url() {
        let caps = Capabilities::probe(None);
        assert!(!caps.grammar_service);
        assert_eq!(caps.pdf_reader, cfg!(feature = "pdf"));
        assert_eq!(caps.rows().len(), 4);
    }
}
