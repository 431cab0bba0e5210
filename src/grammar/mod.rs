//! External grammar checking
//!
//! The grammar check talks to a [`GrammarService`]. The production
//! implementation is a LanguageTool HTTP server ([`LanguageToolClient`]);
//! tests plug in fakes.
//!
//! # Environment Variables
//!
//! - `DOCAUDIT_LANGUAGETOOL_URL`: server base URL (also settable via config)

mod languagetool;

pub use languagetool::{server_reachable, utf16_to_byte_offset, LanguageToolClient};

use thiserror::Error;

/// Default LanguageTool server
pub const DEFAULT_LANGUAGETOOL_URL: &str = "http://localhost:8081";

/// One finding reported by the grammar service.
///
/// `offset` and `length` are UTF-8 byte offsets relative to the chunk that
/// was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch {
    pub rule_id: String,
    pub message: String,
    pub offset: usize,
    pub length: Option<usize>,
    pub replacements: Vec<String>,
}

impl GrammarMatch {
    /// Message as shown in reports: `RULE: message; suggestions: a, b, c`
    pub fn display_message(&self) -> String {
        let mut msg = format!("{}: {}", self.rule_id, self.message);
        if !self.replacements.is_empty() {
            let shown: Vec<&str> = self.replacements.iter().take(3).map(String::as_str).collect();
            msg.push_str("; suggestions: ");
            msg.push_str(&shown.join(", "));
        }
        msg
    }
}

/// Errors talking to the grammar service
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Grammar service unavailable: {0}")]
    Unavailable(String),

    #[error("Grammar service timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Grammar request failed: {0}")]
    Transport(String),

    #[error("Grammar service error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse grammar response: {0}")]
    Parse(String),
}

impl GrammarError {
    /// Remediation hint for common failures
    pub fn hint(&self) -> Option<&'static str> {
        error_hint(&self.to_string())
    }
}

/// Remediation hint for a grammar service failure message
pub fn error_hint(message: &str) -> Option<&'static str> {
    let msg = message.to_lowercase();
    if msg.contains("java") || msg.contains("jre") || msg.contains("jvm") {
        Some("LanguageTool needs a Java runtime (JRE 17+). Install Java or use --no-langtool.")
    } else if msg.contains("timed out") || msg.contains("timeout") {
        Some("The LanguageTool server is slow to answer. Raise lt_timeout_secs or lower --lt-chunk-size.")
    } else if msg.contains("connect")
        || msg.contains("refused")
        || msg.contains("unavailable")
        || msg.contains("unreachable")
    {
        Some("Start a LanguageTool server (e.g. `java -cp languagetool-server.jar org.languagetool.server.HTTPServer --port 8081`) or pass --no-langtool.")
    } else {
        None
    }
}

/// A grammar checker that accepts one chunk of text at a time
pub trait GrammarService: Send + Sync {
    /// Service name, used in logs
    fn name(&self) -> &str;

    /// Check one chunk. Match offsets are relative to `chunk`.
    fn check(&self, chunk: &str, language: &str) -> Result<Vec<GrammarMatch>, GrammarError>;
}
