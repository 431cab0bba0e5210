//! docaudit - document quality audit
//!
//! Reads DOCX, PDF, TXT and Markdown documents, runs a fixed set of weighted
//! writing checks and scores the document out of 100. The score is
//! normalized over the checks that actually ran, and coverage reports how
//! much of the registered weight that was.
//!
//! ```ignore
//! use docaudit::checks::{AuditEngine, Registry};
//! use docaudit::config::AuditOptions;
//! use docaudit::text::normalize_text;
//!
//! let engine = AuditEngine::new(&Registry::new(None));
//! let text = normalize_text("Some text to audit.");
//! let report = engine.audit("inline", &text, "en-US", &AuditOptions::default(), Default::default());
//! println!("{}/100", report.total_score);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod extract;
pub mod grammar;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod text;
