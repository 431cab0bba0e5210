//! Document quality checks
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       AuditEngine                           │
//! │  - Builds one CheckContext per document                     │
//! │  - Runs selected checks in parallel (rayon)                 │
//! │  - Turns errors and panics into `error` results             │
//! │  - Applies the issue budget and coverage-normalized scoring │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Check Trait                          │
//! │  - id(), name(), default_weight()                           │
//! │  - run(context, weight): metrics, penalty, sample issues    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │ Service-backed           │   │ Heuristic                    │
//! │ (GrammarCheck via        │   │ (readability, punctuation,   │
//! │  LanguageTool)           │   │  whitespace, acronyms, ...)  │
//! └──────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use docaudit::checks::{AuditEngine, Registry};
//!
//! let registry = Registry::new(None);
//! let engine = AuditEngine::with_selection(&registry, &["punctuation".into()], &[]);
//! let report = engine.audit("notes.txt", &text, "en-US", &options, DocInfo::default());
//! ```

mod acronyms;
mod base;
mod engine;
mod grammar;
mod headings;
mod links;
mod parallel_lists;
mod passive_voice;
mod percentages;
mod punctuation;
mod readability;
mod registry;
mod whitespace;

pub use acronyms::{AcronymsCheck, DEFAULT_MAX_COUNTED, DEFAULT_STOPLIST};
pub use base::{ellipsize, format_location, snippet_around, truncate_chars, Check, CheckContext};
pub use engine::AuditEngine;
pub use grammar::GrammarCheck;
pub use headings::HeadingsCheck;
pub use links::LinksCheck;
pub use parallel_lists::{ParallelListsCheck, DEFAULT_MIN_BLOCK, IMPERATIVE_VERBS};
pub use passive_voice::PassiveVoiceCheck;
pub use percentages::PercentagesCheck;
pub use punctuation::PunctuationCheck;
pub use readability::ReadabilityCheck;
pub use registry::{CheckSpec, Registry};
pub use whitespace::WhitespaceCheck;
