//! Configuration module for docaudit
//!
//! This module handles:
//! - Per-audit options (`AuditOptions`)
//! - Config files in TOML, YAML or JSON (`FileConfig`)
//! - Layering defaults, config file and CLI flags into `Settings`

mod file;
mod settings;

pub use file::{load_config_file, FileConfig, OcrSection, OneOrMany, OutputsSection};
pub use settings::{CliOverrides, Settings};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_MAX_ISSUES_PER_CHECK: usize = 50;
pub const DEFAULT_CHUNK_SIZE: usize = 8000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
pub const DEFAULT_OCR_LANG: &str = "eng";
pub const DEFAULT_OCR_DPI: u32 = 300;
pub const DEFAULT_OCR_MIN_CHARS: usize = 600;
pub const DEFAULT_LT_TIMEOUT_SECS: u64 = 60;

/// Errors loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// When PDF text is replaced by OCR output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrMode {
    #[default]
    Off,
    /// Only when extracted text is shorter than `ocr_min_chars`
    Auto,
    Force,
}

impl std::str::FromStr for OcrMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(OcrMode::Off),
            "auto" => Ok(OcrMode::Auto),
            "force" => Ok(OcrMode::Force),
            other => Err(ConfigError::Invalid(format!(
                "unknown OCR mode '{other}' (expected off, auto or force)"
            ))),
        }
    }
}

impl std::fmt::Display for OcrMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrMode::Off => write!(f, "off"),
            OcrMode::Auto => write!(f, "auto"),
            OcrMode::Force => write!(f, "force"),
        }
    }
}

/// Options for one audit. Built once before the pipeline starts.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOptions {
    /// Global issue budget, 0 for unlimited
    pub max_issues: usize,
    pub max_issues_per_check: usize,
    /// Grammar service window size in bytes
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Count skipped and errored checks as zero-scored weight
    pub strict: bool,
    pub enable_grammar_tool: bool,
    /// Result of the startup probe
    pub grammar_available: bool,
    pub ocr_mode: OcrMode,
    pub ocr_lang: String,
    pub ocr_dpi: u32,
    pub ocr_min_chars: usize,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            max_issues: 0,
            max_issues_per_check: DEFAULT_MAX_ISSUES_PER_CHECK,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            strict: false,
            enable_grammar_tool: true,
            grammar_available: true,
            ocr_mode: OcrMode::Off,
            ocr_lang: DEFAULT_OCR_LANG.to_string(),
            ocr_dpi: DEFAULT_OCR_DPI,
            ocr_min_chars: DEFAULT_OCR_MIN_CHARS,
        }
    }
}

/// Split `a,b` style entries and drop blanks
pub fn parse_check_list<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
