//! Layered run settings: built-in defaults, then the config file, then
//! explicit command-line flags.

use super::{
    parse_check_list, AuditOptions, ConfigError, FileConfig, OcrMode, DEFAULT_LANGUAGE,
    DEFAULT_LT_TIMEOUT_SECS,
};
use crate::grammar::DEFAULT_LANGUAGETOOL_URL;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub files: Vec<PathBuf>,
    pub lang: Option<String>,
    pub out: Option<PathBuf>,
    pub max_issues: Option<usize>,
    pub max_issues_per_check: Option<usize>,
    pub lt_chunk_size: Option<usize>,
    pub lt_overlap: Option<usize>,
    pub strict: Option<bool>,
    pub no_langtool: Option<bool>,
    pub languagetool_url: Option<String>,
    pub fail_under: Option<f64>,
    pub min_coverage: Option<f64>,
    pub enable: Option<Vec<String>>,
    pub disable: Option<Vec<String>>,
    pub html: Option<bool>,
    pub sarif: Option<bool>,
    pub ocr_mode: Option<OcrMode>,
    pub ocr_lang: Option<String>,
    pub ocr_dpi: Option<u32>,
    pub ocr_min_chars: Option<usize>,
}

/// Everything a run needs, fully resolved
#[derive(Debug, Clone)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub language: String,
    pub out: Option<PathBuf>,
    pub options: AuditOptions,
    pub languagetool_url: String,
    pub lt_timeout: Duration,
    pub fail_under: Option<f64>,
    pub min_coverage: Option<f64>,
    pub html: bool,
    pub sarif: bool,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    pub weights: BTreeMap<String, f64>,
}

impl Settings {
    pub fn resolve(file: FileConfig, cli: CliOverrides) -> Result<Self, ConfigError> {
        let defaults = AuditOptions::default();

        let file_ocr_mode = file
            .ocr
            .mode
            .as_deref()
            .map(str::parse::<OcrMode>)
            .transpose()?;

        let options = AuditOptions {
            max_issues: cli.max_issues.or(file.max_issues).unwrap_or(defaults.max_issues),
            max_issues_per_check: cli
                .max_issues_per_check
                .or(file.max_issues_per_check)
                .unwrap_or(defaults.max_issues_per_check),
            chunk_size: cli
                .lt_chunk_size
                .or(file.lt_chunk_size)
                .unwrap_or(defaults.chunk_size),
            chunk_overlap: cli.lt_overlap.or(file.lt_overlap).unwrap_or(defaults.chunk_overlap),
            strict: cli.strict.or(file.strict).unwrap_or(defaults.strict),
            enable_grammar_tool: !cli.no_langtool.or(file.no_langtool).unwrap_or(false),
            grammar_available: defaults.grammar_available,
            ocr_mode: cli.ocr_mode.or(file_ocr_mode).unwrap_or(defaults.ocr_mode),
            ocr_lang: cli.ocr_lang.or(file.ocr.lang).unwrap_or(defaults.ocr_lang),
            ocr_dpi: cli.ocr_dpi.or(file.ocr.dpi).unwrap_or(defaults.ocr_dpi),
            ocr_min_chars: cli
                .ocr_min_chars
                .or(file.ocr.min_chars)
                .unwrap_or(defaults.ocr_min_chars),
        };

        if options.ocr_dpi == 0 {
            return Err(ConfigError::Invalid("ocr dpi must be positive".into()));
        }
        if let Some((id, w)) = file.weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "weight for '{id}' must be a non-negative number, got {w}"
            )));
        }

        let files = if cli.files.is_empty() {
            file.files
                .map(|f| f.into_vec().into_iter().map(PathBuf::from).collect())
                .unwrap_or_default()
        } else {
            cli.files
        };

        let enable = cli
            .enable
            .or_else(|| file.enable.map(|e| e.into_vec()))
            .unwrap_or_default();
        let disable = cli
            .disable
            .or_else(|| file.disable.map(|d| d.into_vec()))
            .unwrap_or_default();

        Ok(Self {
            files,
            language: cli
                .lang
                .or(file.lang)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            out: cli.out.or(file.out.map(PathBuf::from)),
            options,
            languagetool_url: cli
                .languagetool_url
                .or(file.languagetool_url)
                .unwrap_or_else(|| DEFAULT_LANGUAGETOOL_URL.to_string()),
            lt_timeout: Duration::from_secs(
                file.lt_timeout_secs.unwrap_or(DEFAULT_LT_TIMEOUT_SECS).max(1),
            ),
            fail_under: cli.fail_under.or(file.fail_under),
            min_coverage: cli.min_coverage.or(file.min_coverage),
            html: cli.html.or(file.outputs.html).unwrap_or(false),
            sarif: cli.sarif.or(file.outputs.sarif).unwrap_or(false),
            enable: parse_check_list(&enable),
            disable: parse_check_list(&disable),
            weights: file.weights,
        })
    }
}
