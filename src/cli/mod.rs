//! CLI definitions and entry point

mod audit;
mod doctor;

pub use audit::resolve_out_prefix;

use crate::checks::{AuditEngine, Registry};
use crate::config::{load_config_file, CliOverrides, FileConfig, OcrMode, Settings};
use crate::extract::Capabilities;
use crate::grammar::{GrammarService, LanguageToolClient};
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, warn};

/// docaudit - document quality audit
///
/// Scores DOCX, PDF, TXT and Markdown files out of 100 across grammar,
/// readability and style checks.
#[derive(Parser, Debug)]
#[command(name = "docaudit")]
#[command(
    version,
    about = "Audit the writing quality of DOCX/PDF/TXT/MD documents and score them out of 100",
    after_help = "\
Examples:
  docaudit report.docx                          Audit one document
  docaudit a.md b.pdf --out reports/            Write reports into a directory
  docaudit notes.txt --no-langtool --html       Skip grammar service, add HTML report
  docaudit paper.pdf --ocr auto --sarif         OCR scanned PDFs, add SARIF report
  docaudit doc.md --enable punctuation,links    Run only some checks
  docaudit doc.md --fail-under 80               Exit 3 when the score is below 80
  docaudit --list-checks                        Show checks and weights
  docaudit --doctor                             Show available readers and services

Exit codes: 0 ok, 2 file not found, unreadable or reports not written,
3 score below --fail-under, 4 coverage below --min-coverage."
)]
pub struct Cli {
    /// Input document(s)
    pub files: Vec<PathBuf>,

    /// Config file (TOML, YAML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Language code for grammar checks [default: en-US]
    #[arg(long)]
    pub lang: Option<String>,

    /// Output path prefix or directory
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Only run these check ids (comma-separated, repeatable)
    #[arg(long, value_name = "IDS")]
    pub enable: Vec<String>,

    /// Check ids to skip (comma-separated, repeatable)
    #[arg(long, value_name = "IDS")]
    pub disable: Vec<String>,

    /// List available checks and exit
    #[arg(long)]
    pub list_checks: bool,

    /// Show optional readers and services, then exit
    #[arg(long)]
    pub doctor: bool,

    /// Skip the LanguageTool grammar check
    #[arg(long, overrides_with = "langtool")]
    pub no_langtool: bool,

    /// Run the LanguageTool grammar check even if the config disables it
    #[arg(long, overrides_with = "no_langtool")]
    pub langtool: bool,

    /// LanguageTool server URL [default: http://localhost:8081]
    #[arg(long, env = "DOCAUDIT_LANGUAGETOOL_URL")]
    pub languagetool_url: Option<String>,

    /// Max total issues to report, 0 for unlimited
    #[arg(long)]
    pub max_issues: Option<usize>,

    /// Max issues per check [default: 50]
    #[arg(long)]
    pub max_issues_per_check: Option<usize>,

    /// LanguageTool chunk size in bytes [default: 8000]
    #[arg(long)]
    pub lt_chunk_size: Option<usize>,

    /// LanguageTool chunk overlap in bytes [default: 200]
    #[arg(long)]
    pub lt_overlap: Option<usize>,

    /// Count skipped and failed checks as zero-scored
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,

    /// Leave skipped and failed checks out of the score
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,

    /// Exit with code 3 when the score is below this
    #[arg(long, value_name = "SCORE")]
    pub fail_under: Option<f64>,

    /// Exit with code 4 when coverage (percent) is below this
    #[arg(long, value_name = "PERCENT")]
    pub min_coverage: Option<f64>,

    /// Write an HTML report
    #[arg(long, overrides_with = "no_html")]
    pub html: bool,

    /// Do not write an HTML report
    #[arg(long, overrides_with = "html")]
    pub no_html: bool,

    /// Write a SARIF report
    #[arg(long, overrides_with = "no_sarif")]
    pub sarif: bool,

    /// Do not write a SARIF report
    #[arg(long, overrides_with = "sarif")]
    pub no_sarif: bool,

    /// OCR PDF input: off, auto (when little text is found) or force
    #[arg(long, value_parser = ["off", "auto", "force"], ignore_case = true)]
    pub ocr: Option<String>,

    /// Tesseract language code [default: eng]
    #[arg(long)]
    pub ocr_lang: Option<String>,

    /// DPI for rendering PDF pages before OCR [default: 300]
    #[arg(long)]
    pub ocr_dpi: Option<u32>,

    /// Auto-OCR threshold in extracted characters [default: 600]
    #[arg(long)]
    pub ocr_min_chars: Option<usize>,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// `Some(true)` for `--flag`, `Some(false)` for `--no-flag`, `None` otherwise
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

impl Cli {
    /// Values given explicitly on the command line
    pub fn overrides(&self) -> Result<CliOverrides> {
        let ocr_mode = self
            .ocr
            .as_deref()
            .map(str::parse::<OcrMode>)
            .transpose()?;
        Ok(CliOverrides {
            files: self.files.clone(),
            lang: self.lang.clone(),
            out: self.out.clone(),
            max_issues: self.max_issues,
            max_issues_per_check: self.max_issues_per_check,
            lt_chunk_size: self.lt_chunk_size,
            lt_overlap: self.lt_overlap,
            strict: flag_pair(self.strict, self.no_strict),
            no_langtool: flag_pair(self.no_langtool, self.langtool),
            languagetool_url: self.languagetool_url.clone(),
            fail_under: self.fail_under,
            min_coverage: self.min_coverage,
            enable: (!self.enable.is_empty()).then(|| self.enable.clone()),
            disable: (!self.disable.is_empty()).then(|| self.disable.clone()),
            html: flag_pair(self.html, self.no_html),
            sarif: flag_pair(self.sarif, self.no_sarif),
            ocr_mode,
            ocr_lang: self.ocr_lang.clone(),
            ocr_dpi: self.ocr_dpi,
            ocr_min_chars: self.ocr_min_chars,
        })
    }
}

/// Run the CLI and return the process exit code
pub fn run(cli: Cli) -> Result<ExitCode> {
    let file_config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file_config, cli.overrides()?)?;
    debug!("Resolved settings: {:?}", settings);

    if cli.list_checks {
        let registry = Registry::new(None).with_weights(&settings.weights);
        println!("Available checks:");
        for spec in registry.specs() {
            println!("- {}: {} (weight {})", spec.id(), spec.name(), spec.weight);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.doctor {
        doctor::run(&settings);
        return Ok(ExitCode::SUCCESS);
    }

    if settings.files.is_empty() {
        bail!("No input files. Pass one or more paths or set `files` in the config file.");
    }

    let mut options = settings.options.clone();
    let grammar_url = options
        .enable_grammar_tool
        .then_some(settings.languagetool_url.as_str());
    let caps = Capabilities::probe(grammar_url);
    options.grammar_available = caps.grammar_service;
    if options.enable_grammar_tool && !caps.grammar_service {
        warn!(
            "LanguageTool server at {} is not reachable; grammar check will be skipped",
            settings.languagetool_url
        );
    }

    let grammar: Option<Arc<dyn GrammarService>> = options.enable_grammar_tool.then(|| {
        Arc::new(LanguageToolClient::new(
            settings.languagetool_url.clone(),
            settings.lt_timeout,
        )) as Arc<dyn GrammarService>
    });
    let registry = Registry::new(grammar).with_weights(&settings.weights);
    let engine = AuditEngine::with_selection(&registry, &settings.enable, &settings.disable);

    let code = audit::run_batch(&engine, &settings, &options)?;
    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_pairs() {
        let cli = Cli::parse_from(["docaudit", "a.md", "--strict", "--no-html", "--no-langtool"]);
        let o = cli.overrides().unwrap();
        assert_eq!(o.strict, Some(true));
        assert_eq!(o.html, Some(false));
        assert_eq!(o.sarif, None);
        assert_eq!(o.no_langtool, Some(true));

        let cli = Cli::parse_from(["docaudit", "a.md", "--strict", "--no-strict"]);
        assert_eq!(cli.overrides().unwrap().strict, Some(false));
    }

    #[test]
    fn test_repeatable_lists() {
        let cli = Cli::parse_from([
            "docaudit",
            "a.md",
            "--enable",
            "punctuation,whitespace",
            "--enable",
            "links",
        ]);
        let o = cli.overrides().unwrap();
        assert_eq!(o.enable.unwrap().len(), 2);
        assert!(o.disable.is_none());
    }

    #[test]
    fn test_ocr_mode_flag() {
        let cli = Cli::parse_from(["docaudit", "a.pdf", "--ocr", "AUTO"]);
        assert_eq!(cli.overrides().unwrap().ocr_mode, Some(OcrMode::Auto));
        assert!(Cli::try_parse_from(["docaudit", "a.pdf", "--ocr", "sometimes"]).is_err());
    }
}
