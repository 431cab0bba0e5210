//! Per-file audit driver: read, normalize, audit, write reports, exit code

use crate::checks::AuditEngine;
use crate::config::{AuditOptions, Settings};
use crate::extract::read_document;
use crate::models::AuditReport;
use crate::reporters::{self, OutputFormat};
use crate::text::normalize_text;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub(crate) const EXIT_READ_ERROR: u8 = 2;
pub(crate) const EXIT_FAIL_UNDER: u8 = 3;
pub(crate) const EXIT_MIN_COVERAGE: u8 = 4;

/// Audit every configured file. One file failing to read or to write its
/// reports does not stop the others; the highest exit code wins.
pub(crate) fn run_batch(
    engine: &AuditEngine,
    settings: &Settings,
    options: &AuditOptions,
) -> Result<u8> {
    let multiple = settings.files.len() > 1;
    let mut exit_code = 0u8;

    for path in &settings.files {
        let doc = match read_document(path, options) {
            Ok(doc) => doc,
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                exit_code = exit_code.max(EXIT_READ_ERROR);
                continue;
            }
        };

        let text = normalize_text(&doc.text);
        let report = engine.audit(
            &path.display().to_string(),
            &text,
            &settings.language,
            options,
            doc.doc_info(),
        );

        let prefix = resolve_out_prefix(path, settings.out.as_deref(), multiple);
        let written = match write_reports(&report, &prefix, settings.html, settings.sarif) {
            Ok(written) => written,
            Err(e) => {
                error!("Error writing reports for {}: {:#}", path.display(), e);
                exit_code = exit_code.max(EXIT_READ_ERROR);
                continue;
            }
        };

        print!("{}", reporters::report_with_format(&report, OutputFormat::Text)?);
        println!();
        for file in &written {
            println!("Saved: {}", file.display());
        }

        if settings
            .fail_under
            .is_some_and(|threshold| report.total_score < threshold)
        {
            info!(
                "{}: score {} is below --fail-under",
                path.display(),
                report.total_score
            );
            exit_code = exit_code.max(EXIT_FAIL_UNDER);
        }
        if settings
            .min_coverage
            .is_some_and(|threshold| report.coverage < threshold)
        {
            info!(
                "{}: coverage {}% is below --min-coverage",
                path.display(),
                report.coverage
            );
            exit_code = exit_code.max(EXIT_MIN_COVERAGE);
        }
    }

    Ok(exit_code)
}

/// Where reports for `file` go, before the `_report.<ext>` suffix
///
/// - no `--out`: the input path without its extension
/// - `--out` ending in a separator or naming a directory: `<out>/<stem>`
/// - several input files: `<out>_<stem>`
/// - otherwise `<out>` itself
pub fn resolve_out_prefix(file: &Path, out: Option<&Path>, multiple_files: bool) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("document"));

    let Some(out) = out else {
        return file.with_extension("");
    };

    let out_str = out.to_string_lossy();
    if out_str.ends_with('/') || out_str.ends_with(std::path::MAIN_SEPARATOR) || out.is_dir() {
        return out.join(stem);
    }
    if multiple_files {
        let mut prefixed = out.as_os_str().to_os_string();
        prefixed.push("_");
        prefixed.push(&stem);
        return PathBuf::from(prefixed);
    }
    out.to_path_buf()
}

fn with_suffix(prefix: &Path, format: OutputFormat) -> PathBuf {
    let mut path = prefix.as_os_str().to_os_string();
    path.push(reporters::file_suffix(format));
    PathBuf::from(path)
}

/// Write JSON and Markdown, plus HTML and SARIF when asked. Returns the
/// written paths in that order.
fn write_reports(
    report: &AuditReport,
    prefix: &Path,
    html: bool,
    sarif: bool,
) -> Result<Vec<PathBuf>> {
    if let Some(parent) = prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let mut formats = vec![OutputFormat::Json, OutputFormat::Markdown];
    if html {
        formats.push(OutputFormat::Html);
    }
    if sarif {
        formats.push(OutputFormat::Sarif);
    }

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = with_suffix(prefix, format);
        let content = reporters::report_with_format(report, format)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {} report to {}", format, path.display()))?;
        written.push(path);
    }
    Ok(written)
}
