//! OCR through poppler's `pdftoppm` and `tesseract`

use super::ExtractError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Both OCR tools are on PATH
pub fn ocr_tools_available() -> bool {
    which::which("pdftoppm").is_ok() && which::which("tesseract").is_ok()
}

/// Render every page at `dpi` and recognize it with `lang`. One string per page.
pub(super) fn ocr_pdf_pages(path: &Path, lang: &str, dpi: u32) -> Result<Vec<String>, ExtractError> {
    if which::which("pdftoppm").is_err() {
        return Err(ExtractError::Ocr("pdftoppm not found (install poppler-utils)".into()));
    }
    if which::which("tesseract").is_err() {
        return Err(ExtractError::Ocr("tesseract not found (install tesseract-ocr)".into()));
    }

    let tmp = tempfile::tempdir()?;
    let prefix = tmp.path().join("page");
    let out = Command::new("pdftoppm")
        .arg("-r")
        .arg(dpi.to_string())
        .arg("-png")
        .arg(path)
        .arg(&prefix)
        .output()?;
    if !out.status.success() {
        return Err(ExtractError::Ocr(format!(
            "pdftoppm exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let images = rendered_pages(tmp.path())?;
    if images.is_empty() {
        return Err(ExtractError::Ocr("pdftoppm produced no pages".into()));
    }
    debug!("OCR: {} page image(s) at {} dpi", images.len(), dpi);

    images
        .iter()
        .map(|img| {
            let out = Command::new("tesseract")
                .arg(img)
                .arg("stdout")
                .arg("-l")
                .arg(lang)
                .output()?;
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).into_owned())
            } else {
                Err(ExtractError::Ocr(format!(
                    "tesseract exited with {} on {}: {}",
                    out.status,
                    img.display(),
                    String::from_utf8_lossy(&out.stderr).trim()
                )))
            }
        })
        .collect()
}

/// `page-1.png`, `page-01.png`, ... sorted by page number
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter_map(|p| page_number(&p).map(|n| (n, p)))
        .collect();
    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, p)| p).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.rsplit_once('-')?.1.parse().ok()
}
