//! Plain text reader

use super::ExtractError;
use crate::models::DocumentData;
use std::path::Path;

/// Read bytes and decode UTF-8 lossily
pub(super) fn read_text(path: &Path) -> Result<DocumentData, ExtractError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(DocumentData::from_text(text, "text"))
}
