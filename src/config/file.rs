//! Config file loading
//!
//! Format is picked by extension: `.toml`, `.yaml`/`.yml`, anything else is
//! parsed as JSON. Every key is optional.
//!
//! ```toml
//! files = ["report.docx"]
//! lang = "en-GB"
//! max_issues = 200
//! disable = ["passive_voice"]
//!
//! [outputs]
//! html = true
//!
//! [ocr]
//! mode = "auto"
//! min_chars = 400
//!
//! [weights]
//! acronyms = 5.0
//! ```

use super::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A string or a list of strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutputsSection {
    #[serde(default)]
    pub html: Option<bool>,
    #[serde(default)]
    pub sarif: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OcrSection {
    /// off, auto or force
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub dpi: Option<u32>,
    #[serde(default)]
    pub min_chars: Option<usize>,
}

/// Contents of a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileConfig {
    /// Inputs used when none are given on the command line
    #[serde(default)]
    pub files: Option<OneOrMany>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub out: Option<String>,
    #[serde(default)]
    pub max_issues: Option<usize>,
    #[serde(default)]
    pub max_issues_per_check: Option<usize>,
    #[serde(default)]
    pub lt_chunk_size: Option<usize>,
    #[serde(default)]
    pub lt_overlap: Option<usize>,
    #[serde(default)]
    pub strict: Option<bool>,
    #[serde(default)]
    pub no_langtool: Option<bool>,
    #[serde(default)]
    pub languagetool_url: Option<String>,
    #[serde(default)]
    pub lt_timeout_secs: Option<u64>,
    #[serde(default)]
    pub fail_under: Option<f64>,
    #[serde(default)]
    pub min_coverage: Option<f64>,
    #[serde(default)]
    pub enable: Option<OneOrMany>,
    #[serde(default)]
    pub disable: Option<OneOrMany>,
    #[serde(default)]
    pub outputs: OutputsSection,
    #[serde(default)]
    pub ocr: OcrSection,
    /// Per-check weight overrides
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

/// Load a config file, choosing the parser by extension
pub fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let parse_err = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let config = if content.trim().is_empty() {
        FileConfig::default()
    } else {
        match ext.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_err(e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string()))?
            }
            _ => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string()))?,
        }
    };

    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.toml");
        fs::write(
            &path,
            r#"
files = "doc.md"
lang = "en-GB"
enable = ["punctuation", "whitespace"]

[outputs]
sarif = true

[ocr]
mode = "auto"
dpi = 200

[weights]
acronyms = 4.0
"#,
        )
        .unwrap();

        let cfg = load_config_file(&path).unwrap();
        assert_eq!(cfg.files.unwrap().into_vec(), vec!["doc.md"]);
        assert_eq!(cfg.lang.as_deref(), Some("en-GB"));
        assert_eq!(
            cfg.enable.unwrap().into_vec(),
            vec!["punctuation", "whitespace"]
        );
        assert_eq!(cfg.outputs.sarif, Some(true));
        assert_eq!(cfg.outputs.html, None);
        assert_eq!(cfg.ocr.mode.as_deref(), Some("auto"));
        assert_eq!(cfg.ocr.dpi, Some(200));
        assert_eq!(cfg.weights.get("acronyms"), Some(&4.0));
    }

    #[test]
    fn test_load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("audit.yml");
        fs::write(&yaml, "max_issues: 10\nstrict: true\n").unwrap();
        let cfg = load_config_file(&yaml).unwrap();
        assert_eq!(cfg.max_issues, Some(10));
        assert_eq!(cfg.strict, Some(true));

        let json = dir.path().join("audit.json");
        fs::write(&json, r#"{"no_langtool": true, "fail_under": 80}"#).unwrap();
        let cfg = load_config_file(&json).unwrap();
        assert_eq!(cfg.no_langtool, Some(true));
        assert_eq!(cfg.fail_under, Some(80.0));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn test_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config_file(&dir.path().join("missing.toml")),
            Err(ConfigError::NotFound(_))
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2]").unwrap();
        assert!(matches!(
            load_config_file(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }
}
