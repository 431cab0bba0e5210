//! SARIF 2.1.0 reporter for code scanning tools and editors
//!
//! Each check becomes a rule and each issue a result located in the audited
//! file. Region line and column come straight from the issue, so they are
//! page-local for paged documents; the page is kept in the result
//! properties.
//!
//! Reference: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::models::{AuditReport, CheckResult, CheckStatus, Issue, Severity};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

/// SARIF schema URI
const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Map issue severity to SARIF level
fn severity_to_sarif_level(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::Error) => "error",
        Some(Severity::Info) => "note",
        Some(Severity::Warning) | None => "warning",
    }
}

// ============================================================================
// SARIF Data Structures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
    invocations: Vec<SarifInvocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    name: String,
    short_description: SarifMessage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    properties: SarifResultProperties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snippet: Option<SarifMessage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifInvocation {
    execution_successful: bool,
    end_time_utc: String,
}

#[derive(Serialize)]
struct SarifResultProperties {
    check_name: String,
    status: CheckStatus,
    page: Option<u32>,
}

// ============================================================================
// Implementation
// ============================================================================

/// Render report as SARIF 2.1.0 JSON
pub fn render(report: &AuditReport) -> Result<String> {
    let sarif = build_sarif(report);
    Ok(serde_json::to_string_pretty(&sarif)?)
}

fn build_sarif(report: &AuditReport) -> SarifReport {
    let rules = report.check_results.iter().map(build_rule).collect();
    let results = report
        .check_results
        .iter()
        .flat_map(|check| {
            check
                .issues
                .iter()
                .map(move |issue| build_result(&report.file_path, check, issue))
        })
        .collect();

    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "docaudit".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
            invocations: vec![SarifInvocation {
                execution_successful: true,
                end_time_utc: Utc::now().to_rfc3339(),
            }],
        }],
    }
}

fn build_rule(check: &CheckResult) -> SarifRule {
    SarifRule {
        id: check.check_id.clone(),
        name: check.name.clone(),
        short_description: SarifMessage {
            text: check.name.clone(),
        },
    }
}

fn build_result(file_path: &str, check: &CheckResult, issue: &Issue) -> SarifResult {
    let snippet = issue
        .snippet
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| SarifMessage { text: s.clone() });
    let region = (issue.line.is_some() || issue.col.is_some() || snippet.is_some()).then(|| {
        SarifRegion {
            start_line: issue.line,
            start_column: issue.col,
            snippet,
        }
    });

    SarifResult {
        rule_id: check.check_id.clone(),
        level: severity_to_sarif_level(issue.severity).to_string(),
        message: SarifMessage {
            text: issue.message.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: file_path.to_string(),
                },
                region,
            },
        }],
        properties: SarifResultProperties {
            check_name: check.name.clone(),
            status: check.status,
            page: issue.page,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    fn parsed() -> serde_json::Value {
        let sarif = render(&test_report()).expect("render SARIF");
        serde_json::from_str(&sarif).expect("parse SARIF")
    }

    #[test]
    fn test_sarif_structure() {
        let v = parsed();
        assert_eq!(v["version"], "2.1.0");
        assert_eq!(v["$schema"], SARIF_SCHEMA);
        let run = &v["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "docaudit");
        let rules = run["tool"]["driver"]["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1]["id"], "punctuation");
        assert_eq!(rules[1]["shortDescription"]["text"], "Punctuation and style");
        assert!(run["invocations"][0]["endTimeUtc"].is_string());
    }

    #[test]
    fn test_sarif_results() {
        let v = parsed();
        let results = v["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);

        let note = &results[0];
        assert_eq!(note["ruleId"], "language_tool");
        assert_eq!(note["level"], "warning");
        assert!(note["locations"][0]["physicalLocation"].get("region").is_none());
        assert!(note["properties"]["page"].is_null());

        let located = &results[1];
        let region = &located["locations"][0]["physicalLocation"]["region"];
        assert_eq!(region["startLine"], 1);
        assert_eq!(region["startColumn"], 15);
        assert_eq!(region["snippet"]["text"], "This is a <test>!! It has");
        assert_eq!(located["properties"]["check_name"], "Punctuation and style");
        assert_eq!(located["properties"]["status"], "ok");
        assert_eq!(located["properties"]["page"], 2);
        assert_eq!(
            located["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "docs/report.pdf"
        );
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(severity_to_sarif_level(Some(Severity::Error)), "error");
        assert_eq!(severity_to_sarif_level(Some(Severity::Info)), "note");
        assert_eq!(severity_to_sarif_level(None), "warning");
    }
}
