//! CLI flag contract tests
//!
//! Runs the docaudit binary against temporary documents and verifies the
//! written reports, the exit codes (0, 2, 3, 4) and the --out, --enable,
//! --html/--sarif, --list-checks and --config flags. The grammar service is
//! always disabled so no network access is needed.

use std::path::{Path, PathBuf};
use std::process::Command;

const FLAWED: &str = "This is a test!! It has    double   spaces.\t\n";

fn docaudit_bin() -> String {
    env!("CARGO_BIN_EXE_docaudit").to_string()
}

fn write_doc(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Run the binary with `--no-langtool` and return (exit code, stdout, stderr)
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(docaudit_bin())
        .args(args)
        .arg("--no-langtool")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run docaudit");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("missing {}: {e}", path.display()));
    serde_json::from_str(&content).expect("Invalid JSON report")
}

// ============================================================================
// Reports next to the input
// ============================================================================

#[test]
fn test_default_run_writes_json_and_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "notes.txt", "A plain sentence with nothing odd in it.\n");

    let (code, stdout, _) = run(&[doc.to_str().unwrap()]);
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("Score:"));
    assert!(stdout.contains("Saved:"));

    let json = read_json(&dir.path().join("notes_report.json"));
    assert_eq!(json["language"], "en-US");
    assert_eq!(json["checks"].as_array().unwrap().len(), 10);
    assert_eq!(json["checks"][0]["id"], "language_tool");
    assert_eq!(json["checks"][0]["status"], "skipped");
    assert_eq!(json["coverage"], 65.0);

    let md = std::fs::read_to_string(dir.path().join("notes_report.md")).unwrap();
    assert!(md.starts_with("# Document Audit Report"));
    assert!(!dir.path().join("notes_report.html").exists());
    assert!(!dir.path().join("notes_report.sarif").exists());
}

#[test]
fn test_enable_subset_reports_coverage() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.md", FLAWED);

    let (code, _, _) = run(&[doc.to_str().unwrap(), "--enable", "punctuation,whitespace"]);
    assert_eq!(code, 0);

    let json = read_json(&dir.path().join("flawed_report.json"));
    assert_eq!(json["coverage"], 15.0);
    let ids: Vec<&str> = json["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["punctuation", "whitespace"]);
    assert_eq!(json["checks"][0]["issues"][0]["highlight"], "!!");
}

#[test]
fn test_html_and_sarif_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.txt", FLAWED);

    let (code, stdout, _) = run(&[doc.to_str().unwrap(), "--html", "--sarif"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("Saved:").count(), 4);

    let html = std::fs::read_to_string(dir.path().join("flawed_report.html")).unwrap();
    assert!(html.contains("<mark>"));

    let sarif = read_json(&dir.path().join("flawed_report.sarif"));
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["runs"][0]["tool"]["driver"]["name"], "docaudit");
    assert!(!sarif["runs"][0]["results"].as_array().unwrap().is_empty());
}

// ============================================================================
// --out
// ============================================================================

#[test]
fn test_out_directory_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "paper.md", "# Paper\n\nShort body.\n");
    let out = format!("{}/reports/", dir.path().display());

    let (code, _, _) = run(&[doc.to_str().unwrap(), "--out", &out]);
    assert_eq!(code, 0);
    assert!(dir.path().join("reports/paper_report.json").is_file());
    assert!(dir.path().join("reports/paper_report.md").is_file());
}

#[test]
fn test_out_prefix_with_multiple_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_doc(dir.path(), "a.txt", "First file.\n");
    let b = write_doc(dir.path(), "b.txt", "Second file.\n");
    let out = dir.path().join("audit");

    let (code, _, _) = run(&[
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(dir.path().join("audit_a_report.json").is_file());
    assert!(dir.path().join("audit_b_report.json").is_file());
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_missing_file_exits_2_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_doc(dir.path(), "good.txt", "Fine.\n");
    let missing = dir.path().join("missing.txt");

    let (code, _, stderr) = run(&[missing.to_str().unwrap(), good.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(stderr.contains("missing.txt"), "stderr: {stderr}");
    assert!(dir.path().join("good_report.json").is_file());
}

#[test]
fn test_unwritable_report_exits_2_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_doc(dir.path(), "a.txt", "First file.\n");
    let b = write_doc(dir.path(), "b.txt", "Second file.\n");
    std::fs::create_dir(dir.path().join("a_report.json")).unwrap();

    let (code, _, stderr) = run(&[a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(stderr.contains("a_report.json"), "stderr: {stderr}");
    assert!(dir.path().join("b_report.json").is_file());
    assert!(dir.path().join("b_report.md").is_file());
}

#[test]
fn test_fail_under_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.txt", FLAWED);

    let (code, _, _) = run(&[doc.to_str().unwrap(), "--fail-under", "99"]);
    assert_eq!(code, 3);

    let (code, _, _) = run(&[doc.to_str().unwrap(), "--fail-under", "10"]);
    assert_eq!(code, 0);
}

#[test]
fn test_min_coverage_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.txt", FLAWED);

    let (code, _, _) = run(&[
        doc.to_str().unwrap(),
        "--enable",
        "punctuation",
        "--min-coverage",
        "90",
    ]);
    assert_eq!(code, 4);
}

#[test]
fn test_highest_exit_code_wins() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.txt", FLAWED);
    let missing = dir.path().join("nope.txt");

    let (code, _, _) = run(&[
        missing.to_str().unwrap(),
        doc.to_str().unwrap(),
        "--enable",
        "punctuation",
        "--fail-under",
        "99",
        "--min-coverage",
        "90",
    ]);
    assert_eq!(code, 4);
}

#[test]
fn test_no_files_is_an_error() {
    let (code, _, stderr) = run(&[]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No input files"), "stderr: {stderr}");
}

// ============================================================================
// --list-checks and --config
// ============================================================================

#[test]
fn test_list_checks() {
    let (code, stdout, _) = run(&["--list-checks"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Available checks:"));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("- ")).count(), 10);
    assert!(stdout.contains("- language_tool: Grammar and style (LanguageTool) (weight 35)"));
    assert!(stdout.contains("- punctuation: Punctuation and style (weight 10)"));
}

#[test]
fn test_list_checks_shows_config_weights() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_doc(dir.path(), "docaudit.toml", "[weights]\nacronyms = 2.5\n");

    let (code, stdout, _) = run(&["--list-checks", "--config", config.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("- acronyms: Acronym definitions (weight 2.5)"));
}

#[test]
fn test_config_file_supplies_files_and_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.txt", FLAWED);
    let config = write_doc(
        dir.path(),
        "docaudit.toml",
        &format!(
            "files = [{:?}]\nenable = [\"punctuation\", \"whitespace\"]\n\n[outputs]\nhtml = true\n",
            doc.to_str().unwrap()
        ),
    );

    let (code, _, _) = run(&["--config", config.to_str().unwrap()]);
    assert_eq!(code, 0);

    let json = read_json(&dir.path().join("flawed_report.json"));
    assert_eq!(json["coverage"], 15.0);
    assert!(dir.path().join("flawed_report.html").is_file());
}

#[test]
fn test_cli_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "flawed.txt", FLAWED);
    let config = write_doc(dir.path(), "docaudit.yaml", "outputs:\n  html: true\n");

    let (code, _, _) = run(&[
        doc.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--no-html",
    ]);
    assert_eq!(code, 0);
    assert!(!dir.path().join("flawed_report.html").exists());
}

#[test]
fn test_bad_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(dir.path(), "a.txt", "Fine.\n");
    let config = write_doc(dir.path(), "broken.toml", "max_issues = \"lots\"\n");

    let (code, _, stderr) = run(&[doc.to_str().unwrap(), "--config", config.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("broken.toml"), "stderr: {stderr}");
}
