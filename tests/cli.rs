//! CLI integration tests using assert_cmd.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn workplan() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("anchor-workplan").unwrap()
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn check_lists_students() {
    workplan()
        .arg("check")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 students"))
        .stdout(predicate::str::contains("challenge_count"));
}

#[test]
fn report_writes_ranked_domains() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.txt");

    workplan()
        .arg("report")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = fs::read_to_string(&out).unwrap();
    assert_eq!(
        report,
        "דוח אתגרים כיתתי\nחברתי: 2 תלמידים\nשפה: 1 תלמידים\nמתמטיקה: 1 תלמידים\n"
    );
}

#[test]
fn report_json_summary() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("summary.json");

    workplan()
        .arg("report")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["students"], 3);
    assert_eq!(json["total_challenges"], 4);
}

#[test]
fn export_manager_view() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("manager.csv");

    workplan()
        .arg("export")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .arg("--view")
        .arg("manager")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 rows"));

    let content = fs::read_to_string(&out).unwrap();
    let content = content.trim_start_matches('\u{feff}');
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec!["student_id,challenge_count", "1,2", "2,1", "3,1"]
    );
}

#[test]
fn export_full_view_carries_strengths_detail() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("plan.csv");

    workplan()
        .arg("export")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("Strengths_Detail"));
    assert!(content.contains("ציור ומוזיקה"));
    assert!(content.contains("Challenge_Count"));
}

#[test]
fn plan_for_one_student() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("plan-3.md");

    workplan()
        .arg("plan")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .arg("--student")
        .arg("3")
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let plan = fs::read_to_string(&out).unwrap();
    assert!(plan.contains("### מתמטיקה"));
    assert!(plan.contains("מעבר דירה"));
}

#[test]
fn plan_for_unknown_student_fails() {
    let dir = TempDir::new().unwrap();

    workplan()
        .current_dir(dir.path())
        .arg("plan")
        .arg("--csv")
        .arg(fixture("class.csv"))
        .arg("--student")
        .arg("99")
        .assert()
        .failure()
        .stderr(predicate::str::contains("student 99 is not in"));
}

#[test]
fn real_name_blocks_every_artifact() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.txt");

    workplan()
        .arg("report")
        .arg("--csv")
        .arg(fixture("names.csv"))
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("upload refused"))
        .stderr(predicate::str::contains("student row 2"))
        .stderr(predicate::str::contains("contains letters"));
    assert!(!out.exists());

    let manager = dir.path().join("manager.csv");
    workplan()
        .arg("export")
        .arg("--csv")
        .arg(fixture("names.csv"))
        .arg("--view")
        .arg("manager")
        .arg("--out")
        .arg(&manager)
        .assert()
        .failure();
    assert!(!manager.exists());
}

#[test]
fn odd_row_count_is_malformed() {
    workplan()
        .arg("check")
        .arg("--csv")
        .arg(fixture("odd.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"));
}

#[test]
fn unrecognised_columns_warn_but_succeed() {
    workplan()
        .arg("check")
        .arg("--csv")
        .arg(fixture("unknown_columns.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 1 students"))
        .stderr(predicate::str::contains("match a known survey domain"));
}

#[test]
fn labelled_identifier_column_blocks_every_artifact() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.txt");

    workplan()
        .arg("report")
        .arg("--csv")
        .arg(fixture("labelled_id.csv"))
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no identifier column"));
    assert!(!out.exists());
}

#[test]
fn missing_file_fails() {
    workplan()
        .arg("check")
        .arg("--csv")
        .arg("does-not-exist.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
