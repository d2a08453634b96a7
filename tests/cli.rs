use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use test_utils::{ctest_report, gtest_report, write_junit_xml, MALFORMED_JUNIT_XML};

mod test_utils;

fn junit2sonar() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_junit2sonar"));
    command.env_remove("JUNIT2SONAR_LOG");
    command
}

#[test]
fn translates_reports_matching_default_pattern() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(
        &temp_dir,
        "unittest-gtest.xml",
        &gtest_report("Span", &[("Empty", "suites/test_span.cpp")]),
    );
    write_junit_xml(&temp_dir, "ctest.xml", &ctest_report(&[("test_span", None)]));

    let assert = junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml"])
        .assert()
        .success();
    println!("{assert}");

    let written = fs::read_to_string(temp_dir.path().join("sonar.xml")).unwrap();
    assert!(written.contains(r#"<testExecutions version="1">"#));
    assert!(written.contains(r#"<file path="suites/test_span.cpp">"#));
    assert!(written.contains(r#"<file path="test_span">"#));

    // A second run finds the previous output with the same pattern and must
    // ignore it.
    junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml"])
        .assert()
        .success();
    let rewritten = fs::read_to_string(temp_dir.path().join("sonar.xml")).unwrap();
    assert_eq!(written, rewritten);
}

#[test]
fn explicit_inputs_only() {
    let temp_dir = tempdir().unwrap();
    let reports = temp_dir.path().join("reports");
    fs::create_dir(&reports).unwrap();
    let input = write_junit_xml(&reports, "only.xml", &gtest_report("A", &[("a", "a.cpp")]));
    write_junit_xml(&temp_dir, "ignored.xml", &gtest_report("B", &[("b", "b.cpp")]));

    junit2sonar()
        .current_dir(&temp_dir)
        .arg("out/nested/sonar.xml")
        .arg("--input")
        .arg(&input)
        .arg("--no-pattern")
        .assert()
        .success();

    let written = fs::read_to_string(temp_dir.path().join("out/nested/sonar.xml")).unwrap();
    assert!(written.contains(r#"<file path="a.cpp">"#));
    assert!(!written.contains("b.cpp"));
}

#[test]
fn no_inputs_fails() {
    let temp_dir = tempdir().unwrap();

    let assert = junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No JUnit reports found to translate"));
    println!("{assert}");

    assert!(!temp_dir.path().join("sonar.xml").exists());
}

#[test]
fn malformed_report_is_skipped_with_a_warning() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(&temp_dir, "a.xml", &gtest_report("A", &[("a", "a.cpp")]));
    write_junit_xml(&temp_dir, "b.xml", MALFORMED_JUNIT_XML);
    write_junit_xml(&temp_dir, "c.xml", &gtest_report("C", &[("c", "c.cpp")]));

    junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[WARN] - Skipping report"));

    let written = fs::read_to_string(temp_dir.path().join("sonar.xml")).unwrap();
    assert!(written.contains(r#"<file path="a.cpp">"#));
    assert!(written.contains(r#"<file path="c.cpp">"#));
    assert!(!written.contains("broken.cpp"));
}

#[test]
fn malformed_report_stops_the_run() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(&temp_dir, "a.xml", &gtest_report("A", &[("a", "a.cpp")]));
    write_junit_xml(&temp_dir, "b.xml", MALFORMED_JUNIT_XML);
    write_junit_xml(&temp_dir, "c.xml", &gtest_report("C", &[("c", "c.cpp")]));

    junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml", "--stop-on-failure"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Stopping on unusable report"));

    assert!(!temp_dir.path().join("sonar.xml").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(&temp_dir, "a.xml", &gtest_report("A", &[("a", "a.cpp")]));

    junit2sonar()
        .current_dir(&temp_dir)
        .args(["out/sonar.xml", "--dry-run", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "would have written a test report for 1 files (1 test cases)",
        ));

    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn base_dir_makes_paths_relative() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("src/x.cpp");
    write_junit_xml(
        &temp_dir,
        "a.xml",
        &gtest_report(
            "A",
            &[("inside", source.to_str().unwrap()), ("outside", "/opt/y.cpp")],
        ),
    );

    junit2sonar()
        .current_dir(&temp_dir)
        .arg("sonar.xml")
        .arg("--base-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let written = fs::read_to_string(temp_dir.path().join("sonar.xml")).unwrap();
    assert!(written.contains(r#"<file path="src/x.cpp">"#));
    assert!(written.contains(r#"<file path="/opt/y.cpp">"#));
}

#[test]
fn whole_second_durations() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(
        &temp_dir,
        "a.xml",
        r#"<testsuite name="s"><testcase name="slow" file="a.cpp" time="2.75"/></testsuite>"#,
    );

    junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml", "--duration-format", "whole-seconds"])
        .assert()
        .success();

    let written = fs::read_to_string(temp_dir.path().join("sonar.xml")).unwrap();
    assert!(written.contains(r#"<testCase name="slow" duration="2"/>"#));
}

#[test]
fn unwritable_destination_fails() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(&temp_dir, "a.xml", &gtest_report("A", &[("a", "a.cpp")]));
    fs::write(temp_dir.path().join("blocker"), "not a directory").unwrap();

    junit2sonar()
        .current_dir(&temp_dir)
        .args(["blocker/sonar.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create directory"));
}

#[test]
fn log_filter_env_overrides_verbosity() {
    let temp_dir = tempdir().unwrap();
    write_junit_xml(&temp_dir, "a.xml", &gtest_report("A", &[("a", "a.cpp")]));

    junit2sonar()
        .current_dir(&temp_dir)
        .args(["sonar.xml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Writing a test report").not());

    junit2sonar()
        .current_dir(&temp_dir)
        .env("JUNIT2SONAR_LOG", "info")
        .args(["sonar.xml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[INFO] - Writing a test report for 1 files"));
}
