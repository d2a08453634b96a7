#![allow(dead_code)]

mod mock_logger;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};

pub use mock_logger::mock_logger;

pub fn write_junit_xml<T: AsRef<Path>>(directory: T, name: &str, contents: &str) -> PathBuf {
    let path = directory.as_ref().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A GoogleTest style report: every test case names its source file.
pub fn gtest_report(suite: &str, test_cases: &[(&str, &str)]) -> String {
    let test_cases: String = test_cases
        .iter()
        .map(|(name, file)| {
            format!(
                r#"    <testcase name="{}" file="{}" line="1" status="run" time="0.001" classname="{}"/>
"#,
                name, file, suite
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites tests="{count}" name="AllTests">
  <testsuite name="{suite}" tests="{count}">
{test_cases}  </testsuite>
</testsuites>
"#,
        count = test_cases.lines().count(),
        suite = suite,
        test_cases = test_cases,
    )
}

/// A CTest style report, as `ctest --output-junit` writes it: no `file`
/// attribute, the test target is the classname.
pub fn ctest_report(test_cases: &[(&str, Option<&str>)]) -> String {
    let mut test_suite = TestSuite::new("Linux-c++");
    for (name, failure_message) in test_cases {
        let status = match failure_message {
            Some(message) => {
                let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
                status.set_message(*message);
                status
            }
            None => TestCaseStatus::success(),
        };
        let mut test_case = TestCase::new(*name, status);
        test_case.set_classname(*name);
        test_case.set_time(Duration::from_millis(250));
        test_suite.add_test_case(test_case);
    }

    let mut report = Report::new("ctest");
    report.add_test_suite(test_suite);
    report.to_string().unwrap()
}

pub const MALFORMED_JUNIT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="broken" tests="1">
  <testcase name="cut_off" file="src/broken.cpp">
"#;
