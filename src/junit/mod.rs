pub mod parser;
pub mod quirks;

use parser::XmlElement;

pub const TAG_REPORT: &str = "testsuites";
pub const TAG_TEST_SUITE: &str = "testsuite";
pub const TAG_TEST_CASE: &str = "testcase";
pub const TAG_SKIPPED: &str = "skipped";
pub const TAG_FAILURE: &str = "failure";

pub mod attrs {
    pub const NAME: &str = "name";
    pub const TESTS: &str = "tests";
    pub const TIME: &str = "time";
    pub const FILE: &str = "file";
    pub const CLASSNAME: &str = "classname";
    pub const TYPE_PARAM: &str = "type_param";
    pub const MESSAGE: &str = "message";
}

/// The suites of one report. A bare `<testsuite>` root is its own sole suite,
/// a `<testsuites>` root contributes its direct `<testsuite>` children.
/// Returns `None` when the root is neither.
pub fn test_suites(root: &XmlElement) -> Option<Vec<&XmlElement>> {
    match root.name.as_str() {
        TAG_TEST_SUITE => Some(vec![root]),
        TAG_REPORT => Some(root.children_named(TAG_TEST_SUITE).collect()),
        _ => None,
    }
}
