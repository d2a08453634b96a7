use crate::junit::{attrs, parser::XmlElement, TAG_FAILURE, TAG_SKIPPED};

use super::failure::Failure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub message: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    /// Seconds, as parsed from the input `time` attribute.
    pub duration: f64,
    pub skipped: Option<Skipped>,
    pub failure: Option<Failure>,
}

impl TestCase {
    pub fn new<T: Into<String>>(name: T, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            skipped: None,
            failure: None,
        }
    }

    /// Builds the output test case for one input `<testcase>`.
    pub fn transcribe(test_case: &XmlElement) -> Self {
        let mut name = test_case.attr(attrs::NAME).unwrap_or_default().to_string();
        if let Some(type_param) = test_case.non_empty_attr(attrs::TYPE_PARAM) {
            name.push(' ');
            name.push_str(type_param);
        }

        let skipped = test_case.child(TAG_SKIPPED).map(|skipped| Skipped {
            message: skipped
                .attr(attrs::MESSAGE)
                .unwrap_or_default()
                .trim_end()
                .to_string(),
            text: skipped.text.trim_end().to_string(),
        });

        let failure = Failure::aggregate(
            test_case
                .children_named(TAG_FAILURE)
                .map(|failure| failure.attr(attrs::MESSAGE).unwrap_or_default()),
        );

        Self {
            name,
            duration: parse_duration(test_case.attr(attrs::TIME)),
            skipped,
            failure,
        }
    }
}

fn parse_duration(time: Option<&str>) -> f64 {
    time.and_then(|time| time.trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite())
        .unwrap_or(0.0)
}
