use std::fmt;

use super::{attrs, parser::XmlElement};

/// Where a test case takes the source file it is reported against from.
///
/// GoogleTest reports carry a `file` attribute per test case. CTest's JUnit
/// output does not, so the `classname` stands in for it. The mode is decided
/// per test case because a merged report may mix both conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuirksMode {
    Native(String),
    ClassDerived(String),
    Unusable,
}

impl QuirksMode {
    pub fn file_key(&self) -> Option<&str> {
        match self {
            QuirksMode::Native(file) | QuirksMode::ClassDerived(file) => Some(file),
            QuirksMode::Unusable => None,
        }
    }
}

impl fmt::Display for QuirksMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuirksMode::Native(_) => write!(f, "native"),
            QuirksMode::ClassDerived(_) => write!(f, "class-derived"),
            QuirksMode::Unusable => write!(f, "unusable"),
        }
    }
}

pub fn classify(test_case: &XmlElement) -> QuirksMode {
    if let Some(file) = test_case.non_empty_attr(attrs::FILE) {
        QuirksMode::Native(file.to_string())
    } else if let Some(classname) = test_case.non_empty_attr(attrs::CLASSNAME) {
        QuirksMode::ClassDerived(classname.to_string())
    } else {
        QuirksMode::Unusable
    }
}
