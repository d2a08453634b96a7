use std::path::{Path, PathBuf};

use crate::{constants::SONAR_GENERIC_EXECUTION_VERSION, paths};

use super::{
    index::{FileGroup, FileGroupIndex},
    test_case::TestCase,
};

/// The merged `<testExecutions>` document of one run.
#[derive(Debug, Clone, Default)]
pub struct TestExecutions {
    base_dir: Option<PathBuf>,
    files: FileGroupIndex,
}

impl TestExecutions {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self {
            base_dir,
            files: FileGroupIndex::new(),
        }
    }

    pub fn version(&self) -> &'static str {
        SONAR_GENERIC_EXECUTION_VERSION
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Files `test_case` under the group for `file_key`. The key is normalized
    /// against the base directory first, so keys that normalize to the same
    /// path share a group.
    pub fn add_test_case(&mut self, file_key: &str, test_case: TestCase) {
        let path = paths::normalize(file_key, self.base_dir());
        self.files.resolve(&path).test_cases.push(test_case);
    }

    pub fn files(&self) -> &[FileGroup] {
        self.files.groups()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn test_case_count(&self) -> usize {
        self.files.test_case_count()
    }
}
