use std::collections::HashMap;

use super::test_case::TestCase;

#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup {
    pub path: String,
    pub test_cases: Vec<TestCase>,
}

impl FileGroup {
    pub fn new<T: Into<String>>(path: T) -> Self {
        Self {
            path: path.into(),
            test_cases: Vec::new(),
        }
    }
}

/// File groups keyed by path, kept in the order each path was first seen.
#[derive(Debug, Clone, Default)]
pub struct FileGroupIndex {
    positions: HashMap<String, usize>,
    groups: Vec<FileGroup>,
}

impl FileGroupIndex {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the group for `path`, appending a new one if the path has not
    /// been seen yet in this run.
    pub fn resolve(&mut self, path: &str) -> &mut FileGroup {
        let position = match self.positions.get(path) {
            Some(&position) => position,
            None => {
                let position = self.groups.len();
                self.groups.push(FileGroup::new(path));
                self.positions.insert(path.to_string(), position);
                position
            }
        };
        &mut self.groups[position]
    }

    pub fn groups(&self) -> &[FileGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn test_case_count(&self) -> usize {
        self.groups.iter().map(|group| group.test_cases.len()).sum()
    }
}
