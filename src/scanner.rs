use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// Which inputs are processed first when both explicit paths and a glob
/// pattern are given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputOrder {
    #[default]
    ExplicitFirst,
    PatternFirst,
}

/// The ordered, de-duplicated list of reports to translate.
#[derive(Debug, Default)]
pub struct InputSet {
    files: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
    excluded: Option<PathBuf>,
}

impl InputSet {
    /// `exclude` is never added, however it is reached. Used to keep the
    /// destination report out of its own inputs.
    pub fn new(exclude: Option<&Path>) -> Self {
        Self {
            excluded: exclude.map(identity),
            ..Default::default()
        }
    }

    pub fn add_explicit<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let path = path.as_ref();
            if !self.push(path.to_path_buf()) {
                log::debug!("Input {:?} was already added or is the output", path);
            }
        }
    }

    /// Adds the regular files matching `pattern`, evaluated against the
    /// current directory when relative. Returns how many files were added.
    pub fn add_pattern(&mut self, pattern: &str) -> anyhow::Result<usize> {
        let mut added = 0;
        glob::glob(pattern)?.try_for_each(|entry| {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    return Err(anyhow::anyhow!("Error scanning inputs: {:?}", e));
                }
            };

            if !path.is_file() {
                return Ok::<(), anyhow::Error>(());
            }

            if self.push(path) {
                added += 1;
            }
            Ok(())
        })?;

        log::debug!("Pattern {:?} added {} inputs", pattern, added);
        Ok(added)
    }

    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn push(&mut self, path: PathBuf) -> bool {
        let key = identity(&path);
        if self.excluded.as_ref() == Some(&key) || !self.seen.insert(key) {
            return false;
        }
        self.files.push(path);
        true
    }
}

/// Collects the explicit inputs and the matches of `pattern` (if any) in the
/// requested order.
pub fn resolve_inputs<P: AsRef<Path>>(
    explicit: &[P],
    pattern: Option<&str>,
    order: InputOrder,
    exclude: Option<&Path>,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs = InputSet::new(exclude);
    match order {
        InputOrder::ExplicitFirst => {
            inputs.add_explicit(explicit);
            if let Some(pattern) = pattern {
                inputs.add_pattern(pattern)?;
            }
        }
        InputOrder::PatternFirst => {
            if let Some(pattern) = pattern {
                inputs.add_pattern(pattern)?;
            }
            inputs.add_explicit(explicit);
        }
    }
    Ok(inputs.into_files())
}

fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
