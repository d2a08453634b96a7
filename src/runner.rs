use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    junit::{
        self, attrs,
        parser::{self, LoadError, XmlElement},
        quirks::{self, QuirksMode},
        TAG_TEST_CASE,
    },
    sonar::{writer, DurationFormat, TestCase, TestExecutions},
};

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Source file paths under this directory are reported relative to it.
    pub base_dir: Option<PathBuf>,
    /// Abort on the first report that cannot be loaded instead of skipping it.
    pub stop_on_failure: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub inputs_processed: usize,
    pub inputs_skipped: usize,
    pub test_suites: usize,
    pub test_cases: usize,
    pub test_cases_dropped: usize,
    pub warnings: usize,
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("No JUnit reports found to translate.")]
    NoInputs,
    #[error("Stopping on unusable report {path:?}: {source}")]
    Aborted {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

/// Accumulates any number of JUnit reports into one merged document.
#[derive(Debug, Default)]
pub struct Translator {
    options: TranslateOptions,
    report: TestExecutions,
    summary: RunSummary,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        let report = TestExecutions::new(options.base_dir.clone());
        Self {
            options,
            report,
            summary: RunSummary::default(),
        }
    }

    /// Loads and merges one report file. A report that cannot be loaded is
    /// skipped with a warning, or aborts the run under stop-on-failure.
    pub fn add_report_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TranslateError> {
        let path = path.as_ref();
        log::debug!("Loading report {:?}", path);
        match parser::load(path) {
            Ok(root) => {
                self.add_report(&root, &path.display().to_string());
                Ok(())
            }
            Err(source) if self.options.stop_on_failure => Err(TranslateError::Aborted {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) => {
                log::warn!("Skipping report {:?}: {}", path, e);
                self.summary.inputs_skipped += 1;
                self.summary.warnings += 1;
                Ok(())
            }
        }
    }

    /// Merges an already parsed report. `source` names it in log output.
    pub fn add_report(&mut self, root: &XmlElement, source: &str) {
        self.summary.inputs_processed += 1;

        let Some(test_suites) = junit::test_suites(root) else {
            log::warn!(
                "Report {} has unknown root element <{}>, no test suites read",
                source,
                root.name
            );
            self.summary.warnings += 1;
            return;
        };

        for test_suite in test_suites {
            log::info!(
                "Parsing junit testsuite from {}: name=\"{}\" tests=\"{}\"",
                source,
                test_suite.attr(attrs::NAME).unwrap_or_default(),
                test_suite.attr(attrs::TESTS).unwrap_or_default(),
            );
            self.summary.test_suites += 1;

            for test_case in test_suite.children_named(TAG_TEST_CASE) {
                self.add_test_case(test_case, source);
            }
        }
    }

    fn add_test_case(&mut self, test_case: &XmlElement, source: &str) {
        let mode = quirks::classify(test_case);
        let file_key = match &mode {
            QuirksMode::Native(file) | QuirksMode::ClassDerived(file) => file,
            QuirksMode::Unusable => {
                log::warn!(
                    "Skipping <{} name=\"{}\"> in {}: no file or classname attribute",
                    test_case.name,
                    test_case.attr(attrs::NAME).unwrap_or_default(),
                    source
                );
                self.summary.test_cases_dropped += 1;
                self.summary.warnings += 1;
                return;
            }
        };

        let transcribed = TestCase::transcribe(test_case);
        log::debug!(
            "Found testcase \"{}\" (quirks={})",
            transcribed.name,
            mode
        );
        self.report.add_test_case(file_key, transcribed);
        self.summary.test_cases += 1;
    }

    pub fn report(&self) -> &TestExecutions {
        &self.report
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn finish(self) -> (TestExecutions, RunSummary) {
        (self.report, self.summary)
    }
}

/// Translates `inputs` in order into one merged document.
pub fn translate<P: AsRef<Path>>(
    inputs: &[P],
    options: TranslateOptions,
) -> Result<(TestExecutions, RunSummary), TranslateError> {
    if inputs.is_empty() {
        return Err(TranslateError::NoInputs);
    }

    let mut translator = Translator::new(options);
    for input in inputs {
        translator.add_report_file(input)?;
    }
    Ok(translator.finish())
}

/// Writes the merged document to `destination`, or only reports what would be
/// written when `dry_run` is set.
pub fn emit_report<P: AsRef<Path>>(
    report: &TestExecutions,
    destination: P,
    duration_format: DurationFormat,
    dry_run: bool,
) -> anyhow::Result<()> {
    let destination = destination.as_ref();
    if dry_run {
        log::info!(
            "Dry run, would have written a test report for {} files ({} test cases) to {:?}",
            report.file_count(),
            report.test_case_count(),
            destination
        );
        return Ok(());
    }

    log::info!(
        "Writing a test report for {} files ({} test cases) to {:?}",
        report.file_count(),
        report.test_case_count(),
        destination
    );
    writer::write_report(report, duration_format, destination)
}
