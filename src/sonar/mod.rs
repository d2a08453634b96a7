pub mod failure;
pub mod index;
pub mod report;
pub mod test_case;
pub mod writer;

pub use failure::Failure;
pub use index::{FileGroup, FileGroupIndex};
pub use report::TestExecutions;
pub use test_case::{Skipped, TestCase};

pub const TAG_TEST_EXECUTIONS: &str = "testExecutions";
pub const TAG_FILE: &str = "file";
pub const TAG_TEST_CASE: &str = "testCase";
pub const TAG_SKIPPED: &str = "skipped";
pub const TAG_FAILURE: &str = "failure";

/// How test case durations are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DurationFormat {
    /// Seconds with the full precision of the input, e.g. `0.012`.
    #[default]
    Precise,
    /// Whole seconds, fractional part dropped.
    WholeSeconds,
}

impl DurationFormat {
    pub fn render(self, seconds: f64) -> String {
        match self {
            DurationFormat::Precise => {
                // Display never switches to exponent notation.
                let mut rendered = format!("{}", seconds);
                if !rendered.contains('.') {
                    rendered.push_str(".0");
                }
                rendered
            }
            DurationFormat::WholeSeconds => format!("{}", seconds.trunc() as i64),
        }
    }
}
