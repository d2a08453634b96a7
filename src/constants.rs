pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub const LOG_FILTER_ENV: &str = "JUNIT2SONAR_LOG";

pub const DEFAULT_INPUT_PATTERN: &str = "*.xml";

/// Value of the `version` attribute on the `<testExecutions>` root.
pub const SONAR_GENERIC_EXECUTION_VERSION: &str = "1";
