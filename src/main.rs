use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use junit2sonar::constants::{
    DEFAULT_INPUT_PATTERN, EXIT_FAILURE, EXIT_SUCCESS, LOG_FILTER_ENV,
};
use junit2sonar::runner::{emit_report, translate, TranslateOptions};
use junit2sonar::scanner::{resolve_inputs, InputOrder};
use junit2sonar::sonar::DurationFormat;

#[derive(Debug, Parser)]
#[command(
    version = std::env!("CARGO_PKG_VERSION"),
    name = "junit2sonar",
    about = "Merge JUnit XML test reports into one SonarQube generic test execution report"
)]
struct Cli {
    #[arg(
        env = "JUNIT2SONAR_OUTPUT",
        help = "Path of the SonarQube report to write."
    )]
    output: PathBuf,
    #[arg(
        long = "input",
        env = "JUNIT2SONAR_INPUTS",
        value_delimiter = ',',
        help = "JUnit report to translate. Repeatable or comma-separated."
    )]
    inputs: Vec<PathBuf>,
    #[arg(
        long,
        env = "JUNIT2SONAR_PATTERN",
        default_value = DEFAULT_INPUT_PATTERN,
        help = "Glob pattern, relative to the current directory, for more JUnit reports."
    )]
    pattern: String,
    #[arg(long, help = "Only translate the reports given with --input.")]
    no_pattern: bool,
    #[arg(long, help = "Translate reports matched by --pattern before --input reports.")]
    patterns_first: bool,
    #[arg(
        long,
        env = "JUNIT2SONAR_BASE_DIR",
        help = "Report source file paths relative to this directory."
    )]
    base_dir: Option<PathBuf>,
    #[arg(long, help = "Fail on the first report that cannot be parsed instead of skipping it.")]
    stop_on_failure: bool,
    #[arg(long, help = "Translate the reports without writing the output.")]
    dry_run: bool,
    #[arg(
        long,
        value_enum,
        env = "JUNIT2SONAR_DURATION_FORMAT",
        default_value_t = DurationFormat::Precise,
        help = "How test case durations are written."
    )]
    duration_format: DurationFormat,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose.log_level_filter())?;
    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            log::error!("Error: {:?}", e);
            std::process::exit(exitcode::SOFTWARE);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let Cli {
        output,
        inputs,
        pattern,
        no_pattern,
        patterns_first,
        base_dir,
        stop_on_failure,
        dry_run,
        duration_format,
        ..
    } = cli;

    print_cli_start_info();

    let order = if patterns_first {
        InputOrder::PatternFirst
    } else {
        InputOrder::ExplicitFirst
    };
    let pattern = (!no_pattern).then_some(pattern.as_str());
    let inputs = resolve_inputs(&inputs, pattern, order, Some(output.as_path()))?;
    log::info!("Translating {} JUnit reports", inputs.len());

    let options = TranslateOptions {
        base_dir,
        stop_on_failure,
    };
    let (report, summary) = match translate(&inputs, options) {
        Ok(translated) => translated,
        Err(e) => {
            log::error!("{}", e);
            return Ok(EXIT_FAILURE);
        }
    };

    log::info!(
        "Read {} reports ({} skipped), {} test cases ({} dropped), {} warnings",
        summary.inputs_processed,
        summary.inputs_skipped,
        summary.test_cases,
        summary.test_cases_dropped,
        summary.warnings
    );

    emit_report(&report, &output, duration_format, dry_run)?;
    Ok(EXIT_SUCCESS)
}

fn setup_logger(level: log::LevelFilter) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level);
    if let Ok(log) = std::env::var(LOG_FILTER_ENV) {
        builder.parse_filters(&log);
    }
    builder.try_init()?;
    Ok(())
}

fn print_cli_start_info() {
    log::info!("Starting junit2sonar {}", env!("CARGO_PKG_VERSION"));
}
