use anyhow::Result;
use clap::Parser;
use log::debug;
use std::path::PathBuf;

use crate::benchmarks::{resolve_pattern, BenchmarkRunner, ReporterArg};
use crate::config::{self, Settings};
use crate::report::{
    ConsoleConfig, ConsoleReporter, CsvReporter, DeltaUnit, JsonReporter, MarkdownReporter,
    Reference, RstReporter,
};

#[derive(Parser, Debug, Clone, Default)]
#[command(
    version,
    about,
    long_about = "Run micro-benchmark suites and report their timings"
)]
pub struct Cli {
    /// Benchmark files, directories or glob patterns [default: **/*.bench.rs]
    pub patterns: Vec<String>,

    /// Run every operation this many times, overriding the suites' own count
    #[arg(short, long, value_parser = parse_times)]
    pub times: Option<usize>,

    /// Write a JSON report
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write a CSV report
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write a reStructuredText report
    #[arg(long, value_name = "FILE")]
    pub rst: Option<PathBuf>,

    /// Write a Markdown report
    #[arg(long, value_name = "FILE")]
    pub md: Option<PathBuf>,

    /// Compare against a JSON report of a previous run
    #[arg(short, long = "ref", value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Unit of the deltas against the reference run
    #[arg(short, long, value_enum)]
    pub unit: Option<DeltaUnit>,

    /// Decimal digits of the reported durations
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Stop each operation at its first failure and show the error
    #[arg(short, long)]
    pub debug: bool,

    /// Prefix of the operations to run
    #[arg(long)]
    pub prefix: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Config file [default: minibench.yml when present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_times(value: &str) -> Result<usize, String> {
    let times: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if times == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(times)
}

/// Reporters selected by the settings: the console first, then one per
/// requested report file
pub fn reporters(settings: &Settings, terminal: ConsoleConfig) -> Result<Vec<ReporterArg>> {
    let mut console = ConsoleReporter::new(settings.console_config(terminal));
    if let Some(path) = &settings.reference {
        console = console.with_reference(Reference::load(path)?);
    }
    let mut reporters = vec![ReporterArg::from(console)];

    let outputs = &settings.outputs;
    let precision = settings.precision;
    if let Some(path) = &outputs.json {
        reporters.push(JsonReporter::new(path).with_precision(precision).into());
    }
    if let Some(path) = &outputs.csv {
        reporters.push(CsvReporter::new(path).with_precision(precision).into());
    }
    if let Some(path) = &outputs.md {
        reporters.push(MarkdownReporter::new(path).with_precision(precision).into());
    }
    if let Some(path) = &outputs.rst {
        reporters.push(RstReporter::new(path).with_precision(precision).into());
    }
    Ok(reporters)
}

/// Benchmark files matched by the patterns, without duplicates
pub fn discover(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        for path in resolve_pattern(pattern)? {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }
    debug!("Found {} benchmark files", files.len());
    Ok(files)
}

/// Run the suites registered in the current binary
pub fn run(cli: Cli) -> Result<()> {
    let file = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file.as_ref())?;

    let mut builder = BenchmarkRunner::builder()
        .sources(discover(&settings.patterns)?)
        .debug(settings.debug);
    for reporter in reporters(&settings, ConsoleConfig::detect())? {
        builder = builder.reporter(reporter);
    }

    builder.build()?.run(&settings.overrides())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "minibench",
            "suites",
            "-t",
            "10",
            "--json",
            "out/report.json",
            "-r",
            "previous.json",
            "-u",
            "percent",
            "-p",
            "3",
            "-d",
            "--prefix",
            "time_",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.patterns, vec!["suites".to_string()]);
        assert_eq!(cli.times, Some(10));
        assert_eq!(cli.json, Some(PathBuf::from("out/report.json")));
        assert_eq!(cli.reference, Some(PathBuf::from("previous.json")));
        assert_eq!(cli.unit, Some(DeltaUnit::Percent));
        assert_eq!(cli.precision, Some(3));
        assert!(cli.debug);
        assert_eq!(cli.prefix.as_deref(), Some("time_"));
        assert!(cli.no_color);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_times_must_be_positive() {
        assert!(Cli::try_parse_from(["minibench", "-t", "0"]).is_err());
        assert!(Cli::try_parse_from(["minibench", "-t", "many"]).is_err());
    }

    #[test]
    fn test_reporters_follow_outputs() {
        let mut settings = Settings::default();
        assert_eq!(reporters(&settings, ConsoleConfig::default()).unwrap().len(), 1);

        settings.outputs.json = Some(PathBuf::from("report.json"));
        settings.outputs.rst = Some(PathBuf::from("report.rst"));
        assert_eq!(reporters(&settings, ConsoleConfig::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_reference_is_an_error() {
        let settings = Settings {
            reference: Some(PathBuf::from("/nonexistent/minibench/previous.json")),
            ..Settings::default()
        };
        assert!(reporters(&settings, ConsoleConfig::default()).is_err());
    }
}
