use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::benchmarks::{SuiteOverrides, DEFAULT_PATTERN, DEFAULT_PREFIX};
use crate::cli::Cli;
use crate::config::file::{FileConfig, OutputPaths};
use crate::report::{ConsoleConfig, DeltaUnit, DEFAULT_PRECISION};

/// Digits an `f64` can meaningfully display
pub const MAX_PRECISION: usize = 17;

pub(crate) fn validate_times(times: usize) -> Result<()> {
    if times == 0 {
        anyhow::bail!("Invalid times: must be at least 1");
    }
    Ok(())
}

pub(crate) fn validate_precision(precision: usize) -> Result<()> {
    if precision > MAX_PRECISION {
        anyhow::bail!("Invalid precision {precision}: must be at most {MAX_PRECISION}");
    }
    Ok(())
}

pub(crate) fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        anyhow::bail!("Invalid prefix: must not be empty");
    }
    Ok(())
}

/// Effective settings of a run, merged from the command line, the config
/// file and the built-in defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub patterns: Vec<String>,
    /// Global iteration override, suites keep their own count when absent
    pub times: Option<usize>,
    pub prefix: String,
    pub precision: usize,
    pub unit: DeltaUnit,
    pub debug: bool,
    pub color: bool,
    pub reference: Option<PathBuf>,
    pub outputs: OutputPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            patterns: vec![DEFAULT_PATTERN.to_string()],
            times: None,
            prefix: DEFAULT_PREFIX.to_string(),
            precision: DEFAULT_PRECISION,
            unit: DeltaUnit::default(),
            debug: false,
            color: true,
            reference: None,
            outputs: OutputPaths::default(),
        }
    }
}

impl Settings {
    /// Merge command line arguments over an optional config file
    pub fn resolve(cli: &Cli, file: Option<&FileConfig>) -> Result<Self> {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        let patterns = if !cli.patterns.is_empty() {
            cli.patterns.clone()
        } else if !file.patterns.is_empty() {
            file.patterns
        } else {
            defaults.patterns
        };

        let settings = Self {
            patterns,
            times: cli.times.or(file.times),
            prefix: cli.prefix.clone().or(file.prefix).unwrap_or(defaults.prefix),
            precision: cli.precision.or(file.precision).unwrap_or(defaults.precision),
            unit: cli.unit.or(file.unit).unwrap_or(defaults.unit),
            debug: cli.debug || file.debug.unwrap_or(defaults.debug),
            color: !cli.no_color,
            reference: cli.reference.clone().or(file.reference),
            outputs: OutputPaths {
                json: cli.json.clone().or(file.outputs.json),
                csv: cli.csv.clone().or(file.outputs.csv),
                md: cli.md.clone().or(file.outputs.md),
                rst: cli.rst.clone().or(file.outputs.rst),
            },
        };
        settings.validate()?;

        debug!("Using settings\n{:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(times) = self.times {
            validate_times(times)?;
        }
        validate_precision(self.precision)?;
        validate_prefix(&self.prefix)
    }

    /// Construction overrides given to every suite
    pub fn overrides(&self) -> SuiteOverrides {
        SuiteOverrides {
            times: self.times,
            prefix: self.prefix.clone(),
        }
    }

    /// Apply the run settings to detected terminal settings
    pub fn console_config(&self, terminal: ConsoleConfig) -> ConsoleConfig {
        ConsoleConfig {
            color: terminal.color && self.color,
            precision: self.precision,
            unit: self.unit,
            debug: self.debug,
            ..terminal
        }
    }
}
