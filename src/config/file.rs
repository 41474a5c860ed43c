use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::settings::{validate_precision, validate_prefix, validate_times};
use crate::path_utils;
use crate::report::DeltaUnit;

/// Report files written at the end of a run
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputPaths {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub md: Option<PathBuf>,
    pub rst: Option<PathBuf>,
}

impl OutputPaths {
    fn paths_mut(&mut self) -> [&mut Option<PathBuf>; 4] {
        [&mut self.json, &mut self.csv, &mut self.md, &mut self.rst]
    }
}

/// Run defaults loaded from `minibench.yml`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Benchmark file patterns
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Iteration count applied to every suite
    pub times: Option<usize>,
    /// Operation name prefix
    pub prefix: Option<String>,
    /// Decimal digits in reports
    pub precision: Option<usize>,
    /// Unit of reference deltas
    pub unit: Option<DeltaUnit>,
    /// Stop each operation at its first failure
    pub debug: Option<bool>,
    /// JSON snapshot to compare against
    pub reference: Option<PathBuf>,
    #[serde(default)]
    pub outputs: OutputPaths,
    /// Path to the config file (set during loading)
    #[serde(skip)]
    pub path: PathBuf,
}

impl FileConfig {
    /// File this configuration was loaded from
    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(times) = self.times {
            validate_times(times)?;
        }
        if let Some(precision) = self.precision {
            validate_precision(precision)?;
        }
        if let Some(prefix) = &self.prefix {
            validate_prefix(prefix)?;
        }
        Ok(())
    }

    /// Copy with `~` and environment variables expanded and relative paths
    /// resolved against `config_dir`
    pub fn with_expanded_paths(&self, config_dir: &Path) -> Self {
        let mut config = self.clone();
        config.patterns = self
            .patterns
            .iter()
            .map(|pattern| path_utils::resolve_pattern_str(pattern, config_dir))
            .collect();
        if let Some(reference) = config.reference.as_mut() {
            *reference = path_utils::resolve_path(reference, config_dir);
        }
        for output in config.outputs.paths_mut().into_iter().flatten() {
            *output = path_utils::resolve_path(output, config_dir);
        }
        config
    }
}

/// Load run defaults from a YAML file
pub fn load_file_config(config_path: &Path) -> Result<FileConfig> {
    if !config_path.exists() {
        anyhow::bail!("Config file not found: {:?}", config_path);
    }

    let config_dir = config_path
        .parent()
        .context("Failed to get config directory")?;

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

    let mut config: FileConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse YAML from file: {:?}", config_path))?;

    config.path = config_path.to_path_buf();

    let config = config.with_expanded_paths(config_dir);

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", config_path))?;

    debug!("Using configuration from {:?}\n{:?}", config.config_path(), config);
    Ok(config)
}
