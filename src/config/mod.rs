use anyhow::Result;
use log::debug;
use std::path::Path;

/// Config file loading
pub mod file;
pub use file::{load_file_config, FileConfig, OutputPaths};

/// Merged run settings
pub mod settings;
pub use settings::{Settings, MAX_PRECISION};

/// Tests for configuration
#[cfg(test)]
mod tests;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG: &str = "minibench.yml";

/// Load the config file named on the command line, or the default one when
/// it exists
pub fn load_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    match explicit {
        Some(path) => load_file_config(path).map(Some),
        None => {
            let path = Path::new(DEFAULT_CONFIG);
            if path.exists() {
                load_file_config(path).map(Some)
            } else {
                debug!("No {DEFAULT_CONFIG} found, using defaults");
                Ok(None)
            }
        }
    }
}
