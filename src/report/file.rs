use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::benchmarks::RunContext;
use crate::path_utils;
use crate::report::{Reporter, Summary, DEFAULT_PRECISION};

/// Serialization of a whole run summary into a file format
pub trait FileFormat {
    /// Short name of the format, used in log messages
    const NAME: &'static str;

    /// Serialize the summary into `out`
    fn output(&self, summary: &Summary, precision: usize, out: &mut dyn Write) -> Result<()>;
}

/// A reporter dumping the run summary into a file once the run ends.
///
/// The parent directory is created if it does not exist.
#[derive(Debug, Clone)]
pub struct FileReporter<F> {
    path: PathBuf,
    precision: usize,
    format: F,
}

impl<F: FileFormat + Default> FileReporter<F> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            precision: DEFAULT_PRECISION,
            format: F::default(),
        }
    }
}

impl<F: FileFormat> FileReporter<F> {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the summary to the output file
    pub fn write(&self, summary: &Summary) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            path_utils::ensure_directory(parent)?;
        }

        info!("Writing {} report to {:?}", F::NAME, self.path);
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create report file: {:?}", self.path))?;
        let mut out = BufWriter::new(file);
        self.format.output(summary, self.precision, &mut out)?;
        out.flush()
            .with_context(|| format!("Failed to write report file: {:?}", self.path))?;
        Ok(())
    }
}

impl<F: FileFormat> Reporter for FileReporter<F> {
    fn end(&mut self, ctx: &RunContext<'_>) -> Result<()> {
        let summary = self.summary(ctx);
        self.write(&summary)
    }

    fn precision(&self) -> usize {
        self.precision
    }
}

/// Write a line terminated by `\n`
pub(crate) fn line(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
