use anyhow::{Context, Result};
use std::io::Write;

use crate::report::{FileFormat, FileReporter, Summary};

/// Compact JSON snapshot, readable back as a [`Reference`](crate::report::Reference)
#[derive(Debug, Default, Clone, Copy)]
pub struct Json;

impl FileFormat for Json {
    const NAME: &'static str = "JSON";

    fn output(&self, summary: &Summary, _precision: usize, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer(out, summary).context("Failed to serialize benchmark summary")
    }
}

/// A reporter dumping results into a JSON file
pub type JsonReporter = FileReporter<Json>;
