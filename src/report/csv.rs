use anyhow::Result;
use std::io::Write;

use crate::report::file::line;
use crate::report::{FileFormat, FileReporter, Summary};

const DELIMITER: &str = ";";
const HEADER: [&str; 5] = ["Benchmark", "Method", "Times", "Total (s)", "Average (s)"];

/// `;` delimited CSV with every field quoted, one row per operation
#[derive(Debug, Default, Clone, Copy)]
pub struct Csv;

impl FileFormat for Csv {
    const NAME: &'static str = "CSV";

    fn output(&self, summary: &Summary, _precision: usize, out: &mut dyn Write) -> Result<()> {
        line(out, &row(HEADER))?;
        for suite in &summary.suites {
            for run in &suite.runs {
                line(
                    out,
                    &row([
                        suite.name.as_str(),
                        run.name.as_str(),
                        &suite.times.to_string(),
                        &run.total.to_string(),
                        &run.mean.to_string(),
                    ]),
                )?;
            }
        }
        Ok(())
    }
}

fn row<const N: usize>(fields: [&str; N]) -> String {
    fields.map(quote).join(DELIMITER)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// A reporter dumping results into a CSV file
pub type CsvReporter = FileReporter<Csv>;
