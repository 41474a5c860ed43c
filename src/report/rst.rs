use anyhow::Result;
use std::io::Write;

use crate::report::file::line;
use crate::report::fixed_width::{pad, row_cells};
use crate::report::{column_sizes, FileFormat, FileReporter, Summary, HEADERS};

/// One section per suite, each with a reStructuredText grid table
#[derive(Debug, Default, Clone, Copy)]
pub struct Rst;

impl FileFormat for Rst {
    const NAME: &'static str = "reStructuredText";

    fn output(&self, summary: &Summary, precision: usize, out: &mut dyn Write) -> Result<()> {
        for suite in &summary.suites {
            let sizes = column_sizes(suite, precision);

            line(out, &suite.name)?;
            line(out, &"=".repeat(suite.name.chars().count()))?;
            line(out, "")?;
            line(out, &separator(&sizes, '-'))?;
            line(out, &table_row(&HEADERS.map(str::to_string), &sizes))?;
            line(out, &separator(&sizes, '='))?;
            for index in 0..suite.runs.len() {
                line(out, &table_row(&row_cells(suite, index, precision), &sizes))?;
                line(out, &separator(&sizes, '-'))?;
            }
            line(out, "")?;
        }
        Ok(())
    }
}

/// `+-----+-----+`
fn separator(sizes: &[usize; 4], c: char) -> String {
    let cells: Vec<String> = sizes
        .iter()
        .map(|size| c.to_string().repeat(size + 2))
        .collect();
    format!("+{}+", cells.join("+"))
}

/// `| cell | cell |`
fn table_row(cells: &[String; 4], sizes: &[usize; 4]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(sizes)
        .map(|(cell, size)| pad(cell, *size))
        .collect();
    format!("| {} |", cells.join(" | "))
}

/// A reporter rendering results as reStructuredText tables
pub type RstReporter = FileReporter<Rst>;
