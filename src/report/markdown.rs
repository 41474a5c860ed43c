use anyhow::Result;
use std::io::Write;

use crate::report::file::line;
use crate::report::fixed_width::{pad, row_cells};
use crate::report::{column_sizes, FileFormat, FileReporter, Summary, HEADERS};

/// One section per suite, each with a fixed width Markdown table
#[derive(Debug, Default, Clone, Copy)]
pub struct Markdown;

impl FileFormat for Markdown {
    const NAME: &'static str = "Markdown";

    fn output(&self, summary: &Summary, precision: usize, out: &mut dyn Write) -> Result<()> {
        for suite in &summary.suites {
            let sizes = column_sizes(suite, precision);

            line(out, &format!("# {}", suite.name))?;
            line(out, "")?;
            line(out, &table_row(&HEADERS.map(str::to_string), &sizes, ' '))?;
            line(out, &table_row(&sizes.map(|size| "-".repeat(size)), &sizes, ':'))?;
            for index in 0..suite.runs.len() {
                line(out, &table_row(&row_cells(suite, index, precision), &sizes, ' '))?;
            }
            line(out, "")?;
        }
        Ok(())
    }
}

/// `|<c>cell<c>|<c>cell<c>|...`
fn table_row(cells: &[String; 4], sizes: &[usize; 4], c: char) -> String {
    let mut row = String::from("|");
    for (cell, size) in cells.iter().zip(sizes) {
        row.push(c);
        row.push_str(&pad(cell, *size));
        row.push(c);
        row.push('|');
    }
    row
}

/// A reporter rendering results as Markdown tables
pub type MarkdownReporter = FileReporter<Markdown>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{RunSummary, SuiteSummary};

    #[test]
    fn test_output() {
        let summary = Summary {
            suites: vec![SuiteSummary {
                key: "Empty-5".into(),
                name: "Empty benchmark".into(),
                times: 5,
                runs: vec![RunSummary {
                    method: "bench_nothing".into(),
                    name: "Nothing".into(),
                    total: 0.5,
                    mean: 0.1,
                }],
            }],
        };

        let mut out = Vec::new();
        Markdown.output(&summary, 5, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "\
# Empty benchmark

| Method  | Times | Total (s) | Average (s) |
|:-------:|:-----:|:---------:|:-----------:|
| Nothing | 5     | 0.50000   | 0.10000     |

";
        assert_eq!(text, expected);
    }
}
