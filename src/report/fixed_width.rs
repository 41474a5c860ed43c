use crate::report::SuiteSummary;
use crate::utils::format_float;

/// Column headers of fixed width tables
pub const HEADERS: [&str; 4] = ["Method", "Times", "Total (s)", "Average (s)"];

/// Width of each table column for one suite: the widest of the header, the
/// display names, the iteration count and the formatted durations
pub fn column_sizes(suite: &SuiteSummary, precision: usize) -> [usize; 4] {
    let mut sizes = HEADERS.map(|header| header.chars().count());
    sizes[1] = sizes[1].max(suite.times.to_string().len());
    for run in &suite.runs {
        sizes[0] = sizes[0].max(run.name.chars().count());
        sizes[2] = sizes[2].max(format_float(run.total, precision).len());
        sizes[3] = sizes[3].max(format_float(run.mean, precision).len());
    }
    sizes
}

/// Table cells of one operation row
pub(crate) fn row_cells(suite: &SuiteSummary, index: usize, precision: usize) -> [String; 4] {
    let run = &suite.runs[index];
    [
        run.name.clone(),
        suite.times.to_string(),
        format_float(run.total, precision),
        format_float(run.mean, precision),
    ]
}

/// Left-align `text` in a cell of `width` characters
pub(crate) fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}
