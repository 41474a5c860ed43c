//! Reporter protocol and the bundled reporters.

use anyhow::Result;

use crate::benchmarks::{RunContext, SuiteInstance};

mod console;
pub use console::{ConsoleConfig, ConsoleReporter, DeltaUnit};
mod csv;
pub use csv::{Csv, CsvReporter};
mod file;
pub use file::{FileFormat, FileReporter};
mod fixed_width;
pub use fixed_width::{column_sizes, HEADERS};
mod json;
pub use json::{Json, JsonReporter};
mod markdown;
pub use markdown::{Markdown, MarkdownReporter};
mod rst;
pub use rst::{Rst, RstReporter};
mod summary;
pub use summary::{summary_key, Reference, ReferenceRun, ReferenceSuite, RunSummary, SuiteSummary, Summary};

/// Default number of decimal digits when rendering durations
pub const DEFAULT_PRECISION: usize = 5;

/// Observer of a benchmark run.
///
/// Every callback defaults to a no-op so implementors only override what they
/// need. An error returned by any callback aborts the run.
pub trait Reporter {
    /// Called once when the run starts
    fn start(&mut self, _ctx: &RunContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once before each suite runs
    fn before_class(&mut self, _suite: &dyn SuiteInstance) -> Result<()> {
        Ok(())
    }

    /// Called once after each suite ran
    fn after_class(&mut self, _suite: &dyn SuiteInstance) -> Result<()> {
        Ok(())
    }

    /// Called once before each benchmarked operation
    fn before_method(&mut self, _suite: &dyn SuiteInstance, _method: &str) -> Result<()> {
        Ok(())
    }

    /// Called once after each benchmarked operation
    fn after_method(&mut self, _suite: &dyn SuiteInstance, _method: &str) -> Result<()> {
        Ok(())
    }

    /// Called after each iteration of a benchmarked operation
    fn progress(
        &mut self,
        _suite: &dyn SuiteInstance,
        _method: &str,
        _iteration: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once when the run ends
    fn end(&mut self, _ctx: &RunContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Decimal digits used when rendering durations
    fn precision(&self) -> usize {
        DEFAULT_PRECISION
    }

    /// Summary of every completed suite
    fn summary(&self, ctx: &RunContext<'_>) -> Summary {
        Summary::from_suites(ctx.completed)
    }
}

/// A reporter that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Instantiate a reporter with its defaults from its kind name
pub fn from_kind(kind: &str) -> Option<Box<dyn Reporter>> {
    match kind {
        "console" => Some(Box::new(ConsoleReporter::default())),
        "null" => Some(Box::new(NullReporter)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kind() {
        assert!(from_kind("console").is_some());
        assert!(from_kind("null").is_some());
        assert!(from_kind("xml").is_none());
    }

    #[test]
    fn test_default_precision() {
        assert_eq!(NullReporter.precision(), DEFAULT_PRECISION);
    }
}
