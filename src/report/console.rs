use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::io::{IsTerminal, Write};

use crate::benchmarks::{MethodResults, RunContext, SuiteInstance};
use crate::report::{summary_key, Reference, ReferenceRun, Reporter, DEFAULT_PRECISION};

const OK: &str = "✔";
const KO: &str = "✘";
const WARNING: &str = "⚠";

const DEFAULT_WIDTH: usize = 80;

/// Unit used to display deltas against a reference run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaUnit {
    /// Percentage of the reference value
    Percent,
    /// Absolute difference in seconds
    #[default]
    Seconds,
}

/// Terminal settings of the console reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Emit ANSI colors
    pub color: bool,
    /// Terminal width in columns
    pub width: usize,
    /// Draw a progress bar while an operation runs
    pub progress: bool,
    /// Decimal digits of durations
    pub precision: usize,
    /// Unit of reference deltas
    pub unit: DeltaUnit,
    /// Display captured failures
    pub debug: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: false,
            width: DEFAULT_WIDTH,
            progress: false,
            precision: DEFAULT_PRECISION,
            unit: DeltaUnit::default(),
            debug: false,
        }
    }
}

impl ConsoleConfig {
    /// Settings for the current terminal: colors and progress bars are only
    /// enabled on a TTY, the width comes from `COLUMNS`
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|columns| columns.parse().ok())
            .filter(|columns| *columns > 0)
            .unwrap_or(DEFAULT_WIDTH);
        Self {
            color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
            width,
            progress: std::io::stderr().is_terminal(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Title,
    Suite,
    Label,
    Success,
    Warning,
    Failure,
}

/// A reporter rendering the run as it happens, with optional deltas against
/// a reference run
pub struct ConsoleReporter {
    config: ConsoleConfig,
    reference: Option<Reference>,
    out: Box<dyn Write>,
    bar: Option<ProgressBar>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(ConsoleConfig::detect())
    }
}

impl ConsoleReporter {
    /// Console reporter writing to stdout
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_writer(config, std::io::stdout())
    }

    pub fn with_writer(config: ConsoleConfig, out: impl Write + 'static) -> Self {
        Self {
            config,
            reference: None,
            out: Box::new(out),
            bar: None,
        }
    }

    /// Compare every operation against a previous run
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    fn paint(&self, text: &str, style: Style, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        match style {
            Style::Title => text.white().bold().to_string(),
            Style::Suite => text.magenta().bold().to_string(),
            Style::Label => text.cyan().to_string(),
            Style::Success => text.green().bold().to_string(),
            Style::Warning => text.yellow().bold().to_string(),
            Style::Failure => text.red().bold().to_string(),
        }
    }

    fn reference_for(&self, suite: &dyn SuiteInstance, method: &str) -> Option<&ReferenceRun> {
        let key = summary_key(suite.name(), suite.times());
        self.reference.as_ref()?.run(&key, method)
    }

    /// Signed difference with the reference value
    fn delta(&self, value: f64, reference: f64, color: bool) -> String {
        let diff = value - reference;
        if diff == 0.0 {
            return "-".to_string();
        }
        let precision = self.config.precision;
        let text = match self.config.unit {
            DeltaUnit::Percent if reference != 0.0 => {
                format!("{:+.precision$}%", diff / reference * 100.0)
            }
            _ => format!("{diff:+.precision$}s"),
        };
        let style = if diff > 0.0 {
            Style::Failure
        } else {
            Style::Success
        };
        self.paint(&text, style, color)
    }

    fn duration(&self, total: f64, mean: f64, reference: Option<&ReferenceRun>, color: bool) -> String {
        let precision = self.config.precision;
        match reference {
            Some(reference) => format!(
                "{total:.precision$}s ({}) / {mean:.precision$}s ({})",
                self.delta(total, reference.total, color),
                self.delta(mean, reference.mean, color),
            ),
            None => format!("{total:.precision$}s / {mean:.precision$}s"),
        }
    }

    fn status(
        &self,
        results: &MethodResults,
        times: usize,
        reference: Option<&ReferenceRun>,
        color: bool,
    ) -> String {
        let duration = self.duration(results.total, results.mean(times), reference, color);
        let (glyph, style) = match (results.has_success, results.has_errors) {
            (true, true) => (WARNING, Style::Warning),
            (true, false) => (OK, Style::Success),
            _ => (KO, Style::Failure),
        };
        format!("{} {}", self.paint(glyph, style, color), duration)
    }
}

impl Reporter for ConsoleReporter {
    fn start(&mut self, ctx: &RunContext<'_>) -> Result<()> {
        let count = ctx.benchmarks.len();
        let msg = if count == 1 {
            format!("Running {count} benchmark")
        } else {
            format!("Running {count} benchmarks")
        };
        let color = self.config.color;
        writeln!(self.out, "{}", self.paint(&msg, Style::Title, color))?;
        let underline = "-".repeat(msg.chars().count());
        writeln!(self.out, "{}", self.paint(&underline, Style::Title, color))?;
        Ok(())
    }

    fn before_class(&mut self, suite: &dyn SuiteInstance) -> Result<()> {
        let label = format!(">>> {} (x{})", suite.label(), suite.times());
        let line = self.paint(&label, Style::Suite, self.config.color);
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn before_method(&mut self, suite: &dyn SuiteInstance, method: &str) -> Result<()> {
        let target = if self.config.progress {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(suite.times() as u64), target);
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        bar.set_message(self.paint(&suite.label_for(method), Style::Label, self.config.color));
        self.bar = Some(bar);
        Ok(())
    }

    fn progress(&mut self, _suite: &dyn SuiteInstance, _method: &str, iteration: usize) -> Result<()> {
        if let Some(bar) = &self.bar {
            bar.set_position(iteration as u64 + 1);
        }
        Ok(())
    }

    fn after_method(&mut self, suite: &dyn SuiteInstance, method: &str) -> Result<()> {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        let Some(results) = suite.result(method) else {
            return Ok(());
        };

        let color = self.config.color;
        let reference = self.reference_for(suite, method);
        let plain = self.status(results, suite.times(), reference, false);
        let status = self.status(results, suite.times(), reference, color);

        let label = suite.label_for(method);
        let size = self
            .config
            .width
            .saturating_sub(plain.chars().count() + 1);
        let dots = ".".repeat(size.saturating_sub(label.chars().count()));
        let line = format!("{}{} {}", self.paint(&label, Style::Label, color), dots, status);
        writeln!(self.out, "{line}")?;

        if self.config.debug {
            if let Some(error) = &results.error {
                let header = self.paint(&format!("Error: {}", error.kind), Style::Warning, color);
                writeln!(self.out, "{header}")?;
                writeln!(self.out, "\t{}", error.message)?;
            }
        }
        Ok(())
    }

    fn end(&mut self, _ctx: &RunContext<'_>) -> Result<()> {
        let done = self.paint(&format!("{OK} Done"), Style::Success, self.config.color);
        writeln!(self.out, "{done}")?;
        self.out.flush()?;
        Ok(())
    }

    fn precision(&self) -> usize {
        self.config.precision
    }
}
