use std::any::Any;
use std::time::Duration;

use crate::error::Failure;

/// Result of a single timed iteration
#[derive(Debug)]
pub struct RunResult {
    /// Wall-clock duration of the call
    pub duration: Duration,
    /// Value returned by the operation, or the captured failure
    pub outcome: Result<Box<dyn Any>, Failure>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Aggregated results of all iterations of one operation
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResults {
    /// Operation name
    pub method: String,
    /// Sum of all iteration durations in seconds
    pub total: f64,
    /// At least one iteration succeeded
    pub has_success: bool,
    /// At least one iteration failed
    pub has_errors: bool,
    /// First failure, recorded only when debug mode stopped the loop
    pub error: Option<Failure>,
}

impl MethodResults {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            total: 0.0,
            has_success: false,
            has_errors: false,
            error: None,
        }
    }

    /// Fold one iteration into the aggregate.
    ///
    /// Returns `true` when iterating this operation must stop, which only
    /// happens for a failed iteration in debug mode.
    pub fn fold(&mut self, run: RunResult, debug: bool) -> bool {
        self.total += run.duration.as_secs_f64();
        match run.outcome {
            Ok(_) => {
                self.has_success = true;
                false
            }
            Err(failure) => {
                self.has_errors = true;
                if debug {
                    self.error = Some(failure);
                }
                debug
            }
        }
    }

    /// Mean duration over the configured iteration count.
    ///
    /// The denominator is the configured `times`, not the number of iterations
    /// that actually ran.
    pub fn mean(&self, times: usize) -> f64 {
        if times == 0 {
            return 0.0;
        }
        self.total / times as f64
    }
}
