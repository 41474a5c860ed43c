//! Benchmark suite definitions and their lifecycle engine.

use anyhow::Result;

mod hooks;
pub use hooks::{Hooks, IterationHook, MethodHook};
mod loader;
pub use loader::{
    module_name, resolve_pattern, RegistryLoader, SuiteFactory, SuiteLoader, SuiteModule,
    SuiteRegistration, SuiteSource, DEFAULT_PATTERN,
};
mod operation;
pub use operation::{Operation, Operations};
mod results;
pub use results::{MethodResults, RunResult};
mod runner;
pub use runner::{BenchmarkRunner, ReporterArg, RunContext, RunnerBuilder, SuiteOverrides};
mod suite;
pub use suite::{Suite, SuiteInstance, SuiteOptions};

/// Default number of iterations per operation
pub const DEFAULT_TIMES: usize = 5;

/// Default operation name prefix
pub const DEFAULT_PREFIX: &str = "bench_";

/// A user-defined benchmark suite.
///
/// Implementors register their operations once in [`Benchmark::operations`] and
/// may override any lifecycle hook. Hooks return errors instead of recording
/// them: an error from a hook aborts the whole run, while failures of the
/// benchmarked operations are captured as results.
///
/// ```ignore
/// #[derive(Default)]
/// struct SumBenchmark;
///
/// impl Benchmark for SumBenchmark {
///     const TIMES: Option<usize> = Some(1000);
///
///     fn operations(ops: &mut Operations<Self>) {
///         ops.bench("bench_sum", |_| (0..5).sum::<u64>());
///     }
/// }
/// ```
pub trait Benchmark: Default + 'static {
    /// Documentation text, its first non-blank line is the suite label
    const DOC: Option<&'static str> = None;

    /// Suite-level iteration count
    const TIMES: Option<usize> = None;

    /// Register the suite's operations in declaration order
    fn operations(ops: &mut Operations<Self>);

    /// Hook called once before all operations
    fn before_class(&mut self) -> Result<()> {
        Ok(())
    }

    /// Hook called once before each operation
    fn before(&mut self) -> Result<()> {
        Ok(())
    }

    /// Hook called before each iteration
    fn before_each(&mut self) -> Result<()> {
        Ok(())
    }

    /// Hook called after each iteration
    fn after_each(&mut self) -> Result<()> {
        Ok(())
    }

    /// Hook called once after each operation
    fn after(&mut self) -> Result<()> {
        Ok(())
    }

    /// Hook called once after all operations
    fn after_class(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Register the suites of the current source file with the default loader.
///
/// Suites are recorded in the given order, under the module derived from the
/// invoking file name (`sort.bench.rs` registers module `sort`).
#[macro_export]
macro_rules! register_suites {
    ($($suite:ty),+ $(,)?) => {
        const _: () = {
            static SUITES: &[$crate::benchmarks::SuiteFactory] = &[
                $($crate::benchmarks::SuiteFactory::of::<$suite>(stringify!($suite))),+
            ];
            $crate::inventory::submit! {
                $crate::benchmarks::SuiteRegistration {
                    source: file!(),
                    line: line!(),
                    suites: SUITES,
                }
            }
        };
    };
}
