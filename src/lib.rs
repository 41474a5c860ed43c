pub mod benchmarks;
pub mod cli;
pub mod config;
pub mod error;
pub mod path_utils;
pub mod report;
pub mod timer;
pub mod utils;

pub use benchmarks::{
    Benchmark, BenchmarkRunner, Hooks, Operations, Suite, SuiteInstance, SuiteOptions,
    SuiteOverrides,
};
pub use error::{Failure, LoadError};
pub use report::Reporter;

#[doc(hidden)]
pub use inventory;
