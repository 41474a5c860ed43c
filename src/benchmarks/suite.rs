use anyhow::Result;
use log::debug;
use std::any::Any;

use crate::benchmarks::hooks::Hooks;
use crate::benchmarks::operation::Operations;
use crate::benchmarks::results::{MethodResults, RunResult};
use crate::benchmarks::{Benchmark, DEFAULT_PREFIX, DEFAULT_TIMES};
use crate::timer::Timer;
use crate::utils::{doc_label, humanize};

/// Construction options for a suite instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteOptions {
    /// Iteration count override, takes precedence over the suite's own `TIMES`
    pub times: Option<usize>,
    /// Operation name prefix
    pub prefix: String,
    /// Stop iterating an operation at its first failure
    pub debug: bool,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            times: None,
            prefix: DEFAULT_PREFIX.to_string(),
            debug: false,
        }
    }
}

impl SuiteOptions {
    pub fn times(mut self, times: usize) -> Self {
        self.times = Some(times);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A live, single-use suite instance as seen by runners, hooks and reporters
pub trait SuiteInstance {
    /// Suite type name, used in summary keys
    fn name(&self) -> &str;

    /// Human readable suite label
    fn label(&self) -> String;

    /// Human readable label of an operation
    fn label_for(&self, method: &str) -> String;

    /// Configured iteration count
    fn times(&self) -> usize;

    fn prefix(&self) -> &str;

    fn debug(&self) -> bool;

    /// Names of the benchmarked operations, in execution order
    fn methods(&self) -> Vec<&str>;

    /// Aggregated results, in execution order
    fn results(&self) -> &[MethodResults];

    fn result(&self, method: &str) -> Option<&MethodResults> {
        self.results().iter().find(|r| r.method == method)
    }

    /// Run every benchmarked operation `times` times
    fn run(&mut self) -> Result<()>;

    fn as_any(&self) -> &dyn Any;
}

/// Execution context binding a suite definition to its options and hooks
pub struct Suite<B: Benchmark> {
    name: &'static str,
    bench: B,
    operations: Operations<B>,
    methods: Vec<(String, Option<&'static str>)>,
    times: usize,
    prefix: String,
    debug: bool,
    hooks: Hooks,
    results: Vec<MethodResults>,
}

impl<B: Benchmark> Suite<B> {
    pub fn new(name: &'static str, options: SuiteOptions, hooks: Hooks) -> Self {
        let times = options
            .times
            .filter(|t| *t > 0)
            .or(B::TIMES.filter(|t| *t > 0))
            .unwrap_or(DEFAULT_TIMES);

        let mut operations = Operations::new();
        B::operations(&mut operations);
        operations.retain_prefixed(&options.prefix);
        let methods = operations
            .iter()
            .map(|op| (op.name().to_string(), op.documentation()))
            .collect();

        Self {
            name,
            bench: B::default(),
            operations,
            methods,
            times,
            prefix: options.prefix,
            debug: options.debug,
            hooks,
            results: Vec::new(),
        }
    }

    /// The user-defined suite value
    pub fn bench(&self) -> &B {
        &self.bench
    }

    fn execute(&mut self, hooks: &mut Hooks, operations: &mut Operations<B>) -> Result<()> {
        debug!(
            "Running {} operations of {} ({} times)",
            operations.len(),
            self.name,
            self.times
        );

        self.bench.before_class()?;

        for index in 0..operations.len() {
            let Some(operation) = operations.get_mut(index) else {
                break;
            };
            let method = operation.name().to_string();
            self.results.push(MethodResults::new(&method));
            let slot = self.results.len() - 1;

            hooks.fire_before(&*self, &method)?;
            self.bench.before()?;

            for i in 0..self.times {
                hooks.fire_before_each(&*self, &method, i)?;
                self.bench.before_each()?;

                let timer = Timer::start();
                let outcome = operation.call(&mut self.bench);
                let duration = timer.stop();

                self.bench.after_each()?;
                let stop = self.results[slot].fold(RunResult { duration, outcome }, self.debug);
                hooks.fire_after_each(&*self, &method, i)?;

                if stop {
                    debug!("Stopping {method} after failed iteration {i}");
                    break;
                }
            }

            self.bench.after()?;
            hooks.fire_after(&*self, &method)?;
        }

        self.bench.after_class()
    }
}

impl<B: Benchmark> SuiteInstance for Suite<B> {
    fn name(&self) -> &str {
        self.name
    }

    fn label(&self) -> String {
        doc_label(B::DOC).unwrap_or_else(|| humanize(self.name))
    }

    fn label_for(&self, method: &str) -> String {
        let doc = self
            .methods
            .iter()
            .find(|(name, _)| name == method)
            .and_then(|(_, doc)| *doc);
        doc_label(doc).unwrap_or_else(|| {
            humanize(method.strip_prefix(self.prefix.as_str()).unwrap_or(method))
        })
    }

    fn times(&self) -> usize {
        self.times
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn debug(&self) -> bool {
        self.debug
    }

    fn methods(&self) -> Vec<&str> {
        self.methods.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn results(&self) -> &[MethodResults] {
        &self.results
    }

    fn run(&mut self) -> Result<()> {
        if self.methods.is_empty() {
            debug!("No operations matching {:?} in {}", self.prefix, self.name);
            return Ok(());
        }

        let mut hooks = std::mem::take(&mut self.hooks);
        let mut operations = std::mem::take(&mut self.operations);
        let outcome = self.execute(&mut hooks, &mut operations);
        self.hooks = hooks;
        self.operations = operations;
        outcome
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
