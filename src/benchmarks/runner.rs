use anyhow::Result;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

use crate::benchmarks::hooks::Hooks;
use crate::benchmarks::loader::{RegistryLoader, SuiteFactory, SuiteLoader, SuiteSource};
use crate::benchmarks::suite::{SuiteInstance, SuiteOptions};
use crate::benchmarks::DEFAULT_PREFIX;
use crate::report::{self, Reporter};

type SharedReporters = Rc<RefCell<Vec<Box<dyn Reporter>>>>;

/// A reporter given to the runner, either ready to use or by kind
pub enum ReporterArg {
    /// A configured reporter instance
    Instance(Box<dyn Reporter>),
    /// A reporter kind to instantiate with its defaults
    Kind(String),
}

impl<R: Reporter + 'static> From<R> for ReporterArg {
    fn from(reporter: R) -> Self {
        ReporterArg::Instance(Box::new(reporter))
    }
}

/// Construction overrides applied uniformly to every suite of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteOverrides {
    /// Global iteration count
    pub times: Option<usize>,
    /// Operation name prefix
    pub prefix: String,
}

impl Default for SuiteOverrides {
    fn default() -> Self {
        Self {
            times: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Read access to the runner state given to reporters
pub struct RunContext<'a> {
    /// Discovered suite definitions, in discovery order
    pub benchmarks: &'a [SuiteFactory],
    /// Suites that completed their run, in execution order
    pub completed: &'a [Box<dyn SuiteInstance>],
}

/// Builder for [`BenchmarkRunner`]
pub struct RunnerBuilder {
    sources: Vec<SuiteSource>,
    reporters: Vec<ReporterArg>,
    loader: Box<dyn SuiteLoader>,
    debug: bool,
}

impl RunnerBuilder {
    pub fn source(mut self, source: impl Into<SuiteSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SuiteSource>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn reporter(mut self, reporter: impl Into<ReporterArg>) -> Self {
        self.reporters.push(reporter.into());
        self
    }

    /// Add a reporter by kind, see [`report::from_kind`]
    pub fn reporter_kind(mut self, kind: &str) -> Self {
        self.reporters.push(ReporterArg::Kind(kind.to_string()));
        self
    }

    /// Replace the loader used for [`SuiteSource::Path`] sources
    pub fn loader(mut self, loader: impl SuiteLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Load every source and bind the supported reporters
    pub fn build(self) -> Result<BenchmarkRunner> {
        let mut benchmarks = Vec::new();
        for source in self.sources {
            let module = match source {
                SuiteSource::Path(path) => self.loader.load(&path)?,
                SuiteSource::Module(module) => module,
            };
            debug!(
                "Discovered {} suites in {}",
                module.suites.len(),
                module.name.as_deref().unwrap_or("<in-memory module>")
            );
            benchmarks.extend(module.suites);
        }

        let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();
        for reporter in self.reporters {
            match reporter {
                ReporterArg::Instance(reporter) => reporters.push(reporter),
                ReporterArg::Kind(kind) => match report::from_kind(&kind) {
                    Some(reporter) => reporters.push(reporter),
                    None => warn!("Unsupported reporter {kind:?}, ignoring it"),
                },
            }
        }

        Ok(BenchmarkRunner {
            benchmarks,
            reporters: Rc::new(RefCell::new(reporters)),
            completed: Vec::new(),
            debug: self.debug,
        })
    }
}

/// Collects benchmark suites, runs them in order and broadcasts lifecycle
/// events to every attached reporter
pub struct BenchmarkRunner {
    benchmarks: Vec<SuiteFactory>,
    reporters: SharedReporters,
    completed: Vec<Box<dyn SuiteInstance>>,
    debug: bool,
}

impl BenchmarkRunner {
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder {
            sources: Vec::new(),
            reporters: Vec::new(),
            loader: Box::new(RegistryLoader),
            debug: false,
        }
    }

    /// Discovered suite definitions
    pub fn benchmarks(&self) -> &[SuiteFactory] {
        &self.benchmarks
    }

    /// Suites that already ran
    pub fn completed(&self) -> &[Box<dyn SuiteInstance>] {
        &self.completed
    }

    pub fn reporter_count(&self) -> usize {
        self.reporters.borrow().len()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Run every discovered suite, one after another
    pub fn run(&mut self, overrides: &SuiteOverrides) -> Result<()> {
        if self.benchmarks.is_empty() {
            warn!("No benchmark suites to run");
        }
        self.broadcast_run(|reporter, ctx| reporter.start(ctx))?;

        for factory in self.benchmarks.clone() {
            let options = SuiteOptions {
                times: overrides.times,
                prefix: overrides.prefix.clone(),
                debug: self.debug,
            };
            let mut suite = factory.instantiate(options, self.reporter_hooks());

            self.broadcast(|reporter| reporter.before_class(suite.as_ref()))?;
            suite.run()?;
            self.broadcast(|reporter| reporter.after_class(suite.as_ref()))?;
            self.completed.push(suite);
        }

        self.broadcast_run(|reporter, ctx| reporter.end(ctx))?;
        info!("Ran {} benchmark suites", self.completed.len());
        Ok(())
    }

    /// Hooks forwarding per-method events to the reporters
    fn reporter_hooks(&self) -> Hooks {
        let before = Rc::clone(&self.reporters);
        let after = Rc::clone(&self.reporters);
        let progress = Rc::clone(&self.reporters);

        Hooks::new()
            .before(move |suite, method| {
                for reporter in before.borrow_mut().iter_mut() {
                    reporter.before_method(suite, method)?;
                }
                Ok(())
            })
            .after(move |suite, method| {
                for reporter in after.borrow_mut().iter_mut() {
                    reporter.after_method(suite, method)?;
                }
                Ok(())
            })
            .after_each(move |suite, method, iteration| {
                for reporter in progress.borrow_mut().iter_mut() {
                    reporter.progress(suite, method, iteration)?;
                }
                Ok(())
            })
    }

    fn broadcast<F>(&self, mut event: F) -> Result<()>
    where
        F: FnMut(&mut dyn Reporter) -> Result<()>,
    {
        for reporter in self.reporters.borrow_mut().iter_mut() {
            event(reporter.as_mut())?;
        }
        Ok(())
    }

    fn broadcast_run<F>(&self, mut event: F) -> Result<()>
    where
        F: FnMut(&mut dyn Reporter, &RunContext<'_>) -> Result<()>,
    {
        let ctx = RunContext {
            benchmarks: &self.benchmarks,
            completed: &self.completed,
        };
        for reporter in self.reporters.borrow_mut().iter_mut() {
            event(reporter.as_mut(), &ctx)?;
        }
        Ok(())
    }
}
