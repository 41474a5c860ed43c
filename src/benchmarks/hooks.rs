use anyhow::Result;

use crate::benchmarks::SuiteInstance;

/// Callback fired once before or after each benchmarked operation
pub type MethodHook = Box<dyn FnMut(&dyn SuiteInstance, &str) -> Result<()>>;

/// Callback fired around each iteration of a benchmarked operation
pub type IterationHook = Box<dyn FnMut(&dyn SuiteInstance, &str, usize) -> Result<()>>;

/// External per-method hooks injected into a suite at construction.
///
/// These are distinct from the suite's own lifecycle methods: they receive the
/// running suite and the operation name, and any error they return aborts the
/// run.
#[derive(Default)]
pub struct Hooks {
    before: Option<MethodHook>,
    before_each: Option<IterationHook>,
    after: Option<MethodHook>,
    after_each: Option<IterationHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hook fired once before each operation
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&dyn SuiteInstance, &str) -> Result<()> + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Set the hook fired before each iteration
    pub fn before_each<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&dyn SuiteInstance, &str, usize) -> Result<()> + 'static,
    {
        self.before_each = Some(Box::new(hook));
        self
    }

    /// Set the hook fired once after each operation
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&dyn SuiteInstance, &str) -> Result<()> + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }

    /// Set the hook fired after each iteration
    pub fn after_each<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&dyn SuiteInstance, &str, usize) -> Result<()> + 'static,
    {
        self.after_each = Some(Box::new(hook));
        self
    }

    pub(crate) fn fire_before(&mut self, suite: &dyn SuiteInstance, method: &str) -> Result<()> {
        match self.before.as_mut() {
            Some(hook) => hook(suite, method),
            None => Ok(()),
        }
    }

    pub(crate) fn fire_after(&mut self, suite: &dyn SuiteInstance, method: &str) -> Result<()> {
        match self.after.as_mut() {
            Some(hook) => hook(suite, method),
            None => Ok(()),
        }
    }

    pub(crate) fn fire_before_each(
        &mut self,
        suite: &dyn SuiteInstance,
        method: &str,
        iteration: usize,
    ) -> Result<()> {
        match self.before_each.as_mut() {
            Some(hook) => hook(suite, method, iteration),
            None => Ok(()),
        }
    }

    pub(crate) fn fire_after_each(
        &mut self,
        suite: &dyn SuiteInstance,
        method: &str,
        iteration: usize,
    ) -> Result<()> {
        match self.after_each.as_mut() {
            Some(hook) => hook(suite, method, iteration),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("before", &self.before.is_some())
            .field("before_each", &self.before_each.is_some())
            .field("after", &self.after.is_some())
            .field("after_each", &self.after_each.is_some())
            .finish()
    }
}
