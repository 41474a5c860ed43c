use std::any::Any;
use std::cell::Cell;
use std::fmt::Display;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;

use crate::error::Failure;

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the process panic hook so that panics raised while a benchmarked
/// operation runs on this thread are not printed. Other panics still reach
/// the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !capturing() {
                previous(info);
            }
        }));
    });
}

/// Whether the current thread is running a benchmarked operation
fn capturing() -> bool {
    CAPTURING.with(Cell::get)
}

/// Run `f`, turning a panic into its payload without printing it
fn capture<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    install_quiet_hook();
    let outer = CAPTURING.with(|flag| flag.replace(true));
    let result = catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|flag| flag.set(outer));
    result
}

type OperationFn<B> = Box<dyn FnMut(&mut B) -> Result<Box<dyn Any>, Failure>>;

/// A single benchmarked operation of a suite
pub struct Operation<B> {
    name: String,
    doc: Option<&'static str>,
    func: OperationFn<B>,
}

impl<B> Operation<B> {
    /// Attach a documentation string used to derive the display label
    pub fn doc(&mut self, doc: &'static str) -> &mut Self {
        self.doc = Some(doc);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn documentation(&self) -> Option<&'static str> {
        self.doc
    }

    /// Invoke the operation once, capturing panics and returned errors
    #[inline]
    pub(crate) fn call(&mut self, bench: &mut B) -> Result<Box<dyn Any>, Failure> {
        (self.func)(bench)
    }
}

impl<B> std::fmt::Debug for Operation<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish()
    }
}

/// Ordered registry of a suite's operations, built once per suite instance
pub struct Operations<B> {
    items: Vec<Operation<B>>,
}

impl<B: 'static> Operations<B> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Register an operation; a panic inside it is recorded as a failure
    pub fn bench<R, F>(&mut self, name: &str, mut f: F) -> &mut Operation<B>
    where
        R: 'static,
        F: FnMut(&mut B) -> R + 'static,
    {
        self.push(
            name,
            Box::new(move |bench: &mut B| {
                capture(|| f(bench))
                    .map(|value| Box::new(std::hint::black_box(value)) as Box<dyn Any>)
                    .map_err(Failure::from_panic)
            }),
        )
    }

    /// Register a fallible operation; an `Err` or a panic is recorded as a failure
    pub fn try_bench<R, E, F>(&mut self, name: &str, mut f: F) -> &mut Operation<B>
    where
        R: 'static,
        E: Display + 'static,
        F: FnMut(&mut B) -> Result<R, E> + 'static,
    {
        self.push(
            name,
            Box::new(move |bench: &mut B| {
                match capture(|| f(bench)) {
                    Ok(Ok(value)) => Ok(Box::new(std::hint::black_box(value)) as Box<dyn Any>),
                    Ok(Err(error)) => Err(Failure::from_error(&error)),
                    Err(payload) => Err(Failure::from_panic(payload)),
                }
            }),
        )
    }

    fn push(&mut self, name: &str, func: OperationFn<B>) -> &mut Operation<B> {
        self.items.push(Operation {
            name: name.to_string(),
            doc: None,
            func,
        });
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation<B>> {
        self.items.iter()
    }

    /// Keep only the operations whose name starts with `prefix`
    pub(crate) fn retain_prefixed(&mut self, prefix: &str) {
        self.items.retain(|op| op.name.starts_with(prefix));
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Operation<B>> {
        self.items.get_mut(index)
    }
}

impl<B: 'static> Default for Operations<B> {
    fn default() -> Self {
        Self::new()
    }
}
