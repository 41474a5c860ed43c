//! Panic output of failing operations. Kept in its own test binary since it
//! replaces the process panic hook.

use anyhow::Result;
use minibench::benchmarks::{SuiteFactory, SuiteModule};
use minibench::{Benchmark, BenchmarkRunner, Operations, SuiteOverrides};
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Default)]
struct Panicky;

impl Benchmark for Panicky {
    const TIMES: Option<usize> = Some(3);

    fn operations(ops: &mut Operations<Self>) {
        ops.bench("bench_boom", |_| -> () { panic!("boom") });
        ops.bench("bench_fine", |_| 1 + 1);
    }
}

#[test]
fn test_operation_panics_are_not_printed() -> Result<()> {
    let printed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&printed);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let mut runner = BenchmarkRunner::builder()
        .source(SuiteModule::from_suites([SuiteFactory::of::<Panicky>("Panicky")]))
        .build()?;
    runner.run(&SuiteOverrides::default())?;

    let results = runner.completed()[0].result("bench_boom").unwrap();
    assert!(results.has_errors);
    assert!(!results.has_success);
    assert_eq!(printed.load(Ordering::SeqCst), 0);

    // Panics outside of benchmarked operations still reach the installed hook
    let outside = thread::spawn(|| -> () { panic!("not benchmarked") }).join();
    assert!(outside.is_err());
    assert_eq!(printed.load(Ordering::SeqCst), 1);

    let _ = panic::take_hook();
    Ok(())
}
