use minibench::{Benchmark, Operations};
use std::thread;
use std::time::Duration;

#[derive(Default)]
pub struct PauseBenchmark;

impl Benchmark for PauseBenchmark {
    const TIMES: Option<usize> = Some(10);

    fn operations(ops: &mut Operations<Self>) {
        ops.bench("bench_one_hundredth", |_| {
            thread::sleep(Duration::from_millis(10))
        });
        ops.bench("bench_one_tenth", |_| thread::sleep(Duration::from_millis(100)));
    }
}

minibench::register_suites!(PauseBenchmark);
