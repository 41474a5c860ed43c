use minibench::{Benchmark, Operations};

#[derive(Default)]
pub struct SumBenchmark;

impl Benchmark for SumBenchmark {
    const TIMES: Option<usize> = Some(1000);

    fn operations(ops: &mut Operations<Self>) {
        ops.bench("bench_sum", |_| (0..5u64).sum::<u64>());
        ops.bench("bench_consecutive_add", |_| {
            let mut total = 0u64;
            for x in 0..5 {
                total += x;
            }
            total
        });
    }
}

minibench::register_suites!(SumBenchmark);
