use minibench::{Benchmark, Operations};

#[derive(Default)]
pub struct LeftTwin;

impl Benchmark for LeftTwin {
    const TIMES: Option<usize> = Some(2);

    fn operations(ops: &mut Operations<Self>) {
        ops.bench("bench_left", |_| [3u8, 1, 2].iter().max().copied());
    }
}

minibench::register_suites!(LeftTwin);
