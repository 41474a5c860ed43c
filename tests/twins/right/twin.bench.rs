use minibench::{Benchmark, Operations};

#[derive(Default)]
pub struct RightTwin;

#[derive(Default)]
pub struct RightSibling;

impl Benchmark for RightTwin {
    const TIMES: Option<usize> = Some(2);

    fn operations(ops: &mut Operations<Self>) {
        ops.bench("bench_right", |_| "right".len());
    }
}

impl Benchmark for RightSibling {
    const TIMES: Option<usize> = Some(2);

    fn operations(ops: &mut Operations<Self>) {
        ops.bench("bench_sibling", |_| "sibling".chars().rev().count());
    }
}

minibench::register_suites!(RightTwin);
minibench::register_suites!(RightSibling);
