use minibench::{Benchmark, Operations};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[derive(Default)]
pub struct TimeTests;

impl Benchmark for TimeTests {
    const DOC: Option<&'static str> = Some("Wall clock vs. monotonic clock");
    const TIMES: Option<usize> = Some(100);

    fn operations(ops: &mut Operations<Self>) {
        ops.try_bench("bench_system_time", |_| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| format!("{}.{:09}Z", elapsed.as_secs(), elapsed.subsec_nanos()))
        });
        ops.bench("bench_instant", |_| Instant::now());
    }
}

minibench::register_suites!(TimeTests);
