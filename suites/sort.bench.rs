use anyhow::Result;
use minibench::{Benchmark, Operations};
use rand::seq::SliceRandom;

fn by_value(item: &(u32, u32)) -> u32 {
    item.1
}

/// Key/value pairs sorted by value, shuffled before every iteration
#[derive(Default)]
pub struct SortDict<const N: u32> {
    items: Vec<(u32, u32)>,
}

impl<const N: u32> SortDict<N> {
    fn register(ops: &mut Operations<Self>) {
        ops.bench("bench_pep265", |suite| {
            let mut items = suite.items.clone();
            items.sort_by_key(|&(_, value)| value);
            items
        });
        ops.bench("bench_stupid", |suite| {
            let mut swapped: Vec<(u32, u32)> = suite.items.iter().map(|&(k, v)| (v, k)).collect();
            swapped.sort();
            swapped.into_iter().map(|(v, k)| (k, v)).collect::<Vec<_>>()
        });
        ops.bench("bench_listExpansion", |suite| {
            let mut items: Vec<(u32, u32)> = suite.items.iter().copied().collect();
            items.sort_by(|a, b| a.1.cmp(&b.1));
            items
        });
        ops.bench("bench_unstable", |suite| {
            let mut items = suite.items.clone();
            items.sort_unstable_by_key(|&(_, value)| value);
            items
        });
        ops.bench("bench_formalFnInner", |suite| {
            fn inner(item: &(u32, u32)) -> u32 {
                item.1
            }
            let mut items = suite.items.clone();
            items.sort_by_key(inner);
            items
        });
        ops.bench("bench_formalFnOuter", |suite| {
            let mut items = suite.items.clone();
            items.sort_by_key(by_value);
            items
        })
        .doc("Sort with a named outer function");
    }

    fn fill(&mut self) {
        self.items = (0..N).zip(0..N).collect();
    }

    fn shuffle(&mut self) {
        self.items.shuffle(&mut rand::rng());
    }
}

pub type SortDictByValue = SortDict<100>;
pub type SortLargerDictByValue = SortDict<1000>;

impl Benchmark for SortDict<100> {
    const DOC: Option<&'static str> = Some(
        "
        Sort Dict with 100 Keys by Value

        Pairs are compared on their second element.
        ",
    );
    const TIMES: Option<usize> = Some(10000);

    fn operations(ops: &mut Operations<Self>) {
        Self::register(ops);
    }

    fn before_class(&mut self) -> Result<()> {
        self.fill();
        Ok(())
    }

    fn before_each(&mut self) -> Result<()> {
        self.shuffle();
        Ok(())
    }
}

impl Benchmark for SortDict<1000> {
    const DOC: Option<&'static str> = Some("Sort Dict with 1000 Keys by Value");
    const TIMES: Option<usize> = Some(1000);

    fn operations(ops: &mut Operations<Self>) {
        Self::register(ops);
    }

    fn before_class(&mut self) -> Result<()> {
        self.fill();
        Ok(())
    }

    fn before_each(&mut self) -> Result<()> {
        self.shuffle();
        Ok(())
    }
}

minibench::register_suites!(SortDictByValue, SortLargerDictByValue);
