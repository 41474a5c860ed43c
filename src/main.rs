use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use minibench::cli::{self, Cli};

#[path = "../suites/datetimes.bench.rs"]
mod datetimes;
#[path = "../suites/globs.bench.rs"]
mod globs;
#[path = "../suites/pause.bench.rs"]
mod pause;
#[path = "../suites/sort.bench.rs"]
mod sort;
#[path = "../suites/sum.bench.rs"]
mod sum;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    cli::run(Cli::parse())
}
