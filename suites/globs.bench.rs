use anyhow::{Context, Result};
use minibench::{Benchmark, Operations};
use std::fs;
use std::path::{Path, PathBuf};

const FILES: usize = 100;

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[derive(Default)]
pub struct BenchmarkGlobs {
    root: PathBuf,
}

impl Benchmark for BenchmarkGlobs {
    const DOC: Option<&'static str> = Some(
        "
        Glob benchmark

        Matches `*.txt` files in a scratch directory.
        ",
    );

    fn operations(ops: &mut Operations<Self>) {
        ops.try_bench("bench_glob", |suite| {
            let pattern = suite.root.join("**").join("*.txt");
            glob::glob(&pattern.to_string_lossy())
                .map(|paths| paths.flatten().count())
                .map_err(|e| e.to_string())
        });
        ops.try_bench("bench_extension", |suite| {
            let mut files = Vec::new();
            walk(&suite.root, &mut files)?;
            let matched = files
                .iter()
                .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
                .count();
            Ok::<_, std::io::Error>(matched)
        });
        ops.try_bench("bench_suffix", |suite| {
            let mut files = Vec::new();
            walk(&suite.root, &mut files)?;
            let matched = files
                .iter()
                .filter(|path| path.to_string_lossy().ends_with(".txt"))
                .count();
            Ok::<_, std::io::Error>(matched)
        });
    }

    fn before_class(&mut self) -> Result<()> {
        self.root = std::env::temp_dir().join(format!("minibench-globs-{}", std::process::id()));
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create directory: {:?}", self.root))?;
        for i in 0..FILES {
            let path = self.root.join(format!("file{i}.txt"));
            fs::write(&path, "").with_context(|| format!("Failed to write {path:?}"))?;
        }
        Ok(())
    }

    fn after_class(&mut self) -> Result<()> {
        fs::remove_dir_all(&self.root)
            .with_context(|| format!("Failed to remove directory: {:?}", self.root))
    }
}

minibench::register_suites!(BenchmarkGlobs);
