use anyhow::{Context, Result};
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::benchmarks::hooks::Hooks;
use crate::benchmarks::suite::{Suite, SuiteInstance, SuiteOptions};
use crate::benchmarks::Benchmark;
use crate::error::LoadError;

/// Default pattern used when no benchmark source is given
pub const DEFAULT_PATTERN: &str = "**/*.bench.rs";

const SOURCE_SUFFIX: &str = ".bench";

/// Builds instances of one suite definition
#[derive(Clone, Copy)]
pub struct SuiteFactory {
    name: &'static str,
    build: fn(&'static str, SuiteOptions, Hooks) -> Box<dyn SuiteInstance>,
}

impl SuiteFactory {
    /// Factory for the suite type `B`, reported under `name`
    pub const fn of<B: Benchmark>(name: &'static str) -> Self {
        Self {
            name,
            build: build_suite::<B>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Create a fresh, single-use suite instance
    pub fn instantiate(&self, options: SuiteOptions, hooks: Hooks) -> Box<dyn SuiteInstance> {
        (self.build)(self.name, options, hooks)
    }
}

impl std::fmt::Debug for SuiteFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteFactory")
            .field("name", &self.name)
            .finish()
    }
}

fn build_suite<B: Benchmark>(
    name: &'static str,
    options: SuiteOptions,
    hooks: Hooks,
) -> Box<dyn SuiteInstance> {
    Box::new(Suite::<B>::new(name, options, hooks))
}

/// A loaded benchmark module: an ordered list of suite definitions
#[derive(Debug, Clone, Default)]
pub struct SuiteModule {
    /// Module name derived from the source file, absent for in-memory modules
    pub name: Option<String>,
    pub suites: Vec<SuiteFactory>,
}

impl SuiteModule {
    /// An in-memory module, used to run suites without source files
    pub fn from_suites(suites: impl IntoIterator<Item = SuiteFactory>) -> Self {
        Self {
            name: None,
            suites: suites.into_iter().collect(),
        }
    }
}

/// Where a runner gets its suites from
#[derive(Debug, Clone)]
pub enum SuiteSource {
    /// A source file resolved through the runner's loader
    Path(PathBuf),
    /// An already loaded module
    Module(SuiteModule),
}

impl From<PathBuf> for SuiteSource {
    fn from(path: PathBuf) -> Self {
        SuiteSource::Path(path)
    }
}

impl From<&Path> for SuiteSource {
    fn from(path: &Path) -> Self {
        SuiteSource::Path(path.to_path_buf())
    }
}

impl From<SuiteModule> for SuiteSource {
    fn from(module: SuiteModule) -> Self {
        SuiteSource::Module(module)
    }
}

/// Maps a benchmark source file to the suites it defines
pub trait SuiteLoader {
    fn load(&self, path: &Path) -> Result<SuiteModule>;
}

/// Suites registered by a source file through [`register_suites!`](crate::register_suites)
#[derive(Debug)]
pub struct SuiteRegistration {
    /// Path of the registering source file, as given by `file!()`
    pub source: &'static str,
    /// Line of the registering macro call
    pub line: u32,
    pub suites: &'static [SuiteFactory],
}

inventory::collect!(SuiteRegistration);

/// Loader resolving source files against the suites compiled into this binary
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryLoader;

impl SuiteLoader for RegistryLoader {
    fn load(&self, path: &Path) -> Result<SuiteModule> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()).into());
        }
        let module = module_name(path)
            .with_context(|| format!("Invalid benchmark file name: {}", path.display()))?;

        let candidates: Vec<&SuiteRegistration> = inventory::iter::<SuiteRegistration>
            .into_iter()
            .filter(|registration| {
                module_name(Path::new(registration.source)).as_deref() == Some(module.as_str())
            })
            .collect();
        let mut registrations = match select_registrations(path, candidates) {
            Ok(registrations) => registrations,
            Err(sources) => {
                return Err(LoadError::Ambiguous {
                    path: path.to_path_buf(),
                    module,
                    sources,
                }
                .into())
            }
        };
        registrations.sort_by_key(|registration| registration.line);

        let suites: Vec<SuiteFactory> = registrations
            .iter()
            .flat_map(|registration| registration.suites.iter().copied())
            .collect();

        if suites.is_empty() {
            return Err(LoadError::NotRegistered {
                path: path.to_path_buf(),
                module,
            }
            .into());
        }

        debug!(
            "Loaded {} suites from {} (module `{}`)",
            suites.len(),
            path.display(),
            module
        );
        Ok(SuiteModule {
            name: Some(module),
            suites,
        })
    }
}

/// Registrations made by the source file at `path`.
///
/// Registrations whose `file!()` path is the longest suffix of `path` win.
/// Without such a match the module name alone decides, as long as a single
/// source registered it. Otherwise the competing sources are returned.
fn select_registrations<'a>(
    path: &Path,
    candidates: Vec<&'a SuiteRegistration>,
) -> std::result::Result<Vec<&'a SuiteRegistration>, Vec<&'static str>> {
    let target = path.canonicalize().unwrap_or_else(|_| normalize(path));
    let depth = |registration: &SuiteRegistration| {
        let source = normalize(Path::new(registration.source));
        target
            .ends_with(&source)
            .then(|| source.components().count())
    };

    let longest = candidates
        .iter()
        .filter_map(|&registration| depth(registration))
        .max();
    if let Some(longest) = longest {
        return Ok(candidates
            .into_iter()
            .filter(|&registration| depth(registration) == Some(longest))
            .collect());
    }

    let mut sources: Vec<&'static str> = candidates
        .iter()
        .map(|registration| registration.source)
        .collect();
    sources.sort_unstable();
    sources.dedup();
    if sources.len() > 1 {
        Err(sources)
    } else {
        Ok(candidates)
    }
}

/// Lexically resolve `.` and `..` segments: `src/../suites/sum.bench.rs` is
/// `suites/sum.bench.rs`
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Module name of a benchmark source file: `suites/sort.bench.rs` is `sort`
pub fn module_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.strip_suffix(SOURCE_SUFFIX).unwrap_or(stem);
    (!name.is_empty()).then(|| name.to_string())
}

/// Resolve a directory, file path or glob pattern into benchmark files.
///
/// A directory is searched recursively for `*.bench.rs` files.
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    let pattern = if path.is_dir() {
        path.join(DEFAULT_PATTERN).to_string_lossy().into_owned()
    } else if !has_glob_chars(pattern) {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()).into());
        }
        return Ok(vec![path.to_path_buf()]);
    } else {
        pattern.to_string()
    };

    let entries = glob::glob(&pattern).map_err(|source| LoadError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let file = entry.with_context(|| format!("Failed to read entry matching {pattern}"))?;
        if file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    debug!("Pattern {pattern:?} matched {} files", files.len());
    Ok(files)
}

fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    /// Run `f` with the working directory set to `dir`
    fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = f();
        std::env::set_current_dir(previous).unwrap();
        result
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name(Path::new("suites/sort.bench.rs")), Some("sort".into()));
        assert_eq!(module_name(Path::new("plain.rs")), Some("plain".into()));
        assert_eq!(module_name(Path::new("a/b/sum.bench")), Some("sum".into()));
        assert_eq!(module_name(Path::new(".bench.rs")), None);
    }

    fn registration(source: &'static str) -> SuiteRegistration {
        SuiteRegistration {
            source,
            line: 1,
            suites: &[],
        }
    }

    fn sources(selected: &[&SuiteRegistration]) -> Vec<&'static str> {
        selected.iter().map(|registration| registration.source).collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("src/../suites/sum.bench.rs")),
            PathBuf::from("suites/sum.bench.rs")
        );
        assert_eq!(normalize(Path::new("./a/./b.rs")), PathBuf::from("a/b.rs"));
        assert_eq!(normalize(Path::new("../a.rs")), PathBuf::from("../a.rs"));
    }

    #[test]
    fn test_same_stem_sources_are_told_apart() {
        let left = registration("tests/left/twin.bench.rs");
        let right = registration("tests/right/twin.bench.rs");

        let selected =
            select_registrations(Path::new("/work/tests/right/twin.bench.rs"), vec![&left, &right])
                .unwrap();
        assert_eq!(sources(&selected), vec!["tests/right/twin.bench.rs"]);

        let ambiguous = select_registrations(Path::new("/elsewhere/twin.bench.rs"), vec![&left, &right])
            .unwrap_err();
        assert_eq!(
            ambiguous,
            vec!["tests/left/twin.bench.rs", "tests/right/twin.bench.rs"]
        );
    }

    #[test]
    fn test_longest_suffix_wins() {
        let shallow = registration("twin.bench.rs");
        let deep = registration("src/../suites/twin.bench.rs");

        let selected =
            select_registrations(Path::new("/work/suites/twin.bench.rs"), vec![&shallow, &deep])
                .unwrap();
        assert_eq!(sources(&selected), vec!["src/../suites/twin.bench.rs"]);
    }

    #[test]
    fn test_unique_stem_falls_back_to_module_name() {
        let first = registration("suites/sum.bench.rs");
        let second = registration("suites/sum.bench.rs");

        let selected =
            select_registrations(Path::new("/copy/sum.bench.rs"), vec![&first, &second]).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(select_registrations(Path::new("/copy/sum.bench.rs"), Vec::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_resolve_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested/test.bench.rs");
        touch(&file);

        let resolved = resolve_pattern(file.to_str().unwrap()).unwrap();
        assert_eq!(resolved, vec![file]);
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.bench.rs");
        let err = resolve_pattern(missing.to_str().unwrap()).unwrap_err();
        assert!(err.downcast_ref::<LoadError>().is_some());
    }

    #[test]
    fn test_resolve_glob() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("nested/test1.bench.rs"));
        touch(&dir.path().join("nested/test2.bench.rs"));
        touch(&dir.path().join("nested/other.txt"));

        let pattern = dir.path().join("nested/*.bench.rs");
        let resolved = resolve_pattern(pattern.to_str().unwrap()).unwrap();
        assert_eq!(
            resolved,
            vec![
                dir.path().join("nested/test1.bench.rs"),
                dir.path().join("nested/test2.bench.rs"),
            ]
        );
    }

    #[test]
    fn test_resolve_directory_is_recursive() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("nested/test1.bench.rs"));
        touch(&dir.path().join("nested/deeper/test2.bench.rs"));
        touch(&dir.path().join("nested/deeper/helper.rs"));

        let resolved = resolve_pattern(dir.path().join("nested").to_str().unwrap()).unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(resolved.contains(&dir.path().join("nested/test1.bench.rs")));
        assert!(resolved.contains(&dir.path().join("nested/deeper/test2.bench.rs")));
    }

    #[test]
    #[serial]
    fn test_resolve_default_pattern_from_cwd() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.bench.rs"));
        touch(&dir.path().join("sub/b.bench.rs"));

        let resolved = in_dir(dir.path(), || resolve_pattern(DEFAULT_PATTERN).unwrap());
        assert_eq!(
            resolved,
            vec![PathBuf::from("a.bench.rs"), PathBuf::from("sub/b.bench.rs")]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_pattern("suites/[*.bench.rs").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Pattern { .. })
        ));
    }

    #[test]
    fn test_registry_loader_missing_file() {
        let err = RegistryLoader
            .load(Path::new("does/not/exist.bench.rs"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotFound(_))
        ));
    }

    #[test]
    fn test_registry_loader_unregistered_module() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("unknown_module.bench.rs");
        touch(&file);

        let err = RegistryLoader.load(&file).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotRegistered { .. })
        ));
    }
}
