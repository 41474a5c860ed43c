use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;

use crate::benchmarks::SuiteInstance;

/// Summary key of a suite: its type name and configured iteration count
pub fn summary_key(name: &str, times: usize) -> String {
    format!("{name}-{times}")
}

/// Aggregated view of one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Operation name
    #[serde(skip)]
    pub method: String,
    /// Display label
    pub name: String,
    /// Total duration in seconds
    pub total: f64,
    /// Mean duration in seconds over the configured iteration count
    pub mean: f64,
}

/// Aggregated view of one completed suite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteSummary {
    #[serde(skip)]
    pub key: String,
    /// Display label
    pub name: String,
    pub times: usize,
    #[serde(serialize_with = "serialize_runs")]
    pub runs: Vec<RunSummary>,
}

/// Execution summary of a run, in completion order.
///
/// Serializes as `{"<Suite>-<times>": {"name", "times", "runs": {"<method>":
/// {"name", "total", "mean"}}}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub suites: Vec<SuiteSummary>,
}

impl Summary {
    /// Compute the summary of completed suite instances
    pub fn from_suites(suites: &[Box<dyn SuiteInstance>]) -> Self {
        let suites = suites
            .iter()
            .map(|suite| {
                let times = suite.times();
                let runs = suite
                    .results()
                    .iter()
                    .map(|results| RunSummary {
                        method: results.method.clone(),
                        name: suite.label_for(&results.method),
                        total: results.total,
                        mean: results.mean(times),
                    })
                    .collect();
                SuiteSummary {
                    key: summary_key(suite.name(), times),
                    name: suite.label(),
                    times,
                    runs,
                }
            })
            .collect();
        Self { suites }
    }

    pub fn get(&self, key: &str) -> Option<&SuiteSummary> {
        self.suites.iter().find(|suite| suite.key == key)
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.suites.len()))?;
        for suite in &self.suites {
            map.serialize_entry(&suite.key, suite)?;
        }
        map.end()
    }
}

fn serialize_runs<S: Serializer>(runs: &[RunSummary], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(runs.len()))?;
    for run in runs {
        map.serialize_entry(&run.method, run)?;
    }
    map.end()
}

/// A previously captured run, as written by the JSON reporter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference {
    pub suites: HashMap<String, ReferenceSuite>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSuite {
    pub name: String,
    pub times: usize,
    #[serde(default)]
    pub runs: HashMap<String, ReferenceRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRun {
    pub name: String,
    pub total: f64,
    pub mean: f64,
}

impl Reference {
    /// Load a JSON snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference file: {path:?}"))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse reference JSON from file: {path:?}"))
    }

    /// Reference values of one operation of a suite
    pub fn run(&self, key: &str, method: &str) -> Option<&ReferenceRun> {
        self.suites.get(key)?.runs.get(method)
    }
}
