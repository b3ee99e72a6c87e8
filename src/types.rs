use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Plain counters for one scope (an extension, or the whole run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySnapshot {
    pub files: u64,
    pub lines: u64,
    pub code: u64,
    pub comments: u64,
    pub blanks: u64,
}

impl TallySnapshot {
    /// `true` when every line was counted as exactly one of code, comment or blank.
    pub fn is_consistent(&self) -> bool {
        self.lines == self.code + self.comments + self.blanks
    }
}

/// A path that was left out of the counts because it could not be read.
///
/// Only produced when the run uses [`ErrorPolicy::Skip`](crate::ErrorPolicy::Skip).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// The complete result of a run, taken after every traversal task has finished.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyReport {
    /// Per-extension counts keyed by the extension including its leading dot
    /// (`".rs"`), sorted by key.
    pub extensions: BTreeMap<String, TallySnapshot>,
    /// Counts summed over every extension.
    pub total: TallySnapshot,
    /// Number of directories successfully listed. Zero when the root was a file.
    pub directories: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedPath>,
}
