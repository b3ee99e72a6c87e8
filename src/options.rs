use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names and extensions skipped when no extension allow-list is given.
pub const DEFAULT_EXCLUDES: [&str; 9] = [
    "node-modules",
    ".node",
    ".git",
    ".gitignore",
    "Makefile",
    ".DS_Store",
    "dist",
    ".toml",
    ".yml",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}

/// What to do when a file or directory cannot be read during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop the run and return the first error. No report is produced.
    #[default]
    Abort,
    /// Leave the path out, record it in [`TallyReport::skipped`](crate::TallyReport::skipped)
    /// and keep going.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyOptions {
    pub root: PathBuf,
    /// Extension allow-list (`".rs"`, `".py"`). Empty means "everything not excluded".
    pub extensions: Vec<String>,
    /// Entry names and extensions skipped when `extensions` is empty.
    pub exclude: Vec<String>,
    /// Glob patterns matched against the full entry path, not just its name
    /// (`**/vendor`, not `vendor`); matches are skipped in every mode.
    pub ignore_patterns: Vec<String>,
    pub binary_detection: BinaryDetection,
    pub error_policy: ErrorPolicy,
}
impl Default for TallyOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: Vec::new(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: Vec::new(),
            binary_detection: BinaryDetection::None,
            error_policy: ErrorPolicy::Abort,
        }
    }
}
#[derive(Debug, Default)]
pub struct TallyBuilder {
    options: TallyOptions,
}
impl TallyBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: TallyOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    /// Switches to allow-list mode. A missing leading dot is added (`"rs"` becomes `".rs"`).
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extensions = extensions
            .into_iter()
            .map(Into::into)
            .filter(|ext| !ext.is_empty())
            .map(|ext| {
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self
    }
    pub fn exclude(mut self, names: Vec<String>) -> Self {
        self.options.exclude = names;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.options.error_policy = policy;
        self
    }
    pub fn build(self) -> TallyOptions {
        self.options
    }
}
