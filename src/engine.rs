use crate::error::TallyError;
use crate::options::{ErrorPolicy, TallyOptions};
use crate::scanner::{extension_key, scan_file};
use crate::store::AggregationStore;
use crate::types::{SkippedPath, TallyReport};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
#[cfg(feature = "logging")]
use tracing;

/// Shared state of one run. Every traversal task borrows the same walker.
struct Walker<'a> {
    options: &'a TallyOptions,
    store: AggregationStore,
    matcher: Option<GlobSet>,
    failure: Mutex<Option<TallyError>>,
    skipped: Mutex<Vec<SkippedPath>>,
    cancelled: AtomicBool,
}
impl<'a> Walker<'a> {
    fn new(options: &'a TallyOptions) -> Result<Self, TallyError> {
        let matcher = if !options.ignore_patterns.is_empty() {
            let mut glob_builder = GlobSetBuilder::new();
            for pattern in &options.ignore_patterns {
                let glob = Glob::new(pattern)
                    .map_err(|e| TallyError::Pattern(format!("'{}': {}", pattern, e)))?;
                glob_builder.add(glob);
            }
            Some(glob_builder.build().map_err(|e| {
                TallyError::Pattern(format!("Failed to build glob set: {}", e))
            })?)
        } else {
            None
        };
        Ok(Self {
            options,
            store: AggregationStore::new(),
            matcher,
            failure: Mutex::new(None),
            skipped: Mutex::new(Vec::new()),
            cancelled: AtomicBool::new(false),
        })
    }
    fn allow_list_mode(&self) -> bool {
        !self.options.extensions.is_empty()
    }
    fn is_excluded(&self, name: &str) -> bool {
        self.options.exclude.iter().any(|ex| ex == name)
    }
    fn is_ignored(&self, path: &Path) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(path))
    }
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
    fn fail(&self, error: TallyError) {
        match self.options.error_policy {
            ErrorPolicy::Abort => {
                let mut slot = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.is_none() {
                    *slot = Some(error);
                }
                self.cancelled.store(true, Ordering::Relaxed);
            }
            ErrorPolicy::Skip => {
                #[cfg(feature = "logging")]
                tracing::warn!("Skipping: {}", error);
                let path = error
                    .offending_path()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                self.skipped
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(SkippedPath {
                        path,
                        reason: error.to_string(),
                    });
            }
        }
    }
    /// Applies the extension rules to a file and scans it if they pass.
    fn scan(&self, path: &Path) {
        if self.is_cancelled() {
            return;
        }
        let Some(key) = extension_key(path) else {
            return;
        };
        if self.allow_list_mode() {
            if !self.options.extensions.contains(&key) {
                return;
            }
        } else if self.is_excluded(&key) {
            return;
        }
        if let Err(e) = scan_file(path, &key, &self.store, self.options.binary_detection) {
            self.fail(e);
        }
    }
    /// Lists `path`, scans the files in it and returns the subdirectories still
    /// to be walked. A `path` that cannot be listed and is not a directory is
    /// scanned as a single file.
    fn visit(&self, path: &Path) -> Vec<PathBuf> {
        if self.is_cancelled() {
            return Vec::new();
        }
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.is_dir() {
                    self.fail(TallyError::list(path, e));
                } else {
                    self.scan(path);
                }
                return Vec::new();
            }
        };
        self.store.increment_directories();
        let allow_list = self.allow_list_mode();
        let mut subdirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.fail(TallyError::list(path, e));
                    continue;
                }
            };
            if !allow_list && self.is_excluded(&entry.file_name().to_string_lossy()) {
                continue;
            }
            let entry_path = entry.path();
            if self.is_ignored(&entry_path) {
                continue;
            }
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    self.fail(TallyError::open(&entry_path, e));
                    continue;
                }
            };
            if file_type.is_dir() {
                subdirs.push(entry_path);
            } else if file_type.is_file() {
                self.scan(&entry_path);
            } else if file_type.is_symlink() {
                match fs::metadata(&entry_path) {
                    Ok(meta) if meta.is_file() => self.scan(&entry_path),
                    Ok(_) => {
                        #[cfg(feature = "logging")]
                        tracing::debug!("Not following link: {}", entry_path.display());
                    }
                    // dangling: let the open fail and report it
                    Err(_) => self.scan(&entry_path),
                }
            }
        }
        subdirs
    }
    #[cfg(feature = "parallel")]
    fn walk<'s>(&'s self, scope: &rayon::Scope<'s>, dir: PathBuf) {
        for subdir in self.visit(&dir) {
            scope.spawn(move |scope| self.walk(scope, subdir));
        }
    }
    #[cfg(not(feature = "parallel"))]
    fn walk(&self, dir: PathBuf) {
        for subdir in self.visit(&dir) {
            self.walk(subdir);
        }
    }
    fn finish(self) -> Result<TallyReport, TallyError> {
        if let Some(error) = self
            .failure
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(error);
        }
        let mut report = self.store.snapshot();
        report.skipped = self
            .skipped
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        report.skipped.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(report)
    }
}
/// Walks `options.root` and returns the counts once every traversal task has
/// finished.
///
/// With the `parallel` feature each directory is walked as its own rayon task;
/// files are scanned by the task that lists them.
///
/// # Errors
///
/// [`TallyError::Path`] if the root does not exist, [`TallyError::Pattern`] for
/// an invalid ignore glob, and under [`ErrorPolicy::Abort`] the first open,
/// read or listing error met during the walk.
pub fn tally(options: TallyOptions) -> Result<TallyReport, TallyError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Starting tally with root: {}", options.root.display());
    fs::metadata(&options.root).map_err(|e| TallyError::path(&options.root, e))?;
    let walker = Walker::new(&options)?;
    #[cfg(feature = "parallel")]
    rayon::scope(|scope| walker.walk(scope, options.root.clone()));
    #[cfg(not(feature = "parallel"))]
    walker.walk(options.root.clone());
    let report = walker.finish()?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        files = report.total.files,
        directories = report.directories,
        skipped = report.skipped.len(),
        "Tally finished"
    );
    Ok(report)
}
