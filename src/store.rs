//! Concurrent aggregation of line counts.
//!
//! Every traversal task writes into one shared [`AggregationStore`]. Counters are
//! atomics and only ever grow, so writers never block each other on the hot path;
//! the map lock is taken only to look up or publish an extension record.
//!
//! Reading is only meaningful once all writers have been joined. The store makes
//! no attempt to give a consistent view while a scan is still running.

use crate::scanner::FileTally;
use crate::types::{TallyReport, TallySnapshot};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Selects one of the five counters of a [`Tally`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyField {
    Files,
    Lines,
    Comments,
    Blanks,
    Code,
}

/// Five monotonically increasing counters.
#[derive(Debug, Default)]
pub struct Tally {
    files: AtomicU64,
    lines: AtomicU64,
    comments: AtomicU64,
    blanks: AtomicU64,
    code: AtomicU64,
}

/// Running counts for one file extension.
pub type ExtensionTally = Tally;

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, field: TallyField) -> &AtomicU64 {
        match field {
            TallyField::Files => &self.files,
            TallyField::Lines => &self.lines,
            TallyField::Comments => &self.comments,
            TallyField::Blanks => &self.blanks,
            TallyField::Code => &self.code,
        }
    }

    pub fn add(&self, field: TallyField, delta: u64) {
        if delta != 0 {
            self.counter(field).fetch_add(delta, Ordering::Relaxed);
        }
    }

    pub fn get(&self, field: TallyField) -> u64 {
        self.counter(field).load(Ordering::Relaxed)
    }

    /// Adds one file and its line counts.
    pub fn add_file(&self, file: &FileTally) {
        self.add(TallyField::Files, 1);
        self.add(TallyField::Lines, file.lines);
        self.add(TallyField::Comments, file.comments);
        self.add(TallyField::Blanks, file.blanks);
        self.add(TallyField::Code, file.code);
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            files: self.get(TallyField::Files),
            lines: self.get(TallyField::Lines),
            code: self.get(TallyField::Code),
            comments: self.get(TallyField::Comments),
            blanks: self.get(TallyField::Blanks),
        }
    }
}

/// Run-wide counts: the sum of every extension plus the directory count.
#[derive(Debug, Default)]
pub struct GlobalTally {
    tally: Tally,
    directories: AtomicU64,
}

impl GlobalTally {
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn directories(&self) -> u64 {
        self.directories.load(Ordering::Relaxed)
    }
}

/// Extension-keyed tallies plus the global tally.
#[derive(Debug, Default)]
pub struct AggregationStore {
    extensions: RwLock<HashMap<String, Arc<ExtensionTally>>>,
    global: GlobalTally,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `key`, creating it on first use.
    ///
    /// Concurrent first callers for the same key all receive the same record:
    /// creation happens under the write lock, and a caller that loses the race
    /// picks up the record that was published first.
    pub fn get_or_create(&self, key: &str) -> Arc<ExtensionTally> {
        {
            let map = self
                .extensions
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(tally) = map.get(key) {
                return Arc::clone(tally);
            }
        }
        let mut map = self
            .extensions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            map.entry(key.to_owned())
                .or_insert_with(|| Arc::new(ExtensionTally::new())),
        )
    }

    pub fn increment(&self, tally: &ExtensionTally, field: TallyField, delta: u64) {
        tally.add(field, delta);
    }

    pub fn increment_global(&self, field: TallyField, delta: u64) {
        self.global.tally.add(field, delta);
    }

    pub fn increment_directories(&self) {
        self.global.directories.fetch_add(1, Ordering::Relaxed);
    }

    /// Merges one scanned file into its extension record and the global tally.
    pub fn record_file(&self, key: &str, file: &FileTally) {
        self.get_or_create(key).add_file(file);
        self.global.tally.add_file(file);
    }

    pub fn global(&self) -> &GlobalTally {
        &self.global
    }

    /// Copies every counter into a [`TallyReport`].
    ///
    /// Call only after all writers have finished.
    pub fn snapshot(&self) -> TallyReport {
        let map = self
            .extensions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        TallyReport {
            extensions: map
                .iter()
                .map(|(key, tally)| (key.clone(), tally.snapshot()))
                .collect(),
            total: self.global().tally().snapshot(),
            directories: self.global().directories(),
            skipped: Vec::new(),
        }
    }
}
