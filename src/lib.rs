//! # linetally
//!
//! `linetally` walks a directory tree and counts, per file extension, how many files
//! it holds and how many of their lines are code, comments or blank.
//!
//! Classification is a one-line heuristic: a trimmed line that is empty is blank, one
//! that starts with `//`, `#`, `;` or `--` is a comment, anything else is code. There is
//! no block-comment or string-literal tracking.
//!
//! Each subdirectory is walked as its own task (the `parallel` feature, on by default,
//! runs them on Rayon) and every task writes into one shared, lock-light
//! [`AggregationStore`]. [`tally`] returns only after all tasks have finished.
//!
//! # Features
//!
//! - `parallel`: Walks subdirectories concurrently using Rayon.
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use linetally::{ErrorPolicy, TallyBuilder, tally};
//!
//! let options = TallyBuilder::new(".")
//!     .extensions([".rs", ".toml"])
//!     .error_policy(ErrorPolicy::Skip)
//!     .build();
//!
//! let report = tally(options).expect("Failed to scan directory");
//!
//! for (ext, counts) in &report.extensions {
//!     println!("{ext}: {} files, {} lines of code", counts.files, counts.code);
//! }
//! println!("Searched {} directories", report.directories);
//! ```

mod classify;
mod engine;
mod error;
mod options;
pub mod output;
mod scanner;
mod store;
mod types;

pub use classify::{COMMENT_PREFIXES, LineKind, classify, is_comment};
pub use engine::tally;
pub use error::TallyError;
pub use options::{BinaryDetection, DEFAULT_EXCLUDES, ErrorPolicy, TallyBuilder, TallyOptions};
pub use scanner::{FileTally, extension_key, scan_file, scan_reader};
pub use store::{AggregationStore, ExtensionTally, GlobalTally, Tally, TallyField};
pub use types::{SkippedPath, TallyReport, TallySnapshot};
