use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("cannot read path {path}: {source}")]
    Path {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read failed in {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot list directory {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid ignore pattern: {0}")]
    Pattern(String),
    #[error("cannot write report to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
impl TallyError {
    pub(crate) fn path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TallyError::Path {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TallyError::Open {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TallyError::Scan {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TallyError::List {
            path: path.into(),
            source,
        }
    }
    /// The path the error refers to, if any.
    pub fn offending_path(&self) -> Option<&std::path::Path> {
        match self {
            TallyError::Path { path, .. }
            | TallyError::Open { path, .. }
            | TallyError::Scan { path, .. }
            | TallyError::List { path, .. }
            | TallyError::Write { path, .. } => Some(path),
            TallyError::Pattern(_) | TallyError::Json(_) => None,
        }
    }
}
