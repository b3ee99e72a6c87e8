use crate::classify::{LineKind, classify};
use crate::error::TallyError;
use crate::options::BinaryDetection;
use crate::store::AggregationStore;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

/// Line counts for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTally {
    pub lines: u64,
    pub comments: u64,
    pub blanks: u64,
    pub code: u64,
}

impl FileTally {
    pub fn count(&mut self, kind: LineKind) {
        self.lines += 1;
        match kind {
            LineKind::Blank => self.blanks += 1,
            LineKind::Comment => self.comments += 1,
            LineKind::Code => self.code += 1,
        }
    }
}

/// Returns the bucket key for `path`: the file name from its last `.` onwards.
///
/// `main.rs` gives `.rs`, `.gitignore` gives `.gitignore`, `Makefile` gives `None`.
/// Names that are not valid UTF-8 are decoded lossily, so `caf\xe9.rs` still gives `.rs`.
pub fn extension_key(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    name.rfind('.').map(|idx| name[idx..].to_owned())
}

/// Counts the lines of `reader`.
///
/// Lines end at `\n` (a preceding `\r` is dropped); a last line without a
/// terminator still counts. Invalid UTF-8 is replaced, never rejected.
pub fn scan_reader<R: BufRead>(mut reader: R) -> io::Result<FileTally> {
    let mut tally = FileTally::default();
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        tally.count(classify(line.trim()));
    }
    Ok(tally)
}

fn looks_binary(chunk: &[u8], detection: BinaryDetection) -> bool {
    match detection {
        BinaryDetection::Simple => chunk.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(chunk).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Scans one file and merges its counts into `store` under `key`.
///
/// Returns `Ok(None)` when the file was sniffed as binary and left out.
pub fn scan_file(
    path: &Path,
    key: &str,
    store: &AggregationStore,
    binary_detection: BinaryDetection,
) -> Result<Option<FileTally>, TallyError> {
    let file = File::open(path).map_err(|e| TallyError::open(path, e))?;
    let mut reader = BufReader::new(file);
    if binary_detection != BinaryDetection::None {
        let chunk = reader.fill_buf().map_err(|e| TallyError::scan(path, e))?;
        if looks_binary(chunk, binary_detection) {
            #[cfg(feature = "logging")]
            tracing::debug!("Binary file detected: {}", path.display());
            return Ok(None);
        }
    }
    let tally = scan_reader(reader).map_err(|e| TallyError::scan(path, e))?;
    store.record_file(key, &tally);
    #[cfg(feature = "logging")]
    tracing::trace!(
        path = %path.display(),
        lines = tally.lines,
        "scanned file"
    );
    Ok(Some(tally))
}
