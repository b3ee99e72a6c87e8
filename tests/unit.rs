use linetally::{
    AggregationStore, FileTally, LineKind, TallyField, TallyReport, TallySnapshot, classify,
    extension_key, output, scan_reader,
};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
#[test]
fn test_classify_blank_comment_code() {
    assert_eq!(classify(""), LineKind::Blank);
    assert_eq!(classify("// hi"), LineKind::Comment);
    assert_eq!(classify("# shell"), LineKind::Comment);
    assert_eq!(classify("; ini"), LineKind::Comment);
    assert_eq!(classify("-- sql"), LineKind::Comment);
    assert_eq!(classify("x := 1"), LineKind::Code);
    assert_eq!(classify("/* block */"), LineKind::Code);
    assert_eq!(classify("-x"), LineKind::Code);
    assert_eq!(classify("let s = \"// not a comment\";"), LineKind::Code);
}
#[test]
fn test_scan_reader_counts_each_line_once() {
    let tally = scan_reader(Cursor::new("// hi\n\nx:=1\n")).unwrap();
    assert_eq!(
        tally,
        FileTally {
            lines: 3,
            comments: 1,
            blanks: 1,
            code: 1
        }
    );
}
#[test]
fn test_scan_reader_trims_and_handles_crlf() {
    let tally = scan_reader(Cursor::new("   \r\n\t# note\r\n  code();  \r\n")).unwrap();
    assert_eq!(tally.lines, 3);
    assert_eq!(tally.blanks, 1);
    assert_eq!(tally.comments, 1);
    assert_eq!(tally.code, 1);
}
#[test]
fn test_scan_reader_counts_unterminated_last_line() {
    let tally = scan_reader(Cursor::new("a\nb")).unwrap();
    assert_eq!(tally.lines, 2);
    assert_eq!(tally.code, 2);
}
#[test]
fn test_scan_reader_empty_input() {
    let tally = scan_reader(Cursor::new("")).unwrap();
    assert_eq!(tally, FileTally::default());
}
#[test]
fn test_scan_reader_tolerates_invalid_utf8() {
    let tally = scan_reader(Cursor::new(vec![0xff, 0xfe, b'\n', b'#', b'\n'])).unwrap();
    assert_eq!(tally.lines, 2);
    assert_eq!(tally.code, 1);
    assert_eq!(tally.comments, 1);
}
#[test]
fn test_extension_key() {
    assert_eq!(extension_key(Path::new("src/main.rs")), Some(".rs".into()));
    assert_eq!(extension_key(Path::new("archive.tar.gz")), Some(".gz".into()));
    assert_eq!(extension_key(Path::new(".gitignore")), Some(".gitignore".into()));
    assert_eq!(extension_key(Path::new("dir.d/Makefile")), None);
    assert_eq!(extension_key(Path::new("README")), None);
}
#[cfg(unix)]
#[test]
fn test_extension_key_non_utf8_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    let name = OsStr::from_bytes(b"caf\xe9.rs");
    assert_eq!(extension_key(Path::new(name)), Some(".rs".into()));
    assert_eq!(extension_key(Path::new(OsStr::from_bytes(b"\xff\xfe"))), None);
}
#[test]
fn test_store_single_record_under_racing_first_access() {
    let store = AggregationStore::new();
    let handles: Vec<_> = thread::scope(|s| {
        let workers: Vec<_> = (0..16u64)
            .map(|i| {
                let store = &store;
                s.spawn(move || {
                    thread::sleep(Duration::from_micros(i * 37 % 11));
                    let tally = store.get_or_create(".go");
                    for _ in 0..1000 {
                        store.increment(&tally, TallyField::Lines, 1);
                        store.increment(&tally, TallyField::Code, 1);
                        store.increment_global(TallyField::Lines, 1);
                        store.increment_global(TallyField::Code, 1);
                        if i % 3 == 0 {
                            thread::yield_now();
                        }
                    }
                    store.increment(&tally, TallyField::Files, 1);
                    store.increment_global(TallyField::Files, 1);
                    tally
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });
    assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    let report = store.snapshot();
    assert_eq!(report.extensions.len(), 1);
    let go = report.extensions[".go"];
    assert_eq!(go.files, 16);
    assert_eq!(go.lines, 16_000);
    assert_eq!(go.code, 16_000);
    assert!(go.is_consistent());
    assert_eq!(report.total, go);
}
#[test]
fn test_store_record_file_updates_extension_and_global() {
    let store = AggregationStore::new();
    let file = FileTally {
        lines: 4,
        comments: 1,
        blanks: 1,
        code: 2,
    };
    store.record_file(".py", &file);
    store.record_file(".py", &file);
    store.record_file(".rs", &FileTally::default());
    store.increment_directories();
    let report = store.snapshot();
    assert_eq!(report.extensions[".py"].files, 2);
    assert_eq!(report.extensions[".py"].lines, 8);
    assert_eq!(report.extensions[".rs"].files, 1);
    assert_eq!(report.extensions[".rs"].lines, 0);
    assert_eq!(report.total.files, 3);
    assert_eq!(report.total.code, 4);
    assert_eq!(report.directories, 1);
    assert_eq!(store.global().directories(), 1);
    assert_eq!(store.global().tally().get(TallyField::Files), 3);
    assert_eq!(store.global().tally().get(TallyField::Blanks), 2);
}
#[test]
fn test_format_number() {
    assert_eq!(output::format_number(0), "0");
    assert_eq!(output::format_number(999), "999");
    assert_eq!(output::format_number(1000), "1,000");
    assert_eq!(output::format_number(1234567), "1,234,567");
}
#[test]
fn test_table_output_lists_extensions_then_total() {
    let go = TallySnapshot {
        files: 1,
        lines: 1200,
        code: 1000,
        comments: 100,
        blanks: 100,
    };
    let report = TallyReport {
        extensions: BTreeMap::from([(".go".to_string(), go)]),
        total: go,
        directories: 3,
        skipped: Vec::new(),
    };
    let out = output::format_result(&report, output::OutputFormat::Table, false, None).unwrap();
    let go_line = out.lines().position(|l| l.starts_with(".go")).unwrap();
    let total_line = out.lines().position(|l| l.starts_with("Total")).unwrap();
    assert!(go_line < total_line);
    assert!(out.contains("1,200"));
    assert!(out.contains("Searched 3 directories"));
    let md = output::format_result(&report, output::OutputFormat::Markdown, false, None).unwrap();
    assert!(md.contains("| `.go` | 1 | 1,200 | 1,000 | 100 | 100 |"));
}
#[test]
fn test_json_output_includes_elapsed() {
    let report = TallyReport::default();
    let out = output::format_result(
        &report,
        output::OutputFormat::Json,
        false,
        Some(Duration::from_millis(42)),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["elapsed_ms"], 42);
    assert_eq!(value["directories"], 0);
    assert!(value.get("skipped").is_none());
}
