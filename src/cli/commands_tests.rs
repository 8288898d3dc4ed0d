use super::*;
use crate::cleaner::CleanOptions;
use std::fs;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(session: &mut Session, exporter: &BatchExporter, script: &str) -> String {
    let mut out = Vec::new();
    run_shell(session, exporter, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =========================================================================
// Shell Tests
// =========================================================================

#[test]
fn test_shell_full_walk() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "people.csv", "Name,Email\nA,x@y.com\nB,z@@w.com\n");
    let exporter = BatchExporter::new(dir.path());
    let mut session = Session::new(CleanOptions::default(), 100).unwrap();

    let script = format!(
        "load {}\ncolumn Email\nlimit 1\nnext\nnext\nnext\nstatus\nquit\n",
        csv.display()
    );
    let output = run(&mut session, &exporter, &script);

    assert!(output.contains("Loaded"));
    assert!(output.contains("2. Email"));
    assert!(output.contains("Batch 1 (1 rows)"));
    assert!(output.contains("Batch 2 (1 rows)"));
    assert!(output.contains("No more rows to process"));
    assert!(output.contains("Offset: 2"));
    assert!(dir.path().join("cleaned_Email_batch_1.xlsx").exists());
    assert!(dir.path().join("cleaned_Email_batch_2.xlsx").exists());
    assert!(!dir.path().join("cleaned_Email_batch_3.xlsx").exists());
}

#[test]
fn test_shell_errors_do_not_end_session() {
    let dir = TempDir::new().unwrap();
    let exporter = BatchExporter::new(dir.path());
    let mut session = Session::new(CleanOptions::default(), 10).unwrap();

    let output = run(
        &mut session,
        &exporter,
        "next\ncolumn Email\nlimit 0\nlimit abc\nload /does/not/exist.csv\nbogus\nstatus\n",
    );

    assert!(output.contains("No file loaded"));
    assert!(output.contains("Invalid row limit"));
    assert!(output.contains("IO error"));
    assert!(output.contains("Unknown command 'bogus'"));
    assert!(output.contains("Limit: 10"));
}

#[test]
fn test_shell_unknown_column_lists_available() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "p.csv", "Name,Email\nA,a@b\n");
    let exporter = BatchExporter::new(dir.path());
    let mut session = Session::new(CleanOptions::default(), 10).unwrap();

    let output = run(
        &mut session,
        &exporter,
        &format!("load {}\ncolumn email\n", csv.display()),
    );
    assert!(output.contains("Column 'email' not found (available: Name, Email)"));
}

#[test]
fn test_shell_quit_stops_reading() {
    let dir = TempDir::new().unwrap();
    let exporter = BatchExporter::new(dir.path());
    let mut session = Session::new(CleanOptions::default(), 10).unwrap();

    let output = run(&mut session, &exporter, "quit\nhelp\n");
    assert!(!output.contains("Commands:"));
}

#[test]
fn test_shell_line_flow() {
    let dir = TempDir::new().unwrap();
    let exporter = BatchExporter::new(dir.path());
    let mut session = Session::new(CleanOptions::default(), 10).unwrap();
    let mut out = Vec::new();

    assert_eq!(
        run_shell_line(&mut session, &exporter, "  ", &mut out).unwrap(),
        ShellFlow::Continue
    );
    assert_eq!(
        run_shell_line(&mut session, &exporter, "exit", &mut out).unwrap(),
        ShellFlow::Quit
    );
}

#[test]
fn test_shell_load_without_path() {
    let dir = TempDir::new().unwrap();
    let exporter = BatchExporter::new(dir.path());
    let mut session = Session::new(CleanOptions::default(), 10).unwrap();

    let output = run(&mut session, &exporter, "load\n");
    assert!(output.contains("Usage: load <path>"));
}

// =========================================================================
// One-shot command Tests
// =========================================================================

#[test]
fn test_clean_writes_all_batches() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "p.csv", "Email\na@1\nb@2\nc@3\n");
    let config = ScrubConfig {
        row_limit: 2,
        output_dir: dir.path().join("out"),
        ..ScrubConfig::default()
    };

    clean(csv, "Email".to_string(), None, false, &config).unwrap();
    assert!(dir.path().join("out/cleaned_Email_batch_1.xlsx").exists());
    assert!(dir.path().join("out/cleaned_Email_batch_2.xlsx").exists());
    assert!(!dir.path().join("out/cleaned_Email_batch_3.xlsx").exists());
}

#[test]
fn test_clean_respects_max_batches() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "p.csv", "Email\na@1\nb@2\nc@3\n");
    let config = ScrubConfig {
        row_limit: 1,
        output_dir: dir.path().to_path_buf(),
        ..ScrubConfig::default()
    };

    clean(csv, "Email".to_string(), Some(2), false, &config).unwrap();
    assert!(dir.path().join("cleaned_Email_batch_2.xlsx").exists());
    assert!(!dir.path().join("cleaned_Email_batch_3.xlsx").exists());
}

#[test]
fn test_clean_empty_column_is_no_data() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "p.csv", "Email\n");
    let config = ScrubConfig {
        output_dir: dir.path().to_path_buf(),
        ..ScrubConfig::default()
    };

    let result = clean(csv, "Email".to_string(), None, false, &config);
    assert!(matches!(result, Err(ScrubError::NoData { .. })));
}

#[test]
fn test_preview_unknown_column() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "p.csv", "Email\na@b\n");
    let result = preview(csv, "Phone".to_string(), 5, &ScrubConfig::default());
    assert!(matches!(result, Err(ScrubError::ColumnNotFound { .. })));
}

#[test]
fn test_columns_missing_file() {
    let result = columns(
        PathBuf::from("/does/not/exist.csv"),
        false,
        &ScrubConfig::default(),
    );
    assert!(matches!(result, Err(ScrubError::Io(_))));
}
