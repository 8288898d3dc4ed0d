use crate::config::ScrubConfig;
use crate::error::{ScrubError, ScrubResult};
use crate::excel::BatchExporter;
use crate::session::Session;
use crate::types::HeaderRow;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Header detection result as printed by `columns --json`
#[derive(Debug, Serialize)]
struct ColumnsReport<'a> {
    file: String,
    sheet: &'a str,
    header_row: u32,
    columns: &'a [String],
}

fn open_session(file: &Path, config: &ScrubConfig) -> ScrubResult<Session> {
    let mut session = Session::new(config.clean_options(), config.row_limit)?;
    session.load_path(file)?;
    Ok(session)
}

fn print_header(header: &HeaderRow) {
    // Worksheet rows are shown 1-based, as a spreadsheet app would
    println!(
        "   Header row: {}",
        (header.row + 1).to_string().bright_yellow()
    );
    for (idx, name) in header.names.iter().enumerate() {
        println!("   {:>3}. {}", idx + 1, name.cyan());
    }
}

/// Execute the columns command - show the detected header
pub fn columns(file: PathBuf, json: bool, config: &ScrubConfig) -> ScrubResult<()> {
    let session = open_session(&file, config)?;
    let loaded = session.file().ok_or(ScrubError::NoFile)?;

    if json {
        let report = ColumnsReport {
            file: file.display().to_string(),
            sheet: loaded.sheet.name(),
            header_row: loaded.header.row,
            columns: &loaded.header.names,
        };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| ScrubError::Export(format!("Failed to serialize report: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", "🧽 Sheet Scrub - Columns".bold().green());
    println!("   File:  {}", file.display());
    println!("   Sheet: {}\n", loaded.sheet.name());
    print_header(&loaded.header);
    println!();
    Ok(())
}

/// Execute the preview command - print the first cleaned values
pub fn preview(
    file: PathBuf,
    column: String,
    rows: usize,
    config: &ScrubConfig,
) -> ScrubResult<()> {
    let mut session = open_session(&file, config)?;
    session.select_column(&column)?;
    let values = session.cleaned_values()?;

    println!("{}", "🧽 Sheet Scrub - Preview".bold().green());
    println!("   File:   {}", file.display());
    println!("   Column: {}", column.bright_blue().bold());
    println!("   Rows:   {}\n", values.len());

    if values.is_empty() {
        return Err(ScrubError::NoData { column });
    }

    for value in values.iter().take(rows) {
        println!("   {}", value);
    }
    if values.len() > rows {
        println!("   {}", format!("... {} more", values.len() - rows).dimmed());
    }
    println!();
    Ok(())
}

/// Execute the clean command - write every batch of the column
pub fn clean(
    file: PathBuf,
    column: String,
    max_batches: Option<usize>,
    verbose: bool,
    config: &ScrubConfig,
) -> ScrubResult<()> {
    println!("{}", "🧽 Sheet Scrub - Cleaning column".bold().green());
    println!("   File:       {}", file.display());
    println!("   Column:     {}", column.bright_blue().bold());
    println!("   Row limit:  {}", config.row_limit);

    let exporter = BatchExporter::new(&config.output_dir);
    println!("   Output dir: {}\n", exporter.output_dir().display());

    let mut session = open_session(&file, config)?;
    if verbose {
        if let Some(header) = session.headers() {
            print_header(header);
            println!();
        }
    }
    session.select_column(&column)?;

    let mut written = 0usize;

    loop {
        if max_batches.is_some_and(|max| written >= max) {
            break;
        }
        let batch = match session.next_batch() {
            Ok(batch) => batch,
            Err(ScrubError::NoMoreRows { .. }) if written > 0 => break,
            Err(e) => return Err(e),
        };

        let path = exporter.export(&column, &batch)?;
        written += 1;
        println!(
            "   {} Batch {} ({} rows) → {}",
            "✅".green(),
            batch.number,
            batch.len(),
            path.display()
        );
    }

    println!();
    println!(
        "{}",
        format!("✅ {} batch file(s) written", written).bold().green()
    );
    Ok(())
}

/// Execute the shell command - interactive session on stdin/stdout
pub fn shell(file: Option<PathBuf>, config: &ScrubConfig) -> ScrubResult<()> {
    let mut session = Session::new(config.clean_options(), config.row_limit)?;
    let exporter = BatchExporter::new(&config.output_dir);
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut out = stdout.lock();
    if let Some(path) = file {
        run_shell_line(
            &mut session,
            &exporter,
            &format!("load {}", path.display()),
            &mut out,
        )?;
    }
    run_shell(&mut session, &exporter, stdin.lock(), &mut out)
}

const SHELL_HELP: &str = "\
Commands:
  load <path>     Load a CSV/TSV/XLSX/XLS file (discards current state)
  columns         Show the detected header
  column <name>   Select the column to clean
  limit <n>       Set rows per batch
  next            Write the next batch
  status          Show file, column, limit and offset
  help            Show this help
  quit            Leave the shell";

/// Outcome of one shell line
#[derive(Debug, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

/// Read commands from `input` until `quit` or end of input.
///
/// Every error is reported on `out` and the session keeps going.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    exporter: &BatchExporter,
    input: R,
    out: &mut W,
) -> ScrubResult<()> {
    writeln!(out, "{}", "🧽 Sheet Scrub - type 'help' for commands".bold().green())?;
    for line in input.lines() {
        let line = line?;
        if run_shell_line(session, exporter, &line, out)? == ShellFlow::Quit {
            break;
        }
    }
    Ok(())
}

/// Run one shell command. Command errors are printed; only a failure to
/// write to `out` is returned.
pub fn run_shell_line<W: Write>(
    session: &mut Session,
    exporter: &BatchExporter,
    line: &str,
    out: &mut W,
) -> ScrubResult<ShellFlow> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let result = match command {
        "" => Ok(()),
        "quit" | "exit" => return Ok(ShellFlow::Quit),
        "help" => writeln!(out, "{}", SHELL_HELP).map_err(ScrubError::from),
        "load" => shell_load(session, arg, out),
        "columns" => match session.headers() {
            Some(header) => write_header(header, out),
            None => Err(ScrubError::NoFile),
        },
        // Column names are matched exactly, so keep inner whitespace
        "column" => session.select_column(arg).and_then(|_| {
            writeln!(out, "Column: {} (offset {})", arg, session.offset())
                .map_err(ScrubError::from)
        }),
        "limit" => crate::batch::parse_row_limit(arg)
            .and_then(|limit| session.set_row_limit(limit))
            .and_then(|_| {
                writeln!(out, "Row limit: {}", session.row_limit()).map_err(ScrubError::from)
            }),
        "next" => shell_next(session, exporter, out),
        "status" => {
            let status = session.status();
            writeln!(
                out,
                "File: {} | Column: {} | Limit: {} | Offset: {} | Rows: {}",
                status.file.as_deref().unwrap_or("-"),
                status.column.as_deref().unwrap_or("-"),
                status.row_limit,
                status.offset,
                status
                    .total_rows
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string())
            )
            .map_err(ScrubError::from)
        }
        other => writeln!(out, "Unknown command '{}' (try 'help')", other)
            .map_err(ScrubError::from),
    };

    if let Err(e) = result {
        writeln!(out, "{} {}", "❌".red(), e)?;
    }
    Ok(ShellFlow::Continue)
}

fn shell_load<W: Write>(session: &mut Session, arg: &str, out: &mut W) -> ScrubResult<()> {
    if arg.is_empty() {
        writeln!(out, "Usage: load <path>")?;
        return Ok(());
    }
    let header = session.load_path(arg)?.clone();
    writeln!(out, "Loaded {}", arg)?;
    write_header(&header, out)
}

fn shell_next<W: Write>(
    session: &mut Session,
    exporter: &BatchExporter,
    out: &mut W,
) -> ScrubResult<()> {
    let batch = session.next_batch()?;
    let column = session.column().ok_or(ScrubError::NoColumnSelected)?;
    let path = exporter.export(column, &batch)?;
    writeln!(
        out,
        "Batch {} ({} rows) → {}",
        batch.number,
        batch.len(),
        path.display()
    )?;
    Ok(())
}

fn write_header<W: Write>(header: &HeaderRow, out: &mut W) -> ScrubResult<()> {
    writeln!(out, "Header row: {}", header.row + 1)?;
    for (idx, name) in header.names.iter().enumerate() {
        writeln!(out, "  {:>3}. {}", idx + 1, name)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
