use clap::{Parser, Subcommand};
use sheet_scrub::cli;
use sheet_scrub::config::ScrubConfig;
use sheet_scrub::error::ScrubResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-scrub")]
#[command(about = "Strip a character from one spreadsheet column and export it in batches.")]
#[command(long_about = "Sheet Scrub - clean one column of a CSV/TSV/XLSX/XLS file
Detects the header row, removes every '@' (or a configured character) from
the chosen column and writes the cleaned values as cleaned_<column>_batch_<n>.xlsx.

COMMANDS:
  columns   - Show the detected header row and column names
  preview   - Print the first cleaned values of a column
  clean     - Write every batch of a column as .xlsx files
  shell     - Interactive session: load, pick column, set limit, next batch

EXAMPLES:
  sheet-scrub columns contacts.xlsx
  sheet-scrub preview contacts.csv --column Email
  sheet-scrub clean contacts.csv --column Email --limit 500 -d out/
  sheet-scrub shell contacts.xlsx")]
#[command(version)]
struct Cli {
    /// YAML config file (strip_char, row_limit, header_scan_rows, output_dir)
    #[arg(long, global = true, env = "SHEET_SCRUB_CONFIG")]
    config: Option<PathBuf>,

    /// Character to strip from values (overrides config)
    #[arg(long, global = true, env = "SHEET_SCRUB_STRIP_CHAR")]
    strip_char: Option<char>,

    /// Show verbose output and info-level logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected header row and column names
    Columns {
        /// Path to CSV/TSV/XLSX/XLS file
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the first cleaned values of a column
    Preview {
        /// Path to CSV/TSV/XLSX/XLS file
        file: PathBuf,

        /// Column name (exact match)
        #[arg(short = 'c', long)]
        column: String,

        /// Number of values to print
        #[arg(short, long, default_value = "10")]
        rows: usize,
    },

    #[command(long_about = "Write every batch of a column as .xlsx files.

Each batch holds at most --limit values. Files are named
cleaned_<column>_batch_<n>.xlsx and written to --output-dir.
Stops when all rows are written or --max-batches is reached.")]
    /// Write every batch of a column as .xlsx files
    Clean {
        /// Path to CSV/TSV/XLSX/XLS file
        file: PathBuf,

        /// Column name (exact match)
        #[arg(short = 'c', long)]
        column: String,

        /// Rows per batch (overrides config)
        #[arg(short, long, env = "SHEET_SCRUB_ROW_LIMIT")]
        limit: Option<i64>,

        /// Output directory (overrides config)
        #[arg(short = 'd', long, env = "SHEET_SCRUB_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Stop after this many batches
        #[arg(short, long)]
        max_batches: Option<usize>,
    },

    #[command(long_about = "Interactive session reading commands from stdin.

  load <path>     Load a file (discards current state)
  columns         Show the detected header
  column <name>   Select the column to clean
  limit <n>       Set rows per batch
  next            Write the next batch
  status          Show file, column, limit and offset
  quit            Leave the shell")]
    /// Interactive session: load, pick column, set limit, next batch
    Shell {
        /// File to load on start
        file: Option<PathBuf>,

        /// Rows per batch (overrides config)
        #[arg(short, long, env = "SHEET_SCRUB_ROW_LIMIT")]
        limit: Option<i64>,

        /// Output directory (overrides config)
        #[arg(short = 'd', long, env = "SHEET_SCRUB_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sheet_scrub=info"
    } else {
        "sheet_scrub=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Apply command-line overrides on top of the file config
fn apply_overrides(
    mut config: ScrubConfig,
    limit: Option<i64>,
    output_dir: Option<PathBuf>,
) -> ScrubResult<ScrubConfig> {
    if let Some(limit) = limit {
        config.row_limit = sheet_scrub::batch::validate_row_limit(limit)?;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    Ok(config)
}

fn run(cli: Cli) -> ScrubResult<()> {
    let mut config = ScrubConfig::load_or_default(cli.config.as_deref())?;
    if let Some(c) = cli.strip_char {
        config.strip_char = c;
    }

    match cli.command {
        Commands::Columns { file, json } => cli::columns(file, json, &config),

        Commands::Preview { file, column, rows } => cli::preview(file, column, rows, &config),

        Commands::Clean {
            file,
            column,
            limit,
            output_dir,
            max_batches,
        } => {
            let config = apply_overrides(config, limit, output_dir)?;
            cli::clean(file, column, max_batches, cli.verbose, &config)
        }

        Commands::Shell {
            file,
            limit,
            output_dir,
        } => {
            let config = apply_overrides(config, limit, output_dir)?;
            cli::shell(file, &config)
        }
    }
}

fn main() -> ScrubResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli)
}
