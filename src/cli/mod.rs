//! CLI command handlers

pub mod commands;

pub use commands::{clean, columns, preview, run_shell, run_shell_line, shell, ShellFlow};
