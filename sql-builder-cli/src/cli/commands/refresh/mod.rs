//! `sql-builder refresh`

mod handler;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub use handler::handle_refresh_command;

#[derive(Args, Debug)]
pub struct RefreshCommands {
    /// Spreadsheet or CSV (.xls, .xlsx, .csv) with one code per row in the first column
    pub file: Option<PathBuf>,

    /// Codes typed or pasted inline, separated by commas or newlines
    #[arg(short, long)]
    pub codes: Option<String>,

    /// Refresh family (defaults to refresh.default_family)
    #[arg(short, long)]
    pub family: Option<String>,

    /// Target types to include, comma-separated (defaults to refresh.target_types)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Option<Vec<String>>,

    /// Extra target types appended after the selected ones, comma-separated
    #[arg(long)]
    pub custom_types: Option<String>,

    /// Append @debug = 1 to the EXEC call
    #[arg(long)]
    pub debug: bool,

    /// Keep repeated codes
    #[arg(long)]
    pub no_dedupe: bool,

    /// Refuse to build SQL when any code fails validation
    #[arg(long)]
    pub strict: bool,

    /// Override the identifier pattern (regex, matched against the whole code)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Format of the parsing summary printed to stderr
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Write the SQL to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable statistics and preview
    Text,
    /// The full parse outcome as JSON
    Json,
    /// No summary
    Quiet,
}
