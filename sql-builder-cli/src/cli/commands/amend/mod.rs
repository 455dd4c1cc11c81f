//! `sql-builder amend`

mod handler;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub use handler::handle_amend_command;

#[derive(Args, Debug)]
pub struct AmendCommands {
    /// Transaction reference (repeatable), e.g. IMIX.CT.11373522
    #[arg(short = 'r', long = "ref")]
    pub refs: Vec<String>,

    /// File with one transaction reference per line
    #[arg(long)]
    pub refs_file: Option<PathBuf>,

    /// Field to update as NAME=VALUE (repeatable, applied in order)
    #[arg(long, value_parser = parse_field_assignment)]
    pub set: Vec<(String, String)>,

    /// Which part of the flow to print
    #[arg(long, value_enum, default_value_t = AmendStep::Full)]
    pub step: AmendStep,

    /// Write the SQL to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmendStep {
    /// Pre-check, UPDATE and post-check
    Full,
    /// Pre-check SELECTs only
    Pre,
    /// UPDATE only
    Update,
    /// Post-check SELECTs only
    Post,
}

/// Parse `NAME=VALUE`; the value may itself contain `=`
fn parse_field_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid NAME=VALUE: no '=' found in '{}'", raw))
}
