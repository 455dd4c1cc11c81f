//! `sql-builder mapping`

mod handler;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub use handler::handle_mapping_command;

#[derive(Args, Debug)]
pub struct MappingCommands {
    /// Source transaction-type ID (e.g. 348 or 149_1033)
    #[arg(short, long)]
    pub source_id: Option<String>,

    /// Target mapping code (e.g. CACR0)
    #[arg(short, long)]
    pub code: Option<String>,

    /// Existing config code to clone when the new code has no config row
    #[arg(short, long)]
    pub existing: Option<String>,

    /// Which step to print
    #[arg(long, value_enum, default_value_t = MappingStep::All)]
    pub step: MappingStep,

    /// Write the SQL to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingStep {
    /// Every step, with error recovery when --existing is given
    All,
    /// Step 1: look up the current mapping
    Lookup,
    /// Step 2: insert / update the mapping
    Insert,
    /// Error-recovery step 1: check the new code in the config table
    ConfigCheck,
    /// Error-recovery step 2: look up the reference config row
    ConfigExisting,
    /// Error-recovery step 3: clone the reference row for the new code
    Clone,
}
