//! `sql-builder defaults`

use anyhow::Result;
use colored::*;

use crate::config::Config;
use crate::constants::{CODE_PATTERN, CRM_UPDATABLE_FIELDS};

/// Print the lookup tables and defaults the other commands use
pub fn handle_defaults_command(config: &Config) -> Result<()> {
    println!("{}", "Refresh families".bold());
    for (family, procedure) in config.procedure_table().iter() {
        let marker = if family == config.refresh.default_family { "*" } else { " " };
        println!(" {} {:<14} {}", marker, family.cyan(), procedure.dimmed());
    }

    println!();
    println!("{}", "Target types".bold());
    for target_type in &config.refresh.target_types {
        println!("   {}", target_type);
    }

    println!();
    println!("{}", "Suggested amendment fields".bold());
    for field in CRM_UPDATABLE_FIELDS {
        println!("   {}", field);
    }

    println!();
    let pattern = config.validation.code_pattern.as_deref().unwrap_or(CODE_PATTERN);
    println!("{} {}", "Code pattern:".bold(), pattern);
    Ok(())
}
