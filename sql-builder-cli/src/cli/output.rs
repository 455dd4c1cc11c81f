//! Writing generated SQL and summaries

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

/// Print SQL to stdout, or save it to `output` when given
pub fn emit_sql(sql: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", sql))
                .with_context(|| format!("Failed to write SQL to: {}", path.display()))?;
            eprintln!("SQL saved to: {}", path.display().to_string().bright_green());
        }
        None => println!("{}", sql),
    }
    Ok(())
}

/// Join values for a one-line preview
pub fn inline_list(values: &[String]) -> String {
    values.join(", ")
}
