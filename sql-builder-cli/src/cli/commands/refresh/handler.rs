//! Refresh command handler: ingest codes, report, build the EXEC statement

use anyhow::{Context, Result};
use colored::*;
use std::fs;

use super::{RefreshCommands, ReportFormat};
use crate::cli::output::{emit_sql, inline_list};
use crate::config::Config;
use crate::ingest::{self, CodePattern, ParseOutcome};
use crate::sql::RefreshRequest;

/// Handle `sql-builder refresh`
pub fn handle_refresh_command(args: RefreshCommands, config: &Config) -> Result<()> {
    // Validate arguments
    if args.file.is_none() && args.codes.is_none() {
        anyhow::bail!("Either provide a file or use --codes to pass codes inline");
    }

    if args.file.is_some() && args.codes.is_some() {
        anyhow::bail!("Cannot specify both a file and the --codes option");
    }

    let pattern = match args.pattern.as_deref() {
        Some(p) => ingest::compile_pattern(Some(p))?,
        None => config.code_pattern()?,
    };
    let dedupe = config.refresh.dedupe && !args.no_dedupe;
    let strict = config.refresh.strict || args.strict;

    let outcome = read_codes(&args, dedupe, pattern.as_ref())?;

    match args.report {
        ReportFormat::Text => print_summary(&outcome, config.refresh.preview_count),
        ReportFormat::Json => eprintln!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to format parse report")?
        ),
        ReportFormat::Quiet => {}
    }

    // Guard rails
    if strict && outcome.has_invalid() {
        anyhow::bail!(
            "Strict validation is ON and {} invalid code(s) were found. \
             Fix the input or disable strict validation.",
            outcome.invalid_count()
        );
    }

    if outcome.valid_count() == 0 {
        anyhow::bail!("No valid codes available to build SQL.");
    }

    let family = args
        .family
        .clone()
        .unwrap_or_else(|| config.refresh.default_family.clone());
    let target_types = select_target_types(&args, config);

    let request = RefreshRequest::new(outcome.into_valid_values(), family, target_types, args.debug);
    let sql = request.build(&config.procedure_table())?;

    emit_sql(&sql, args.output.as_deref())
}

fn read_codes(args: &RefreshCommands, dedupe: bool, pattern: Option<&CodePattern>) -> Result<ParseOutcome> {
    let file_path = match (&args.codes, &args.file) {
        (Some(text), _) => return Ok(ingest::parse_text(text, dedupe, pattern)),
        (None, Some(path)) => path,
        (None, None) => anyhow::bail!("No input source given"),
    };

    if !file_path.exists() {
        anyhow::bail!("Input file does not exist: {}", file_path.display());
    }

    let bytes = fs::read(file_path).with_context(|| format!("Failed to read input file: {}", file_path.display()))?;
    let filename = file_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    ingest::parse(&bytes, &filename, dedupe, pattern)
        .with_context(|| format!("Failed to parse file: {}", file_path.display()))
}

/// Selected defaults (or the configured list) followed by custom types
fn select_target_types(args: &RefreshCommands, config: &Config) -> Vec<String> {
    let mut types: Vec<String> = match &args.types {
        Some(selected) => selected
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        None => config.refresh.target_types.clone(),
    };

    if let Some(custom) = &args.custom_types {
        types.extend(ingest::split_list(custom));
    }
    types
}

fn print_summary(outcome: &ParseOutcome, preview_count: usize) {
    eprintln!("{}", "Parsing results".bold());
    eprintln!("  Total codes found:  {}", outcome.total_found());
    eprintln!("  Valid codes:        {}", outcome.valid_count().to_string().green());
    eprintln!("  Invalid codes:      {}", outcome.invalid_count().to_string().red());
    eprintln!("  Duplicates removed: {}", outcome.duplicates_removed());

    let preview = outcome.preview(preview_count);
    if !preview.is_empty() {
        eprintln!("{} {}", preview_label(preview.len()).dimmed(), inline_list(preview));
    }

    if outcome.has_invalid() {
        eprintln!(
            "{}",
            format!(
                "{} code(s) failed validation and will be excluded:",
                outcome.invalid_count()
            )
            .yellow()
        );
        eprintln!("  {}", inline_list(outcome.invalid_values()));
    }
    eprintln!();
}

fn preview_label(shown: usize) -> String {
    format!("Preview (first {}):", shown)
}
