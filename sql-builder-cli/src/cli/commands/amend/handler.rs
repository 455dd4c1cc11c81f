use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;

use super::{AmendCommands, AmendStep};
use crate::cli::output::emit_sql;
use crate::ingest::split_lines;
use crate::sql::AmendmentRequest;

/// Handle `sql-builder amend`
pub fn handle_amend_command(args: AmendCommands) -> Result<()> {
    let request = build_request(&args)?;
    log::debug!("Amending {} ref(s) with {} field(s)", request.refs.len(), request.fields.len());

    let sql = match args.step {
        AmendStep::Full => request.full_flow()?,
        AmendStep::Pre => request.pre_check()?,
        AmendStep::Update => request.update()?,
        AmendStep::Post => request.post_check()?,
    };
    emit_sql(&sql, args.output.as_deref())
}

/// Refs from `--ref` followed by those in `--refs-file`; fields in the order given
fn build_request(args: &AmendCommands) -> Result<AmendmentRequest> {
    let mut refs = args.refs.clone();

    if let Some(path) = &args.refs_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read refs file: {}", path.display()))?;
        refs.extend(split_lines(&content));
    }

    let mut fields = IndexMap::new();
    for (name, value) in &args.set {
        fields.insert(name.clone(), value.clone());
    }

    Ok(AmendmentRequest::new(refs, fields))
}
