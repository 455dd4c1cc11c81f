use anyhow::Result;

use super::{MappingCommands, MappingStep};
use crate::cli::output::emit_sql;
use crate::sql::{
    MappingRequest, build_clone_config_row, build_config_check, build_config_lookup_existing,
    build_insert_map, build_lookup_query,
};

/// Handle `sql-builder mapping`
pub fn handle_mapping_command(args: MappingCommands) -> Result<()> {
    let sql = build_step(&args)?;
    emit_sql(&sql, args.output.as_deref())
}

fn build_step(args: &MappingCommands) -> Result<String> {
    // Missing inputs are passed as empty strings so the builders report them
    let source_id = args.source_id.as_deref().unwrap_or_default();
    let code = args.code.as_deref().unwrap_or_default();
    let existing = args.existing.as_deref().unwrap_or_default();

    let sql = match args.step {
        MappingStep::All => {
            MappingRequest::new(source_id, code, args.existing.clone()).build_all_steps()?
        }
        MappingStep::Lookup => build_lookup_query(source_id)?,
        MappingStep::Insert => build_insert_map(source_id, code)?,
        MappingStep::ConfigCheck => build_config_check(code)?,
        MappingStep::ConfigExisting => build_config_lookup_existing(existing)?,
        MappingStep::Clone => build_clone_config_row(code, existing)?,
    };
    Ok(sql)
}
