//! SQL for the IMIX transaction-type mapping wizard
//!
//! Two regular steps (lookup, insert) and an error-recovery branch used when
//! the insert fails because the new code has no config row yet: check the
//! config, look up a reference row, clone it for the new code, re-run the
//! insert.

use super::BuildError;
use super::error::require;
use crate::constants::{CONFIG_COLUMNS, MAPPING_CONFIG_TABLE, MAPPING_PROC, MAPPING_TABLE};

const SOURCE_ID: &str = "Source ID";
const MAPPING_CODE: &str = "Mapping code";
const EXISTING_CODE: &str = "Existing reference code";
const NEW_CODE: &str = "New mapping code";

/// Step 1: what does the source ID map to now
pub fn build_lookup_query(source_id: &str) -> Result<String, BuildError> {
    let sid = require(source_id, SOURCE_ID)?;
    Ok(format!("SELECT *\nFROM {}\nWHERE id = '{}';", MAPPING_TABLE, sid))
}

/// Step 2: create or update the mapping
pub fn build_insert_map(source_id: &str, mapping_code: &str) -> Result<String, BuildError> {
    let sid = require(source_id, SOURCE_ID)?;
    let code = require(mapping_code, MAPPING_CODE)?;
    Ok(format!("EXEC {} '{}', '{}', 1;", MAPPING_PROC, sid, code))
}

/// Error-recovery step 1: is the new code already configured
pub fn build_config_check(mapping_code: &str) -> Result<String, BuildError> {
    let code = require(mapping_code, MAPPING_CODE)?;
    Ok(config_select(code))
}

/// Error-recovery step 2: the reference row that will be cloned
pub fn build_config_lookup_existing(existing_code: &str) -> Result<String, BuildError> {
    let code = require(existing_code, EXISTING_CODE)?;
    Ok(config_select(code))
}

/// Error-recovery step 3: copy the reference row, overwriting the key column
pub fn build_clone_config_row(new_code: &str, existing_code: &str) -> Result<String, BuildError> {
    let new = require(new_code, NEW_CODE)?;
    let existing = require(existing_code, EXISTING_CODE)?;

    // First column is the key being overwritten; the rest are copied as-is
    let key_column = CONFIG_COLUMNS[0];
    let insert_cols = CONFIG_COLUMNS.join(",\n    ");
    let select_cols = CONFIG_COLUMNS[1..].join(", ");

    Ok(format!(
        "INSERT INTO {table}\n    ({insert_cols})\nSELECT\n    '{new}', {select_cols}\nFROM\n    {table}\nWHERE\n    {key_column} = '{existing}';",
        table = MAPPING_CONFIG_TABLE,
    ))
}

fn config_select(code: &str) -> String {
    format!(
        "SELECT *\nFROM {}\nWHERE TransactionTypeExternal = '{}';",
        MAPPING_CONFIG_TABLE, code
    )
}

/// Inputs for the whole mapping wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRequest {
    pub source_id: String,
    pub mapping_code: String,
    pub existing_code: Option<String>,
}

impl MappingRequest {
    pub fn new(source_id: impl Into<String>, mapping_code: impl Into<String>, existing_code: Option<String>) -> Self {
        Self {
            source_id: source_id.into(),
            mapping_code: mapping_code.into(),
            existing_code,
        }
    }

    /// Existing code if supplied and non-blank, trimmed
    pub fn existing(&self) -> Option<&str> {
        self.existing_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn build_all_steps(&self) -> Result<String, BuildError> {
        build_all_steps(&self.source_id, &self.mapping_code, self.existing())
    }
}

/// Every step with `-- Step N` headers.
///
/// A non-blank `existing_code` adds the four error-recovery blocks; a blank
/// one is treated as not supplied.
pub fn build_all_steps(
    source_id: &str,
    mapping_code: &str,
    existing_code: Option<&str>,
) -> Result<String, BuildError> {
    let mut parts = vec![
        "-- Step 1: Lookup current mapping".to_string(),
        build_lookup_query(source_id)?,
        String::new(),
        "-- Step 2: Insert / update mapping".to_string(),
        build_insert_map(source_id, mapping_code)?,
    ];

    let existing = existing_code.map(str::trim).filter(|c| !c.is_empty());
    if let Some(existing) = existing {
        parts.extend([
            String::new(),
            "-- Error-Recovery Step 1: Check if new code exists in config".to_string(),
            build_config_check(mapping_code)?,
            String::new(),
            "-- Error-Recovery Step 2: Lookup existing reference row".to_string(),
            build_config_lookup_existing(existing)?,
            String::new(),
            "-- Error-Recovery Step 3: Clone config row for new code".to_string(),
            build_clone_config_row(mapping_code, existing)?,
            String::new(),
            "-- Error-Recovery Step 4: Re-run mapping insert".to_string(),
            build_insert_map(source_id, mapping_code)?,
        ]);
    }

    log::info!(
        "Generated mapping SQL for source {} (error recovery: {})",
        source_id.trim(),
        existing.is_some()
    );
    Ok(parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_basic() {
        let sql = build_lookup_query("348").unwrap();
        assert_eq!(
            sql,
            "SELECT *\nFROM Aurora.IMIX.TransactionTypes_TransactionTypeExternal_Map\nWHERE id = '348';"
        );
    }

    #[test]
    fn test_lookup_composite_id_and_trim() {
        assert!(build_lookup_query("149_1033").unwrap().contains("WHERE id = '149_1033'"));
        assert!(build_lookup_query("  348  ").unwrap().contains("WHERE id = '348'"));
    }

    #[test]
    fn test_lookup_empty() {
        let err = build_lookup_query("").unwrap_err();
        assert!(err.to_string().contains("Source ID"));
        assert!(build_lookup_query("   ").is_err());
    }

    #[test]
    fn test_insert_map() {
        assert_eq!(
            build_insert_map("348", "CACR0").unwrap(),
            "EXEC Aurora.IMIX.TransactionTypes_InsertMap '348', 'CACR0', 1;"
        );
        assert!(build_insert_map("  348 ", " CACR0 ").unwrap().contains("'348', 'CACR0'"));
    }

    #[test]
    fn test_insert_map_empty_inputs() {
        assert!(build_insert_map("", "CACR0").unwrap_err().to_string().contains("Source ID"));
        assert!(build_insert_map("348", "").unwrap_err().to_string().contains("Mapping code"));
    }

    #[test]
    fn test_config_check() {
        let sql = build_config_check("CACR0").unwrap();
        assert!(sql.contains("WHERE TransactionTypeExternal = 'CACR0'"));
        assert!(sql.contains("Config"));
        assert!(build_config_check("").unwrap_err().to_string().contains("Mapping code"));
    }

    #[test]
    fn test_config_lookup_existing() {
        let sql = build_config_lookup_existing("SCSHS").unwrap();
        assert!(sql.contains("WHERE TransactionTypeExternal = 'SCSHS'"));
        assert!(
            build_config_lookup_existing("")
                .unwrap_err()
                .to_string()
                .contains("Existing reference code")
        );
    }

    #[test]
    fn test_clone_config_row_layout() {
        let sql = build_clone_config_row("NEWCODE", "EXISTING").unwrap();
        let expected = "INSERT INTO Aurora.IMIX.TransactionTypes_TransactionTypeExternal_Config\n\
                        \x20   (TransactionTypeExternal,\n\
                        \x20   TransactionType,\n\
                        \x20   TransferType,\n\
                        \x20   Shares,\n\
                        \x20   TDW_Description,\n\
                        \x20   TDW_SourceTable)\n\
                        SELECT\n\
                        \x20   'NEWCODE', TransactionType, TransferType, Shares, TDW_Description, TDW_SourceTable\n\
                        FROM\n\
                        \x20   Aurora.IMIX.TransactionTypes_TransactionTypeExternal_Config\n\
                        WHERE\n\
                        \x20   TransactionTypeExternal = 'EXISTING';";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_clone_config_row_empty_inputs() {
        assert!(
            build_clone_config_row("", "B")
                .unwrap_err()
                .to_string()
                .contains("New mapping code")
        );
        assert!(
            build_clone_config_row("A", "")
                .unwrap_err()
                .to_string()
                .contains("Existing reference code")
        );
    }

    #[test]
    fn test_all_steps_without_error_recovery() {
        let sql = build_all_steps("348", "CACR0", None).unwrap();
        assert!(sql.contains("-- Step 1"));
        assert!(sql.contains("-- Step 2"));
        assert!(!sql.contains("Error-Recovery"));
    }

    #[test]
    fn test_all_steps_with_error_recovery_in_order() {
        let sql = build_all_steps("348", "CACR0", Some("SCSHS")).unwrap();
        let positions: Vec<usize> = (1..=4)
            .map(|n| sql.find(&format!("-- Error-Recovery Step {}", n)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sql.matches("-- Error-Recovery").count(), 4);
        assert!(sql.find("-- Step 2").unwrap() < positions[0]);
        assert_eq!(sql.matches("EXEC Aurora.IMIX.TransactionTypes_InsertMap").count(), 2);
    }

    #[test]
    fn test_blank_existing_treated_as_none() {
        let sql = build_all_steps("348", "CACR0", Some("  ")).unwrap();
        assert!(!sql.contains("Error-Recovery"));
        assert_eq!(sql, build_all_steps("348", "CACR0", None).unwrap());
    }

    #[test]
    fn test_all_steps_ends_with_semicolon() {
        for existing in [None, Some("SCSHS")] {
            let sql = build_all_steps("348", "CACR0", existing).unwrap();
            assert!(sql.trim_end().ends_with(';'));
        }
    }

    #[test]
    fn test_all_steps_fails_fast() {
        assert!(build_all_steps("", "CACR0", Some("SCSHS")).is_err());
        assert!(build_all_steps("348", " ", None).is_err());
    }

    #[test]
    fn test_request_existing_trimmed() {
        let request = MappingRequest::new("348", "CACR0", Some(" SCSHS ".into()));
        assert_eq!(request.existing(), Some("SCSHS"));
        assert!(request.build_all_steps().unwrap().contains("= 'SCSHS';"));

        let blank = MappingRequest::new("348", "CACR0", Some("".into()));
        assert_eq!(blank.existing(), None);
    }
}
