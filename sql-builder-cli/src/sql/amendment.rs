//! SQL for the CRM transaction amendments workflow
//!
//! Pre-check and post-check are the same pair of SELECTs so the operator can
//! diff the before/after result sets.

use indexmap::IndexMap;

use super::BuildError;
use crate::constants::{CRM_CONTRIBUTIONS_TABLE, CRM_TRANSACTIONS_TABLE};

/// Trim refs and drop blanks; at least one must remain
fn clean_refs<S: AsRef<str>>(refs: &[S]) -> Result<Vec<String>, BuildError> {
    let cleaned: Vec<String> = refs
        .iter()
        .map(|r| r.as_ref().trim())
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        return Err(BuildError::EmptyRefs);
    }
    Ok(cleaned)
}

/// Trim names and values; pairs with a blank side are dropped.
/// A repeated name keeps its first position and takes the last value.
fn clean_fields<I, K, V>(fields: I) -> Result<IndexMap<String, String>, BuildError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut cleaned = IndexMap::new();
    for (name, value) in fields {
        let (name, value) = (name.as_ref().trim(), value.as_ref().trim());
        if !name.is_empty() && !value.is_empty() {
            cleaned.insert(name.to_string(), value.to_string());
        }
    }

    if cleaned.is_empty() {
        return Err(BuildError::NoFieldsProvided);
    }
    Ok(cleaned)
}

fn ref_in_clause(refs: &[String]) -> String {
    refs.iter()
        .map(|r| format!("'{}'", r))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_block(refs: &[String]) -> String {
    let in_clause = ref_in_clause(refs);
    format!(
        "SELECT *\nFROM {tx}\nWHERE ref IN ({in_clause});\n\nSELECT *\nFROM {contrib}\nWHERE ref IN ({in_clause});",
        tx = CRM_TRANSACTIONS_TABLE,
        contrib = CRM_CONTRIBUTIONS_TABLE,
    )
}

/// SELECTs showing the current state of the given refs
pub fn build_pre_check<S: AsRef<str>>(refs: &[S]) -> Result<String, BuildError> {
    Ok(select_block(&clean_refs(refs)?))
}

/// SELECTs verifying the amendment; identical to the pre-check
pub fn build_post_check<S: AsRef<str>>(refs: &[S]) -> Result<String, BuildError> {
    Ok(select_block(&clean_refs(refs)?))
}

/// One UPDATE setting every non-blank field on the given refs
pub fn build_update<S, I, K, V>(refs: &[S], fields: I) -> Result<String, BuildError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let refs = clean_refs(refs)?;
    let fields = clean_fields(fields)?;

    let set_clauses = fields
        .iter()
        .map(|(name, value)| format!("{} = '{}'", name, value))
        .collect::<Vec<_>>()
        .join(",\n    ");

    log::info!(
        "Generated amendment UPDATE ({} refs, {} fields)",
        refs.len(),
        fields.len()
    );
    Ok(format!(
        "UPDATE {}\nSET {}\nWHERE ref IN ({});",
        CRM_TRANSACTIONS_TABLE,
        set_clauses,
        ref_in_clause(&refs)
    ))
}

/// Pre-check, UPDATE and post-check with comment headers
pub fn build_full_flow<S, I, K, V>(refs: &[S], fields: I) -> Result<String, BuildError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let refs = clean_refs(refs)?;
    let update = build_update(&refs, fields)?;
    let check = select_block(&refs);

    Ok([
        "-- Pre-check: inspect current state",
        check.as_str(),
        "",
        "-- UPDATE: apply amendments",
        update.as_str(),
        "",
        "-- Post-check: verify changes",
        check.as_str(),
    ]
    .join("\n"))
}

/// Inputs for one amendment. Refs may repeat; they are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmendmentRequest {
    pub refs: Vec<String>,
    pub fields: IndexMap<String, String>,
}

impl AmendmentRequest {
    pub fn new(refs: Vec<String>, fields: IndexMap<String, String>) -> Self {
        Self { refs, fields }
    }

    pub fn pre_check(&self) -> Result<String, BuildError> {
        build_pre_check(&self.refs)
    }

    pub fn update(&self) -> Result<String, BuildError> {
        build_update(&self.refs, &self.fields)
    }

    pub fn post_check(&self) -> Result<String, BuildError> {
        build_post_check(&self.refs)
    }

    pub fn full_flow(&self) -> Result<String, BuildError> {
        build_full_flow(&self.refs, &self.fields)
    }
}
