//! Code ingestion: extract, normalize, validate and deduplicate identifiers
//!
//! Sources are either an uploaded file (CSV / XLSX / XLS, first column only)
//! or pasted text. Both go through [`normalize_and_validate`], which produces
//! a [`ParseOutcome`]. Invalid values are reported, never fatal.

mod error;
mod outcome;
mod reader;
mod validate;

use std::collections::HashSet;

pub use error::IngestError;
pub use outcome::ParseOutcome;
pub use reader::{SourceFormat, extract_first_column};
pub use validate::{CodePattern, is_valid_code, validate_codes};

/// Parse codes from an uploaded file.
///
/// `filename` is only used to detect the format. `pattern` overrides the
/// default identifier pattern.
pub fn parse(
    bytes: &[u8],
    filename: &str,
    dedupe: bool,
    pattern: Option<&CodePattern>,
) -> Result<ParseOutcome, IngestError> {
    let format = SourceFormat::from_filename(filename)?;
    log::debug!("Reading {} ({} bytes) as {}", filename, bytes.len(), format);

    let raw_values = extract_first_column(bytes, format)?;
    Ok(normalize_and_validate(raw_values, pattern, dedupe))
}

/// Parse codes typed or pasted by an operator, one per line or comma-separated
pub fn parse_text(text: &str, dedupe: bool, pattern: Option<&CodePattern>) -> ParseOutcome {
    normalize_and_validate(split_entries(text), pattern, dedupe)
}

/// Compile an optional pattern override
pub fn compile_pattern(pattern: Option<&str>) -> Result<Option<CodePattern>, IngestError> {
    pattern
        .map(|p| {
            CodePattern::new(p).map_err(|e| IngestError::InvalidPattern {
                pattern: p.to_string(),
                cause: e.to_string(),
            })
        })
        .transpose()
}

/// Trim, validate and optionally deduplicate raw values.
///
/// Blank-after-trim values are dropped before counting. Validation runs
/// before deduplication, so invalid values are never deduplicated and never
/// count towards `duplicates_removed`.
pub fn normalize_and_validate<I, S>(raw: I, pattern: Option<&CodePattern>, dedupe: bool) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pattern = pattern.unwrap_or(validate::default_pattern());

    let mut raw_values = Vec::new();
    let mut valid_values = Vec::new();
    let mut invalid_values = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates_removed = 0;

    for value in raw {
        let code = value.as_ref().trim();
        if code.is_empty() {
            continue;
        }

        raw_values.push(code.to_string());

        if !pattern.is_match(code) {
            log::warn!("Invalid code skipped: {}", code);
            invalid_values.push(code.to_string());
            continue;
        }

        if dedupe {
            if seen.contains(code) {
                duplicates_removed += 1;
                continue;
            }
            seen.insert(code.to_string());
        }

        valid_values.push(code.to_string());
    }

    log::info!(
        "Parsed {} raw codes -> {} valid, {} invalid, {} dupes removed",
        raw_values.len(),
        valid_values.len(),
        invalid_values.len(),
        duplicates_removed
    );

    ParseOutcome::new(raw_values, valid_values, invalid_values, duplicates_removed)
}

/// Split pasted text on newlines and commas, keeping empty pieces for the
/// normalizer to drop
fn split_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r', ','])
}

/// Split a comma-separated list, trimming entries and dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Split text into one trimmed, non-blank entry per line
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
