//! Result of one ingestion call

use serde::Serialize;

/// Codes extracted from a source together with their classification.
///
/// Built once per ingestion call and never mutated afterwards. When dedupe
/// is enabled, `raw.len() == valid.len() + invalid.len() + duplicates_removed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    raw_values: Vec<String>,
    valid_values: Vec<String>,
    invalid_values: Vec<String>,
    duplicates_removed: usize,
}

impl ParseOutcome {
    pub(crate) fn new(
        raw_values: Vec<String>,
        valid_values: Vec<String>,
        invalid_values: Vec<String>,
        duplicates_removed: usize,
    ) -> Self {
        Self {
            raw_values,
            valid_values,
            invalid_values,
            duplicates_removed,
        }
    }

    /// Every non-blank trimmed value, in source order
    pub fn raw_values(&self) -> &[String] {
        &self.raw_values
    }

    /// Values that passed validation (deduplicated if requested)
    pub fn valid_values(&self) -> &[String] {
        &self.valid_values
    }

    /// Values that failed validation, in encounter order, never deduplicated
    pub fn invalid_values(&self) -> &[String] {
        &self.invalid_values
    }

    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    pub fn total_found(&self) -> usize {
        self.raw_values.len()
    }

    pub fn valid_count(&self) -> usize {
        self.valid_values.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_values.is_empty()
    }

    pub fn has_invalid(&self) -> bool {
        !self.invalid_values.is_empty()
    }

    /// First `count` valid values
    pub fn preview(&self, count: usize) -> &[String] {
        &self.valid_values[..count.min(self.valid_values.len())]
    }

    /// Hand the valid values over to a builder
    pub fn into_valid_values(self) -> Vec<String> {
        self.valid_values
    }
}
