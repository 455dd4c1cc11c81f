//! Identifier validation
//!
//! A code is valid when the whole trimmed value matches the pattern. Custom
//! patterns are anchored the same way as the built-in one, so `[A-Z]+`
//! rejects `"ABC1"` instead of matching its prefix.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::CODE_PATTERN;

static DEFAULT_PATTERN: LazyLock<CodePattern> = LazyLock::new(|| {
    CodePattern::new(CODE_PATTERN).expect("built-in code pattern compiles")
});

/// Compiled identifier pattern, always anchored at both ends
#[derive(Debug, Clone)]
pub struct CodePattern {
    source: String,
    regex: Regex,
}

impl CodePattern {
    /// Compile a pattern body. Leading `^` / trailing `$` are allowed but not required.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as it was given, without the added anchors
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, code: &str) -> bool {
        self.regex.is_match(code)
    }
}

impl Default for CodePattern {
    fn default() -> Self {
        DEFAULT_PATTERN.clone()
    }
}

pub(crate) fn default_pattern() -> &'static CodePattern {
    &DEFAULT_PATTERN
}

/// Return true if `code` matches `pattern` (or the default pattern)
pub fn is_valid_code(code: &str, pattern: Option<&CodePattern>) -> bool {
    pattern.unwrap_or(default_pattern()).is_match(code)
}

/// Split codes into (valid, invalid) while preserving order
pub fn validate_codes<S: AsRef<str>>(
    codes: &[S],
    pattern: Option<&CodePattern>,
) -> (Vec<String>, Vec<String>) {
    let pattern = pattern.unwrap_or(default_pattern());

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for code in codes {
        let code = code.as_ref();
        if pattern.is_match(code) {
            valid.push(code.to_string());
        } else {
            invalid.push(code.to_string());
        }
    }
    (valid, invalid)
}
