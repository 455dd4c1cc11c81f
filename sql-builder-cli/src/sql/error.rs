/// Failure to build a SQL statement from the given inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A required text field was empty or blank (e.g. "Source ID")
    EmptyField { field: &'static str },
    /// No entity codes were supplied
    NoCodes,
    /// No target types were supplied
    NoTargetTypes,
    /// Refresh family not present in the procedure table
    UnknownFamily { family: String, allowed: Vec<String> },
    /// No non-blank transaction references
    EmptyRefs,
    /// No field/value pair survived trimming
    NoFieldsProvided,
}

impl BuildError {
    /// True for errors caused by missing user input (shown verbatim, not logged as faults)
    pub fn is_validation(&self) -> bool {
        !matches!(self, BuildError::UnknownFamily { .. })
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::EmptyField { field } => write!(f, "{} must not be empty.", field),
            BuildError::NoCodes => write!(f, "No codes provided - cannot build SQL."),
            BuildError::NoTargetTypes => write!(f, "No target types selected - cannot build SQL."),
            BuildError::UnknownFamily { family, allowed } => write!(
                f,
                "Unknown refresh family '{}'. Expected one of: {}",
                family,
                allowed.join(", ")
            ),
            BuildError::EmptyRefs => write!(f, "At least one transaction reference is required."),
            BuildError::NoFieldsProvided => write!(f, "At least one field/value pair is required."),
        }
    }
}

impl std::error::Error for BuildError {}

/// Trim `value`, failing with `EmptyField` when nothing is left
pub(crate) fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, BuildError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BuildError::EmptyField { field });
    }
    Ok(trimmed)
}
