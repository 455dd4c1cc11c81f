/// Structural problems with an uploaded source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// File extension is not one of the supported formats
    UnsupportedFormat { extension: String },
    /// The file could not be read as the format its extension claims
    MalformedInput { cause: String },
    /// A custom validation pattern failed to compile
    InvalidPattern { pattern: String, cause: String },
}

impl IngestError {
    pub(crate) fn malformed(cause: impl std::fmt::Display) -> Self {
        IngestError::MalformedInput {
            cause: cause.to_string(),
        }
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::UnsupportedFormat { extension } => {
                write!(f, "Unsupported file type: .{}", extension)
            }
            IngestError::MalformedInput { cause } => write!(f, "Failed to read file: {}", cause),
            IngestError::InvalidPattern { pattern, cause } => {
                write!(f, "Invalid validation pattern '{}': {}", pattern, cause)
            }
        }
    }
}

impl std::error::Error for IngestError {}
