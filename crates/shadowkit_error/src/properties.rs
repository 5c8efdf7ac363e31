//! Properties resource error types.

/// Kinds of properties loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PropertiesErrorKind {
    /// The resource exists but could not be read.
    #[display("Failed to read resource '{}': {}", resource, reason)]
    Read {
        /// Resource name that was being read
        resource: String,
        /// Underlying I/O failure
        reason: String,
    },
    /// The resource was read but its contents are not valid properties text.
    #[display("Malformed properties in '{}': {}", resource, reason)]
    Malformed {
        /// Resource name that was being parsed
        resource: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Properties error with location tracking.
///
/// # Examples
///
/// ```
/// use shadowkit_error::{PropertiesError, PropertiesErrorKind};
///
/// let err = PropertiesError::new(PropertiesErrorKind::Read {
///     resource: "com/example/shadowkit.properties".to_string(),
///     reason: "permission denied".to_string(),
/// });
/// assert!(format!("{}", err).contains("permission denied"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Properties Error: {} at line {} in {}", kind, line, file)]
pub struct PropertiesError {
    /// The kind of error that occurred
    pub kind: PropertiesErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PropertiesError {
    /// Create a new properties error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PropertiesErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
