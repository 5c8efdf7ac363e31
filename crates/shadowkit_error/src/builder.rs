//! Builder-related errors.

/// Specific builder error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set on the builder.
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// Codec flags contain bits outside the recognized set.
    #[display("Unsupported flags: {:#x} (unrecognized bits {:#x})", flags, unsupported)]
    InvalidFlags {
        /// The rejected flag value
        flags: u32,
        /// The bits that are not recognized
        unsupported: u32,
    },
}

/// Builder error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`BuilderErrorKind::MissingField`] error.
    #[track_caller]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::MissingField(field.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }

    /// Name of the missing field, if this is a missing-field error.
    pub fn missing_field_name(&self) -> Option<&str> {
        match &self.kind {
            BuilderErrorKind::MissingField(field) => Some(field),
            _ => None,
        }
    }
}

/// Convert from the error derive_builder raises for an unset required field.
impl From<derive_builder::UninitializedFieldError> for BuilderError {
    #[track_caller]
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::missing_field(err.field_name())
    }
}
