//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, PropertiesError};

/// Every error a shadowkit crate can surface.
///
/// # Examples
///
/// ```
/// use shadowkit_error::{ConfigError, ShadowkitError};
///
/// let err: ShadowkitError = ConfigError::in_file("shadowkit.toml", "unreadable").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ShadowkitErrorKind {
    /// Builder validation error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Properties resource error
    #[from(PropertiesError)]
    Properties(PropertiesError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Shadowkit error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Shadowkit Error: {}", _0)]
pub struct ShadowkitError(Box<ShadowkitErrorKind>);

impl ShadowkitError {
    /// Create a new error from a kind.
    pub fn new(kind: ShadowkitErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ShadowkitErrorKind {
        &self.0
    }
}

impl<T> From<T> for ShadowkitError
where
    T: Into<ShadowkitErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for shadowkit operations.
pub type ShadowkitResult<T> = std::result::Result<T, ShadowkitError>;
