//! Configuration loading errors.

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigSource {
    /// A single file loaded by path
    #[display("file {}", _0)]
    File(String),
    /// The merged bundled, home and working-directory layers
    #[display("layered shadowkit.toml")]
    Layered,
    /// A named section, checked after the layers were merged
    #[display("section [{}]", _0)]
    Section(String),
}

/// A configuration file could not be read, parsed or validated.
///
/// # Examples
///
/// ```
/// use shadowkit_error::{ConfigError, ConfigSource};
///
/// let err = ConfigError::new(
///     ConfigSource::Section("properties".to_string()),
///     "cache_capacity must be positive",
/// );
/// assert_eq!(err.source_section(), Some("properties"));
/// assert!(err.to_string().contains("section [properties]"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error in {}: {} at line {} in {}", origin, message, line, file)]
pub struct ConfigError {
    /// Which layer or section was being handled
    pub origin: ConfigSource,
    /// What went wrong
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Record a failure in `origin`, located at the caller.
    #[track_caller]
    pub fn new(origin: ConfigSource, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            origin,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Failure reading or parsing the file at `path`.
    #[track_caller]
    pub fn in_file(path: impl AsRef<std::path::Path>, message: impl Into<String>) -> Self {
        Self::new(
            ConfigSource::File(path.as_ref().display().to_string()),
            message,
        )
    }

    /// Invalid value in `section` of the merged configuration.
    #[track_caller]
    pub fn in_section(section: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ConfigSource::Section(section.into()), message)
    }

    /// Section name, if the error concerns one section.
    pub fn source_section(&self) -> Option<&str> {
        match &self.origin {
            ConfigSource::Section(section) => Some(section),
            _ => None,
        }
    }
}
