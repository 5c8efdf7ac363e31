//! Error types for the shadowkit workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use shadowkit_error::{BuilderError, BuilderErrorKind, ShadowkitResult};
//!
//! fn build_codec() -> ShadowkitResult<()> {
//!     Err(BuilderError::new(BuilderErrorKind::MissingField("format".to_string())))?
//! }
//!
//! match build_codec() {
//!     Ok(()) => println!("built"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod properties;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigSource};
pub use error::{ShadowkitError, ShadowkitErrorKind, ShadowkitResult};
pub use properties::{PropertiesError, PropertiesErrorKind};
