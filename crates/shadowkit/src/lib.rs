//! Shadowkit - codec capability and identity descriptors.
//!
//! Shadowkit describes the codecs a simulated media framework reports: which
//! mime types each codec handles, with which profiles, color formats and
//! optional features. It also loads per-namespace properties resources that
//! tune a simulation.
//!
//! # Quick Start
//!
//! ```
//! use shadowkit::{CapabilityDescriptor, CodecFlags, FormatSpec, IdentityDescriptor, ProfileLevel};
//!
//! # fn main() -> Result<(), shadowkit::ShadowkitError> {
//! let vp9 = CapabilityDescriptor::builder()
//!     .format(FormatSpec::new("video/x-vnd.on2.vp9").with_feature("AdaptivePlayback", true))
//!     .profile_levels([ProfileLevel::new(0x01, 0x100)])
//!     .color_formats([0x7F42_0888])
//!     .build()?;
//!
//! let decoder = IdentityDescriptor::builder()
//!     .name("test.decoder.vp9")
//!     .flags(CodecFlags::HARDWARE_ACCELERATED.bits())?
//!     .capabilities(vec![vp9])
//!     .build();
//!
//! assert_eq!(decoder.supported_mime_types(), vec!["video/x-vnd.on2.vp9"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `shadowkit_error` - Error types
//! - `shadowkit_core` - Formats, feature registries, descriptors and builders
//! - `shadowkit_cache` - Bounded properties loader
//!
//! This crate re-exports all of them and adds configuration and tracing
//! setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod telemetry;

pub use config::{FeaturesSection, PropertiesSection, ShadowkitConfig};
pub use telemetry::{DEFAULT_FILTER, TracingConfig, init_tracing, init_tracing_with_config};

pub use shadowkit_cache::*;
pub use shadowkit_core::*;
pub use shadowkit_error::*;
