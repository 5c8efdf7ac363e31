//! Codec capability descriptors for device-testing fakes.
//!
//! This crate fabricates the capability data a media codec advertises: which
//! format it handles, whether it encodes, which profile/levels and color
//! formats it supports, and which optional features are switched on. Two
//! builders produce the descriptors:
//!
//! - [`CapabilityDescriptorBuilder`] validates its inputs and synthesizes one
//!   [`CapabilityDescriptor`] per supported format.
//! - [`IdentityDescriptorBuilder`] names a codec, sets its role flags and
//!   collects its capability descriptors into an [`IdentityDescriptor`].
//!
//! # Example
//!
//! ```
//! use shadowkit_core::{
//!     CapabilityDescriptor, CodecFlags, FormatSpec, IdentityDescriptor, ProfileLevel,
//! };
//!
//! # fn main() -> Result<(), shadowkit_core::BuilderError> {
//! let aac = CapabilityDescriptor::builder()
//!     .format(FormatSpec::new("audio/mp4a-latm").with_feature("DynamicTimestamp", true))
//!     .is_encoder(true)
//!     .profile_levels([ProfileLevel::new(39, 0)])
//!     .build()?;
//!
//! let encoder = IdentityDescriptor::builder()
//!     .name("test.encoder.aac")
//!     .flags((CodecFlags::ENCODER | CodecFlags::VENDOR).bits())?
//!     .capabilities(vec![aac])
//!     .build();
//!
//! assert!(encoder.is_encoder());
//! assert_eq!(encoder.supported_mime_types(), vec!["audio/mp4a-latm"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capability;
mod features;
mod format;
mod identity;
mod media;
mod profile;
mod range;

pub use capability::{CapabilityDescriptor, CapabilityDescriptorBuilder, MAX_SUPPORTED_INSTANCES};
pub use features::{Feature, FeatureCatalog, FeatureRegistry, names};
pub use format::{FormatSpec, MediaCategory, keys};
pub use identity::{CodecFlags, IdentityDescriptor, IdentityDescriptorBuilder};
pub use media::{AudioCapability, BitrateMode, EncoderCapability, MediaCapability, VideoCapability};
pub use profile::ProfileLevel;
pub use range::ValueRange;

pub use shadowkit_error::{BuilderError, BuilderErrorKind};
