//! Codec identity descriptors and their builder.

use crate::CapabilityDescriptor;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shadowkit_error::{BuilderError, BuilderErrorKind};
use tracing::{debug, warn};

bitflags::bitflags! {
    /// Role and implementation flags of a codec.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct CodecFlags: u32 {
        /// Codec is an encoder
        const ENCODER = 1 << 0;
        /// Codec is provided by the device vendor
        const VENDOR = 1 << 1;
        /// Codec runs purely in software
        const SOFTWARE_ONLY = 1 << 2;
        /// Codec uses hardware acceleration
        const HARDWARE_ACCELERATED = 1 << 3;
    }
}

impl TryFrom<u32> for CodecFlags {
    type Error = BuilderError;

    /// Accept `flags` only if every set bit is a recognized flag.
    #[track_caller]
    fn try_from(flags: u32) -> Result<Self, Self::Error> {
        Self::from_bits(flags).ok_or_else(|| {
            BuilderError::new(BuilderErrorKind::InvalidFlags {
                flags,
                unsupported: flags & !Self::all().bits(),
            })
        })
    }
}

/// Accepts the same text and numeric forms bitflags writes, then rejects
/// unrecognized bits the way [`IdentityDescriptorBuilder::flags`] does.
impl<'de> Deserialize<'de> for CodecFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flags: Self = bitflags::serde::deserialize(deserializer)?;
        Self::try_from(flags.bits()).map_err(serde::de::Error::custom)
    }
}

/// A codec: its name, role flags and per-mime-type capabilities.
///
/// # Examples
///
/// ```
/// use shadowkit_core::{CodecFlags, IdentityDescriptor};
///
/// # fn main() -> Result<(), shadowkit_core::BuilderError> {
/// let decoder = IdentityDescriptor::builder()
///     .name("test.decoder.vp9")
///     .flags(CodecFlags::HARDWARE_ACCELERATED.bits())?
///     .build();
///
/// assert!(decoder.is_hardware_accelerated());
/// assert!(!decoder.is_encoder());
/// assert_eq!(decoder.canonical_name(), "test.decoder.vp9");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct IdentityDescriptor {
    /// Codec name
    name: String,
    /// Canonical codec name; equals `name` unless set explicitly
    canonical_name: String,
    #[getter(skip)]
    flags: CodecFlags,
    /// Capability descriptors, typically one per supported mime type
    capabilities: Vec<CapabilityDescriptor>,
}

impl IdentityDescriptor {
    /// Start building an identity descriptor.
    pub fn builder() -> IdentityDescriptorBuilder {
        IdentityDescriptorBuilder::default()
    }

    /// Role and implementation flags.
    pub fn flags(&self) -> CodecFlags {
        self.flags
    }

    /// Whether the codec is an encoder.
    pub fn is_encoder(&self) -> bool {
        self.flags.contains(CodecFlags::ENCODER)
    }

    /// Whether the codec is vendor-provided.
    pub fn is_vendor(&self) -> bool {
        self.flags.contains(CodecFlags::VENDOR)
    }

    /// Whether the codec runs purely in software.
    pub fn is_software_only(&self) -> bool {
        self.flags.contains(CodecFlags::SOFTWARE_ONLY)
    }

    /// Whether the codec is hardware accelerated.
    pub fn is_hardware_accelerated(&self) -> bool {
        self.flags.contains(CodecFlags::HARDWARE_ACCELERATED)
    }

    /// Distinct mime types across the capabilities, in first-seen order.
    pub fn supported_mime_types(&self) -> Vec<&str> {
        let mut mime_types: Vec<&str> = Vec::with_capacity(self.capabilities.len());
        for capability in &self.capabilities {
            if !mime_types.contains(&capability.mime_type()) {
                mime_types.push(capability.mime_type());
            }
        }
        mime_types
    }

    /// First capability descriptor whose mime type equals `mime_type`.
    pub fn capability_for(&self, mime_type: &str) -> Option<&CapabilityDescriptor> {
        self.capabilities
            .iter()
            .find(|capability| capability.mime_type() == mime_type)
    }
}

/// Builder for [`IdentityDescriptor`].
///
/// Every field is optional: the name defaults to empty, flags to none and
/// capabilities to an empty list. Only [`flags`](Self::flags) can fail.
#[derive(Debug, Clone, Default)]
pub struct IdentityDescriptorBuilder {
    name: Option<String>,
    canonical_name: Option<String>,
    flags: Option<CodecFlags>,
    capabilities: Option<Vec<CapabilityDescriptor>>,
}

impl IdentityDescriptorBuilder {
    /// Sets the codec name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the canonical name, for codecs known under an alias.
    pub fn canonical_name(mut self, canonical_name: impl Into<String>) -> Self {
        self.canonical_name = Some(canonical_name.into());
        self
    }

    /// Sets the role and implementation flags from a raw bitmask.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderErrorKind::InvalidFlags`] if `flags` has any bit
    /// outside [`CodecFlags::all`].
    #[track_caller]
    pub fn flags(mut self, flags: u32) -> Result<Self, BuilderError> {
        match CodecFlags::try_from(flags) {
            Ok(flags) => {
                self.flags = Some(flags);
                Ok(self)
            }
            Err(err) => {
                warn!(flags, "Rejecting unsupported codec flags");
                Err(err)
            }
        }
    }

    /// Sets the capability descriptors.
    pub fn capabilities(mut self, capabilities: impl Into<Vec<CapabilityDescriptor>>) -> Self {
        self.capabilities = Some(capabilities.into());
        self
    }

    /// Builds the `IdentityDescriptor`.
    pub fn build(self) -> IdentityDescriptor {
        let name = self.name.unwrap_or_default();
        let descriptor = IdentityDescriptor {
            canonical_name: self.canonical_name.unwrap_or_else(|| name.clone()),
            name,
            flags: self.flags.unwrap_or_default(),
            capabilities: self.capabilities.unwrap_or_default(),
        };
        debug!(
            name = %descriptor.name,
            flags = descriptor.flags.bits(),
            capabilities = descriptor.capabilities.len(),
            "Built identity descriptor"
        );
        descriptor
    }
}
