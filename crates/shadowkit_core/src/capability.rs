//! Codec capability descriptors and their builder.

use crate::{
    AudioCapability, EncoderCapability, FeatureCatalog, FeatureRegistry, FormatSpec,
    MediaCapability, MediaCategory, ProfileLevel, VideoCapability,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shadowkit_error::BuilderError;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of concurrent codec instances every descriptor advertises.
pub const MAX_SUPPORTED_INSTANCES: u32 = 32;

/// Everything a codec supports for one mime type.
///
/// Built by [`CapabilityDescriptorBuilder`]; immutable afterwards.
///
/// # Examples
///
/// ```
/// use shadowkit_core::{CapabilityDescriptor, FormatSpec, ProfileLevel, names};
///
/// # fn main() -> Result<(), shadowkit_core::BuilderError> {
/// let vp9 = CapabilityDescriptor::builder()
///     .format(
///         FormatSpec::new("video/x-vnd.on2.vp9")
///             .with_features([names::SECURE_PLAYBACK, names::MULTIPLE_FRAMES]),
///     )
///     .profile_levels([ProfileLevel::new(0x08, 0x2000)])
///     .color_formats([19, 21])
///     .build()?;
///
/// assert!(vp9.is_video());
/// assert!(vp9.encoder_capability().is_none());
/// assert_eq!(vp9.color_formats(), &[19, 21]);
/// assert!(vp9.is_feature_supported(names::SECURE_PLAYBACK));
/// assert!(!vp9.is_feature_supported(names::DYNAMIC_TIMESTAMP));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(try_from = "RawCapabilityDescriptor")]
pub struct CapabilityDescriptor {
    #[getter(skip)]
    mime_type: String,
    #[getter(skip)]
    is_encoder: bool,
    /// Supported profile/level pairs, in the order they were configured
    profile_levels: Vec<ProfileLevel>,
    /// Supported color formats; empty for non-video codecs unless configured
    color_formats: Vec<i32>,
    /// Audio or video capabilities, depending on the mime type
    media_capability: MediaCapability,
    /// Encoder capabilities, present only for encoders
    encoder_capability: Option<EncoderCapability>,
    #[getter(skip)]
    supported_feature_mask: u32,
    #[getter(skip)]
    max_supported_instances: u32,
    /// The format this descriptor was built from
    default_format: FormatSpec,
    /// Features recognized for this codec's role
    valid_features: Arc<FeatureRegistry>,
}

impl CapabilityDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> CapabilityDescriptorBuilder {
        CapabilityDescriptorBuilder::default()
    }

    /// Mime type, exactly as given in the format.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Whether the descriptor belongs to an encoder.
    pub fn is_encoder(&self) -> bool {
        self.is_encoder
    }

    /// OR of the bits of every recognized feature the format enabled.
    pub fn supported_feature_mask(&self) -> u32 {
        self.supported_feature_mask
    }

    /// Maximum number of concurrent instances.
    pub fn max_supported_instances(&self) -> u32 {
        self.max_supported_instances
    }

    /// Category of the media capability.
    pub fn category(&self) -> MediaCategory {
        self.media_capability.category()
    }

    /// Whether this is a video codec.
    pub fn is_video(&self) -> bool {
        self.category() == MediaCategory::Video
    }

    /// Whether this is an audio (or other non-video) codec.
    pub fn is_audio(&self) -> bool {
        self.category() == MediaCategory::Audio
    }

    /// Audio capabilities, if this is not a video codec.
    pub fn audio_capability(&self) -> Option<&AudioCapability> {
        self.media_capability.as_audio()
    }

    /// Video capabilities, if this is a video codec.
    pub fn video_capability(&self) -> Option<&VideoCapability> {
        self.media_capability.as_video()
    }

    /// Whether `name` is a recognized feature with its bit set in the mask.
    pub fn is_feature_supported(&self, name: &str) -> bool {
        self.valid_features
            .is_supported(name, self.supported_feature_mask)
    }
}

/// Unchecked serialized form of a [`CapabilityDescriptor`].
#[derive(Deserialize)]
struct RawCapabilityDescriptor {
    mime_type: String,
    is_encoder: bool,
    profile_levels: Vec<ProfileLevel>,
    color_formats: Vec<i32>,
    media_capability: MediaCapability,
    encoder_capability: Option<EncoderCapability>,
    supported_feature_mask: u32,
    max_supported_instances: u32,
    default_format: FormatSpec,
    valid_features: Arc<FeatureRegistry>,
}

/// Re-derives everything the builder would have derived and rejects any
/// stored value that disagrees.
impl TryFrom<RawCapabilityDescriptor> for CapabilityDescriptor {
    type Error = String;

    fn try_from(raw: RawCapabilityDescriptor) -> Result<Self, Self::Error> {
        if raw.mime_type != *raw.default_format.mime_type() {
            return Err(format!(
                "mime type '{}' differs from default format '{}'",
                raw.mime_type,
                raw.default_format.mime_type()
            ));
        }
        let category = raw.default_format.category();
        if raw.media_capability.category() != category {
            return Err(format!(
                "{} capability stored for {} mime type '{}'",
                raw.media_capability.category(),
                category,
                raw.mime_type
            ));
        }
        if raw.encoder_capability.is_some() != raw.is_encoder {
            return Err(format!(
                "encoder capability must be present exactly when is_encoder is set (is_encoder = {})",
                raw.is_encoder
            ));
        }
        if raw.media_capability != MediaCapability::for_format(&raw.default_format) {
            return Err(format!(
                "media capability does not match default format '{}'",
                raw.mime_type
            ));
        }
        let expected_encoder = raw
            .is_encoder
            .then(|| EncoderCapability::from_format(&raw.default_format));
        if raw.encoder_capability != expected_encoder {
            return Err(format!(
                "encoder capability does not match default format '{}'",
                raw.mime_type
            ));
        }
        let mask = raw.valid_features.supported_mask(&raw.default_format);
        if raw.supported_feature_mask != mask {
            return Err(format!(
                "feature mask {:#x} does not match {:#x} computed from the default format",
                raw.supported_feature_mask, mask
            ));
        }
        if raw.max_supported_instances != MAX_SUPPORTED_INSTANCES {
            return Err(format!(
                "max supported instances must be {}, got {}",
                MAX_SUPPORTED_INSTANCES, raw.max_supported_instances
            ));
        }

        Ok(Self {
            mime_type: raw.mime_type,
            is_encoder: raw.is_encoder,
            profile_levels: raw.profile_levels,
            color_formats: raw.color_formats,
            media_capability: raw.media_capability,
            encoder_capability: raw.encoder_capability,
            supported_feature_mask: raw.supported_feature_mask,
            max_supported_instances: raw.max_supported_instances,
            default_format: raw.default_format,
            valid_features: raw.valid_features,
        })
    }
}

/// Raw builder input; turned into a [`CapabilityDescriptor`] by
/// [`CapabilityDescriptorBuilder::build`].
#[derive(Debug, Clone, derive_builder::Builder)]
#[builder(
    name = "CapabilityDescriptorBuilder",
    public,
    derive(Debug),
    setter(into),
    build_fn(private, name = "build_request", error = "BuilderError")
)]
struct CapabilityRequest {
    /// Format the codec handles. Required.
    format: FormatSpec,
    /// Whether the codec encodes. Defaults to `false`.
    #[builder(default)]
    is_encoder: bool,
    /// Supported profile/level pairs. Required, but may be empty.
    profile_levels: Vec<ProfileLevel>,
    /// Supported color formats. Required for video, may be empty.
    #[builder(setter(into, strip_option), default)]
    color_formats: Option<Vec<i32>>,
    /// Feature registries to match the format against. Defaults to the
    /// platform catalog.
    #[builder(default)]
    features: Arc<FeatureCatalog>,
}

impl CapabilityDescriptorBuilder {
    /// Create an empty builder using the platform feature catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and synthesize a descriptor.
    ///
    /// The builder is left untouched, so it can be corrected after a failure
    /// or reused for another build.
    ///
    /// # Errors
    ///
    /// Returns [`shadowkit_error::BuilderErrorKind::MissingField`] when the
    /// format or the profile levels were never set, or when a video format
    /// has no color formats.
    #[instrument(skip(self))]
    pub fn build(&self) -> Result<CapabilityDescriptor, BuilderError> {
        self.build_request()?.into_descriptor()
    }
}

impl CapabilityRequest {
    fn into_descriptor(self) -> Result<CapabilityDescriptor, BuilderError> {
        let category = self.format.category();
        let color_formats = match self.color_formats {
            Some(color_formats) => color_formats,
            None if category == MediaCategory::Video => {
                return Err(BuilderError::missing_field("color_formats"));
            }
            None => Vec::new(),
        };

        let media_capability = MediaCapability::for_format(&self.format);
        let encoder_capability = self
            .is_encoder
            .then(|| EncoderCapability::from_format(&self.format));

        let valid_features = Arc::clone(self.features.for_role(self.is_encoder));
        let supported_feature_mask = valid_features.supported_mask(&self.format);

        debug!(
            mime_type = %self.format.mime_type(),
            %category,
            is_encoder = self.is_encoder,
            profile_levels = self.profile_levels.len(),
            color_formats = color_formats.len(),
            supported_feature_mask,
            "Built capability descriptor"
        );

        Ok(CapabilityDescriptor {
            mime_type: self.format.mime_type().clone(),
            is_encoder: self.is_encoder,
            profile_levels: self.profile_levels,
            color_formats,
            media_capability,
            encoder_capability,
            supported_feature_mask,
            max_supported_instances: MAX_SUPPORTED_INSTANCES,
            default_format: self.format,
            valid_features,
        })
    }
}
