//! Feature registries: the recognized feature names and their mask bits.

use crate::FormatSpec;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Names of the features the platform catalog recognizes.
pub mod names {
    /// Decoder can change resolution without reconfiguration
    pub const ADAPTIVE_PLAYBACK: &str = "AdaptivePlayback";
    /// Decoder supports secure (protected) playback
    pub const SECURE_PLAYBACK: &str = "SecurePlayback";
    /// Decoder supports tunneled playback
    pub const TUNNELED_PLAYBACK: &str = "TunneledPlayback";
    /// Decoder accepts partial access units
    pub const PARTIAL_FRAME: &str = "PartialFrame";
    /// Decoder parses unframed input
    pub const FRAME_PARSING: &str = "FrameParsing";
    /// Codec handles several frames per buffer
    pub const MULTIPLE_FRAMES: &str = "MultipleFrames";
    /// Codec accepts timestamps that change at runtime
    pub const DYNAMIC_TIMESTAMP: &str = "DynamicTimestamp";
    /// Decoder supports low-latency mode
    pub const LOW_LATENCY: &str = "LowLatency";
    /// Codec follows color aspect changes mid-stream
    pub const DYNAMIC_COLOR_ASPECTS: &str = "DynamicColorAspects";
    /// Decoder can run detached from an output surface
    pub const DETACHED_SURFACE: &str = "DetachedSurface";
    /// Encoder supports periodic intra refresh
    pub const INTRA_REFRESH: &str = "IntraRefresh";
    /// Encoder honors QP bounds
    pub const QP_BOUNDS: &str = "QpBounds";
    /// Encoder reports encoding statistics
    pub const ENCODING_STATISTICS: &str = "EncodingStatistics";
    /// Encoder supports HDR editing
    pub const HDR_EDITING: &str = "HdrEditing";
    /// Encoder supports HLG editing
    pub const HLG_EDITING: &str = "HlgEditing";
    /// Encoder supports region-of-interest hints
    pub const ROI: &str = "Roi";
}

const DECODER_FEATURES: &[(&str, u32)] = &[
    (names::ADAPTIVE_PLAYBACK, 1 << 0),
    (names::SECURE_PLAYBACK, 1 << 1),
    (names::TUNNELED_PLAYBACK, 1 << 2),
    (names::PARTIAL_FRAME, 1 << 3),
    (names::FRAME_PARSING, 1 << 4),
    (names::MULTIPLE_FRAMES, 1 << 5),
    (names::DYNAMIC_TIMESTAMP, 1 << 6),
    (names::LOW_LATENCY, 1 << 7),
    (names::DYNAMIC_COLOR_ASPECTS, 1 << 8),
    (names::DETACHED_SURFACE, 1 << 9),
];

const ENCODER_FEATURES: &[(&str, u32)] = &[
    (names::INTRA_REFRESH, 1 << 0),
    (names::MULTIPLE_FRAMES, 1 << 1),
    (names::DYNAMIC_TIMESTAMP, 1 << 2),
    (names::QP_BOUNDS, 1 << 3),
    (names::ENCODING_STATISTICS, 1 << 4),
    (names::HDR_EDITING, 1 << 5),
    (names::HLG_EDITING, 1 << 6),
    (names::DYNAMIC_COLOR_ASPECTS, 1 << 7),
    (names::ROI, 1 << 8),
];

/// A recognized feature and the bit it contributes to a feature mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Feature {
    /// Feature name as it appears in a [`FormatSpec`]
    name: String,
    /// Mask bit(s) for this feature
    value: u32,
}

impl Feature {
    /// Create a feature entry.
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Read-only table of recognized features.
///
/// Entries keep the order they were registered in. Builders only ever read a
/// registry; share it through an [`Arc`].
///
/// # Examples
///
/// ```
/// use shadowkit_core::{FeatureRegistry, FormatSpec};
///
/// let registry = FeatureRegistry::from_pairs([("Fast", 0b01), ("Small", 0b10)]);
/// let format = FormatSpec::new("audio/opus")
///     .with_feature("Fast", true)
///     .with_feature("Small", false)
///     .with_feature("Unknown", true);
///
/// assert_eq!(registry.supported_mask(&format), 0b01);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRegistry {
    features: Vec<Feature>,
}

impl FeatureRegistry {
    /// Build a registry from feature entries.
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            features: features.into_iter().collect(),
        }
    }

    /// Build a registry from `(name, bit)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(name, value)| Feature::new(name, value)))
    }

    /// Features a decoder may advertise.
    pub fn decoder_defaults() -> Self {
        Self::from_pairs(DECODER_FEATURES.iter().copied())
    }

    /// Features an encoder may advertise.
    pub fn encoder_defaults() -> Self {
        Self::from_pairs(ENCODER_FEATURES.iter().copied())
    }

    /// Enumerate every entry in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Mask bit of the first entry with this name.
    pub fn value_of(&self, name: &str) -> Option<u32> {
        self.features
            .iter()
            .find(|feature| feature.name == name)
            .map(|feature| feature.value)
    }

    /// OR of the bits of every registered feature that `format` has present
    /// and enabled.
    ///
    /// Names the format enables but the registry does not know are ignored.
    pub fn supported_mask(&self, format: &FormatSpec) -> u32 {
        self.features
            .iter()
            .filter(|feature| {
                format.contains_feature(&feature.name) && format.is_feature_enabled(&feature.name)
            })
            .fold(0, |mask, feature| mask | feature.value)
    }

    /// Whether `name` is registered and its bit is set in `mask`.
    pub fn is_supported(&self, name: &str, mask: u32) -> bool {
        self.value_of(name).is_some_and(|value| mask & value != 0)
    }
}

impl FromIterator<Feature> for FeatureRegistry {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Registries for both codec roles.
///
/// Decoders and encoders recognize different features, and the same name can
/// map to different bits (`MultipleFrames` is bit 5 for decoders and bit 1
/// for encoders). The capability builder picks the registry matching its
/// role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct FeatureCatalog {
    /// Registry used for decoders
    decoder: Arc<FeatureRegistry>,
    /// Registry used for encoders
    encoder: Arc<FeatureRegistry>,
}

impl FeatureCatalog {
    /// Create a catalog from one registry per role.
    pub fn new(decoder: FeatureRegistry, encoder: FeatureRegistry) -> Self {
        Self {
            decoder: Arc::new(decoder),
            encoder: Arc::new(encoder),
        }
    }

    /// Use the same registry for decoders and encoders.
    pub fn uniform(registry: FeatureRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            decoder: Arc::clone(&registry),
            encoder: registry,
        }
    }

    /// Registry for the given role.
    pub fn for_role(&self, is_encoder: bool) -> &Arc<FeatureRegistry> {
        if is_encoder {
            &self.encoder
        } else {
            &self.decoder
        }
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::new(
            FeatureRegistry::decoder_defaults(),
            FeatureRegistry::encoder_defaults(),
        )
    }
}
