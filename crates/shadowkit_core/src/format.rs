//! Media format descriptions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known format entry keys read when synthesizing sub-capabilities.
pub mod keys {
    /// Supported bitrate range, `"min-max"` in bits per second.
    pub const BITRATE_RANGE: &str = "bitrate-range";
    /// Maximum number of audio input channels.
    pub const MAX_CHANNEL_COUNT: &str = "max-channel-count";
    /// Comma-separated sample rates or sample rate ranges, `"8000-48000,96000"`.
    pub const SAMPLE_RATE_RANGES: &str = "sample-rate-ranges";
    /// Supported picture sizes, `"WxH-WxH"`.
    pub const SIZE_RANGE: &str = "size-range";
    /// Required width and height alignment, `"WxH"`.
    pub const ALIGNMENT: &str = "alignment";
    /// Supported frame rates, `"min-max"`.
    pub const FRAME_RATE_RANGE: &str = "frame-rate-range";
    /// Encoder complexity range, `"min-max"`.
    pub const COMPLEXITY_RANGE: &str = "complexity-range";
    /// Encoder quality range, `"min-max"`.
    pub const QUALITY_RANGE: &str = "quality-range";
    /// Comma-separated bitrate control modes, e.g. `"VBR,CBR"`.
    pub const BITRATE_MODES: &str = "feature-bitrate-modes";
}

/// Semantic category of a mime type, as far as capability synthesis cares.
///
/// Anything that is not video (audio, but also image or application types)
/// gets audio capabilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    /// Audio and every other non-video category
    #[display("audio")]
    Audio,
    /// Mime types starting with `video/`, ignoring case
    #[display("video")]
    Video,
}

impl MediaCategory {
    /// Classify a mime type.
    ///
    /// The whole mime string is lower-cased before testing for the `video/`
    /// prefix, so `Video/AVC` counts as video.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowkit_core::MediaCategory;
    ///
    /// assert_eq!(MediaCategory::of("video/avc"), MediaCategory::Video);
    /// assert_eq!(MediaCategory::of("VIDEO/x-vnd.on2.vp9"), MediaCategory::Video);
    /// assert_eq!(MediaCategory::of("audio/opus"), MediaCategory::Audio);
    /// assert_eq!(MediaCategory::of("image/vnd.android.heic"), MediaCategory::Audio);
    /// ```
    pub fn of(mime_type: &str) -> Self {
        if mime_type.to_lowercase().starts_with("video/") {
            Self::Video
        } else {
            Self::Audio
        }
    }
}

/// Identity and feature set of a media format.
///
/// A feature may be present and enabled, present and disabled, or absent.
/// Only present-and-enabled features count toward a codec's supported
/// feature mask.
///
/// # Examples
///
/// ```
/// use shadowkit_core::{FormatSpec, MediaCategory, keys};
///
/// let vp9 = FormatSpec::new("video/x-vnd.on2.vp9")
///     .with_feature("SecurePlayback", true)
///     .with_feature("TunneledPlayback", false)
///     .with_entry(keys::FRAME_RATE_RANGE, "1-60");
///
/// assert_eq!(vp9.category(), MediaCategory::Video);
/// assert!(vp9.contains_feature("TunneledPlayback"));
/// assert!(!vp9.is_feature_enabled("TunneledPlayback"));
/// assert_eq!(vp9.entry(keys::FRAME_RATE_RANGE), Some("1-60"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct FormatSpec {
    /// Mime type, `"<category>/<subtype>"`
    mime_type: String,
    /// Named feature flags and whether each is enabled
    #[serde(default)]
    features: BTreeMap<String, bool>,
    /// Additional string-valued format entries (see [`keys`])
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl FormatSpec {
    /// Create a format with the given mime type and no features.
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            features: BTreeMap::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Set a feature flag, returning the updated format.
    pub fn with_feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set_feature_enabled(name, enabled);
        self
    }

    /// Enable every named feature, returning the updated format.
    pub fn with_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.set_feature_enabled(name, true);
        }
        self
    }

    /// Set a format entry, returning the updated format.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_entry(key, value);
        self
    }

    /// Set a feature flag in place.
    pub fn set_feature_enabled(&mut self, name: impl Into<String>, enabled: bool) {
        self.features.insert(name.into(), enabled);
    }

    /// Set a format entry in place.
    pub fn set_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Whether the feature is mentioned at all, enabled or not.
    pub fn contains_feature(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Whether the feature is present and enabled.
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    /// Look up a format entry.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Category derived from the mime type.
    pub fn category(&self) -> MediaCategory {
        MediaCategory::of(&self.mime_type)
    }
}
