//! Audio, video and encoder sub-capabilities synthesized from a format.
//!
//! Each sub-capability starts from platform limits and is narrowed by the
//! format's entries (see [`crate::keys`]). Entries that do not parse, or that
//! fall entirely outside the platform limits, are logged and ignored.

use crate::range::{parse_range, parse_range_list, parse_size, parse_size_range};
use crate::{FormatSpec, MediaCategory, ValueRange, keys};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

const AUDIO_BITRATE_LIMITS: ValueRange<i32> = ValueRange::fixed(0, i32::MAX);
const AUDIO_SAMPLE_RATE_LIMITS: ValueRange<u32> = ValueRange::fixed(7_350, 192_000);
const AUDIO_MAX_INPUT_CHANNELS: u32 = 30;

const VIDEO_BITRATE_LIMITS: ValueRange<i32> = ValueRange::fixed(0, 500_000_000);
const VIDEO_SIZE_LIMITS: ValueRange<u32> = ValueRange::fixed(1, 32_768);
const VIDEO_FRAME_RATE_LIMITS: ValueRange<u32> = ValueRange::fixed(0, 960);
const VIDEO_DEFAULT_ALIGNMENT: u32 = 2;

/// Narrow `limits` by the range stored under `key`, keeping `limits` when the
/// entry is missing, unparseable or disjoint.
fn narrowed<T>(format: &FormatSpec, key: &str, limits: ValueRange<T>) -> ValueRange<T>
where
    T: FromStr + Copy + PartialOrd + std::fmt::Debug,
{
    let Some(text) = format.entry(key) else {
        return limits;
    };
    match parse_range::<T>(text).and_then(|range| range.intersect(&limits)) {
        Some(range) => range,
        None => {
            warn!(key, value = text, ?limits, "Ignoring unusable format entry");
            limits
        }
    }
}

/// Capabilities of an audio (or other non-video) codec.
///
/// # Examples
///
/// ```
/// use shadowkit_core::{AudioCapability, FormatSpec, keys};
///
/// let format = FormatSpec::new("audio/opus")
///     .with_entry(keys::SAMPLE_RATE_RANGES, "8000-24000,48000")
///     .with_entry(keys::MAX_CHANNEL_COUNT, "8");
/// let audio = AudioCapability::from_format(&format);
///
/// assert!(audio.is_sample_rate_supported(48000));
/// assert!(!audio.is_sample_rate_supported(44100));
/// assert_eq!(*audio.max_input_channel_count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AudioCapability {
    /// Supported bitrates in bits per second
    bitrate_range: ValueRange<i32>,
    /// Supported sample rates, as discrete values or ranges
    sample_rate_ranges: Vec<ValueRange<u32>>,
    /// Maximum number of input channels
    max_input_channel_count: u32,
}

impl Default for AudioCapability {
    fn default() -> Self {
        Self {
            bitrate_range: AUDIO_BITRATE_LIMITS,
            sample_rate_ranges: vec![AUDIO_SAMPLE_RATE_LIMITS],
            max_input_channel_count: AUDIO_MAX_INPUT_CHANNELS,
        }
    }
}

impl AudioCapability {
    /// Platform defaults narrowed by the format's entries.
    pub fn from_format(format: &FormatSpec) -> Self {
        let mut caps = Self {
            bitrate_range: narrowed(format, keys::BITRATE_RANGE, AUDIO_BITRATE_LIMITS),
            ..Self::default()
        };

        if let Some(text) = format.entry(keys::SAMPLE_RATE_RANGES) {
            let ranges: Vec<_> = parse_range_list::<u32>(text)
                .unwrap_or_default()
                .iter()
                .filter_map(|range| range.intersect(&AUDIO_SAMPLE_RATE_LIMITS))
                .collect();
            if ranges.is_empty() {
                warn!(key = keys::SAMPLE_RATE_RANGES, value = text, "Ignoring unusable format entry");
            } else {
                caps.sample_rate_ranges = ranges;
            }
        }

        if let Some(text) = format.entry(keys::MAX_CHANNEL_COUNT) {
            match text.trim().parse::<u32>() {
                Ok(count) if count > 0 => {
                    caps.max_input_channel_count = count.min(AUDIO_MAX_INPUT_CHANNELS);
                }
                _ => warn!(key = keys::MAX_CHANNEL_COUNT, value = text, "Ignoring unusable format entry"),
            }
        }

        caps
    }

    /// Whether `rate` falls in any supported sample rate range.
    pub fn is_sample_rate_supported(&self, rate: u32) -> bool {
        self.sample_rate_ranges.iter().any(|range| range.contains(rate))
    }
}

/// Capabilities of a video codec.
///
/// # Examples
///
/// ```
/// use shadowkit_core::{FormatSpec, VideoCapability, keys};
///
/// let format = FormatSpec::new("video/avc")
///     .with_entry(keys::SIZE_RANGE, "16x16-1920x1088")
///     .with_entry(keys::ALIGNMENT, "16x16");
/// let video = VideoCapability::from_format(&format);
///
/// assert!(video.is_size_supported(1280, 720));
/// assert!(!video.is_size_supported(1282, 720));
/// assert!(!video.is_size_supported(3840, 2160));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(try_from = "RawVideoCapability")]
pub struct VideoCapability {
    /// Supported bitrates in bits per second
    bitrate_range: ValueRange<i32>,
    /// Supported picture widths
    width_range: ValueRange<u32>,
    /// Supported picture heights
    height_range: ValueRange<u32>,
    /// Widths must be a multiple of this
    width_alignment: u32,
    /// Heights must be a multiple of this
    height_alignment: u32,
    /// Supported frame rates
    frame_rate_range: ValueRange<u32>,
}

impl Default for VideoCapability {
    fn default() -> Self {
        Self {
            bitrate_range: VIDEO_BITRATE_LIMITS,
            width_range: VIDEO_SIZE_LIMITS,
            height_range: VIDEO_SIZE_LIMITS,
            width_alignment: VIDEO_DEFAULT_ALIGNMENT,
            height_alignment: VIDEO_DEFAULT_ALIGNMENT,
            frame_rate_range: VIDEO_FRAME_RATE_LIMITS,
        }
    }
}

/// Unchecked serialized form of a [`VideoCapability`].
#[derive(Deserialize)]
struct RawVideoCapability {
    bitrate_range: ValueRange<i32>,
    width_range: ValueRange<u32>,
    height_range: ValueRange<u32>,
    width_alignment: u32,
    height_alignment: u32,
    frame_rate_range: ValueRange<u32>,
}

impl TryFrom<RawVideoCapability> for VideoCapability {
    type Error = String;

    fn try_from(raw: RawVideoCapability) -> Result<Self, Self::Error> {
        for (axis, alignment) in [("width", raw.width_alignment), ("height", raw.height_alignment)] {
            if !alignment.is_power_of_two() {
                return Err(format!("{axis} alignment {alignment} is not a power of two"));
            }
        }
        Ok(Self {
            bitrate_range: raw.bitrate_range,
            width_range: raw.width_range,
            height_range: raw.height_range,
            width_alignment: raw.width_alignment,
            height_alignment: raw.height_alignment,
            frame_rate_range: raw.frame_rate_range,
        })
    }
}

impl VideoCapability {
    /// Platform defaults narrowed by the format's entries.
    pub fn from_format(format: &FormatSpec) -> Self {
        let mut caps = Self {
            bitrate_range: narrowed(format, keys::BITRATE_RANGE, VIDEO_BITRATE_LIMITS),
            frame_rate_range: narrowed(format, keys::FRAME_RATE_RANGE, VIDEO_FRAME_RATE_LIMITS),
            ..Self::default()
        };

        if let Some(text) = format.entry(keys::SIZE_RANGE) {
            let sizes = parse_size_range(text).and_then(|(widths, heights)| {
                Some((
                    widths.intersect(&VIDEO_SIZE_LIMITS)?,
                    heights.intersect(&VIDEO_SIZE_LIMITS)?,
                ))
            });
            match sizes {
                Some((widths, heights)) => {
                    caps.width_range = widths;
                    caps.height_range = heights;
                }
                None => warn!(key = keys::SIZE_RANGE, value = text, "Ignoring unusable format entry"),
            }
        }

        if let Some(text) = format.entry(keys::ALIGNMENT) {
            match parse_size(text) {
                Some((width, height)) if width.is_power_of_two() && height.is_power_of_two() => {
                    caps.width_alignment = width;
                    caps.height_alignment = height;
                }
                _ => warn!(key = keys::ALIGNMENT, value = text, "Ignoring unusable format entry"),
            }
        }

        caps
    }

    /// Whether a `width` x `height` picture is within range and aligned.
    pub fn is_size_supported(&self, width: u32, height: u32) -> bool {
        self.width_range.contains(width)
            && self.height_range.contains(height)
            && width % self.width_alignment == 0
            && height % self.height_alignment == 0
    }
}

/// Bitrate control modes an encoder can run in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BitrateMode {
    /// Constant quality
    Cq,
    /// Variable bitrate
    Vbr,
    /// Constant bitrate
    Cbr,
    /// Constant bitrate with frame drops
    CbrFd,
}

impl BitrateMode {
    /// Numeric mode identifier.
    pub fn value(self) -> i32 {
        match self {
            Self::Cq => 0,
            Self::Vbr => 1,
            Self::Cbr => 2,
            Self::CbrFd => 3,
        }
    }
}

/// Capabilities specific to encoders.
///
/// # Examples
///
/// ```
/// use shadowkit_core::{BitrateMode, EncoderCapability, FormatSpec, keys};
///
/// let format = FormatSpec::new("video/avc").with_entry(keys::BITRATE_MODES, "CBR,VBR");
/// let encoder = EncoderCapability::from_format(&format);
///
/// assert!(encoder.is_bitrate_mode_supported(BitrateMode::Cbr));
/// assert!(!encoder.is_bitrate_mode_supported(BitrateMode::Cq));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct EncoderCapability {
    /// Supported complexity levels
    complexity_range: ValueRange<i32>,
    /// Supported quality levels
    quality_range: ValueRange<i32>,
    /// Supported bitrate modes, ordered by mode identifier
    bitrate_modes: Vec<BitrateMode>,
}

impl Default for EncoderCapability {
    fn default() -> Self {
        Self {
            complexity_range: ValueRange::fixed(0, 0),
            quality_range: ValueRange::fixed(0, 0),
            bitrate_modes: vec![BitrateMode::Vbr],
        }
    }
}

impl EncoderCapability {
    /// Defaults replaced by the format's entries.
    ///
    /// Complexity and quality have no platform limit to intersect with; a
    /// parsed entry replaces the default outright.
    pub fn from_format(format: &FormatSpec) -> Self {
        let mut caps = Self::default();

        for (key, target) in [
            (keys::COMPLEXITY_RANGE, &mut caps.complexity_range),
            (keys::QUALITY_RANGE, &mut caps.quality_range),
        ] {
            if let Some(text) = format.entry(key) {
                match parse_range::<i32>(text) {
                    Some(range) => *target = range,
                    None => warn!(key, value = text, "Ignoring unusable format entry"),
                }
            }
        }

        if let Some(text) = format.entry(keys::BITRATE_MODES) {
            let mut modes: Vec<BitrateMode> = text
                .split(',')
                .filter_map(|name| match name.trim().parse::<BitrateMode>() {
                    Ok(mode) => Some(mode),
                    Err(_) => {
                        warn!(mode = name, "Skipping unknown bitrate mode");
                        None
                    }
                })
                .collect();
            modes.sort();
            modes.dedup();
            if !modes.is_empty() {
                caps.bitrate_modes = modes;
            }
        }

        caps
    }

    /// Whether the encoder supports `mode`.
    pub fn is_bitrate_mode_supported(&self, mode: BitrateMode) -> bool {
        self.bitrate_modes.contains(&mode)
    }
}

/// The category-specific half of a capability descriptor.
///
/// Exactly one of audio or video is present for every descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "capability", rename_all = "lowercase")]
pub enum MediaCapability {
    /// Audio (or other non-video) codec
    Audio(AudioCapability),
    /// Video codec
    Video(VideoCapability),
}

impl MediaCapability {
    /// Synthesize the capability matching the format's category.
    pub fn for_format(format: &FormatSpec) -> Self {
        match format.category() {
            MediaCategory::Video => Self::Video(VideoCapability::from_format(format)),
            MediaCategory::Audio => Self::Audio(AudioCapability::from_format(format)),
        }
    }

    /// Category of the held capability.
    pub fn category(&self) -> MediaCategory {
        match self {
            Self::Audio(_) => MediaCategory::Audio,
            Self::Video(_) => MediaCategory::Video,
        }
    }

    /// The audio capability, if this is one.
    pub fn as_audio(&self) -> Option<&AudioCapability> {
        match self {
            Self::Audio(audio) => Some(audio),
            Self::Video(_) => None,
        }
    }

    /// The video capability, if this is one.
    pub fn as_video(&self) -> Option<&VideoCapability> {
        match self {
            Self::Video(video) => Some(video),
            Self::Audio(_) => None,
        }
    }
}
