//! Inclusive value ranges and the parsers for format entry values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Inclusive range `lower..=upper` with `lower <= upper`.
///
/// # Examples
///
/// ```
/// use shadowkit_core::ValueRange;
///
/// let rates = ValueRange::new(8000, 48000).unwrap();
/// assert!(rates.contains(44100));
/// assert!(!rates.contains(96000));
/// assert!(ValueRange::new(10, 1).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "RawRange<T>",
    bound(deserialize = "T: Deserialize<'de> + Copy + PartialOrd + std::fmt::Debug")
)]
pub struct ValueRange<T> {
    lower: T,
    upper: T,
}

/// Unchecked serialized form of a [`ValueRange`].
#[derive(Deserialize)]
struct RawRange<T> {
    lower: T,
    upper: T,
}

impl<T: Copy + PartialOrd + std::fmt::Debug> TryFrom<RawRange<T>> for ValueRange<T> {
    type Error = String;

    fn try_from(raw: RawRange<T>) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper).ok_or_else(|| {
            format!(
                "range lower bound {:?} exceeds upper bound {:?}",
                raw.lower, raw.upper
            )
        })
    }
}

impl<T: Copy + PartialOrd> ValueRange<T> {
    /// Create a range, or `None` if `lower > upper`.
    pub fn new(lower: T, upper: T) -> Option<Self> {
        (lower <= upper).then_some(Self { lower, upper })
    }

    pub(crate) const fn fixed(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }

    /// A range holding exactly one value.
    pub fn single(value: T) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Lower bound.
    pub fn lower(&self) -> T {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> T {
        self.upper
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Overlap of two ranges, or `None` if they are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let lower = if other.lower > self.lower {
            other.lower
        } else {
            self.lower
        };
        let upper = if other.upper < self.upper {
            other.upper
        } else {
            self.upper
        };
        Self::new(lower, upper)
    }
}

/// Parse `"min-max"` or a single value `"v"`.
pub(crate) fn parse_range<T>(text: &str) -> Option<ValueRange<T>>
where
    T: FromStr + Copy + PartialOrd,
{
    match text.split_once('-') {
        Some((lower, upper)) => {
            ValueRange::new(lower.trim().parse().ok()?, upper.trim().parse().ok()?)
        }
        None => text.trim().parse().ok().map(ValueRange::single),
    }
}

/// Parse a comma-separated list of ranges; every element must parse.
pub(crate) fn parse_range_list<T>(text: &str) -> Option<Vec<ValueRange<T>>>
where
    T: FromStr + Copy + PartialOrd,
{
    text.split(',').map(parse_range::<T>).collect()
}

/// Parse `"WxH"` (also accepts `*` as the separator).
pub(crate) fn parse_size(text: &str) -> Option<(u32, u32)> {
    let (width, height) = text.split_once(['x', '*'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

/// Parse `"WxH-WxH"` into width and height ranges.
pub(crate) fn parse_size_range(text: &str) -> Option<(ValueRange<u32>, ValueRange<u32>)> {
    let (lower, upper) = match text.split_once('-') {
        Some((lower, upper)) => (parse_size(lower)?, parse_size(upper)?),
        None => {
            let size = parse_size(text)?;
            (size, size)
        }
    };
    Some((
        ValueRange::new(lower.0, upper.0)?,
        ValueRange::new(lower.1, upper.1)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ranges_and_single_values() {
        assert_eq!(parse_range::<i32>("1-320000"), ValueRange::new(1, 320_000));
        assert_eq!(parse_range::<u32>(" 48000 "), Some(ValueRange::single(48_000)));
        assert_eq!(parse_range::<u32>("9-3"), None);
        assert_eq!(parse_range::<u32>("fast"), None);
    }

    #[test]
    fn parses_range_lists() {
        let rates = parse_range_list::<u32>("8000-16000,44100,48000").unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[1], ValueRange::single(44_100));
        assert!(parse_range_list::<u32>("8000,abc").is_none());
    }

    #[test]
    fn parses_size_ranges() {
        let (widths, heights) = parse_size_range("64x32-1920x1080").unwrap();
        assert_eq!(widths, ValueRange::fixed(64, 1920));
        assert_eq!(heights, ValueRange::fixed(32, 1080));
        assert_eq!(parse_size("16*8"), Some((16, 8)));
        assert!(parse_size_range("1920x1080-64x32").is_none());
    }

    #[test]
    fn intersection_of_disjoint_ranges_is_none() {
        let low = ValueRange::fixed(0, 10);
        let high = ValueRange::fixed(20, 30);
        assert!(low.intersect(&high).is_none());
        assert_eq!(
            ValueRange::fixed(0, 25).intersect(&high),
            Some(ValueRange::fixed(20, 25))
        );
    }
}
