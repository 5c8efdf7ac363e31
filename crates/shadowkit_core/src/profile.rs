//! Profile/level pairs.

use serde::{Deserialize, Serialize};

/// One supported profile and level combination of a codec.
///
/// The values are opaque to the builders and copied verbatim into the
/// descriptor.
///
/// # Examples
///
/// ```
/// use shadowkit_core::ProfileLevel;
///
/// let main_l12 = ProfileLevel::new(0x02, 0x08);
/// assert_eq!(main_l12.profile, 0x02);
/// assert_eq!(main_l12.level, 0x08);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProfileLevel {
    /// Profile identifier
    pub profile: i32,
    /// Level identifier
    pub level: i32,
}

impl ProfileLevel {
    /// Create a profile/level pair.
    pub fn new(profile: i32, level: i32) -> Self {
        Self { profile, level }
    }
}
