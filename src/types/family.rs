//! Bulb protocol families.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::errors::Error;

/// The bulb protocol variant paired with a gateway group.
///
/// White bulbs only tune brightness and color temperature; RGBW bulbs add
/// color, disco modes and a dedicated white channel. Each family answers to
/// its own set of opcodes, so the gateway has to be told which one a group
/// holds.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use milight_rs::DeviceFamily;
///
/// assert_eq!(DeviceFamily::from_str("white").unwrap(), DeviceFamily::White);
/// assert_eq!(DeviceFamily::Rgbw.to_string(), "rgbw");
/// assert!(DeviceFamily::from_str("rgb").is_err());
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceFamily {
    /// Tunable white bulbs
    White,
    /// Color bulbs with a white channel
    #[default]
    Rgbw,
}

impl FromStr for DeviceFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "white" => Ok(DeviceFamily::White),
            "rgbw" => Ok(DeviceFamily::Rgbw),
            other => Err(Error::UnknownFamily(other.to_string())),
        }
    }
}
