//! Named RGBW colors and raw hue values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::Error;

/// The sixteen color presets understood by RGBW bulbs.
///
/// Presets are evenly spaced on the bulb's hue wheel, sixteen hue steps apart,
/// starting at violet. Names keep the spelling used by the gateway vendor
/// ("fusia", "lavendar"); the dictionary spellings parse as well.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NamedColor {
    Violet,
    RoyalBlue,
    BabyBlue,
    Aqua,
    RoyalMint,
    SeafoamGreen,
    Green,
    LimeGreen,
    Yellow,
    YellowOrange,
    Orange,
    Red,
    Pink,
    #[serde(rename = "fusia", alias = "fuchsia")]
    #[strum(to_string = "fusia", serialize = "fuchsia")]
    Fusia,
    Lilac,
    #[serde(rename = "lavendar", alias = "lavender")]
    #[strum(to_string = "lavendar", serialize = "lavender")]
    Lavendar,
}

impl NamedColor {
    const HUE_STEP: u8 = 0x10;

    /// Hue byte sent to the bulb for this preset.
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::NamedColor;
    ///
    /// assert_eq!(NamedColor::Violet.hue(), 0x00);
    /// assert_eq!(NamedColor::Red.hue(), 0xb0);
    /// assert_eq!(NamedColor::Lavendar.hue(), 0xf0);
    /// ```
    pub fn hue(&self) -> u8 {
        *self as u8 * Self::HUE_STEP
    }
}

/// A color request for [`crate::Controller::set_color`].
///
/// `White` switches RGBW bulbs to their white channel, which the protocol
/// handles with a different command than any hue. Names without a preset
/// parse as `Unsupported`: such a request only powers the group on.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use milight_rs::{Color, NamedColor};
///
/// assert_eq!(Color::from_str("red").unwrap(), Color::Named(NamedColor::Red));
/// assert_eq!(Color::from_str("white").unwrap(), Color::White);
/// assert_eq!(Color::from_str("156").unwrap(), Color::Hue(156));
/// assert_eq!(Color::from_str("blue").unwrap(), Color::Unsupported("blue".into()));
/// assert!(Color::from_str("256").is_err());
/// assert!(Color::from_str("-1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Named(NamedColor),
    Hue(u8),
    /// A name no bulb has a command for.
    Unsupported(String),
}

impl Color {
    /// Hue byte for this color, or `None` for white and unsupported names.
    pub fn hue(&self) -> Option<u8> {
        match self {
            Color::White | Color::Unsupported(_) => None,
            Color::Named(named) => Some(named.hue()),
            Color::Hue(hue) => Some(*hue),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Color::Named(named)
    }
}

impl From<u8> for Color {
    fn from(hue: u8) -> Self {
        Color::Hue(hue)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse a preset name, "white", or a hue byte (e.g. "156").
    ///
    /// Numbers outside 0-255 and empty strings fail with
    /// [`Error::InvalidColor`]; any other name is `Unsupported`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        if s == "white" {
            return Ok(Color::White);
        }
        if let Ok(named) = NamedColor::from_str(s) {
            return Ok(Color::Named(named));
        }
        if let Ok(hue) = s.parse::<u8>() {
            return Ok(Color::Hue(hue));
        }
        if s.is_empty() || s.parse::<f64>().is_ok() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        Ok(Color::Unsupported(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Named(named) => write!(f, "{named}"),
            Color::Hue(hue) => write!(f, "{hue}"),
            Color::Unsupported(name) => write!(f, "{name}"),
        }
    }
}
