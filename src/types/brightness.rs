//! Brightness control for RGBW groups.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Brightness level from 0 to 100 percent.
///
/// Out-of-range integers are clamped. Fractions up to `1.0` are read as a
/// share of full brightness; larger floats are already percentages.
///
/// # Examples
///
/// ```
/// use milight_rs::Brightness;
///
/// assert_eq!(Brightness::from(-1).percent(), 0);
/// assert_eq!(Brightness::from(101).percent(), 100);
/// assert_eq!(Brightness::from(0.1).percent(), 10);
/// assert_eq!(Brightness::from(1.0).percent(), 100);
/// assert_eq!(Brightness::from(50.0).percent(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brightness {
    pub(crate) percent: u8,
}

impl Brightness {
    const MAX: i64 = 100;
    const WIRE_MIN: u8 = 2;
    const WIRE_SPAN: u16 = 25;

    /// Create a brightness from a percentage, clamped to 0-100.
    pub fn from_percent(percent: i64) -> Self {
        Brightness {
            percent: percent.clamp(0, Self::MAX) as u8,
        }
    }

    /// Create a brightness from a fraction of full brightness.
    ///
    /// Values above `1.0` are taken as a percentage instead.
    pub fn from_fraction(value: f64) -> Self {
        if value > 1.0 {
            Self::from_percent(value as i64)
        } else {
            Self::from_percent((value * 100.0) as i64)
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Parameter byte of the brightness command, 2 (dimmest) to 27 (full).
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::Brightness;
    ///
    /// assert_eq!(Brightness::from(0).wire_value(), 2);
    /// assert_eq!(Brightness::from(50).wire_value(), 14);
    /// assert_eq!(Brightness::from(100).wire_value(), 27);
    /// ```
    pub fn wire_value(&self) -> u8 {
        Self::WIRE_MIN + (self.percent as u16 * Self::WIRE_SPAN / 100) as u8
    }
}

impl From<u8> for Brightness {
    fn from(percent: u8) -> Self {
        Self::from_percent(percent.into())
    }
}

impl From<i32> for Brightness {
    fn from(percent: i32) -> Self {
        Self::from_percent(percent.into())
    }
}

impl From<i64> for Brightness {
    fn from(percent: i64) -> Self {
        Self::from_percent(percent)
    }
}

impl From<f32> for Brightness {
    fn from(value: f32) -> Self {
        Self::from_fraction(value.into())
    }
}

impl From<f64> for Brightness {
    fn from(value: f64) -> Self {
        Self::from_fraction(value)
    }
}

impl FromStr for Brightness {
    type Err = Error;

    /// Parse "50" as a percentage or "0.5" as a fraction.
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let parsed = if s.contains(['.', 'e', 'E']) {
            s.parse::<f64>().ok().map(Self::from_fraction)
        } else {
            s.parse::<i64>().ok().map(Self::from_percent)
        };
        parsed.ok_or_else(|| Error::invalid_argument("set_brightness", format!("not a number: {s}")))
    }
}
