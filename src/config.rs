//! Controller configuration.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::group::{GroupConfig, Target};
use crate::types::DeviceFamily;

type Result<T> = std::result::Result<T, Error>;

/// Settings for one gateway.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below. Group families must match how the groups were paired in
/// the vendor's app.
///
/// # Examples
///
/// ```
/// use milight_rs::{ControllerConfig, DeviceFamily};
///
/// let config: ControllerConfig =
///     serde_json::from_str(r#"{"group_2": "white", "repeat_commands": 0}"#).unwrap();
/// assert_eq!(config.group_2, DeviceFamily::White);
/// assert_eq!(config.group_1, DeviceFamily::Rgbw);
/// assert_eq!(config.port, 8899);
/// assert_eq!(config.repeats(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub group_1: DeviceFamily,
    pub group_2: DeviceFamily,
    pub group_3: DeviceFamily,
    pub group_4: DeviceFamily,
    /// UDP port on the gateway.
    pub port: u16,
    /// How many times idempotent commands are sent.
    pub repeat_commands: u32,
    /// Minimum seconds between two frames.
    pub pause_between_commands: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            group_1: DeviceFamily::Rgbw,
            group_2: DeviceFamily::Rgbw,
            group_3: DeviceFamily::Rgbw,
            group_4: DeviceFamily::Rgbw,
            port: Self::DEFAULT_PORT,
            repeat_commands: Self::DEFAULT_REPEAT_COMMANDS,
            pause_between_commands: Self::DEFAULT_PAUSE,
        }
    }
}

impl ControllerConfig {
    pub const DEFAULT_PORT: u16 = 8899;
    pub const DEFAULT_REPEAT_COMMANDS: u32 = 3;
    pub const DEFAULT_PAUSE: f64 = 0.1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the family of `group` (1-4).
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::{ControllerConfig, DeviceFamily};
    ///
    /// let config = ControllerConfig::new()
    ///     .with_group(3, DeviceFamily::White)
    ///     .unwrap();
    /// assert_eq!(config.groups().family(3).unwrap(), DeviceFamily::White);
    /// assert!(ControllerConfig::new().with_group(5, DeviceFamily::White).is_err());
    /// ```
    pub fn with_group(mut self, group: u8, family: DeviceFamily) -> Result<Self> {
        *self.group_mut(group)? = family;
        Ok(self)
    }

    /// Set the family of `group` (1-4) from its name, "white" or "rgbw".
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::ControllerConfig;
    ///
    /// let mut config = ControllerConfig::new();
    /// assert!(config.set_group_type(1, "white").is_ok());
    /// assert!(config.set_group_type(1, "asdf").is_err());
    /// ```
    pub fn set_group_type(&mut self, group: u8, family: &str) -> Result<()> {
        let family = DeviceFamily::from_str(family)?;
        *self.group_mut(group)? = family;
        Ok(())
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_repeat_commands(mut self, repeat_commands: u32) -> Self {
        self.repeat_commands = repeat_commands;
        self
    }

    pub fn with_pause(mut self, seconds: f64) -> Self {
        self.pause_between_commands = seconds;
        self
    }

    /// Group families as a lookup table.
    pub fn groups(&self) -> GroupConfig {
        GroupConfig::new([self.group_1, self.group_2, self.group_3, self.group_4])
    }

    /// Effective repeat count; zero means one.
    pub fn repeats(&self) -> u32 {
        self.repeat_commands.max(1)
    }

    /// The pause as a duration.
    ///
    /// Fails with [`Error::InvalidPause`] for negative or non-finite values.
    pub fn pause(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.pause_between_commands)
            .map_err(|_| Error::InvalidPause(self.pause_between_commands))
    }

    fn group_mut(&mut self, group: u8) -> Result<&mut DeviceFamily> {
        match Target::resolve(Some(group))? {
            Target::Group(1) => Ok(&mut self.group_1),
            Target::Group(2) => Ok(&mut self.group_2),
            Target::Group(3) => Ok(&mut self.group_3),
            Target::Group(4) => Ok(&mut self.group_4),
            _ => Err(Error::InvalidGroup(group.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.port, 8899);
        assert_eq!(config.repeat_commands, 3);
        assert_eq!(config.pause().unwrap(), Duration::from_millis(100));
        assert_eq!(config.groups(), GroupConfig::new([DeviceFamily::Rgbw; 4]));
    }

    #[test]
    fn test_repeat_zero_is_one() {
        let config = ControllerConfig::new().with_repeat_commands(0);
        assert_eq!(config.repeats(), 1);
    }

    #[test]
    fn test_invalid_pause() {
        let config = ControllerConfig::new().with_pause(-0.5);
        assert_eq!(config.pause().unwrap_err(), Error::InvalidPause(-0.5));
        assert!(ControllerConfig::new().with_pause(f64::NAN).pause().is_err());
        assert_eq!(
            ControllerConfig::new().with_pause(0.0).pause().unwrap(),
            Duration::ZERO
        );
    }

    #[test]
    fn test_set_group_type_errors() {
        let mut config = ControllerConfig::new();
        assert_eq!(
            config.set_group_type(1, "asdf").unwrap_err(),
            Error::UnknownFamily("asdf".into())
        );
        assert_eq!(
            config.set_group_type(0, "white").unwrap_err(),
            Error::InvalidGroup(0)
        );
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_family() {
        let parsed: std::result::Result<ControllerConfig, _> =
            serde_json::from_str(r#"{"group_1": "rgb"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = ControllerConfig::new()
            .with_group(4, DeviceFamily::White)
            .unwrap()
            .with_port(123);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["group_4"], "white");
        assert_eq!(json["port"], 123);
        let back: ControllerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
