//! Typed controller calls for batches and gateway pools.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::errors::Error;
use crate::group::Target;
use crate::types::{Brightness, Color};

type Result<T> = std::result::Result<T, Error>;

/// Names of the public controller operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OperationName {
    On,
    Off,
    White,
    SetColor,
    SetBrightness,
    BrightnessUp,
    BrightnessDown,
    Warmer,
    Cooler,
    FullBrightness,
    Disco,
    DiscoFaster,
    DiscoSlower,
    Nightmode,
}

/// One controller method call with its arguments.
///
/// The group is `None` (or `Some(0)`) for all groups, `Some(1..=4)` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    On(Option<u8>),
    Off(Option<u8>),
    White(Option<u8>),
    SetColor(Color, Option<u8>),
    SetBrightness(Brightness, Option<u8>),
    BrightnessUp(Option<u8>),
    BrightnessDown(Option<u8>),
    Warmer(Option<u8>),
    Cooler(Option<u8>),
    FullBrightness(Option<u8>),
    Disco(Option<u8>),
    DiscoFaster(Option<u8>),
    DiscoSlower(Option<u8>),
    Nightmode(Option<u8>),
}

/// What a call returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Done,
    /// The color that was set.
    Color(#[serde(with = "color_name")] Color),
    /// The clamped brightness percentage that was set.
    Brightness(u8),
}

impl Call {
    /// Build a call from an operation name and string arguments.
    ///
    /// Arguments follow the controller method signatures: `set_color` takes
    /// a color then an optional group, `set_brightness` a percentage (or a
    /// fraction such as `0.5`) then an optional group, every other operation
    /// just an optional group. A group may also be written `none` or `all`;
    /// numbers outside 0-4 fail with [`Error::InvalidGroup`].
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::{Brightness, Call, Color, NamedColor};
    ///
    /// assert_eq!(Call::parse("on", &[]).unwrap(), Call::On(None));
    /// assert_eq!(
    ///     Call::parse("set_color", &["red", "1"]).unwrap(),
    ///     Call::SetColor(Color::Named(NamedColor::Red), Some(1))
    /// );
    /// assert_eq!(
    ///     Call::parse("set_brightness", &["0.5"]).unwrap(),
    ///     Call::SetBrightness(Brightness::from(50), None)
    /// );
    /// assert!(Call::parse("explode", &[]).is_err());
    /// ```
    pub fn parse(name: &str, args: &[&str]) -> Result<Self> {
        let operation = OperationName::from_str(name)
            .map_err(|_| Error::UnknownOperation(name.to_string()))?;
        let op = operation.to_string();

        let call = match operation {
            OperationName::SetColor => {
                let [color, rest @ ..] = args else {
                    return Err(Error::invalid_argument(&op, "missing color"));
                };
                Call::SetColor(Color::from_str(color)?, parse_group(&op, rest)?)
            }
            OperationName::SetBrightness => {
                let [value, rest @ ..] = args else {
                    return Err(Error::invalid_argument(&op, "missing brightness"));
                };
                Call::SetBrightness(Brightness::from_str(value)?, parse_group(&op, rest)?)
            }
            _ => {
                let group = parse_group(&op, args)?;
                match operation {
                    OperationName::On => Call::On(group),
                    OperationName::Off => Call::Off(group),
                    OperationName::White => Call::White(group),
                    OperationName::BrightnessUp => Call::BrightnessUp(group),
                    OperationName::BrightnessDown => Call::BrightnessDown(group),
                    OperationName::Warmer => Call::Warmer(group),
                    OperationName::Cooler => Call::Cooler(group),
                    OperationName::FullBrightness => Call::FullBrightness(group),
                    OperationName::Disco => Call::Disco(group),
                    OperationName::DiscoFaster => Call::DiscoFaster(group),
                    OperationName::DiscoSlower => Call::DiscoSlower(group),
                    OperationName::Nightmode => Call::Nightmode(group),
                    OperationName::SetColor | OperationName::SetBrightness => unreachable!(),
                }
            }
        };
        Ok(call)
    }

    pub fn name(&self) -> OperationName {
        match self {
            Call::On(_) => OperationName::On,
            Call::Off(_) => OperationName::Off,
            Call::White(_) => OperationName::White,
            Call::SetColor(..) => OperationName::SetColor,
            Call::SetBrightness(..) => OperationName::SetBrightness,
            Call::BrightnessUp(_) => OperationName::BrightnessUp,
            Call::BrightnessDown(_) => OperationName::BrightnessDown,
            Call::Warmer(_) => OperationName::Warmer,
            Call::Cooler(_) => OperationName::Cooler,
            Call::FullBrightness(_) => OperationName::FullBrightness,
            Call::Disco(_) => OperationName::Disco,
            Call::DiscoFaster(_) => OperationName::DiscoFaster,
            Call::DiscoSlower(_) => OperationName::DiscoSlower,
            Call::Nightmode(_) => OperationName::Nightmode,
        }
    }
}

fn parse_group(operation: &str, args: &[&str]) -> Result<Option<u8>> {
    match args {
        [] => Ok(None),
        [group] => match group.trim() {
            "none" | "all" => Ok(None),
            g => {
                let group = g.parse::<i64>().map_err(|_| {
                    Error::invalid_argument(operation, format!("invalid group: {g}"))
                })?;
                match u8::try_from(group) {
                    Ok(group) if group <= Target::GROUPS => Ok(Some(group)),
                    _ => Err(Error::InvalidGroup(group)),
                }
            }
        },
        _ => Err(Error::invalid_argument(
            operation,
            format!("too many arguments ({})", args.len()),
        )),
    }
}

mod color_name {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(color)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamedColor;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_name_parses_without_arguments() {
        for name in OperationName::iter() {
            let parsed = Call::parse(&name.to_string(), &[]);
            match name {
                OperationName::SetColor | OperationName::SetBrightness => {
                    assert!(matches!(parsed, Err(Error::InvalidArgument { .. })))
                }
                _ => assert_eq!(parsed.unwrap().name(), name),
            }
        }
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(
            Call::parse("set_group_type", &["1", "white"]).unwrap_err(),
            Error::UnknownOperation("set_group_type".into())
        );
    }

    #[test]
    fn test_group_arguments() {
        assert_eq!(Call::parse("off", &["2"]).unwrap(), Call::Off(Some(2)));
        assert_eq!(Call::parse("off", &["all"]).unwrap(), Call::Off(None));
        assert_eq!(Call::parse("off", &["0"]).unwrap(), Call::Off(Some(0)));
        assert_eq!(Call::parse("off", &["9"]).unwrap_err(), Error::InvalidGroup(9));
        assert_eq!(Call::parse("on", &["-1"]).unwrap_err(), Error::InvalidGroup(-1));
        assert_eq!(Call::parse("on", &["300"]).unwrap_err(), Error::InvalidGroup(300));
        assert!(matches!(
            Call::parse("off", &["two"]),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(Call::parse("off", &["1", "2"]).is_err());
    }

    #[test]
    fn test_color_arguments() {
        assert_eq!(
            Call::parse("set_color", &["blue", "3"]).unwrap(),
            Call::SetColor(Color::Unsupported("blue".into()), Some(3))
        );
        assert_eq!(
            Call::parse("set_color", &["300"]).unwrap_err(),
            Error::InvalidColor("300".into())
        );
        assert_eq!(
            Call::parse("set_color", &["baby_blue", "3"]).unwrap(),
            Call::SetColor(Color::Named(NamedColor::BabyBlue), Some(3))
        );
        assert_eq!(
            Call::parse("set_color", &["255"]).unwrap(),
            Call::SetColor(Color::Hue(255), None)
        );
    }

    #[test]
    fn test_reply_serializes_color_name() {
        let reply = Reply::Color(Color::Named(NamedColor::Red));
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({"Color": "red"}));
        let back: Reply = serde_json::from_value(json).unwrap();
        assert_eq!(back, reply);
    }
}
