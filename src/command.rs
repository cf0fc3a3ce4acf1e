//! Opcode tables for white and RGBW bulbs.

use serde::{Deserialize, Serialize};

use crate::types::DeviceFamily;

/// One logical command before framing: an opcode, optionally followed by
/// a parameter byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandSpec {
    /// A bare opcode, e.g. "group 1 on".
    Opcode(u8),
    /// An opcode with a parameter, e.g. a hue or brightness value.
    Param(u8, u8),
    /// Three raw bytes, sent unchanged.
    Raw([u8; 3]),
}

/// Commands that look the same for every group of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    AllOn,
    AllOff,
    AllFull,
    AllNightmode,
    AllWhite,
    Warmer,
    Cooler,
    BrightnessUp,
    BrightnessDown,
    Disco,
    DiscoFaster,
    DiscoSlower,
    Hue(u8),
    Brightness(u8),
}

/// Commands with one opcode per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GroupCommand {
    On,
    Off,
    Full,
    Nightmode,
    ToWhite,
}

impl GroupCommand {
    /// The "all groups" counterpart used for broadcasts.
    pub(crate) fn broadcast(self) -> Command {
        match self {
            GroupCommand::On => Command::AllOn,
            GroupCommand::Off => Command::AllOff,
            GroupCommand::Full => Command::AllFull,
            GroupCommand::Nightmode => Command::AllNightmode,
            GroupCommand::ToWhite => Command::AllWhite,
        }
    }
}

const WHITE_GROUP_ON: [u8; 4] = [0x38, 0x3d, 0x37, 0x32];
const WHITE_GROUP_OFF: [u8; 4] = [0x3b, 0x33, 0x3a, 0x36];
const WHITE_GROUP_FULL: [u8; 4] = [0xb8, 0xbd, 0xb7, 0xb2];
const WHITE_GROUP_NIGHTMODE: [u8; 4] = [0xbb, 0xb3, 0xba, 0xb6];

const RGBW_GROUP_ON: [u8; 4] = [0x45, 0x47, 0x49, 0x4b];
const RGBW_GROUP_OFF: [u8; 4] = [0x46, 0x48, 0x4a, 0x4c];
const RGBW_GROUP_TO_WHITE: [u8; 4] = [0xc5, 0xc7, 0xc9, 0xcb];
const RGBW_GROUP_NIGHTMODE: [u8; 4] = [0xc6, 0xc8, 0xca, 0xcc];

const RGBW_HUE: u8 = 0x40;
const RGBW_BRIGHTNESS: u8 = 0x4e;

impl DeviceFamily {
    /// Look up a family-wide command.
    ///
    /// `None` means the family has no such command; sending nothing is the
    /// protocol's own behavior for it.
    pub(crate) fn command(self, command: Command) -> Option<CommandSpec> {
        use Command::*;
        use DeviceFamily::*;

        let spec = match (self, command) {
            (White, AllOn) => CommandSpec::Opcode(0x35),
            (White, AllOff) => CommandSpec::Opcode(0x39),
            (White, AllFull) => CommandSpec::Opcode(0xb5),
            (White, AllNightmode) => CommandSpec::Opcode(0xb9),
            (White, Warmer) => CommandSpec::Opcode(0x3e),
            (White, Cooler) => CommandSpec::Opcode(0x3f),
            (White, BrightnessUp) => CommandSpec::Opcode(0x3c),
            (White, BrightnessDown) => CommandSpec::Opcode(0x34),

            (Rgbw, AllOn) => CommandSpec::Opcode(0x42),
            (Rgbw, AllOff) => CommandSpec::Opcode(0x41),
            (Rgbw, AllWhite) => CommandSpec::Opcode(0xc2),
            (Rgbw, AllNightmode) => CommandSpec::Opcode(0xc1),
            (Rgbw, Disco) => CommandSpec::Opcode(0x4d),
            (Rgbw, DiscoFaster) => CommandSpec::Opcode(0x44),
            (Rgbw, DiscoSlower) => CommandSpec::Opcode(0x43),
            (Rgbw, Hue(hue)) => CommandSpec::Param(RGBW_HUE, hue),
            (Rgbw, Brightness(value)) => CommandSpec::Param(RGBW_BRIGHTNESS, value),

            _ => return None,
        };
        Some(spec)
    }

    /// Look up the per-group opcode for `group` (1-4).
    pub(crate) fn group_command(self, command: GroupCommand, group: u8) -> Option<CommandSpec> {
        let table = match (self, command) {
            (DeviceFamily::White, GroupCommand::On) => &WHITE_GROUP_ON,
            (DeviceFamily::White, GroupCommand::Off) => &WHITE_GROUP_OFF,
            (DeviceFamily::White, GroupCommand::Full) => &WHITE_GROUP_FULL,
            (DeviceFamily::White, GroupCommand::Nightmode) => &WHITE_GROUP_NIGHTMODE,
            (DeviceFamily::Rgbw, GroupCommand::On) => &RGBW_GROUP_ON,
            (DeviceFamily::Rgbw, GroupCommand::Off) => &RGBW_GROUP_OFF,
            (DeviceFamily::Rgbw, GroupCommand::ToWhite) => &RGBW_GROUP_TO_WHITE,
            (DeviceFamily::Rgbw, GroupCommand::Nightmode) => &RGBW_GROUP_NIGHTMODE,
            _ => return None,
        };
        let index = usize::from(group).checked_sub(1)?;
        table.get(index).copied().map(CommandSpec::Opcode)
    }
}
