//! Fixed-size wire frames.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::CommandSpec;

/// The 3-byte UDP payload understood by the gateway.
///
/// Every command is padded to the same shape: opcode, parameter (or a zero
/// filler), then the `0x55` trailer.
///
/// # Examples
///
/// ```
/// use milight_rs::{CommandSpec, Frame};
///
/// assert_eq!(Frame::encode(CommandSpec::Opcode(0x42)).as_bytes(), &[0x42, 0x00, 0x55]);
/// assert_eq!(Frame::encode(CommandSpec::Param(0x40, 0xb0)).as_bytes(), &[0x40, 0xb0, 0x55]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame([u8; 3]);

impl Frame {
    pub const LEN: usize = 3;
    pub const FILLER: u8 = 0x00;
    pub const TRAILER: u8 = 0x55;

    pub fn encode(spec: CommandSpec) -> Self {
        match spec {
            CommandSpec::Opcode(op) => Frame([op, Self::FILLER, Self::TRAILER]),
            CommandSpec::Param(op, param) => Frame([op, param, Self::TRAILER]),
            CommandSpec::Raw(bytes) => Frame(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl From<CommandSpec> for Frame {
    fn from(spec: CommandSpec) -> Self {
        Frame::encode(spec)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:02x} {b:02x} {c:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_commands_end_with_trailer() {
        for op in 0..=u8::MAX {
            let frame = Frame::encode(CommandSpec::Opcode(op));
            assert_eq!(frame.as_bytes(), &[op, 0x00, 0x55]);

            let frame = Frame::encode(CommandSpec::Param(0x4e, op));
            assert_eq!(frame.as_bytes()[2], Frame::TRAILER);
        }
    }

    #[test]
    fn test_raw_commands_are_unchanged() {
        let frame = Frame::encode(CommandSpec::Raw([0x4e, 0x1b, 0x55]));
        assert_eq!(frame.as_bytes(), &[0x4e, 0x1b, 0x55]);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let spec = CommandSpec::Param(0x40, 0x30);
        assert_eq!(Frame::encode(spec), Frame::encode(spec));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Frame::encode(CommandSpec::Opcode(0xc5)).to_string(), "c5 00 55");
    }
}
