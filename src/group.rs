//! Group addressing and per-group family resolution.

use strum::IntoEnumIterator;

use crate::command::{Command, CommandSpec, GroupCommand};
use crate::errors::Error;
use crate::types::DeviceFamily;

type Result<T> = std::result::Result<T, Error>;

/// Which lamps a command is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Every group on the gateway.
    All,
    /// A single group, 1-4.
    Group(u8),
}

impl Target {
    pub(crate) const GROUPS: u8 = 4;

    /// `None` and 0 address every group; 1-4 address one group.
    pub(crate) fn resolve(group: Option<u8>) -> Result<Self> {
        match group {
            None | Some(0) => Ok(Target::All),
            Some(g) if g <= Self::GROUPS => Ok(Target::Group(g)),
            Some(g) => Err(Error::InvalidGroup(g.into())),
        }
    }
}

/// A command to resolve against the group configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Request {
    /// Same opcode for every group of a family.
    Shared(Command),
    /// A per-group opcode, broadcast through its "all" counterpart.
    PerGroup(GroupCommand),
}

/// Device family of each of the four gateway groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupConfig([DeviceFamily; 4]);

impl GroupConfig {
    pub fn new(families: [DeviceFamily; 4]) -> Self {
        GroupConfig(families)
    }

    /// Family configured for `group` (1-4).
    pub fn family(&self, group: u8) -> Result<DeviceFamily> {
        match Target::resolve(Some(group))? {
            Target::Group(g) => Ok(self.0[usize::from(g) - 1]),
            Target::All => Err(Error::InvalidGroup(group.into())),
        }
    }

    pub fn families(&self) -> &[DeviceFamily; 4] {
        &self.0
    }

    /// Whether any group holds bulbs of `family`.
    pub fn has(&self, family: DeviceFamily) -> bool {
        self.0.contains(&family)
    }

    /// Command specs for `request`, in send order.
    ///
    /// A broadcast yields one spec per family present on the gateway, white
    /// first. A family without the requested command contributes nothing.
    pub(crate) fn resolve(&self, target: Target, request: Request) -> Vec<CommandSpec> {
        match target {
            Target::All => {
                let command = match request {
                    Request::Shared(command) => command,
                    Request::PerGroup(command) => command.broadcast(),
                };
                DeviceFamily::iter()
                    .filter(|family| self.has(*family))
                    .filter_map(|family| family.command(command))
                    .collect()
            }
            Target::Group(group) => {
                let family = self.0[usize::from(group) - 1];
                let spec = match request {
                    Request::Shared(command) => family.command(command),
                    Request::PerGroup(command) => family.group_command(command, group),
                };
                spec.into_iter().collect()
            }
        }
    }
}
