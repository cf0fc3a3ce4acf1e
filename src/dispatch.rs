//! Turning operations into paced, repeated frame sends.
//!
//! An [`Operation`] is resolved against the group configuration into a
//! [`Plan`]: an ordered list of steps, each a frame sequence and the number of
//! times to repeat it. The gateway never acknowledges anything, so repeating
//! idempotent commands is the only reliability available. Commands that step
//! bridge-local state (disco, night mode) are sent exactly once.

use std::net::SocketAddrV4;
use std::time::Duration;

use log::{debug, trace};
use strum_macros::IntoStaticStr;

use crate::command::{Command, GroupCommand};
use crate::errors::Error;
use crate::frame::Frame;
use crate::group::{GroupConfig, Request, Target};
use crate::history::FrameHistory;
use crate::runtime::{self, Instant};
use crate::transport::Transport;

type Result<T> = std::result::Result<T, Error>;

/// A single controller intent with its typed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Operation {
    On,
    Off,
    White,
    /// `None` for colors without a command; the group is only powered on.
    Hue(Option<u8>),
    /// Wire value (2-27), not percent.
    Brightness(u8),
    Warmer,
    Cooler,
    BrightnessUp,
    BrightnessDown,
    FullBrightness,
    Disco,
    DiscoFaster,
    DiscoSlower,
    Nightmode,
}

/// One run of frames, sent `repeats` times in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub frames: Vec<Frame>,
    pub repeats: u32,
}

/// Everything one operation puts on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Plan {
    pub operation: &'static str,
    pub group: Option<u8>,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Resolve `operation` for `group`.
    ///
    /// Fails with [`Error::InvalidGroup`] before producing any frame.
    /// `repeats` is the controller's retry count for idempotent steps.
    pub(crate) fn build(
        groups: &GroupConfig,
        group: Option<u8>,
        operation: Operation,
        repeats: u32,
    ) -> Result<Self> {
        let target = Target::resolve(group)?;
        let repeats = repeats.max(1);
        let frames = |request: Request| -> Vec<Frame> {
            groups
                .resolve(target, request)
                .into_iter()
                .map(Frame::encode)
                .collect()
        };
        let on = || frames(Request::PerGroup(GroupCommand::On));
        let powered = |request: Request| -> Vec<Frame> {
            let mut sequence = on();
            sequence.extend(frames(request));
            sequence
        };
        let shared = |command: Command| Request::Shared(command);

        let steps = match operation {
            Operation::On => vec![Step::new(on(), repeats)],
            Operation::Off => vec![Step::new(frames(Request::PerGroup(GroupCommand::Off)), repeats)],
            Operation::White => vec![Step::new(
                powered(Request::PerGroup(GroupCommand::ToWhite)),
                repeats,
            )],
            Operation::Hue(Some(hue)) => {
                vec![Step::new(powered(shared(Command::Hue(hue))), repeats)]
            }
            Operation::Hue(None) => vec![Step::new(on(), repeats)],
            Operation::Brightness(value) => vec![
                Step::new(on(), repeats),
                Step::new(frames(shared(Command::Brightness(value))), 1),
            ],
            Operation::Warmer => vec![Step::new(powered(shared(Command::Warmer)), repeats)],
            Operation::Cooler => vec![Step::new(powered(shared(Command::Cooler)), repeats)],
            // Method names and wire commands are swapped; kept for compatibility.
            Operation::BrightnessUp => {
                vec![Step::new(powered(shared(Command::BrightnessDown)), repeats)]
            }
            Operation::BrightnessDown => {
                vec![Step::new(powered(shared(Command::BrightnessUp)), repeats)]
            }
            Operation::FullBrightness => vec![Step::new(
                frames(Request::PerGroup(GroupCommand::Full)),
                repeats,
            )],
            Operation::Disco => vec![Step::new(powered(shared(Command::Disco)), 1)],
            Operation::DiscoFaster => vec![Step::new(powered(shared(Command::DiscoFaster)), 1)],
            Operation::DiscoSlower => vec![Step::new(powered(shared(Command::DiscoSlower)), 1)],
            Operation::Nightmode => vec![
                Step::new(frames(Request::PerGroup(GroupCommand::Off)), repeats),
                Step::new(frames(Request::PerGroup(GroupCommand::Nightmode)), 1),
            ],
        };

        Ok(Plan {
            operation: operation.into(),
            group,
            steps,
        })
    }

    /// Number of frames this plan sends.
    pub(crate) fn len(&self) -> usize {
        self.steps
            .iter()
            .map(|step| step.frames.len() * step.repeats as usize)
            .sum()
    }

    /// Frames in send order, repeats expanded.
    #[cfg(test)]
    pub(crate) fn frames(&self) -> Vec<Frame> {
        self.steps
            .iter()
            .flat_map(|step| {
                (0..step.repeats).flat_map(move |_| step.frames.iter().copied())
            })
            .collect()
    }
}

impl Step {
    fn new(frames: Vec<Frame>, repeats: u32) -> Self {
        Step { frames, repeats }
    }
}

/// Sends plans to one gateway, keeping at least `pause` between frames.
#[derive(Debug)]
pub(crate) struct Dispatcher<T> {
    transport: T,
    gateway: SocketAddrV4,
    pause: Duration,
    last_sent: Option<Instant>,
    history: FrameHistory,
}

impl<T: Transport> Dispatcher<T> {
    pub(crate) fn new(transport: T, gateway: SocketAddrV4, pause: Duration) -> Self {
        Dispatcher {
            transport,
            gateway,
            pause,
            last_sent: None,
            history: FrameHistory::new(),
        }
    }

    pub(crate) fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut FrameHistory {
        &mut self.history
    }

    /// Send every frame of `plan`; stops at the first transport error.
    pub(crate) async fn run(&mut self, plan: &Plan) -> Result<()> {
        debug!(
            "{} (group {:?}): {} frame(s) to {}",
            plan.operation,
            plan.group,
            plan.len(),
            self.gateway
        );
        for step in &plan.steps {
            for _ in 0..step.repeats {
                for frame in &step.frames {
                    self.send(plan, frame).await?;
                }
            }
        }
        Ok(())
    }

    async fn send(&mut self, plan: &Plan, frame: &Frame) -> Result<()> {
        if let Some(last) = self.last_sent {
            let elapsed = last.elapsed();
            if elapsed < self.pause {
                let wait = self.pause - elapsed;
                trace!("pacing: waiting {wait:?} before next frame");
                runtime::sleep(wait).await;
            }
        }

        if let Err(e) = self.transport.send(frame, self.gateway).await {
            self.history.record_error(&e.to_string());
            return Err(e);
        }
        self.last_sent = Some(Instant::now());
        self.history.record(plan.operation, plan.group, *frame);
        Ok(())
    }
}
