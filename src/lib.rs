//! # milight_rs
//!
//! An async Rust library for controlling Milight / LimitlessLED / Easybulb lights
//! through their WiFi gateway.
//!
//! The gateway relays fixed 3-byte UDP frames to bulbs over RF. It never
//! answers, so this crate paces frames (the gateway drops commands that arrive
//! too close together) and repeats the ones that are safe to repeat.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::net::Ipv4Addr;
//! use milight_rs::{Controller, ControllerConfig, DeviceFamily, NamedColor};
//!
//! async fn control_lights() -> Result<(), milight_rs::Error> {
//!     // Group 2 was paired with white bulbs in the vendor app; the rest are RGBW.
//!     let config = ControllerConfig::new().with_group(2, DeviceFamily::White)?;
//!     let led = Controller::with_config(Ipv4Addr::new(192, 168, 1, 6), config)?;
//!
//!     led.on(None).await?;
//!     led.set_color(NamedColor::Red, Some(1)).await?;
//!     led.set_brightness(0.5, Some(1)).await?;
//!     led.warmer(Some(2)).await?;
//!     led.nightmode(Some(3)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **White and RGBW groups**: each of the four gateway groups is driven with
//!   the opcodes of its [`DeviceFamily`]
//! - **Colors**: sixteen [`NamedColor`] presets, raw hues and white mode via [`Color`]
//! - **Brightness**: absolute levels with [`Brightness`], step up/down for white bulbs
//! - **Disco and night modes**: sent exactly once, since repeats would step them further
//! - **Batches**: run a list of typed [`Call`]s in order
//! - **Several gateways**: address controllers by index with [`ControllerPool`]
//! - **Diagnostics**: per-controller [`FrameHistory`]
//!
//! ## Communication
//!
//! Frames go to UDP port 8899 on the gateway by default. Groups have to be
//! paired with the gateway in the vendor's app first; pairing a remote does
//! not configure the gateway.
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod call;
mod command;
mod config;
mod controller;
mod dispatch;
mod errors;
mod frame;
mod group;
mod history;
mod pool;
pub mod runtime;
mod transport;
mod types;

// Re-export public API
pub use call::{Call, OperationName, Reply};
pub use command::CommandSpec;
pub use config::ControllerConfig;
pub use controller::Controller;
pub use errors::Error;
pub use frame::Frame;
pub use group::GroupConfig;
pub use history::{FrameHistory, HistoryEntry, HistorySummary};
pub use pool::ControllerPool;
pub use transport::{Transport, UdpTransport};
pub use types::{Brightness, Color, DeviceFamily, NamedColor};
