//! Per-gateway light control.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use log::debug;
use serde_json::{Value, json};

use crate::call::{Call, Reply};
use crate::config::ControllerConfig;
use crate::dispatch::{Dispatcher, Operation, Plan};
use crate::errors::Error;
use crate::group::GroupConfig;
use crate::history::FrameHistory;
use crate::runtime::Mutex;
use crate::transport::{Transport, UdpTransport};
use crate::types::{Brightness, Color, DeviceFamily};

type Result<T> = std::result::Result<T, Error>;

/// Controls the lamp groups paired with one Milight gateway.
///
/// Every method takes an optional group: `None` or `Some(0)` addresses all
/// four groups, `Some(1..=4)` a single one. Anything else fails with
/// [`Error::InvalidGroup`] before a frame is sent.
///
/// Calls are serialized per controller: a call returns once all its frames
/// were handed to the transport, with at least the configured pause between
/// consecutive frames. Controllers for different gateways share nothing and
/// can run concurrently.
///
/// # Example
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use milight_rs::{Controller, NamedColor};
///
/// # async fn run() -> Result<(), milight_rs::Error> {
/// let led = Controller::new(Ipv4Addr::new(192, 168, 1, 6));
/// led.on(None).await?;
/// led.set_color(NamedColor::Red, Some(2)).await?;
/// led.set_brightness(50, Some(2)).await?;
/// led.nightmode(Some(3)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Controller<T = UdpTransport> {
    gateway: SocketAddrV4,
    config: ControllerConfig,
    groups: GroupConfig,
    pause: Duration,
    dispatcher: Mutex<Dispatcher<T>>,
}

impl Controller<UdpTransport> {
    /// A controller with the default configuration.
    pub fn new(ip: Ipv4Addr) -> Self {
        Self::build(
            ip,
            ControllerConfig::default(),
            Duration::from_secs_f64(ControllerConfig::DEFAULT_PAUSE),
            UdpTransport,
        )
    }

    pub fn with_config(ip: Ipv4Addr, config: ControllerConfig) -> Result<Self> {
        Self::with_transport(ip, config, UdpTransport)
    }
}

impl<T: Transport> Controller<T> {
    /// A controller sending through a custom transport.
    ///
    /// Fails with [`Error::InvalidPause`] if the configured pause is negative
    /// or not finite.
    pub fn with_transport(ip: Ipv4Addr, config: ControllerConfig, transport: T) -> Result<Self> {
        let pause = config.pause()?;
        Ok(Self::build(ip, config, pause, transport))
    }

    fn build(ip: Ipv4Addr, config: ControllerConfig, pause: Duration, transport: T) -> Self {
        let gateway = SocketAddrV4::new(ip, config.port);
        Controller {
            gateway,
            groups: config.groups(),
            pause,
            dispatcher: Mutex::new(Dispatcher::new(transport, gateway, pause)),
            config,
        }
    }

    pub fn ip(&self) -> Ipv4Addr {
        *self.gateway.ip()
    }

    pub fn port(&self) -> u16 {
        self.gateway.port()
    }

    pub fn gateway(&self) -> SocketAddrV4 {
        self.gateway
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Repeat count applied to idempotent commands (never zero).
    pub fn repeat_commands(&self) -> u32 {
        self.config.repeats()
    }

    pub fn pause_between_commands(&self) -> Duration {
        self.pause
    }

    /// Family configured for `group` (1-4).
    pub fn group_family(&self, group: u8) -> Result<DeviceFamily> {
        self.groups.family(group)
    }

    /// Switch lights on.
    pub async fn on(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::On).await
    }

    /// Switch lights off.
    pub async fn off(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::Off).await
    }

    /// Switch lights on and to white light.
    ///
    /// Only RGBW bulbs have a white mode; white groups just switch on.
    pub async fn white(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::White).await
    }

    /// Switch lights on and change color.
    ///
    /// [`Color::White`] is routed to [`Controller::white`]. Groups of white
    /// bulbs ignore colors, and [`Color::Unsupported`] names only switch
    /// lights on. Returns the color that was requested.
    pub async fn set_color(&self, color: impl Into<Color>, group: Option<u8>) -> Result<Color> {
        let color = color.into();
        match &color {
            Color::White => self.white(group).await?,
            Color::Unsupported(name) => {
                debug!("no color command for {name}; powering on only");
                self.run(group, Operation::Hue(None)).await?
            }
            _ => self.run(group, Operation::Hue(color.hue())).await?,
        }
        Ok(color)
    }

    /// Switch lights on and set brightness.
    ///
    /// Accepts a percentage (integers, clamped to 0-100) or a fraction of
    /// full brightness (floats up to `1.0`). Returns the clamped percentage.
    /// Only RGBW bulbs take absolute brightness; see
    /// [`Controller::brightness_up`] for white bulbs.
    pub async fn set_brightness(
        &self,
        brightness: impl Into<Brightness>,
        group: Option<u8>,
    ) -> Result<u8> {
        let brightness = brightness.into();
        self.run(group, Operation::Brightness(brightness.wire_value()))
            .await?;
        Ok(brightness.percent())
    }

    /// Step white bulbs brighter. No effect on RGBW bulbs.
    pub async fn brightness_up(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::BrightnessUp).await
    }

    /// Step white bulbs dimmer. No effect on RGBW bulbs.
    pub async fn brightness_down(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::BrightnessDown).await
    }

    /// Step white bulbs to a warmer color temperature. No effect on RGBW bulbs.
    pub async fn warmer(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::Warmer).await
    }

    /// Step white bulbs to a cooler color temperature. No effect on RGBW bulbs.
    pub async fn cooler(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::Cooler).await
    }

    /// Switch white bulbs on at full brightness. No effect on RGBW bulbs.
    pub async fn full_brightness(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::FullBrightness).await
    }

    /// Start disco mode, or advance to the next one.
    ///
    /// Sent only once regardless of `repeat_commands`: every frame steps the
    /// gateway to the next mode. Consecutive calls cycle through static
    /// white, white fade, color fade, RGB fade, seven/three color patterns,
    /// two-color pairs, blinks and strobes, then all of them in turn.
    pub async fn disco(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::Disco).await
    }

    /// Speed up disco mode (does not start it). Sent only once.
    pub async fn disco_faster(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::DiscoFaster).await
    }

    /// Slow down disco mode (does not start it). Sent only once.
    pub async fn disco_slower(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::DiscoSlower).await
    }

    /// Switch to night mode (very dim light).
    ///
    /// The lights are switched off first; the night mode frame itself is sent
    /// only once, as repeats would make the lights blink.
    pub async fn nightmode(&self, group: Option<u8>) -> Result<()> {
        self.run(group, Operation::Nightmode).await
    }

    /// Run one typed call.
    pub async fn call(&self, call: Call) -> Result<Reply> {
        let reply = match call {
            Call::On(group) => self.on(group).await.map(|_| Reply::Done)?,
            Call::Off(group) => self.off(group).await.map(|_| Reply::Done)?,
            Call::White(group) => self.white(group).await.map(|_| Reply::Done)?,
            Call::SetColor(color, group) => Reply::Color(self.set_color(color, group).await?),
            Call::SetBrightness(brightness, group) => {
                Reply::Brightness(self.set_brightness(brightness, group).await?)
            }
            Call::BrightnessUp(group) => self.brightness_up(group).await.map(|_| Reply::Done)?,
            Call::BrightnessDown(group) => {
                self.brightness_down(group).await.map(|_| Reply::Done)?
            }
            Call::Warmer(group) => self.warmer(group).await.map(|_| Reply::Done)?,
            Call::Cooler(group) => self.cooler(group).await.map(|_| Reply::Done)?,
            Call::FullBrightness(group) => {
                self.full_brightness(group).await.map(|_| Reply::Done)?
            }
            Call::Disco(group) => self.disco(group).await.map(|_| Reply::Done)?,
            Call::DiscoFaster(group) => self.disco_faster(group).await.map(|_| Reply::Done)?,
            Call::DiscoSlower(group) => self.disco_slower(group).await.map(|_| Reply::Done)?,
            Call::Nightmode(group) => self.nightmode(group).await.map(|_| Reply::Done)?,
        };
        Ok(reply)
    }

    /// Run calls in order.
    ///
    /// Not a transaction: the first error is returned, calls before it stay
    /// applied and calls after it are not run.
    pub async fn batch_run<I>(&self, calls: I) -> Result<Vec<Reply>>
    where
        I: IntoIterator<Item = Call>,
    {
        let mut replies = Vec::new();
        for call in calls {
            replies.push(self.call(call).await?);
        }
        Ok(replies)
    }

    pub async fn history(&self) -> FrameHistory {
        self.dispatcher.lock().await.history().clone()
    }

    pub async fn clear_history(&self) {
        self.dispatcher.lock().await.history_mut().clear();
    }

    /// Returns diagnostics including configuration and frame history.
    pub async fn diagnostics(&self) -> Value {
        let history = self.dispatcher.lock().await.history().summary();
        json!({
            "gateway": self.gateway.to_string(),
            "groups": self.groups.families(),
            "repeat_commands": self.repeat_commands(),
            "pause_between_commands": self.pause.as_secs_f64(),
            "history": serde_json::to_value(history).unwrap_or(Value::Null),
        })
    }

    async fn run(&self, group: Option<u8>, operation: Operation) -> Result<()> {
        let plan = Plan::build(&self.groups, group, operation, self.repeat_commands())?;
        self.dispatcher.lock().await.run(&plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use crate::types::DeviceFamily::Rgbw;
    use crate::types::NamedColor;

    const ON: u8 = 0x45;

    fn controller(config: ControllerConfig) -> (Controller<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::new();
        let config = config.with_pause(0.0);
        let led = Controller::with_transport(Ipv4Addr::LOCALHOST, config, transport.clone()).unwrap();
        (led, transport)
    }

    fn single_shot() -> ControllerConfig {
        ControllerConfig::new().with_repeat_commands(0)
    }

    fn combined() -> ControllerConfig {
        let mut config = single_shot();
        config.set_group_type(2, "white").unwrap();
        config.set_group_type(4, "white").unwrap();
        config
    }

    #[test]
    fn test_default_constructor() {
        let led = Controller::new(Ipv4Addr::LOCALHOST);
        assert_eq!(led.ip(), Ipv4Addr::LOCALHOST);
        assert_eq!(led.port(), 8899);
        assert_eq!(led.repeat_commands(), 3);
        assert_eq!(led.pause_between_commands(), Duration::from_millis(100));
        assert_eq!(led.group_family(1).unwrap(), Rgbw);
    }

    #[test]
    fn test_changing_settings() {
        let config = ControllerConfig::new()
            .with_port(123)
            .with_pause(0.8)
            .with_repeat_commands(0);
        let led = Controller::with_config(Ipv4Addr::LOCALHOST, config).unwrap();
        assert_eq!(led.port(), 123);
        assert_eq!(led.pause_between_commands(), Duration::from_millis(800));
        assert_eq!(led.repeat_commands(), 1);
    }

    #[test]
    fn test_invalid_pause_rejected() {
        let config = ControllerConfig::new().with_pause(-1.0);
        assert_eq!(
            Controller::with_config(Ipv4Addr::LOCALHOST, config).unwrap_err(),
            Error::InvalidPause(-1.0)
        );
    }

    #[tokio::test]
    async fn test_invalid_group_sends_nothing() {
        let (led, transport) = controller(ControllerConfig::new());
        assert_eq!(led.on(Some(5)).await.unwrap_err(), Error::InvalidGroup(5));
        assert_eq!(
            led.set_brightness(50, Some(9)).await.unwrap_err(),
            Error::InvalidGroup(9)
        );
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_frames_reach_configured_gateway() {
        let (led, transport) = controller(ControllerConfig::new().with_port(123));
        led.on(None).await.unwrap();
        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|s| s.gateway == SocketAddrV4::new(Ipv4Addr::LOCALHOST, 123)));
        assert!(sent.iter().all(|s| s.frame == [0x42, 0x00, 0x55]));
    }

    #[tokio::test]
    async fn test_groups_follow_configured_family() {
        let (led, transport) = controller(combined());
        for group in 1..=4 {
            led.on(Some(group)).await.unwrap();
        }
        assert_eq!(transport.opcodes(), vec![0x45, 0x3d, 0x49, 0x32]);

        transport.clear();
        led.off(None).await.unwrap();
        assert_eq!(transport.opcodes(), vec![0x39, 0x41]);
    }

    #[tokio::test]
    async fn test_set_color() {
        let (led, transport) = controller(single_shot());
        let color = led.set_color(NamedColor::Red, Some(1)).await.unwrap();
        assert_eq!(color, Color::Named(NamedColor::Red));
        assert_eq!(transport.frames(), vec![[ON, 0x00, 0x55], [0x40, 0xb0, 0x55]]);

        transport.clear();
        assert_eq!(led.set_color(156u8, None).await.unwrap(), Color::Hue(156));
        assert_eq!(transport.frames(), vec![[0x42, 0x00, 0x55], [0x40, 156, 0x55]]);
    }

    #[tokio::test]
    async fn test_set_color_white_uses_white_command() {
        let (led, transport) = controller(single_shot());
        assert_eq!(led.set_color(Color::White, Some(3)).await.unwrap(), Color::White);
        assert_eq!(transport.opcodes(), vec![0x49, 0xc9]);

        transport.clear();
        led.set_color(Color::White, None).await.unwrap();
        assert_eq!(transport.opcodes(), vec![0x42, 0xc2]);
    }

    #[tokio::test]
    async fn test_color_on_white_group_only_powers_on() {
        let (led, transport) = controller(combined());
        led.set_color(NamedColor::Green, Some(2)).await.unwrap();
        assert_eq!(transport.opcodes(), vec![0x3d]);
    }

    #[tokio::test]
    async fn test_unsupported_color_powers_on_without_hue() {
        let (led, transport) = controller(ControllerConfig::new().with_repeat_commands(2));
        let color = led
            .set_color(Color::Unsupported("blue".into()), Some(3))
            .await
            .unwrap();
        assert_eq!(color, Color::Unsupported("blue".into()));
        assert_eq!(transport.opcodes(), vec![0x49, 0x49]);
        assert_eq!(led.history().await.entries()[0].operation, "hue");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_calls_do_not_interleave() {
        let transport = RecordingTransport::new();
        let config = ControllerConfig::new().with_pause(0.005).with_repeat_commands(3);
        let led = Controller::with_transport(Ipv4Addr::LOCALHOST, config, transport.clone()).unwrap();

        let (color, off) = futures::join!(
            led.set_color(NamedColor::Red, Some(1)),
            led.off(Some(2))
        );
        color.unwrap();
        off.unwrap();

        let color_frames = [ON, 0x40].repeat(3);
        let off_frames = vec![0x48; 3];
        let opcodes = transport.opcodes();
        assert!(
            opcodes == [color_frames.clone(), off_frames.clone()].concat()
                || opcodes == [off_frames, color_frames].concat(),
            "frames interleaved: {opcodes:x?}"
        );
    }

    #[tokio::test]
    async fn test_set_brightness() {
        let (led, transport) = controller(single_shot());
        assert_eq!(led.set_brightness(-1, None).await.unwrap(), 0);
        assert_eq!(led.set_brightness(101, None).await.unwrap(), 100);
        assert_eq!(led.set_brightness(50, Some(3)).await.unwrap(), 50);
        assert_eq!(led.set_brightness(0.1, None).await.unwrap(), 10);
        assert_eq!(led.set_brightness(1.0, None).await.unwrap(), 100);
        assert_eq!(led.set_brightness(50.0, None).await.unwrap(), 50);

        let frames = transport.frames();
        assert_eq!(&frames[..2], &[[0x42, 0x00, 0x55], [0x4e, 2, 0x55]]);
        assert_eq!(&frames[2..4], &[[0x42, 0x00, 0x55], [0x4e, 27, 0x55]]);
        assert_eq!(&frames[4..6], &[[0x49, 0x00, 0x55], [0x4e, 14, 0x55]]);
    }

    #[tokio::test]
    async fn test_single_shot_operations() {
        let (led, transport) = controller(ControllerConfig::new().with_repeat_commands(3));
        led.disco(Some(1)).await.unwrap();
        led.disco_faster(Some(1)).await.unwrap();
        led.disco_slower(None).await.unwrap();
        assert_eq!(transport.opcodes(), vec![ON, 0x4d, ON, 0x44, 0x42, 0x43]);

        transport.clear();
        led.nightmode(Some(1)).await.unwrap();
        assert_eq!(transport.opcodes(), vec![0x46, 0x46, 0x46, 0xc6]);
    }

    #[tokio::test]
    async fn test_white_only_adjustments() {
        let (led, transport) = controller(combined());
        led.warmer(Some(2)).await.unwrap();
        led.cooler(Some(4)).await.unwrap();
        led.brightness_up(Some(2)).await.unwrap();
        led.brightness_down(Some(2)).await.unwrap();
        assert_eq!(
            transport.opcodes(),
            vec![0x3d, 0x3e, 0x32, 0x3f, 0x3d, 0x34, 0x3d, 0x3c]
        );

        transport.clear();
        led.warmer(Some(1)).await.unwrap();
        assert_eq!(transport.opcodes(), vec![ON]);
    }

    #[tokio::test]
    async fn test_full_brightness() {
        let (led, transport) = controller(combined());
        led.full_brightness(Some(2)).await.unwrap();
        led.full_brightness(Some(1)).await.unwrap();
        led.full_brightness(None).await.unwrap();
        assert_eq!(transport.opcodes(), vec![0xbd, 0xb5]);
    }

    #[tokio::test]
    async fn test_batch_run() {
        let (led, transport) = controller(single_shot());
        let replies = led
            .batch_run([
                Call::SetBrightness(Brightness::from(10), Some(3)),
                Call::SetColor(NamedColor::Red.into(), None),
                Call::Off(None),
            ])
            .await
            .unwrap();
        assert_eq!(
            replies,
            vec![
                Reply::Brightness(10),
                Reply::Color(Color::Named(NamedColor::Red)),
                Reply::Done,
            ]
        );
        assert_eq!(transport.opcodes(), vec![0x49, 0x4e, 0x42, 0x40, 0x41]);
    }

    #[tokio::test]
    async fn test_batch_run_stops_at_first_error() {
        let (led, transport) = controller(single_shot());
        let err = led
            .batch_run([Call::On(Some(1)), Call::Off(Some(7)), Call::Off(None)])
            .await
            .unwrap_err();
        assert_eq!(err, Error::InvalidGroup(7));
        assert_eq!(transport.opcodes(), vec![ON]);
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let (led, transport) = controller(single_shot());
        transport.fail(true);
        assert!(matches!(led.on(None).await, Err(Error::Socket { .. })));
        assert!(led.history().await.last_error().is_some());
    }

    #[tokio::test]
    async fn test_history_and_diagnostics() {
        let (led, _transport) = controller(combined());
        led.on(Some(1)).await.unwrap();
        led.disco(Some(3)).await.unwrap();

        let history = led.history().await;
        assert_eq!(history.sent(), 3);
        assert_eq!(history.entries()[0].operation, "on");
        assert_eq!(history.entries()[2].operation, "disco");
        assert_eq!(history.entries()[2].group, Some(3));

        let diag = led.diagnostics().await;
        assert_eq!(diag["gateway"], "127.0.0.1:8899");
        assert_eq!(diag["groups"], json!(["rgbw", "white", "rgbw", "white"]));
        assert_eq!(diag["history"]["frames_sent"], 3);

        led.clear_history().await;
        assert!(led.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_pacing_across_calls() {
        let transport = RecordingTransport::new();
        let config = ControllerConfig::new().with_pause(0.03).with_repeat_commands(1);
        let led = Controller::with_transport(Ipv4Addr::LOCALHOST, config, transport.clone()).unwrap();

        led.on(Some(1)).await.unwrap();
        led.set_color(NamedColor::Aqua, Some(1)).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        for pair in sent.windows(2) {
            assert!(pair[1].at.duration_since(pair[0].at) >= Duration::from_millis(30));
        }
    }

    #[tokio::test]
    async fn test_group_zero_is_broadcast() {
        let (led, transport) = controller(single_shot());
        led.on(Some(0)).await.unwrap();
        led.on(None).await.unwrap();
        assert_eq!(transport.opcodes(), vec![0x42, 0x42]);
    }
}
