//! CLI application for controlling Milight bulbs through a WiFi gateway.
//!
//! Run with: cargo run --example milight_cli -- --ip 192.168.1.6 set-color red --group 1

use clap::{Parser, Subcommand};
use milight_rs::{Brightness, Call, Color, Controller, ControllerConfig, DeviceFamily, Reply};
use std::net::Ipv4Addr;

#[derive(Parser)]
#[command(name = "milight-cli")]
#[command(about = "Control Milight/LimitlessLED bulbs from the command line", long_about = None)]
struct Cli {
    /// IP address of the gateway
    #[arg(short, long)]
    ip: Ipv4Addr,

    /// UDP port of the gateway
    #[arg(short, long, default_value = "8899")]
    port: u16,

    /// How many times repeatable frames are sent
    #[arg(short, long, default_value = "3")]
    repeat: u32,

    /// Seconds between two frames
    #[arg(long, default_value = "0.1")]
    pause: f64,

    /// Family of the bulbs paired to group 1
    #[arg(long, default_value = "rgbw")]
    group_1: DeviceFamily,

    /// Family of the bulbs paired to group 2
    #[arg(long, default_value = "rgbw")]
    group_2: DeviceFamily,

    /// Family of the bulbs paired to group 3
    #[arg(long, default_value = "rgbw")]
    group_3: DeviceFamily,

    /// Family of the bulbs paired to group 4
    #[arg(long, default_value = "rgbw")]
    group_4: DeviceFamily,

    /// Print the frame history as JSON when done
    #[arg(long)]
    diagnostics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn bulbs on
    On(Target),
    /// Turn bulbs off
    Off(Target),
    /// Switch RGBW bulbs to their white channel
    White(Target),
    /// Set an RGBW color by name (red, baby_blue, ...) or hue byte (0-255)
    SetColor {
        color: Color,
        #[command(flatten)]
        target: Target,
    },
    /// Set RGBW brightness as a percentage (0-100) or a fraction (0.0-1.0)
    SetBrightness {
        brightness: Brightness,
        #[command(flatten)]
        target: Target,
    },
    /// Step white bulbs one level brighter
    BrightnessUp(Target),
    /// Step white bulbs one level dimmer
    BrightnessDown(Target),
    /// Shift white bulbs towards warm white
    Warmer(Target),
    /// Shift white bulbs towards cool white
    Cooler(Target),
    /// Set white bulbs to full brightness
    FullBrightness(Target),
    /// Start or cycle the RGBW disco mode
    Disco(Target),
    /// Speed up the disco mode
    DiscoFaster(Target),
    /// Slow down the disco mode
    DiscoSlower(Target),
    /// Dim bulbs to night light
    Nightmode(Target),
}

#[derive(clap::Args)]
struct Target {
    /// Group 1-4; omit (or 0) for every group
    #[arg(short, long)]
    group: Option<u8>,
}

impl Commands {
    fn into_call(self) -> Call {
        match self {
            Commands::On(t) => Call::On(t.group),
            Commands::Off(t) => Call::Off(t.group),
            Commands::White(t) => Call::White(t.group),
            Commands::SetColor { color, target } => Call::SetColor(color, target.group),
            Commands::SetBrightness { brightness, target } => {
                Call::SetBrightness(brightness, target.group)
            }
            Commands::BrightnessUp(t) => Call::BrightnessUp(t.group),
            Commands::BrightnessDown(t) => Call::BrightnessDown(t.group),
            Commands::Warmer(t) => Call::Warmer(t.group),
            Commands::Cooler(t) => Call::Cooler(t.group),
            Commands::FullBrightness(t) => Call::FullBrightness(t.group),
            Commands::Disco(t) => Call::Disco(t.group),
            Commands::DiscoFaster(t) => Call::DiscoFaster(t.group),
            Commands::DiscoSlower(t) => Call::DiscoSlower(t.group),
            Commands::Nightmode(t) => Call::Nightmode(t.group),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ControllerConfig::new()
        .with_port(cli.port)
        .with_repeat_commands(cli.repeat)
        .with_pause(cli.pause)
        .with_group(1, cli.group_1)?
        .with_group(2, cli.group_2)?
        .with_group(3, cli.group_3)?
        .with_group(4, cli.group_4)?;
    let led = Controller::with_config(cli.ip, config)?;

    let call = cli.command.into_call();
    println!("Sending {} to {}...", call.name(), led.gateway());

    match led.call(call).await {
        Ok(Reply::Done) => println!("Done"),
        Ok(Reply::Color(color)) => println!("Color set to {color}"),
        Ok(Reply::Brightness(percent)) => println!("Brightness set to {percent}%"),
        Err(e) => eprintln!("Error: {e}"),
    }

    if cli.diagnostics {
        println!("{}", serde_json::to_string_pretty(&led.diagnostics().await)?);
    }

    Ok(())
}
