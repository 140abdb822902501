use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tandem_core::controller::Button;

/// Headless runner for the Tandem console core
#[derive(Parser, Debug)]
#[command(name = "tandem", author, version, about, long_about = None)]
pub struct Args {
    /// Path to an iNES (mapper 0) ROM image
    #[arg(required = true)]
    pub rom: PathBuf,

    /// Number of frames to run
    #[arg(long, default_value_t = 60)]
    pub frames: u64,

    /// Write the last presented frame to this PNG file
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Dump pattern tables, nametables and the palette as PNGs into this directory
    #[arg(long, value_name = "DIR")]
    pub dump_debug: Option<PathBuf>,

    /// Log level or filter directives (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log every executed instruction
    #[arg(long)]
    pub trace_cpu: bool,

    /// Buttons held on controller 1 for the whole run
    #[arg(long, value_enum, num_args = 1..)]
    pub hold: Vec<HeldButton>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeldButton {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl From<HeldButton> for Button {
    fn from(button: HeldButton) -> Self {
        match button {
            HeldButton::A => Button::A,
            HeldButton::B => Button::B,
            HeldButton::Select => Button::Select,
            HeldButton::Start => Button::Start,
            HeldButton::Up => Button::Up,
            HeldButton::Down => Button::Down,
            HeldButton::Left => Button::Left,
            HeldButton::Right => Button::Right,
        }
    }
}
