use crate::error::ConfigError;
use crate::state::{MAX_STEP_SIZE, MIN_STEP_SIZE};
use crate::trace::TraceMode;
use clap::Parser;

pub const MAX_RATE_HZ: u32 = 1000;
pub const MIN_WIDTH: u16 = 8;
pub const MIN_HEIGHT: u16 = 6;

#[derive(Parser, Debug)]
#[command(
    name = "splinetrace",
    version,
    about = "Interpolated spline between two control segments"
)]
pub struct Cli {
    /// Initial distance change per key press
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(MIN_STEP_SIZE as i64..=MAX_STEP_SIZE as i64)
    )]
    pub step_size: u32,

    /// Initial trace mode
    #[arg(short, long, value_enum, default_value_t = TraceMode::None)]
    pub trace: TraceMode,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 100)]
    pub tick_rate: u32,

    /// Frames drawn per second
    #[arg(long, default_value_t = 60)]
    pub frame_rate: u32,

    /// Maximum number of key actions queued between ticks
    #[arg(long, default_value_t = 64)]
    pub inbox_capacity: usize,

    /// Viewport width in columns (detected if omitted)
    #[arg(long)]
    pub width: Option<u16>,

    /// Viewport height in rows (detected if omitted)
    #[arg(long)]
    pub height: Option<u16>,
}

/// Validated startup options
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub step_size: u32,
    pub trace: TraceMode,
    pub tick_rate: u32,
    pub frame_rate: u32,
    pub inbox_capacity: usize,
    pub width: u16,
    pub height: u16,
}

impl Config {
    /// Checks the CLI options, filling the viewport from `detected` (cols, rows)
    pub fn from_cli(cli: &Cli, detected: Option<(u16, u16)>) -> Result<Self, ConfigError> {
        check_rate("tick rate", cli.tick_rate)?;
        check_rate("frame rate", cli.frame_rate)?;
        if cli.inbox_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let (width, height) = match (cli.width, cli.height, detected) {
            (Some(w), Some(h), _) => (w, h),
            (w, h, Some((cols, rows))) => (w.unwrap_or(cols), h.unwrap_or(rows)),
            (_, _, None) => return Err(ConfigError::NoViewport),
        };
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(ConfigError::ViewportTooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        Ok(Config {
            step_size: cli.step_size,
            trace: cli.trace,
            tick_rate: cli.tick_rate,
            frame_rate: cli.frame_rate,
            inbox_capacity: cli.inbox_capacity,
            width,
            height,
        })
    }
}

fn check_rate(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 || value > MAX_RATE_HZ {
        return Err(ConfigError::InvalidRate {
            name,
            value,
            max: MAX_RATE_HZ,
        });
    }
    Ok(())
}
