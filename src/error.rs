use thiserror::Error;

/// Errors raised while validating startup options.
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{name} must be between 1 and {max} Hz, got {value}")]
    InvalidRate {
        name: &'static str,
        value: u32,
        max: u32,
    },

    #[error("input inbox capacity must be at least 1")]
    ZeroCapacity,

    #[error("viewport {width}x{height} is too small (need at least {min_width}x{min_height})")]
    ViewportTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("could not detect the terminal size; pass --width and --height")]
    NoViewport,
}
