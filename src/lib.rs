//! splinetrace: an interpolated spline between two control segments.
//!
//! Two fixed segments A→B and B→C are sampled at the same percentage,
//! and the segment joining those samples is the spline. A distance in
//! [0, 100] moves it from A→B to B→C, optionally leaving a trace of
//! past splines or points behind.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod simulation;
pub mod spline;
pub mod state;
pub mod trace;
pub mod widget;

pub use config::{Cli, Config};
pub use error::ConfigError;
pub use simulation::Simulation;
pub use state::{InputEvent, SimulationState};
pub use trace::TraceMode;
