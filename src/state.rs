use crate::geometry::{point_at, Point, Segment};
use crate::spline::Scene;
use crate::trace::{TraceMode, TraceRecorder};

pub const MIN_DISTANCE: f64 = 0.0;
pub const MAX_DISTANCE: f64 = 100.0;
pub const MIN_STEP_SIZE: u32 = 1;
pub const MAX_STEP_SIZE: u32 = 100;

/// Logical input actions understood by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    DecreaseDistance,
    IncreaseDistance,
    ReleaseDistance,
    StepSizeUp,
    StepSizeDown,
    ToggleTrace,
}

/// Simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Percentage along both control segments, in [0, 100]
    distance: f64,
    /// Change to apply on the next tick
    pending_delta: f64,
    /// Distance change per key press, in [1, 100]
    step_size: u32,
    trace_mode: TraceMode,
    trace: TraceRecorder,
    /// Spline derived from the current distance
    current_spline: Segment,
}

impl SimulationState {
    pub fn new(scene: &Scene, step_size: u32, trace_mode: TraceMode) -> Self {
        SimulationState {
            distance: MIN_DISTANCE,
            pending_delta: 0.0,
            step_size: step_size.clamp(MIN_STEP_SIZE, MAX_STEP_SIZE),
            trace_mode,
            trace: TraceRecorder::new(),
            current_spline: scene.spline_at(MIN_DISTANCE),
        }
    }

    /// Applies a single input action
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::DecreaseDistance => self.pending_delta = -f64::from(self.step_size),
            InputEvent::IncreaseDistance => self.pending_delta = f64::from(self.step_size),
            InputEvent::ReleaseDistance => self.pending_delta = 0.0,
            InputEvent::StepSizeUp => self.set_step_size(self.step_size.saturating_add(1)),
            InputEvent::StepSizeDown => self.set_step_size(self.step_size.saturating_sub(1)),
            InputEvent::ToggleTrace => {
                self.trace_mode = self.trace_mode.next();
                self.trace.clear();
                log::debug!("trace mode -> {}", self.trace_mode);
            }
        }
    }

    fn set_step_size(&mut self, step_size: u32) {
        let clamped = step_size.clamp(MIN_STEP_SIZE, MAX_STEP_SIZE);
        if clamped != self.step_size {
            log::debug!("step size {} -> {}", self.step_size, clamped);
        }
        self.step_size = clamped;
    }

    /// Advances the simulation by one step.
    ///
    /// The pending delta is consumed every tick, so continuous motion needs
    /// the delta to be re-asserted before each one.
    pub fn tick(&mut self, scene: &Scene) {
        let previous_distance = self.distance;
        let target = self.distance + self.pending_delta;
        self.distance = target.clamp(MIN_DISTANCE, MAX_DISTANCE);
        if self.distance != target {
            log::debug!("distance clamped from {} to {}", target, self.distance);
        }

        if self.pending_delta != 0.0 {
            self.trace
                .record_if_enabled(self.trace_mode, &self.current_spline, previous_distance);
            self.current_spline = scene.spline_at(self.distance);
            log::trace!("distance {} -> {}", previous_distance, self.distance);
        }

        self.pending_delta = 0.0;
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn pending_delta(&self) -> f64 {
        self.pending_delta
    }

    pub fn step_size(&self) -> u32 {
        self.step_size
    }

    pub fn trace_mode(&self) -> TraceMode {
        self.trace_mode
    }

    pub fn current_spline(&self) -> &Segment {
        &self.current_spline
    }

    pub fn trace_segments(&self) -> &[Segment] {
        self.trace.segments()
    }

    pub fn trace_points(&self) -> &[Point] {
        self.trace.points()
    }

    /// The point on the current spline at the current distance
    pub fn probe(&self) -> Point {
        point_at(&self.current_spline, self.distance)
    }
}
