use crate::spline::Scene;
use crate::state::{InputEvent, SimulationState};
use std::collections::VecDeque;
use std::time::Duration;

/// Most ticks run for one call to [`FixedClock::advance`]
const MAX_CATCH_UP: u32 = 8;

/// Fixed-rate tick source, decoupled from the frame rate
#[derive(Debug, Clone)]
pub struct FixedClock {
    period: Duration,
    accumulator: Duration,
}

impl FixedClock {
    pub fn new(period: Duration) -> Self {
        FixedClock {
            period,
            accumulator: Duration::ZERO,
        }
    }

    pub fn from_rate(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` and returns the number of whole periods now due.
    ///
    /// Any backlog beyond the catch-up limit is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.period && due < MAX_CATCH_UP {
            self.accumulator -= self.period;
            due += 1;
        }
        if self.accumulator >= self.period {
            log::debug!("dropping {:?} of tick backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }
}

/// Bounded FIFO of input actions waiting for the next tick
#[derive(Debug, Clone)]
pub struct Inbox {
    events: VecDeque<InputEvent>,
    capacity: usize,
}

impl Inbox {
    pub fn with_capacity(capacity: usize) -> Self {
        Inbox {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queues an event. Returns false and drops it if the inbox is full.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.events.len() >= self.capacity {
            log::warn!("input inbox full ({}), dropping {:?}", self.capacity, event);
            return false;
        }
        self.events.push_back(event);
        true
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Owns the scene, the state and the pending inputs
#[derive(Debug, Clone)]
pub struct Simulation {
    scene: Scene,
    state: SimulationState,
    inbox: Inbox,
    clock: FixedClock,
    ticks: u64,
}

impl Simulation {
    pub fn new(scene: Scene, state: SimulationState, inbox: Inbox, clock: FixedClock) -> Self {
        Simulation {
            scene,
            state,
            inbox,
            clock,
            ticks: 0,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.inbox.push(event)
    }

    /// Applies queued inputs in arrival order, then runs one state tick
    pub fn tick(&mut self) {
        for event in self.inbox.drain() {
            self.state.handle_input(event);
        }
        self.state.tick(&self.scene);
        self.ticks += 1;
    }

    /// Runs every tick that fell due during `elapsed` and returns how many ran
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    pub fn until_next_tick(&self) -> Duration {
        self.clock.until_next()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending_inputs(&self) -> usize {
        self.inbox.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceMode;
    use approx::assert_relative_eq;

    fn simulation(step_size: u32, capacity: usize) -> Simulation {
        let scene = Scene::from_viewport(100.0, 50.0);
        let state = SimulationState::new(&scene, step_size, TraceMode::None);
        Simulation::new(
            scene,
            state,
            Inbox::with_capacity(capacity),
            FixedClock::from_rate(100),
        )
    }

    #[test]
    fn test_clock_counts_whole_periods() {
        let mut clock = FixedClock::from_rate(100);
        assert_eq!(clock.period(), Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(7)), 1);
        assert_eq!(clock.until_next(), Duration::from_millis(9));
        assert_eq!(clock.advance(Duration::from_millis(29)), 3);
    }

    #[test]
    fn test_clock_caps_catch_up() {
        let mut clock = FixedClock::from_rate(100);
        assert_eq!(clock.advance(Duration::from_secs(5)), MAX_CATCH_UP);
        assert_eq!(clock.advance(Duration::from_millis(5)), 0);
    }

    #[test]
    fn test_inbox_is_bounded() {
        let mut inbox = Inbox::with_capacity(2);
        assert!(inbox.push(InputEvent::StepSizeUp));
        assert!(inbox.push(InputEvent::StepSizeDown));
        assert!(!inbox.push(InputEvent::ToggleTrace));
        assert_eq!(inbox.len(), 2);
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(drained, vec![InputEvent::StepSizeUp, InputEvent::StepSizeDown]);
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_tick_applies_inputs_in_order() {
        let mut sim = simulation(4, 8);
        sim.push_input(InputEvent::IncreaseDistance);
        sim.push_input(InputEvent::ReleaseDistance);
        sim.tick();
        assert_eq!(sim.state().distance(), 0.0);

        sim.push_input(InputEvent::ReleaseDistance);
        sim.push_input(InputEvent::IncreaseDistance);
        sim.tick();
        assert_relative_eq!(sim.state().distance(), 4.0);
        assert_eq!(sim.pending_inputs(), 0);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut sim = simulation(5, 8);
        sim.push_input(InputEvent::IncreaseDistance);
        assert_eq!(sim.advance(Duration::from_millis(35)), 3);
        assert_relative_eq!(sim.state().distance(), 5.0);
        assert_eq!(sim.ticks(), 3);
        assert_eq!(*sim.state().current_spline(), sim.scene().spline_at(5.0));
    }

    #[test]
    fn test_inputs_wait_for_tick() {
        let mut sim = simulation(5, 8);
        sim.push_input(InputEvent::ToggleTrace);
        assert_eq!(sim.advance(Duration::from_millis(2)), 0);
        assert_eq!(sim.state().trace_mode(), TraceMode::None);
        sim.advance(Duration::from_millis(8));
        assert_eq!(sim.state().trace_mode(), TraceMode::Point);
    }
}
