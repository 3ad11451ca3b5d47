use crate::geometry::{LabeledPoint, Point};
use crate::graphics::Canvas;
use crate::simulation::Simulation;
use crate::state::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color;
use std::time::Instant;

const ORANGE: Color = Color::Rgb {
    r: 255,
    g: 165,
    b: 0,
};
const HELP: &str = "←/→ move  ↑/↓ step  space trace  d debug  q quit";

/// What a key press asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Input(InputEvent),
    ToggleDebug,
    Quit,
    Ignore,
}

/// Maps a terminal key event to an action. Unknown keys are ignored.
pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                KeyAction::Input(InputEvent::ReleaseDistance)
            }
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Input(InputEvent::DecreaseDistance),
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Input(InputEvent::IncreaseDistance),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Input(InputEvent::StepSizeUp),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Input(InputEvent::StepSizeDown),
        KeyCode::Char(' ') => KeyAction::Input(InputEvent::ToggleTrace),
        KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::ToggleDebug,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Spline view widget
pub struct SplineWidget {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    /// Show the debug overlay
    debug: bool,
}

impl SplineWidget {
    pub fn new(debug: bool) -> Self {
        SplineWidget {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            debug,
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Paint the current simulation state into `canvas`
    pub fn paint(&mut self, canvas: &mut Canvas, sim: &Simulation) {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let scene = sim.scene();
        let state = sim.state();
        canvas.clear();

        // Control segments
        canvas.draw_segment(&scene.ab, '#', Color::White);
        canvas.draw_segment(&scene.bc, '#', Color::White);

        // Trace history
        for segment in state.trace_segments() {
            canvas.draw_segment(segment, '.', Color::Grey);
        }
        for point in state.trace_points() {
            canvas.draw_marker(*point, '*', Color::White);
        }

        for anchor in &scene.points {
            draw_anchor(canvas, anchor);
        }

        // Spline with its start/end markers and the probe point
        let spline = state.current_spline();
        canvas.draw_segment(spline, '=', ORANGE);
        draw_labeled(canvas, spline.origin(), 'o', Color::Blue, "S");
        draw_labeled(canvas, spline.endpoint(), 'o', Color::Blue, "E");
        draw_labeled(canvas, state.probe(), '@', Color::Magenta, "P");

        // HUD
        canvas.draw_text_right(1, &format!("Step Size: {}", state.step_size()), 2, Color::White);
        canvas.draw_text_right(2, &format!("Trace: {}", state.trace_mode()), 2, Color::White);
        canvas.draw_text(1, canvas.height() as isize - 1, HELP, Color::DarkGrey);

        if self.debug {
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("Distance: {:.2}", state.distance()),
                format!("Ticks: {}", sim.ticks()),
                format!("FPS: {:.2}", self.fps),
            ];
            for (row, line) in lines.iter().enumerate() {
                canvas.draw_text(1, row as isize + 1, line, Color::Green);
            }
        }
    }
}

fn draw_anchor(canvas: &mut Canvas, anchor: &LabeledPoint) {
    let mut label = [0u8; 4];
    draw_labeled(
        canvas,
        anchor.point(),
        'O',
        Color::Red,
        anchor.label.encode_utf8(&mut label),
    );
}

/// Draws a marker with its label up and to the left
fn draw_labeled(canvas: &mut Canvas, point: Point, glyph: char, color: Color, label: &str) {
    canvas.draw_marker(point, glyph, color);
    let x = point.x.round() as isize - 1;
    let y = point.y.round() as isize - 1;
    canvas.draw_text(x, y, label, Color::White);
}
