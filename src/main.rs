use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, ClearType},
};
use splinetrace::graphics::Canvas;
use splinetrace::simulation::{FixedClock, Inbox};
use splinetrace::spline::Scene;
use splinetrace::widget::{map_key, KeyAction, SplineWidget};
use splinetrace::{Cli, Config, Simulation, SimulationState};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Puts the terminal into raw alternate-screen mode and restores it on drop
struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        // Key release events are only reported with the kitty protocol
        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard { enhanced };
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::debug!("terminal ready (key release events: {})", enhanced);
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Viewport size as (columns, rows)
fn detect_viewport() -> Option<(u16, u16)> {
    termsize::get()
        .map(|size| (size.cols, size.rows))
        .or_else(|| terminal::size().ok())
}

/// Runs the simulation until the user quits, returning the number of ticks run
fn run(config: &Config) -> anyhow::Result<u64> {
    let scene = Scene::from_viewport(f64::from(config.width), f64::from(config.height));
    let [a, b, c] = scene.points;
    log::info!(
        "scene A=({}, {}) B=({}, {}) C=({}, {})",
        a.x,
        a.y,
        b.x,
        b.y,
        c.x,
        c.y
    );

    let state = SimulationState::new(&scene, config.step_size, config.trace);
    let mut sim = Simulation::new(
        scene,
        state,
        Inbox::with_capacity(config.inbox_capacity),
        FixedClock::from_rate(config.tick_rate),
    );
    let mut widget = SplineWidget::new(false);
    let mut canvas = Canvas::new(usize::from(config.width), usize::from(config.height));
    let frame_period = Duration::from_secs(1) / config.frame_rate;

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout).context("failed to set up the terminal")?;

    let mut last_tick = Instant::now();
    let mut next_frame = last_tick;
    loop {
        let now = Instant::now();
        let timeout = sim
            .until_next_tick()
            .min(next_frame.saturating_duration_since(now));

        if event::poll(timeout).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => match map_key(&key) {
                    KeyAction::Input(input) => {
                        sim.push_input(input);
                    }
                    KeyAction::ToggleDebug => widget.toggle_debug(),
                    KeyAction::Quit => break,
                    KeyAction::Ignore => {}
                },
                Event::Resize(cols, rows) => {
                    log::debug!("terminal resized to {}x{}", cols, rows);
                    canvas.resize(usize::from(cols), usize::from(rows));
                    execute!(stdout, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        sim.advance(now.duration_since(last_tick));
        last_tick = now;

        if now >= next_frame {
            widget.paint(&mut canvas, &sim);
            canvas
                .present(&mut stdout)
                .context("failed to draw frame")?;
            next_frame = now + frame_period;
        }
    }

    Ok(sim.ticks())
}

/// Main function
fn main() -> anyhow::Result<()> {
    // Logging is off unless RUST_LOG is set; redirect stderr to keep the screen clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli, detect_viewport()).context("invalid options")?;
    log::info!(
        "{} v{} starting: {:?}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config
    );

    let ticks = run(&config)?;
    log::info!("exiting after {} ticks", ticks);
    Ok(())
}
