mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use backdrop_shooter::input::InputMapper;
use backdrop_shooter::scaling::{DeviceClass, Viewport};
use backdrop_shooter::{GameConfig, Simulation, Transition};

/// Arcade shooter that plays in the terminal as an animated backdrop.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file overriding the default tuning values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run; a random one is drawn otherwise.
    #[arg(long)]
    seed: Option<u64>,

    /// Treat the terminal as a touch device and show on-screen controls.
    #[arg(long)]
    touch: bool,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write tracing output here.  Logging is off without it, since stdout
    /// belongs to the game.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn viewport_for(cols: u16, rows: u16, device: DeviceClass) -> Result<Viewport> {
    let (width, height) = display::canvas_size(cols, rows);
    Viewport::new(width, height, device).context("terminal too small")
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let device = if args.touch { DeviceClass::Touch } else { DeviceClass::Pointer };
    info!(seed, fps = args.fps, ?device, "starting");

    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let mut sim = Simulation::new(
        config,
        viewport_for(cols, rows, device)?,
        StdRng::seed_from_u64(seed),
    )?;
    let frame = Duration::from_secs(1) / args.fps.max(1);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Key-release events where the terminal supports them; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &mut sim, device, frame);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        warn!(error = %err, "exited with error");
    }
    result
}

// ── Host loop ─────────────────────────────────────────────────────────────────

/// What the host should do after an input event.
enum Control {
    Continue,
    Quit,
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    sim: &mut Simulation<StdRng>,
    device: DeviceClass,
    frame_time: Duration,
) -> Result<()> {
    let mut input = InputMapper::new(sim.config().input.hold_window_ticks);
    let mut frame: u64 = 0;
    sim.start();

    'frames: loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            if let Control::Quit = handle_event(ev, sim, &mut input, device, frame) {
                break 'frames;
            }
        }

        let intents = input.intents(frame, sim.controls());
        if let Some(transition) = sim.step(&intents) {
            debug!(?transition, frame, "phase changed");
            // Keys still held from the last life must not leak into the next.
            if transition == Transition::Restarted {
                input.clear();
            }
        }

        if let Some(state) = sim.state() {
            display::render(out, state, sim.controls())?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    sim.stop();
    Ok(())
}

fn handle_event(
    ev: Event,
    sim: &mut Simulation<StdRng>,
    input: &mut InputMapper,
    device: DeviceClass,
    frame: u64,
) -> Control {
    match ev {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Control::Quit;
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Control::Quit;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if sim.is_game_over() => {
                        sim.restart();
                        input.clear();
                    }
                    _ => input.key_down(code, frame),
                }
            }
            KeyEventKind::Repeat => input.key_down(code, frame),
            KeyEventKind::Release => input.key_up(code),
        },
        Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                input.pointer_down(display::cell_center(column, row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                input.pointer_moved(display::cell_center(column, row));
            }
            MouseEventKind::Up(MouseButton::Left) => input.pointer_up(),
            _ => {}
        },
        Event::Resize(cols, rows) => {
            let (width, height) = display::canvas_size(cols, rows);
            if let Err(err) = sim.resize(width, height, device) {
                warn!(error = %err, cols, rows, "ignoring resize");
            }
        }
        _ => {}
    }
    Control::Continue
}
