use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{cursor, event, terminal, ExecutableCommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use invaders::audio::{AudioSink, TerminalAudio};
use invaders::config::{read_env_flag, read_env_optional_u64, GAME_OVER_DELAY};
use invaders::display::TerminalCanvas;
use invaders::input::{ChannelInput, InputSource};
use invaders::render::{render_frame, render_game_over, Canvas};
use invaders::{GameConfig, Session, SessionStatus};

// ── Logging ───────────────────────────────────────────────────────────────────

fn log_path() -> PathBuf {
    std::env::var_os("INVADERS_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("invaders.log"))
}

/// The terminal belongs to the renderer, so logs go to a file.
fn init_logging() -> Result<()> {
    let path = log_path();
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Block until the session is resumed.  Only the resume key is honoured;
/// nothing advances in the meantime.
fn wait_for_resume(
    session: &mut Session,
    input: &mut impl InputSource,
    rng: &mut StdRng,
    audio: &mut impl AudioSink,
) {
    let frame = session.config.frame_duration();
    while session.status == SessionStatus::Paused {
        let events = input.poll();
        session.tick(&events, rng, audio);
        thread::sleep(frame);
    }
}

/// One iteration per frame: poll input, tick, render, then sleep off the
/// rest of the frame.  Returns once the session is over.
fn game_loop(
    canvas: &mut impl Canvas,
    session: &mut Session,
    input: &mut impl InputSource,
    rng: &mut StdRng,
    audio: &mut impl AudioSink,
) -> std::io::Result<()> {
    let frame = session.config.frame_duration();

    loop {
        let frame_start = Instant::now();

        let events = input.poll();
        session.tick(&events, rng, audio);
        render_frame(session, canvas)?;

        if session.is_over() {
            return Ok(());
        }
        if session.status == SessionStatus::Paused {
            wait_for_resume(session, input, rng, audio);
            continue;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

fn run<W: Write>(out: &mut W, rx: mpsc::Receiver<event::Event>) -> Result<()> {
    let config = GameConfig::default();
    config.validate().context("invalid game configuration")?;

    let seed = read_env_optional_u64("INVADERS_SEED");
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut audio = TerminalAudio::new(stdout(), read_env_flag("INVADERS_BELL"));
    let mut input = ChannelInput::new(rx);

    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let mut canvas = TerminalCanvas::new(out, cols, rows, config.display_width, config.display_height);

    let mut session = Session::new(config);
    tracing::info!(?seed, cols, rows, "starting game");

    game_loop(&mut canvas, &mut session, &mut input, &mut rng, &mut audio)?;

    render_game_over(&session, &mut canvas)?;
    thread::sleep(GAME_OVER_DELAY);

    tracing::info!(
        score = session.player.score,
        lives = session.player.lives,
        status = ?session.status,
        "session finished"
    );
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("Invaders!"))?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<event::Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}
