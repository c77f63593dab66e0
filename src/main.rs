//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `dropstack::term`. Logs go to a file because the terminal is in raw mode
//! on the alternate screen for the whole session.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, info, warn};

use dropstack::config::AppConfig;
use dropstack::core::{GameEvent, GameSnapshot, GameState};
use dropstack::input::{
    handle_key_event, is_soft_drop_key, should_quit, ReleaseEvents, SoftDropHold,
};
use dropstack::report::{PlayerIdStore, ReportConfig, ScoreReport, ScoreReporter};
use dropstack::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use dropstack::types::{GameAction, TICK_MS};

/// How long quitting waits for a pending score submission.
const SUBMIT_GRACE: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!("Starting dropstack (seed {})", config.seed);

    let mut reporting = Reporting::from_config(&config.report);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &config, &mut reporting);
    // Always try to restore terminal state.
    let _ = term.exit();

    reporting.finish();
    if let Err(e) = &result {
        error!("Exited with error: {e:#}");
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_path)
        .with_context(|| format!("creating log file {}", config.log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

/// Player id plus reporter; either may be missing and the game still runs.
struct Reporting {
    player_id: Option<String>,
    reporter: Option<ScoreReporter>,
}

impl Reporting {
    fn from_config(config: &ReportConfig) -> Self {
        if config.disabled {
            info!("Score submission disabled via DROPSTACK_SCORE_DISABLED");
            return Self {
                player_id: None,
                reporter: None,
            };
        }

        let store = match &config.data_dir {
            Some(dir) => Ok(PlayerIdStore::new(dir)),
            None => PlayerIdStore::from_default_dir(),
        };
        let player_id = match store.and_then(|s| s.get_or_create()) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("No player id, scores will not be submitted: {e}");
                None
            }
        };

        let reporter = match ScoreReporter::start(&config.score_url) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Score reporter unavailable: {e}");
                None
            }
        };

        Self {
            player_id,
            reporter,
        }
    }

    fn submit(&mut self, score: u32) {
        if let (Some(id), Some(reporter)) = (&self.player_id, self.reporter.as_mut()) {
            reporter.submit(ScoreReport::new(id.clone(), score));
        }
    }

    fn finish(&mut self) {
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.flush(SUBMIT_GRACE);
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, reporting: &mut Reporting) -> Result<()> {
    let mut game = GameState::new(config.seed);
    game.start();

    let view = GameView::default();
    let releases = if term.reports_key_release() {
        ReleaseEvents::Reported
    } else {
        ReleaseEvents::Inferred
    };
    info!("Soft drop key releases: {:?}", releases);
    let mut soft_drop = SoftDropHold::new(releases);
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("Quit requested");
                        return Ok(());
                    }
                    match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if is_soft_drop_key(key.code) {
                                if game.playable() {
                                    if let Some(action) = soft_drop.press() {
                                        game.apply_action(action);
                                    }
                                }
                            } else if key.kind == KeyEventKind::Press {
                                if let Some(action) = handle_key_event(key) {
                                    if matches!(action, GameAction::Pause | GameAction::Restart) {
                                        soft_drop.reset();
                                    }
                                    game.apply_action(action);
                                }
                            }
                        }
                        KeyEventKind::Release => {
                            if is_soft_drop_key(key.code) {
                                if let Some(action) = soft_drop.release() {
                                    game.apply_action(action);
                                }
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            let held = soft_drop.update(elapsed_ms);
            game.tick(elapsed_ms, held);
        }

        for event in game.drain_events() {
            if let GameEvent::GameOver { score } = event {
                soft_drop.reset();
                reporting.submit(score);
            }
        }
    }
}
