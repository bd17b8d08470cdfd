//! Terminal falling-block game (default binary).
//!
//! Reads its configuration from the environment, runs one session in the
//! alternate screen and prints the final totals to stderr once the terminal
//! has been restored.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::GameConfig;
use blockfall::core::{GameSnapshot, Session};
use blockfall::input::{handle_key_in_state, should_quit};
use blockfall::journal::{Journal, JournalRecord};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, FRAME_MS};

type FileJournal = Journal<BufWriter<File>>;

fn main() -> Result<()> {
    let config = GameConfig::from_env();

    let journal = match &config.event_log {
        Some(path) => Journal::open(path).unwrap_or_else(|err| {
            eprintln!("[blockfall] event journal disabled: {err:#}");
            Journal::disabled()
        }),
        None => Journal::disabled(),
    };

    let mut session = Session::new(config.session_config(), config.shape_source());
    let mut events = EventLog::new(journal);
    events.record(&JournalRecord::Start {
        seed: config.seed,
        fall_interval_ms: session.fall_interval_ms(),
    });

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut events);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    eprintln!(
        "[blockfall] score {} lines {}",
        session.score(),
        session.lines_cleared()
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session, events: &mut EventLog) -> Result<()> {
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_in_state(key, session.game_over()) {
                        apply(session, events, action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            let (dt_ms, consumed) = whole_millis(elapsed);
            last_tick += consumed;
            session.tick(dt_ms);
        }

        events.observe(session);
    }
}

/// Split elapsed time into the whole milliseconds handed to the session and
/// the exact duration they account for; the fraction stays on the clock.
fn whole_millis(elapsed: Duration) -> (u32, Duration) {
    let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
    (ms, Duration::from_millis(u64::from(ms)))
}

fn apply(session: &mut Session, events: &mut EventLog, action: GameAction) {
    if action == GameAction::Restart {
        events.observe(session);
        events.record(&JournalRecord::restart(session));
    }
    session.apply_action(action);
}

/// Turns session state changes into journal records.
struct EventLog {
    journal: FileJournal,
    was_over: bool,
}

impl EventLog {
    fn new(journal: FileJournal) -> Self {
        Self {
            journal,
            was_over: false,
        }
    }

    fn record(&mut self, record: &JournalRecord) {
        self.journal.record(record);
    }

    fn observe(&mut self, session: &mut Session) {
        for event in session.drain_events() {
            self.journal.record(&JournalRecord::lock(&event));
        }
        let over = session.game_over();
        if over && !self.was_over {
            self.journal.record(&JournalRecord::game_over(session));
        }
        self.was_over = over;
    }
}
