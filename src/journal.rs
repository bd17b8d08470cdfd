//! Optional JSON-lines journal of session events.
//!
//! One JSON object per line, tagged by `event`:
//!
//! ```text
//! {"event":"start","seed":42,"fall_interval_ms":500}
//! {"event":"lock","piece":"i","lines_cleared":1,"line_clear_score":200,
//!  "score":200,"lines":1,"fall_interval_ms":490}
//! {"event":"game_over","score":200,"lines":1}
//! ```
//!
//! A failed write disables the journal; the game keeps running.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::Session;
use crate::types::LockEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JournalRecord {
    Start {
        seed: u32,
        fall_interval_ms: u32,
    },
    Lock {
        piece: &'static str,
        lines_cleared: u32,
        line_clear_score: u32,
        score: u32,
        lines: u32,
        fall_interval_ms: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
    },
    Restart {
        score: u32,
        lines: u32,
    },
}

impl JournalRecord {
    /// Lock record with the session totals as of that lock.
    pub fn lock(event: &LockEvent) -> Self {
        Self::Lock {
            piece: event.kind.as_str(),
            lines_cleared: event.lines_cleared,
            line_clear_score: event.line_clear_score,
            score: event.score,
            lines: event.lines,
            fall_interval_ms: event.fall_interval_ms,
        }
    }

    pub fn game_over(session: &Session) -> Self {
        Self::GameOver {
            score: session.score(),
            lines: session.lines_cleared(),
        }
    }

    /// Totals of the play-through being abandoned.
    pub fn restart(session: &Session) -> Self {
        Self::Restart {
            score: session.score(),
            lines: session.lines_cleared(),
        }
    }
}

pub struct Journal<W: Write> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl Journal<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    /// A journal that drops every record.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, record: &JournalRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }

    /// Give back the writer, if it is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}
