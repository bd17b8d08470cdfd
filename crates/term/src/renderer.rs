//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is written
//! in full; afterwards only runs of changed glyphs are emitted.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame flushed to the terminal; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything `enter` did. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush();
        terminal::disable_raw_mode()?;
        self.shown = None;
        flushed
    }

    /// Force the next `present` to redraw everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Flush `frame` and keep a copy to diff the next frame against.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.out.clear();
        match &mut self.shown {
            Some(shown) if shown.width() == frame.width() && shown.height() == frame.height() => {
                encode_diff_into(shown, frame, &mut self.out)?;
                shown.clone_from(frame);
            }
            slot => {
                encode_full_into(frame, &mut self.out)?;
                *slot = Some(frame.clone());
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full redraw of `frame` into `out`.
pub fn encode_full_into(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..frame.height() {
        pen.write_run(frame, 0, y, frame.width(), out)?;
    }
    pen.finish(out)
}

/// Encode only the glyphs of `next` that differ from `prev`.
///
/// Both frames must have the same dimensions; callers fall back to
/// [`encode_full_into`] otherwise.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in changed_runs(prev, next) {
        pen.write_run(next, x, y, len, out)?;
    }
    pen.finish(out)
}

/// Tracks the last style emitted so consecutive glyphs share escape codes.
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn write_run(
        &mut self,
        frame: &FrameBuffer,
        x: u16,
        y: u16,
        len: u16,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = frame.get(x + dx, y).unwrap_or_default();
            if self.style != Some(glyph.style) {
                set_style(out, glyph.style)?;
                self.style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn set_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(term_color(style.fg)))?;
    out.queue(SetBackgroundColor(term_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal horizontal runs `(x, y, len)` where the two frames differ.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let width = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x) {
                x += 1;
            }
            if x >= width {
                return None;
            }
            let start = x;
            while x < width && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}
