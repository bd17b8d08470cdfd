//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O), so layout is unit-tested directly.

use crate::core::{GameSnapshot, PieceSnapshot, FIELD_COLS, FIELD_ROWS};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Color, MASK_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const WELL_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BORDER: Style = Style::new(Rgb::new(255, 255, 255), PANEL_BG);
const GRID_DOT: Style = Style::new(Rgb::new(70, 70, 80), WELL_BG).dim();
const LABEL: Style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
const HINT: Style = Style::new(Rgb::new(128, 128, 128), PANEL_BG);
const GAME_OVER: Style = Style::new(Rgb::new(255, 0, 0), PANEL_BG).bold();

const CONTROLS: [&str; 6] = [
    "A/D - Move left/right",
    "S - Soft drop",
    "W - Rotate",
    "SPACE - Hard drop",
    "R - Restart",
    "Q - Quit",
];

/// Lays out the field, the side panel and the game-over overlay.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Size of the bordered well, in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            FIELD_COLS as u16 * self.cell_w + 2,
            FIELD_ROWS as u16 + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let panel_w = panel_width(self.cell_w);
        let total_w = frame_w + panel_w;
        let origin_x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i8, y as i8);
                match cell {
                    Some(color) => self.draw_block(fb, origin_x, origin_y, x, y, *color),
                    None => self.fill_cell(fb, origin_x, origin_y, x, y, '·', GRID_DOT),
                }
            }
        }

        if let Some(ghost_y) = snap.ghost_y {
            let ghost = PieceSnapshot { y: ghost_y, ..snap.current };
            let style = Style::new(Rgb::from(snap.current.color), WELL_BG).dim();
            for (x, y) in piece_cells(&ghost) {
                self.fill_cell(fb, origin_x, origin_y, x, y, '░', style);
            }
        }

        for (x, y) in piece_cells(&snap.current) {
            self.draw_block(fb, origin_x, origin_y, x, y, snap.current.color);
        }

        let panel_x = origin_x + frame_w + 2;
        if panel_x < viewport.width {
            self.draw_panel(fb, snap, panel_x, origin_y);
        }

        if snap.game_over {
            let mid = origin_y + frame_h / 2;
            center_text(fb, origin_x, frame_w, mid, "GAME OVER", GAME_OVER);
            center_text(fb, origin_x, frame_w, mid + 2, "Press R to restart", LABEL);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, x: i8, y: i8, color: Color) {
        let style = Style::new(Rgb::from(color), WELL_BG).bold();
        self.fill_cell(fb, ox, oy, x, y, '█', style);
    }

    /// Cells outside the field (e.g. above it while spawning) are skipped.
    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        ox: u16,
        oy: u16,
        x: i8,
        y: i8,
        ch: char,
        style: Style,
    ) {
        if x < 0 || y < 0 || x as usize >= FIELD_COLS || y as usize >= FIELD_ROWS {
            return;
        }
        let px = ox + 1 + x as u16 * self.cell_w;
        let py = oy + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16) {
        let mut y = top;
        fb.put_str(x, y, "NEXT", LABEL);
        y += 1;
        let mask = snap.next.mask();
        let style = Style::new(Rgb::from(snap.next.color), PANEL_BG).bold();
        for row in mask.iter() {
            for (col, &set) in row.iter().enumerate() {
                if set {
                    fb.fill_rect(x + col as u16 * self.cell_w, y, self.cell_w, 1, '█', style);
                }
            }
            y += 1;
        }
        y += 1;

        for (label, value) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("SPEED ms", snap.fall_interval_ms),
        ] {
            fb.put_str(x, y, label, LABEL);
            fb.put_u32(x, y + 1, value, VALUE);
            y += 3;
        }

        fb.put_str(x, y, "Controls:", LABEL);
        for line in CONTROLS {
            y += 1;
            fb.put_str(x, y, line, HINT);
        }
    }
}

fn panel_width(cell_w: u16) -> u16 {
    let widest = CONTROLS.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u16;
    2 + widest.max(MASK_SIZE as u16 * cell_w)
}

fn piece_cells(piece: &PieceSnapshot) -> impl Iterator<Item = (i8, i8)> + '_ {
    piece.mask().iter().enumerate().flat_map(move |(row, cols)| {
        cols.iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(col, _)| (piece.x + col as i8, piece.y + row as i8))
    })
}

fn center_text(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    let start = x + w.saturating_sub(len) / 2;
    fb.put_str(start, y, text, style);
}
