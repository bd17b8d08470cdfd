use crate::field::{FieldGrid, FIELD_COLS, FIELD_ROWS};
use crate::piece::ActivePiece;
use crate::shapes::{rotation_mask, Mask};
use crate::types::{Color, PieceKind, INITIAL_FALL_INTERVAL_MS, SPAWN_X, SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl PieceSnapshot {
    /// Resolved occupancy mask for this rotation state
    pub fn mask(&self) -> &'static Mask {
        rotation_mask(self.kind, self.rotation as usize)
    }
}

impl From<ActivePiece> for PieceSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color,
        }
    }
}

impl Default for PieceSnapshot {
    fn default() -> Self {
        Self {
            kind: PieceKind::I,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
            color: PieceKind::I.color(),
        }
    }
}

/// Read-only view of a session, handed to renderers and observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: FieldGrid,
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    /// Row the current piece would lock at; `None` once the game is over
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; FIELD_COLS]; FIELD_ROWS];
        self.current = PieceSnapshot::default();
        self.next = PieceSnapshot::default();
        self.ghost_y = None;
        self.score = 0;
        self.lines = 0;
        self.fall_interval_ms = INITIAL_FALL_INTERVAL_MS;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Number of locked cells on the board
    pub fn locked_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; FIELD_COLS]; FIELD_ROWS],
            current: PieceSnapshot::default(),
            next: PieceSnapshot::default(),
            ghost_y: None,
            score: 0,
            lines: 0,
            fall_interval_ms: 0,
            game_over: false,
        };
        s.clear();
        s
    }
}
