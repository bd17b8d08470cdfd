//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the simulation
//! core, the terminal view and the event journal can all share them.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn origin**: (3, 0), the top-left corner of the 5x5 shape mask
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Driver frame cadence (~60 FPS) |
//! | `INITIAL_FALL_INTERVAL_MS` | 500 | Gravity interval for a fresh session |
//! | `FALL_INTERVAL_STEP_MS` | 10 | Speed-up applied on every clearing lock |
//! | `MIN_FALL_INTERVAL_MS` | 50 | Floor for the gravity interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(PieceKind::from_index(2), Some(piece));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Field height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of every rotation mask
pub const MASK_SIZE: usize = 5;

/// Number of set cells in every rotation mask
pub const PIECE_CELLS: usize = 4;

/// Spawn origin x: the mask's left edge, centered on the field
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn origin y
pub const SPAWN_Y: i8 = 0;

/// Driver frame cadence in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval for a fresh session
pub const INITIAL_FALL_INTERVAL_MS: u32 = 500;

/// Gravity speed-up applied after every lock that clears at least one row
pub const FALL_INTERVAL_STEP_MS: u32 = 10;

/// The gravity interval never drops below this
pub const MIN_FALL_INTERVAL_MS: u32 = 50;

/// Base points per cleared row; the full law is `n * LINE_CLEAR_BASE * (n + 1)`
pub const LINE_CLEAR_BASE: u32 = 100;


/// 24-bit RGB color of a locked cell or a falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const PURPLE: Color = Color::new(128, 0, 128);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    /// Filler color for cells not produced by a piece (scenario setup)
    pub const GRAY: Color = Color::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven piece kinds
///
/// Declaration order is the shape selector order (0-6). Each kind has a
/// fixed color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in selector order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Map a selector value in `0..7` to a kind
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Position of this kind in selector order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Color written into the field when a piece of this kind locks
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::CYAN,
            PieceKind::O => Color::YELLOW,
            PieceKind::T => Color::PURPLE,
            PieceKind::S => Color::GREEN,
            PieceKind::Z => Color::RED,
            PieceKind::J => Color::BLUE,
            PieceKind::L => Color::ORANGE,
        }
    }
}

/// Discrete commands accepted by a session
///
/// Used by keyboard input and by scripted drivers alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// One gravity step; locks the piece if it cannot descend
    SoftDrop,
    /// Gravity steps until the piece locks
    HardDrop,
    /// Advance to the next rotation state (no wall kicks)
    Rotate,
    /// Replace the session with a fresh one
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Restart => "restart",
        }
    }
}

/// Result of a gravity step or drop command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row and is still falling
    Falling,
    /// The piece could not descend and was locked into the field
    Locked,
    /// The session is over; nothing happened
    Ignored,
}

/// Event emitted after a piece locks.
///
/// Queued by the session until an observer (such as the event journal)
/// drains it; every lock produces exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Session score after this lock was scored
    pub score: u32,
    /// Session line total after this lock was scored
    pub lines: u32,
    /// Gravity interval after this lock was scored
    pub fall_interval_ms: u32,
    /// The next piece collided at spawn and ended the session
    pub block_out: bool,
}

/// A cell on the play field
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell locked with the given color
pub type Cell = Option<Color>;
