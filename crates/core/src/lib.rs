//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: shapes, the falling piece, the
//! field, scoring and the session state machine. It has **zero dependencies**
//! on UI, terminal or I/O, making it:
//!
//! - **Deterministic**: an injected [`ShapeSource`] decides every piece, so
//!   scripted or seeded sources replay identically
//! - **Testable**: every rule is reachable from plain method calls
//! - **Portable**: any driver can call `tick`/commands at its own cadence
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven shapes and their 5x5 rotation masks
//! - [`piece`]: immutable active piece with translate/rotate transforms
//! - [`field`]: 10x20 field with collision, locking and row compaction
//! - [`rng`]: shape sources (seeded LCG, scripted sequence)
//! - [`scoring`]: line-clear points and gravity speed-up
//! - [`session`]: spawn, gravity, commands, scoring and game over
//! - [`snapshot`]: read-only copy of a session for renderers
//!
//! # Game Rules
//!
//! - **Uniform shapes**: every spawn draws one of the seven kinds uniformly
//! - **No wall kicks**: a rotation that collides is rejected as is
//! - **Gravity**: 500ms per row, 10ms faster after every clearing lock, floor 50ms
//! - **Scoring**: clearing `n` rows at once is worth `n * 100 * (n + 1)`
//! - **Block-out**: a piece that collides where it spawns ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{ScriptedShapes, Session, SessionConfig};
//! use blockfall_types::{DropOutcome, GameAction, PieceKind};
//!
//! let mut session = Session::new(
//!     SessionConfig::default(),
//!     ScriptedShapes::new(vec![PieceKind::T, PieceKind::O]),
//! );
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! assert_eq!(session.hard_drop(), DropOutcome::Locked);
//!
//! // The preview piece is now falling.
//! assert_eq!(session.current().kind, PieceKind::O);
//! assert_eq!(session.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) every frame with the elapsed
//! milliseconds; it performs as many gravity steps as whole fall intervals
//! have accumulated.

pub mod field;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use field::{Field, FieldGrid, FIELD_COLS, FIELD_ROWS};
pub use piece::ActivePiece;
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng};
pub use scoring::{line_clear_score, next_fall_interval_ms};
pub use session::{Session, SessionConfig};
pub use shapes::{rotation_count, rotation_mask, rotation_shape, Mask, PieceShape};
pub use snapshot::{GameSnapshot, PieceSnapshot};
