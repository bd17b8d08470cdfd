//! Active piece - an immutable falling piece value
//!
//! Every transform returns a new piece; the session only commits it when the
//! field reports no collision.

use crate::shapes::{rotation_count, rotation_mask, rotation_shape, Mask, PieceShape};
use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// A piece in grid space
///
/// `(x, y)` is the field position of the mask's top-left corner. `y` may be
/// negative while the piece is still above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Always in `0..rotation_count(kind)`
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl ActivePiece {
    /// Create a piece at the spawn origin in its first rotation state
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece at an arbitrary origin in its first rotation state
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
            color: kind.color(),
        }
    }

    /// Occupancy mask of the current rotation state
    pub fn mask(&self) -> &'static Mask {
        rotation_mask(self.kind, self.rotation as usize)
    }

    /// Mino offsets of the current rotation state
    pub fn shape(&self) -> PieceShape {
        rotation_shape(self.kind, self.rotation as usize)
    }

    /// Absolute field coordinates covered by this piece
    pub fn cells(&self) -> PieceShape {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece with its origin shifted
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece advanced to its next rotation state, without moving the origin
    pub fn rotated(&self) -> Self {
        let next = (self.rotation as usize + 1) % rotation_count(self.kind);
        Self {
            rotation: next as u8,
            ..*self
        }
    }
}
