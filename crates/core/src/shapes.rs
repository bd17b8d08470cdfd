//! Shape catalog - the seven piece shapes and their rotation cycles
//!
//! Every rotation state is a 5x5 occupancy mask. Rotating a piece advances to
//! the next mask in its kind's cycle; there are no kick tables, a rotation
//! either fits where it is or is rejected by the caller.
//!
//! The masks are parsed from text at compile time, and each one is checked to
//! hold exactly four cells.

use crate::types::{PieceKind, MASK_SIZE, PIECE_CELLS};

/// 5x5 occupancy grid, indexed `[row][col]`
pub type Mask = [[bool; MASK_SIZE]; MASK_SIZE];

/// Offset of a single mino relative to the mask's top-left corner, as `(col, row)`
pub type MinoOffset = (i8, i8);

/// The four mino offsets of one rotation state
pub type PieceShape = [MinoOffset; PIECE_CELLS];

/// All rotation states of a kind, in rotation order
pub fn rotations(kind: PieceKind) -> &'static [Mask] {
    match kind {
        PieceKind::I => &I_MASKS,
        PieceKind::O => &O_MASKS,
        PieceKind::T => &T_MASKS,
        PieceKind::S => &S_MASKS,
        PieceKind::Z => &Z_MASKS,
        PieceKind::J => &J_MASKS,
        PieceKind::L => &L_MASKS,
    }
}

/// Number of distinct rotation states of a kind
pub fn rotation_count(kind: PieceKind) -> usize {
    rotations(kind).len()
}

/// Mask for `rotation mod rotation_count(kind)`
pub fn rotation_mask(kind: PieceKind, rotation: usize) -> &'static Mask {
    let masks = rotations(kind);
    &masks[rotation % masks.len()]
}

/// Mino offsets for `rotation mod rotation_count(kind)`
pub fn rotation_shape(kind: PieceKind, rotation: usize) -> PieceShape {
    let shapes: &[PieceShape] = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    };
    shapes[rotation % shapes.len()]
}

/// Set cells of a mask in row-major order
///
/// Panics (at compile time for the catalog) unless the mask holds exactly
/// four cells.
pub const fn mask_offsets(mask: &Mask) -> PieceShape {
    let mut out = [(0i8, 0i8); PIECE_CELLS];
    let mut n = 0;
    let mut row = 0;
    while row < MASK_SIZE {
        let mut col = 0;
        while col < MASK_SIZE {
            if mask[row][col] {
                assert!(n < PIECE_CELLS, "mask has more than four cells");
                out[n] = (col as i8, row as i8);
                n += 1;
            }
            col += 1;
        }
        row += 1;
    }
    assert!(n == PIECE_CELLS, "mask has fewer than four cells");
    out
}

const fn mask(rows: [&str; MASK_SIZE]) -> Mask {
    let mut out = [[false; MASK_SIZE]; MASK_SIZE];
    let mut row = 0;
    while row < MASK_SIZE {
        let bytes = rows[row].as_bytes();
        assert!(bytes.len() == MASK_SIZE, "mask rows are five cells wide");
        let mut col = 0;
        while col < MASK_SIZE {
            out[row][col] = bytes[col] == b'#';
            col += 1;
        }
        row += 1;
    }
    out
}

const fn shapes<const N: usize>(masks: &[Mask; N]) -> [PieceShape; N] {
    let mut out = [[(0i8, 0i8); PIECE_CELLS]; N];
    let mut i = 0;
    while i < N {
        out[i] = mask_offsets(&masks[i]);
        i += 1;
    }
    out
}

const I_MASKS: [Mask; 2] = [
    mask([".....", "..#..", "..#..", "..#..", "..#.."]),
    mask([".....", ".....", "####.", ".....", "....."]),
];

const O_MASKS: [Mask; 1] = [mask([".....", ".....", ".##..", ".##..", "....."])];

const T_MASKS: [Mask; 4] = [
    mask([".....", ".....", ".#...", "###..", "....."]),
    mask([".....", ".....", ".#...", ".##..", ".#..."]),
    mask([".....", ".....", ".....", "###..", ".#..."]),
    mask([".....", ".....", ".#...", "##...", ".#..."]),
];

const S_MASKS: [Mask; 2] = [
    mask([".....", ".....", ".##..", "##...", "....."]),
    mask([".....", ".#...", ".##..", "..#..", "....."]),
];

const Z_MASKS: [Mask; 2] = [
    mask([".....", ".....", "##...", ".##..", "....."]),
    mask([".....", "..#..", ".##..", ".#...", "....."]),
];

const J_MASKS: [Mask; 4] = [
    mask([".....", ".#...", ".#...", "##...", "....."]),
    mask([".....", ".....", "#....", "###..", "....."]),
    mask([".....", ".##..", ".#...", ".#...", "....."]),
    mask([".....", ".....", "###..", "..#..", "....."]),
];

const L_MASKS: [Mask; 4] = [
    mask([".....", "..#..", "..#..", ".##..", "....."]),
    mask([".....", ".....", "###..", "#....", "....."]),
    mask([".....", "##...", ".#...", ".#...", "....."]),
    mask([".....", ".....", "..#..", "###..", "....."]),
];

const I_SHAPES: [PieceShape; 2] = shapes(&I_MASKS);
const O_SHAPES: [PieceShape; 1] = shapes(&O_MASKS);
const T_SHAPES: [PieceShape; 4] = shapes(&T_MASKS);
const S_SHAPES: [PieceShape; 2] = shapes(&S_MASKS);
const Z_SHAPES: [PieceShape; 2] = shapes(&Z_MASKS);
const J_SHAPES: [PieceShape; 4] = shapes(&J_MASKS);
const L_SHAPES: [PieceShape; 4] = shapes(&L_MASKS);
