//! Terminal rendering for the falling-block game.
//!
//! Views draw a [`core::GameSnapshot`] into a [`FrameBuffer`]; the
//! [`TerminalRenderer`] flushes framebuffers to the terminal, sending only the
//! glyphs that changed since the previous frame.
//!
//! - Each field cell is two terminal columns wide so blocks look square
//! - Views are pure and unit-tested without a terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
