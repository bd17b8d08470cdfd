//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] commands.
//! Every key press is one discrete command; there is no auto-repeat handling
//! here, the session moves exactly once per press.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, handle_key_in_state, is_restart, should_quit};
