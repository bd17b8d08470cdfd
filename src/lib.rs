//! Blockfall (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `blockfall::{core,input,term,types}` and adds the
//! binary's environment configuration and event journal.

pub mod config;
pub mod journal;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
