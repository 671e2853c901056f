// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`]: the [`ProcessBackend`] seam and the real spawning backend
//! - [`prefix`]: byte-exact line prefixing for piped child output
//! - [`runner`]: one command from rendered line to outcome
//! - [`sequencer`]: ordered execution of a whole command list

pub mod backend;
pub mod prefix;
pub mod runner;
pub mod sequencer;

pub use backend::{CommandSpec, OutputSink, ProcessBackend, RealProcessBackend};
pub use prefix::{LinePrefixer, forward_prefixed};
pub use runner::run_command;
pub use sequencer::run_commands;
