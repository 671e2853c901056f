// src/config/mod.rs

//! Option model and one-shot resolution.
//!
//! Responsibilities:
//! - Define the caller-facing options and command-list model (`model.rs`).
//! - Build the child environment from an ambient snapshot (`env.rs`).
//! - Resolve options into the immutable per-engine form (`resolve.rs`).

pub mod env;
pub mod model;
pub mod resolve;

pub use env::{AmbientEnv, build_env, local_bin_dir, search_path_var};
pub use model::{Commands, DEFAULT_ERROR_MESSAGE, ShellOptions};
pub use resolve::{ResolvedOptions, normalize_commands};
