// src/errors.rs

//! Crate-wide error type and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellpipeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    /// A command exited with a nonzero code and `ignore_errors` was not set.
    ///
    /// `message` is the rendered `error_message` template; the exit code is
    /// kept separately for callers that want to branch on it.
    #[error("{message}")]
    CommandFailed { message: String, code: i32 },

    /// The OS refused to start the child process (bad program name, missing
    /// working directory, permissions). Never covered by `ignore_errors`.
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ShellpipeError>;
