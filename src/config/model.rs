// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{Result, ShellpipeError};

/// Default failure-message template. Rendered against the failure context
/// (`command`, `file`, `error.code` plus the user's `template_data`).
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Command `<%= command %>` failed with exit code <%= error.code %>";

/// Options accepted by the [`stage`](crate::stage) and [`task`](crate::task)
/// factories.
///
/// All fields are optional; everything deserializes with the same defaults
/// that `ShellOptions::default()` produces, so hosts that keep their pipeline
/// definitions in TOML or JSON can parse a `ShellOptions` straight out of a
/// config table:
///
/// ```toml
/// [build.shell]
/// cwd = "/srv/site/<%= file.dir %>"
/// verbose = true
/// stdout_prefix = "[build] "
/// env = { NODE_ENV = "production" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellOptions {
    /// Working-directory template for every spawned command.
    ///
    /// Rendered against the same context as the command itself, so it may
    /// reference `<%= file %>` and `template_data` keys. Defaults to the
    /// process working directory captured once at construction.
    pub cwd: Option<String>,

    /// Run commands through the platform shell (`sh -c` / `cmd /C`).
    ///
    /// When `false` the whole command string is treated as a bare program
    /// name and spawned directly, with no arguments and no word splitting.
    pub shell: bool,

    /// Discard all child I/O: stdin, stdout and stderr are wired to null and
    /// any configured prefixes are ignored.
    pub quiet: bool,

    /// Log each rendered command (at info level) before it is launched.
    pub verbose: bool,

    /// Keep executing the remaining commands when one exits nonzero.
    ///
    /// Spawn failures and template errors still stop the sequence.
    pub ignore_errors: bool,

    /// Template for the error raised on a nonzero exit; see
    /// [`DEFAULT_ERROR_MESSAGE`].
    pub error_message: String,

    /// Prefix prepended to every line the child writes to stdout. Enables
    /// piping for that channel; without it the channel is inherited as-is.
    pub stdout_prefix: Option<String>,

    /// Prefix prepended to every line the child writes to stderr.
    pub stderr_prefix: Option<String>,

    /// Shared line prefix applied to both output channels where no
    /// per-channel prefix is set.
    pub prefix: Option<String>,

    /// Extra values merged into every render context. Engine-provided keys
    /// (`file`, and `command`/`error` during failure rendering) win on
    /// collision.
    pub template_data: serde_json::Map<String, Value>,

    /// Environment overrides, applied on top of the inherited environment
    /// after the local-bin search path has been prepended. Overrides win,
    /// including over the search-path entry itself.
    pub env: BTreeMap<String, String>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            shell: true,
            quiet: false,
            verbose: false,
            ignore_errors: false,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            stdout_prefix: None,
            stderr_prefix: None,
            prefix: None,
            template_data: serde_json::Map::new(),
            env: BTreeMap::new(),
        }
    }
}

/// A command list as supplied by the caller: either a single command string
/// or a sequence of them.
///
/// Anything else is rejected at construction time, before any process is
/// spawned.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Commands {
    Single(String),
    List(Vec<String>),
}

impl Commands {
    /// Build a `Commands` from loosely-typed data (e.g. a value pulled out of
    /// a host's JSON/YAML pipeline definition).
    ///
    /// Values that are neither a string nor a sequence of strings are a
    /// [`Config`](ShellpipeError::Config) error.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|_| ShellpipeError::Config("commands must be a string or a list of strings".to_string()))
    }

    /// Normalize to the ordered list the sequencer runs.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Commands::Single(command) => vec![command],
            Commands::List(commands) => commands,
        }
    }
}

impl From<&str> for Commands {
    fn from(command: &str) -> Self {
        Commands::Single(command.to_string())
    }
}

impl From<String> for Commands {
    fn from(command: String) -> Self {
        Commands::Single(command)
    }
}

impl From<Vec<String>> for Commands {
    fn from(commands: Vec<String>) -> Self {
        Commands::List(commands)
    }
}

impl From<Vec<&str>> for Commands {
    fn from(commands: Vec<&str>) -> Self {
        Commands::List(commands.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Commands {
    fn from(commands: &[&str]) -> Self {
        Commands::List(commands.iter().map(|c| c.to_string()).collect())
    }
}
