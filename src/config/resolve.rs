// src/config/resolve.rs

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::env::{AmbientEnv, build_env};
use crate::config::model::{Commands, ShellOptions};
use crate::errors::{Result, ShellpipeError};

/// Normalize a command list into the ordered sequence the engine runs.
///
/// A single string becomes a one-element sequence. An empty sequence is a
/// configuration error: nothing would ever run and the stage would silently
/// pass every item through.
pub fn normalize_commands(commands: impl Into<Commands>) -> Result<Vec<String>> {
    let commands = commands.into().into_vec();
    if commands.is_empty() {
        return Err(ShellpipeError::Config("missing commands".to_string()));
    }
    Ok(commands)
}

/// Options after one-shot resolution, immutable for the lifetime of the
/// engine.
///
/// Resolution happens once per [`stage`](crate::stage)/[`task`](crate::task)
/// call: ambient state is captured, the working-directory template is
/// defaulted to the captured cwd, per-channel prefixes are computed from the
/// shared `prefix`, and the full child environment is built. Every command
/// of every item reuses this snapshot unchanged.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// Working-directory template; rendered per command.
    pub cwd: String,
    pub shell: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub ignore_errors: bool,
    /// Failure-message template; rendered against the failure context.
    pub error_message: String,
    /// Effective stdout prefix (`stdout_prefix` falling back to `prefix`);
    /// cleared under `quiet`.
    pub stdout_prefix: Option<String>,
    /// Effective stderr prefix (`stderr_prefix` falling back to `prefix`);
    /// cleared under `quiet`.
    pub stderr_prefix: Option<String>,
    pub template_data: serde_json::Map<String, Value>,
    /// Complete child environment. The child inherits nothing implicitly;
    /// this map is the whole environment it sees.
    pub env: BTreeMap<String, String>,
}

impl ResolvedOptions {
    /// Resolve against the live process state.
    pub fn resolve(options: ShellOptions) -> Result<Self> {
        let ambient = AmbientEnv::capture()?;
        Ok(Self::resolve_with(options, &ambient))
    }

    /// Resolve against an explicit ambient snapshot. Pure; used directly in
    /// tests and by [`resolve`](Self::resolve) in production.
    pub fn resolve_with(options: ShellOptions, ambient: &AmbientEnv) -> Self {
        let env = build_env(&ambient.vars, &ambient.cwd, &options.env);

        let cwd = options
            .cwd
            .unwrap_or_else(|| ambient.cwd.to_string_lossy().into_owned());

        // Quiet discards all child I/O, so prefixing never applies.
        let (stdout_prefix, stderr_prefix) = if options.quiet {
            (None, None)
        } else {
            (
                options.stdout_prefix.or_else(|| options.prefix.clone()),
                options.stderr_prefix.or(options.prefix),
            )
        };

        Self {
            cwd,
            shell: options.shell,
            quiet: options.quiet,
            verbose: options.verbose,
            ignore_errors: options.ignore_errors,
            error_message: options.error_message,
            stdout_prefix,
            stderr_prefix,
            template_data: options.template_data,
            env,
        }
    }
}
