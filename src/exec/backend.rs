// src/exec/backend.rs

//! Pluggable process-spawning backend.
//!
//! The runner never spawns directly; it hands a [`CommandSpec`] to a
//! [`ProcessBackend`] and gets back an exit code. [`RealProcessBackend`]
//! launches OS processes through `tokio::process`; tests substitute a
//! recording backend that scripts exit codes without touching the system.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncWrite;
use tokio::process::Command;
use tracing::debug;

use crate::config::ResolvedOptions;
use crate::errors::{Result, ShellpipeError};
use crate::exec::prefix::forward_prefixed;

/// Everything a backend needs to launch one command.
pub struct CommandSpec<'a> {
    /// Fully rendered command line.
    pub line: &'a str,
    /// Fully rendered working directory.
    pub cwd: &'a Path,
    pub options: &'a ResolvedOptions,
}

/// How a single command is launched and waited on.
pub trait ProcessBackend: Send {
    /// Launch `spec` and resolve with the child's exit code once it exits.
    ///
    /// Resolving with `Ok` means the process ran to completion, whatever its
    /// code; `Err` is reserved for launches that never produced a process
    /// and for I/O failures while draining its output.
    fn run<'a>(
        &'a mut self,
        spec: CommandSpec<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>>;
}

/// Destination stream for prefixed child output. Boxed so tests can swap the
/// host streams for in-memory pipes.
pub type OutputSink = Box<dyn AsyncWrite + Send + Unpin>;

/// Production backend: spawns real processes.
///
/// Output wiring is decided per channel. `quiet` discards the channel, a
/// configured prefix pipes it through [`forward_prefixed`] into the matching
/// sink, and otherwise the child inherits the host stream and writes to the
/// terminal untouched. stdin is never piped.
pub struct RealProcessBackend {
    stdout_sink: OutputSink,
    stderr_sink: OutputSink,
}

impl RealProcessBackend {
    /// Backend wired to the host's stdout and stderr.
    pub fn new() -> Self {
        Self {
            stdout_sink: Box::new(tokio::io::stdout()),
            stderr_sink: Box::new(tokio::io::stderr()),
        }
    }

    /// Backend that forwards prefixed output into the given sinks instead of
    /// the host streams. Channels without a prefix still inherit.
    pub fn with_sinks(stdout_sink: OutputSink, stderr_sink: OutputSink) -> Self {
        Self {
            stdout_sink,
            stderr_sink,
        }
    }

    fn build_command(spec: &CommandSpec<'_>) -> Command {
        let options = spec.options;

        // Shell mode hands the whole line to the platform shell; direct mode
        // treats it as a bare program name and spawns it with no arguments.
        let mut command = if options.shell {
            if cfg!(windows) {
                let mut command = Command::new("cmd");
                command.arg("/C").arg(spec.line);
                command
            } else {
                let mut command = Command::new("sh");
                command.arg("-c").arg(spec.line);
                command
            }
        } else {
            Command::new(spec.line)
        };

        // The child sees exactly the resolved environment, nothing inherited
        // on the side.
        command.env_clear();
        command.envs(&options.env);
        command.current_dir(spec.cwd);

        command.stdin(if options.quiet {
            Stdio::null()
        } else {
            Stdio::inherit()
        });
        command.stdout(Self::output_wiring(
            options.quiet,
            options.stdout_prefix.is_some(),
        ));
        command.stderr(Self::output_wiring(
            options.quiet,
            options.stderr_prefix.is_some(),
        ));

        command
    }

    fn output_wiring(quiet: bool, prefixed: bool) -> Stdio {
        if quiet {
            Stdio::null()
        } else if prefixed {
            Stdio::piped()
        } else {
            Stdio::inherit()
        }
    }
}

impl Default for RealProcessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBackend for RealProcessBackend {
    fn run<'a>(
        &'a mut self,
        spec: CommandSpec<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>> {
        Box::pin(async move {
            let mut command = Self::build_command(&spec);

            let mut child = command.spawn().map_err(|source| ShellpipeError::Spawn {
                command: spec.line.to_string(),
                source,
            })?;

            let child_stdout = child.stdout.take();
            let child_stderr = child.stderr.take();

            let options = spec.options;
            let stdout_sink = &mut self.stdout_sink;
            let stderr_sink = &mut self.stderr_sink;

            let stdout_pump = async move {
                match (child_stdout, &options.stdout_prefix) {
                    (Some(out), Some(prefix)) => forward_prefixed(out, stdout_sink, prefix).await,
                    _ => Ok(()),
                }
            };
            let stderr_pump = async move {
                match (child_stderr, &options.stderr_prefix) {
                    (Some(err), Some(prefix)) => forward_prefixed(err, stderr_sink, prefix).await,
                    _ => Ok(()),
                }
            };

            // Child reaping and both output pumps run in the same future, so
            // nothing detaches and no output outlives the command it came
            // from. This also means the pipes are drained to end-of-file
            // before the exit code is reported.
            let (status, stdout_drained, stderr_drained) =
                tokio::join!(child.wait(), stdout_pump, stderr_pump);

            let status = status?;
            stdout_drained?;
            stderr_drained?;

            // Killed by a signal on unix leaves no code; report -1 the way a
            // shell reports "abnormal exit".
            let code = status.code().unwrap_or(-1);
            debug!(command = %spec.line, exit_code = code, "child exited");

            Ok(code)
        })
    }
}
