// src/exec/runner.rs

//! Single-command execution.
//!
//! Bridges one rendered command line to a [`ProcessBackend`] run and maps
//! the exit code back to an outcome:
//! - code 0 resolves `Ok`
//! - any code resolves `Ok` under `ignore_errors`
//! - otherwise the configured error message is rendered with the failure
//!   context (`command`, `error.code`) and returned as
//!   [`ShellpipeError::CommandFailed`]
//!
//! There is no timeout: a child that never exits suspends its sequence
//! indefinitely.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ResolvedOptions;
use crate::errors::{Result, ShellpipeError};
use crate::exec::backend::{CommandSpec, ProcessBackend};
use crate::template::{RenderContext, render};

/// Run one rendered command to completion.
pub async fn run_command<B>(
    backend: &mut B,
    options: &ResolvedOptions,
    line: &str,
    context: &RenderContext<'_>,
) -> Result<()>
where
    B: ProcessBackend + ?Sized,
{
    if options.verbose {
        info!(command = %line, "running command");
    }

    // The working directory is itself a template, re-rendered per command so
    // it can vary with the current item.
    let cwd = PathBuf::from(render(&options.cwd, context)?);

    let code = backend
        .run(CommandSpec {
            line,
            cwd: &cwd,
            options,
        })
        .await?;

    if code == 0 {
        return Ok(());
    }

    if options.ignore_errors {
        debug!(command = %line, exit_code = code, "nonzero exit ignored");
        return Ok(());
    }

    let failure = context.with_failure(line, code);
    let message = render(&options.error_message, &failure)?;

    Err(ShellpipeError::CommandFailed { message, code })
}
