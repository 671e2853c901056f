// src/exec/sequencer.rs

//! Strictly ordered command-sequence execution.
//!
//! Runs a list of command templates against one item, one child process at a
//! time. Each line is rendered immediately before it launches and each child
//! is awaited to natural exit before the next template is touched, so later
//! commands can rely on the side effects of earlier ones. The first failed
//! command (or failed render) stops the sequence; commands after it never
//! start. An empty list completes trivially.

use serde_json::Value;
use tracing::debug;

use crate::config::ResolvedOptions;
use crate::errors::Result;
use crate::exec::backend::ProcessBackend;
use crate::exec::runner::run_command;
use crate::template::{RenderContext, render};

/// Run every command in `commands`, in order, for `item`.
pub async fn run_commands<B>(
    backend: &mut B,
    commands: &[String],
    options: &ResolvedOptions,
    item: &Value,
) -> Result<()>
where
    B: ProcessBackend + ?Sized,
{
    debug!(commands = commands.len(), "running command sequence");

    for template in commands {
        let context = RenderContext::new(&options.template_data, item);
        let line = render(template, &context)?;
        run_command(backend, options, &line, &context).await?;
    }

    Ok(())
}
