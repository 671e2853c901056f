// src/lib.rs

pub mod config;
pub mod errors;
pub mod exec;
pub mod stage;
pub mod template;

pub use crate::config::{Commands, ShellOptions};
pub use crate::errors::{Result, ShellpipeError};
pub use crate::exec::{ProcessBackend, RealProcessBackend};
pub use crate::stage::{Item, ShellStage, ShellTask};

/// Build a pipeline stage that runs `commands` for every item flowing
/// through it.
///
/// `commands` is a single command line or a list of them; the sequence runs
/// in order for each item, with `<%= ... %>` placeholders rendered from the
/// item and `options.template_data`. Wire the returned stage to an input
/// channel with [`ShellStage::spawn`].
///
/// Fails if `commands` is empty or the options cannot be resolved.
pub fn stage(
    commands: impl Into<Commands>,
    options: ShellOptions,
) -> Result<ShellStage<RealProcessBackend>> {
    ShellStage::new(commands, options)
}

/// Build a standalone task that runs `commands` once per [`ShellTask::run`]
/// call, with no current item (`<%= file %>` renders empty).
pub fn task(
    commands: impl Into<Commands>,
    options: ShellOptions,
) -> Result<ShellTask<RealProcessBackend>> {
    ShellTask::new(commands, options)
}
