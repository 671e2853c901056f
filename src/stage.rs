// src/stage.rs

//! Pipeline stage and standalone task entry points.
//!
//! [`ShellStage`] is the streaming surface: wire it between two channels and
//! it runs the configured command sequence once per item flowing through,
//! forwarding each item unchanged on success and its error on failure.
//! [`ShellTask`] is the same machinery without a stream: one call runs the
//! sequence once with no current item.

use std::fmt;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{Commands, ResolvedOptions, ShellOptions, normalize_commands};
use crate::errors::Result;
use crate::exec::{ProcessBackend, RealProcessBackend, run_commands};

/// The unit of work flowing through a stage. Opaque to the stage itself;
/// templates see it under the `file` name.
pub type Item = Value;

/// Output channel capacity of a spawned stage.
const STAGE_BUFFER: usize = 32;

/// A shell-command stage over a stream of items.
///
/// Configuration is validated and resolved up front in [`ShellStage::new`];
/// after that every item is processed against the same resolved snapshot, so
/// ambient changes (the process environment, the process working directory)
/// made mid-stream do not leak into later items.
pub struct ShellStage<B = RealProcessBackend> {
    commands: Vec<String>,
    options: ResolvedOptions,
    backend: B,
}

impl<B> fmt::Debug for ShellStage<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellStage")
            .field("commands", &self.commands)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ShellStage<RealProcessBackend> {
    /// Build a stage that runs real processes.
    ///
    /// Fails up front on an empty command list or unusable options; nothing
    /// is spawned until items arrive.
    pub fn new(commands: impl Into<Commands>, options: ShellOptions) -> Result<Self> {
        Self::with_backend(commands, options, RealProcessBackend::new())
    }
}

impl<B: ProcessBackend> ShellStage<B> {
    /// Build a stage over an explicit backend. Tests use this to script exit
    /// codes and record launches without touching the OS.
    pub fn with_backend(
        commands: impl Into<Commands>,
        options: ShellOptions,
        backend: B,
    ) -> Result<Self> {
        Ok(Self {
            commands: normalize_commands(commands)?,
            options: ResolvedOptions::resolve(options)?,
            backend,
        })
    }

    /// Run the whole command sequence for a single item.
    ///
    /// This is the per-item unit [`ShellStage::spawn`] loops over; it is
    /// public so callers embedding the stage in their own pipeline can drive
    /// it directly.
    pub async fn process(&mut self, item: &Item) -> Result<()> {
        run_commands(&mut self.backend, &self.commands, &self.options, item).await
    }

    /// Wire the stage to an input channel and spawn its loop.
    ///
    /// Items are processed strictly in arrival order, one at a time. Each
    /// item is forwarded unchanged on success; a failure emits the error in
    /// the item's place and the stage moves on to the next item. The loop
    /// ends when the input channel closes and all received items have been
    /// processed.
    ///
    /// If the output receiver is dropped, the stage keeps consuming and
    /// executing (the commands run for their side effects) and simply stops
    /// emitting.
    pub fn spawn(
        self,
        mut items: mpsc::Receiver<Item>,
    ) -> (mpsc::Receiver<Result<Item>>, JoinHandle<()>)
    where
        B: 'static,
    {
        let (out_tx, out_rx) = mpsc::channel(STAGE_BUFFER);

        let handle = tokio::spawn(async move {
            let mut stage = self;
            let mut emitting = true;

            loop {
                let item = match items.recv().await {
                    Some(item) => item,
                    None => {
                        debug!("stage input closed; stage finished");
                        break;
                    }
                };

                let outcome = stage.process(&item).await;

                if !emitting {
                    continue;
                }

                let sent = match outcome {
                    Ok(()) => out_tx.send(Ok(item)).await,
                    Err(error) => out_tx.send(Err(error)).await,
                };

                if sent.is_err() {
                    warn!("stage output receiver dropped; continuing without emitting");
                    emitting = false;
                }
            }
        });

        (out_rx, handle)
    }
}

/// A standalone command sequence, ready to run on demand.
///
/// Runs with no current item: `<%= file %>` renders empty and dotted `file`
/// paths are unresolved. The task is reusable; each [`ShellTask::run`] is a
/// fresh pass over the sequence against the options resolved at
/// construction.
pub struct ShellTask<B = RealProcessBackend> {
    commands: Vec<String>,
    options: ResolvedOptions,
    backend: B,
}

impl<B> fmt::Debug for ShellTask<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellTask")
            .field("commands", &self.commands)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ShellTask<RealProcessBackend> {
    pub fn new(commands: impl Into<Commands>, options: ShellOptions) -> Result<Self> {
        Self::with_backend(commands, options, RealProcessBackend::new())
    }
}

impl<B: ProcessBackend> ShellTask<B> {
    pub fn with_backend(
        commands: impl Into<Commands>,
        options: ShellOptions,
        backend: B,
    ) -> Result<Self> {
        Ok(Self {
            commands: normalize_commands(commands)?,
            options: ResolvedOptions::resolve(options)?,
            backend,
        })
    }

    /// Run the sequence once.
    pub async fn run(&mut self) -> Result<()> {
        run_commands(&mut self.backend, &self.commands, &self.options, &Value::Null).await
    }
}
