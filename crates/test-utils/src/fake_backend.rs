use std::collections::VecDeque;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use shellpipe::errors::Result;
use shellpipe::exec::{CommandSpec, ProcessBackend};

/// One recorded launch: the rendered line and the directory it would have
/// run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub line: String,
    pub cwd: PathBuf,
}

/// A fake backend that:
/// - records every command it is asked to run, in order
/// - resolves with scripted exit codes instead of spawning anything.
pub struct RecordingBackend {
    invocations: Arc<Mutex<Vec<RecordedCommand>>>,
    exit_codes: VecDeque<i32>,
}

impl RecordingBackend {
    /// Backend where every run exits 0.
    pub fn new(invocations: Arc<Mutex<Vec<RecordedCommand>>>) -> Self {
        Self {
            invocations,
            exit_codes: VecDeque::new(),
        }
    }

    /// Backend with scripted exit codes, consumed first to last. Runs beyond
    /// the scripted list exit 0.
    pub fn with_exit_codes(
        invocations: Arc<Mutex<Vec<RecordedCommand>>>,
        codes: &[i32],
    ) -> Self {
        Self {
            invocations,
            exit_codes: codes.iter().copied().collect(),
        }
    }
}

impl ProcessBackend for RecordingBackend {
    fn run<'a>(
        &'a mut self,
        spec: CommandSpec<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>> {
        let code = self.exit_codes.pop_front().unwrap_or(0);

        {
            let mut guard = self.invocations.lock().unwrap();
            guard.push(RecordedCommand {
                line: spec.line.to_string(),
                cwd: spec.cwd.to_path_buf(),
            });
        }

        Box::pin(async move { Ok(code) })
    }
}
