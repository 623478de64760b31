use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{ProcessRunner, RunError};

type Responder = dyn Fn(&str, &Path) -> Result<String, RunError> + Send + Sync;

/// A scripted runner for tests. Never spawns anything; answers each call
/// with the given closure and records what it was asked to run.
pub struct MockRunner {
    respond: Box<Responder>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockRunner {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &Path) -> Result<String, RunError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always succeeds with `output`.
    pub fn succeeding(output: &str) -> Self {
        let output = output.to_string();
        Self::new(move |_, _| Ok(output.clone()))
    }

    /// Always exits with `code`, having printed `output`.
    pub fn failing(code: i32, output: &str) -> Self {
        let output = output.to_string();
        Self::new(move |_, _| {
            Err(RunError::ExecutionFailed {
                code: Some(code),
                output: output.clone(),
            })
        })
    }

    /// Every `(interpreter, script)` pair run so far, in call order.
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn run(&self, interpreter: &str, script: &Path) -> Result<String, RunError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((interpreter.to_string(), script.to_path_buf()));
        (self.respond)(interpreter, script)
    }
}
