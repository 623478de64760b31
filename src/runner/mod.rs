pub mod mock;
pub mod process;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Why a script run did not succeed. Each variant carries whatever output
/// was captured so the caller can report it.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to start {interpreter}: {source}")]
    SpawnFailed {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
    /// Reading the pipes or waiting on a running child failed.
    #[error("i/o error while running {interpreter}: {source}")]
    Io {
        interpreter: String,
        #[source]
        source: std::io::Error,
        output: String,
    },
    #[error("{}", describe_exit(.code))]
    ExecutionFailed { code: Option<i32>, output: String },
    #[error("timed out after {}s", .after.as_secs_f64())]
    Timeout { after: Duration, output: String },
}

impl RunError {
    /// Output captured before the failure (empty if the process never ran).
    pub fn output(&self) -> &str {
        match self {
            RunError::SpawnFailed { .. } => "",
            RunError::Io { output, .. }
            | RunError::ExecutionFailed { output, .. }
            | RunError::Timeout { output, .. } => output,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Runs a script with an interpreter and returns its combined output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, interpreter: &str, script: &Path) -> Result<String, RunError>;
}
