use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::{ProcessRunner, RunError};
use crate::consts::{DEFAULT_TIMEOUT, MAX_OUTPUT_BYTES};

const READ_CHUNK: usize = 8 * 1024;

/// Configuration for the interpreter runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }
}

/// Spawns `<interpreter> <script>` as a child process.
pub struct InterpreterRunner {
    config: RunnerConfig,
}

impl InterpreterRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }
}

/// Captured stdout+stderr, keeping at most `cap` bytes (plus a little slack
/// so the cut can land on a char boundary). Bytes past that are counted,
/// not stored.
#[derive(Debug)]
struct CombinedOutput {
    kept: Vec<u8>,
    total: usize,
    cap: usize,
}

/// Longest UTF-8 sequence minus one.
const CHAR_SLACK: usize = 3;

impl CombinedOutput {
    fn new(cap: usize) -> Self {
        Self {
            kept: Vec::new(),
            total: 0,
            cap,
        }
    }

    fn push(&mut self, chunk: &[u8]) {
        self.total += chunk.len();
        let room = self
            .cap
            .saturating_add(CHAR_SLACK)
            .saturating_sub(self.kept.len());
        let n = room.min(chunk.len());
        self.kept.extend_from_slice(&chunk[..n]);
    }

    /// Lossy UTF-8 text, cut at `cap` with a marker if more was produced.
    fn render(&self) -> String {
        let text = String::from_utf8_lossy(&self.kept);
        if self.total <= self.cap {
            return text.into_owned();
        }
        let mut end = self.cap.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}\n\n[truncated: showing {}/{} bytes]",
            &text[..end],
            end,
            self.total
        )
    }
}

/// Drain stdout and stderr into `combined` in arrival order until both close.
async fn collect_combined<O, E>(
    combined: &mut CombinedOutput,
    mut stdout: O,
    mut stderr: E,
) -> std::io::Result<()>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out_buf = [0u8; READ_CHUNK];
    let mut err_buf = [0u8; READ_CHUNK];
    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        tokio::select! {
            read = stdout.read(&mut out_buf), if out_open => match read? {
                0 => out_open = false,
                n => combined.push(&out_buf[..n]),
            },
            read = stderr.read(&mut err_buf), if err_open => match read? {
                0 => err_open = false,
                n => combined.push(&err_buf[..n]),
            },
        }
    }
    Ok(())
}

#[async_trait]
impl ProcessRunner for InterpreterRunner {
    async fn run(&self, interpreter: &str, script: &Path) -> Result<String, RunError> {
        let spawn_failed = |source| RunError::SpawnFailed {
            interpreter: interpreter.to_string(),
            source,
        };

        // kill_on_drop: a dropped request future takes the child down with it
        let mut child = Command::new(interpreter)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_failed)?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill().await;
            return Err(spawn_failed(std::io::Error::other("child pipes unavailable")));
        };

        let mut combined = CombinedOutput::new(self.config.max_output_bytes);
        let timeout = self.config.timeout;
        let waited = tokio::time::timeout(timeout, async {
            collect_combined(&mut combined, stdout, stderr).await?;
            child.wait().await
        })
        .await;

        match waited {
            Ok(Ok(status)) if status.success() => Ok(combined.render()),
            Ok(Ok(status)) => Err(RunError::ExecutionFailed {
                code: status.code(),
                output: combined.render(),
            }),
            Ok(Err(source)) => {
                let _ = child.kill().await;
                Err(RunError::Io {
                    interpreter: interpreter.to_string(),
                    source,
                    output: combined.render(),
                })
            }
            Err(_) => {
                tracing::warn!(
                    interpreter,
                    script = %script.display(),
                    timeout_secs = timeout.as_secs_f64(),
                    "script timed out, killing child"
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "failed to kill timed-out child");
                }
                Err(RunError::Timeout {
                    after: timeout,
                    output: combined.render(),
                })
            }
        }
    }
}
