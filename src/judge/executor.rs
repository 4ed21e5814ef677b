//! Compile and run solutions
//!
//! The executor turns a [`LanguageDescriptor`] into processes. Compilation
//! happens once per session in [`Executor::build`], producing a
//! [`PreparedProgram`]; each sample then goes through [`Executor::execute`].
//! [`Executor::run`] does both for one-off use.
//!
//! Processes are spawned from argument vectors, never through a shell.
//! Standard input is written from a separate task while the parent drains
//! stdout and stderr, so neither side can block the other on a full pipe.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::languages::LanguageDescriptor;
use super::template::split_program;
use crate::{
    constants::{DEFAULT_COMPILE_TIMEOUT_SECS, DEFAULT_RUN_TIMEOUT_SECS, EXECUTABLE_NAME},
    error::{AppError, AppResult},
};

/// Wall-clock limits applied to spawned processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    pub compile_timeout: Duration,
    pub run_timeout: Duration,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            compile_timeout: Duration::from_secs(DEFAULT_COMPILE_TIMEOUT_SECS),
            run_timeout: Duration::from_secs(DEFAULT_RUN_TIMEOUT_SECS),
        }
    }
}

/// Outcome of running the solution on one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured standard output, decoded as UTF-8 (lossy)
    pub output: String,
    /// Exit code; `-signal` when killed by a signal, `-1` when timed out
    pub exit_code: i32,
    /// Captured standard error
    pub stderr: String,
    pub elapsed_ms: u64,
    /// The run hit the wall-clock limit and was killed
    pub timed_out: bool,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }
}

/// A rendered run command, ready to be spawned once per sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedProgram {
    pub argv: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
}

/// Compiles and runs solutions
#[derive(Debug, Clone, Default)]
pub struct Executor {
    limits: ExecutionLimits,
}

impl Executor {
    pub fn new(limits: ExecutionLimits) -> Self {
        Self { limits }
    }

    /// Compile (if the language needs it) and render the run command.
    ///
    /// Build artifacts go to `workspace`: a single `a.out` for compiled
    /// languages, the directory itself for fixed-executable languages.
    pub async fn build(
        &self,
        descriptor: &LanguageDescriptor,
        source_path: &Path,
        workspace: &Path,
    ) -> AppResult<PreparedProgram> {
        match descriptor {
            LanguageDescriptor::Scripted { run } => {
                let exec_path = workspace.join(EXECUTABLE_NAME);
                Ok(PreparedProgram {
                    argv: run.render(source_path, &exec_path)?,
                    working_dir: None,
                })
            }
            LanguageDescriptor::Compiled { compile, run } => {
                let exec_path = workspace.join(EXECUTABLE_NAME);
                self.compile(&compile.render(source_path, &exec_path)?)
                    .await?;
                Ok(PreparedProgram {
                    argv: run.render(source_path, &exec_path)?,
                    working_dir: None,
                })
            }
            LanguageDescriptor::FixedExecutable { compile, run } => {
                self.compile(&compile.render(source_path, workspace)?).await?;
                Ok(PreparedProgram {
                    argv: run.render(source_path, workspace)?,
                    working_dir: Some(workspace.to_path_buf()),
                })
            }
        }
    }

    /// Build and run once
    pub async fn run(
        &self,
        descriptor: &LanguageDescriptor,
        source_path: &Path,
        input: &str,
        workspace: &Path,
    ) -> AppResult<ExecutionResult> {
        let program = self.build(descriptor, source_path, workspace).await?;
        self.execute(&program, input).await
    }

    /// Run the compile command; any nonzero exit is a compilation failure
    async fn compile(&self, argv: &[OsString]) -> AppResult<()> {
        let (program, args) = split_program(argv)?;
        tracing::debug!(?argv, "Compiling");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AppError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        let output = match timeout(self.limits.compile_timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(?argv, "Compilation timed out");
                return Err(AppError::CompilationFailed {
                    exit_code: -1,
                    stderr: format!(
                        "compilation timed out after {}s",
                        self.limits.compile_timeout.as_secs()
                    ),
                });
            }
        };

        if output.status.success() {
            return Ok(());
        }

        let exit_code = exit_code_of(output.status);
        let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if stderr.trim().is_empty() {
            stderr = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        tracing::debug!(exit_code, "Compilation failed");

        Err(AppError::CompilationFailed { exit_code, stderr })
    }

    /// Run a prepared program, feeding `input` on stdin
    pub async fn execute(
        &self,
        program: &PreparedProgram,
        input: &str,
    ) -> AppResult<ExecutionResult> {
        let (name, args) = split_program(&program.argv)?;
        tracing::debug!(argv = ?program.argv, cwd = ?program.working_dir, "Running");

        let mut command = Command::new(name);
        command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &program.working_dir {
            command.current_dir(dir);
        }

        let start = Instant::now();
        let mut child = command.spawn().map_err(|source| AppError::Spawn {
            program: name.to_string_lossy().into_owned(),
            source,
        })?;

        let stdin = child.stdin.take();
        let payload = input.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let Some(mut stdin) = stdin else { return };
            if let Err(e) = stdin.write_all(&payload).await {
                // Programs may exit without reading all of their input
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    tracing::warn!(error = %e, "Failed to write program input");
                }
            }
            // Dropping stdin closes the pipe
        });

        let result = timeout(self.limits.run_timeout, child.wait_with_output()).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(output)) => {
                let _ = writer.await;
                Ok(ExecutionResult {
                    output: String::from_utf8_lossy(&output.stdout).into_owned(),
                    exit_code: exit_code_of(output.status),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    elapsed_ms,
                    timed_out: false,
                })
            }
            Ok(Err(e)) => {
                writer.abort();
                Err(AppError::Io(e))
            }
            Err(_) => {
                // The child was dropped with the timed-out future; kill_on_drop reaps it
                writer.abort();
                tracing::debug!(elapsed_ms, "Run timed out");
                Ok(ExecutionResult {
                    output: String::new(),
                    exit_code: -1,
                    stderr: String::new(),
                    elapsed_ms,
                    timed_out: true,
                })
            }
        }
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
