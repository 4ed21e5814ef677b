//! Judging a source file against a problem's samples
//!
//! A session yields one [`SampleResult`] per sample, in order, as a lazy
//! stream. Nothing happens until the stream is first polled: the source is
//! hashed, its workspace created and the solution compiled once; each
//! following poll runs one sample.
//!
//! The workspace is owned by a [`WorkspaceGuard`] stored in the stream
//! state, so it is removed when the samples run out, when a fatal error
//! ends the stream, or when the caller drops the stream early.

use std::path::{Path, PathBuf};

use futures::{Stream, TryStreamExt, stream};

use super::compare::first_mismatch;
use super::executor::{ExecutionLimits, Executor, PreparedProgram};
use super::languages::LanguageRegistry;
use super::verdict::{SampleResult, Verdict};
use super::workspace::{WorkspaceGuard, WorkspaceManager};
use crate::{
    error::{AppError, AppResult},
    models::SampleCase,
};

/// Everything needed to judge one source file
#[derive(Debug, Clone)]
pub struct Session<'a> {
    source_path: PathBuf,
    samples: &'a [SampleCase],
    registry: &'a LanguageRegistry,
    workspaces: WorkspaceManager,
    executor: Executor,
}

impl<'a> Session<'a> {
    pub fn new(
        source_path: impl Into<PathBuf>,
        samples: &'a [SampleCase],
        registry: &'a LanguageRegistry,
        workspace_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            samples,
            registry,
            workspaces: WorkspaceManager::new(workspace_root),
            executor: Executor::default(),
        }
    }

    pub fn with_limits(mut self, limits: ExecutionLimits) -> Self {
        self.executor = Executor::new(limits);
        self
    }

    /// Stream of per-sample results.
    ///
    /// A fatal error (unknown language, compilation failure, spawn failure)
    /// is yielded once and ends the stream. Calling this again starts a
    /// fresh session from the first sample.
    pub fn evaluate(&self) -> impl Stream<Item = AppResult<SampleResult>> + use<'a> {
        verdict_stream(self.fresh_state())
    }

    /// Judge every sample, stopping at the first fatal error
    pub async fn evaluate_all(&self) -> AppResult<Vec<SampleResult>> {
        self.evaluate().try_collect().await
    }

    fn fresh_state(&self) -> SessionState<'a> {
        SessionState {
            source_path: self.source_path.clone(),
            samples: self.samples.iter().enumerate(),
            registry: self.registry,
            workspaces: self.workspaces.clone(),
            executor: self.executor.clone(),
            prepared: None,
        }
    }
}

/// Judge `source_path` against `samples` with default limits
pub fn evaluate<'a>(
    source_path: &Path,
    samples: &'a [SampleCase],
    registry: &'a LanguageRegistry,
    workspace_root: &Path,
) -> impl Stream<Item = AppResult<SampleResult>> + use<'a> {
    verdict_stream(Session::new(source_path, samples, registry, workspace_root).fresh_state())
}

struct Prepared {
    workspace: WorkspaceGuard,
    program: PreparedProgram,
}

struct SessionState<'a> {
    source_path: PathBuf,
    samples: std::iter::Enumerate<std::slice::Iter<'a, SampleCase>>,
    registry: &'a LanguageRegistry,
    workspaces: WorkspaceManager,
    executor: Executor,
    prepared: Option<Prepared>,
}

impl SessionState<'_> {
    /// Hash the source, create the workspace, resolve the language and build
    async fn prepare(&self) -> AppResult<Prepared> {
        let workspace = self.workspaces.acquire(&self.source_path).await?;
        let descriptor = self.registry.resolve_path(&self.source_path)?;

        tracing::info!(
            source = %self.source_path.display(),
            build_model = %descriptor.build_model(),
            workspace = %workspace.path().display(),
            "Preparing solution"
        );

        let program = self
            .executor
            .build(descriptor, &self.source_path, workspace.path())
            .await?;

        Ok(Prepared { workspace, program })
    }

    async fn program(&mut self) -> AppResult<PreparedProgram> {
        if self.prepared.is_none() {
            self.prepared = Some(self.prepare().await?);
        }
        self.prepared
            .as_ref()
            .map(|prepared| prepared.program.clone())
            .ok_or_else(|| AppError::Internal("session prepared without a program".to_string()))
    }

    fn finish(&mut self) {
        if let Some(prepared) = self.prepared.take() {
            if let Err(e) = prepared.workspace.release() {
                tracing::warn!(error = %e, "Workspace cleanup incomplete");
            }
        }
    }
}

fn verdict_stream(state: SessionState<'_>) -> impl Stream<Item = AppResult<SampleResult>> + '_ {
    stream::try_unfold(state, |mut state| async move {
        let Some((index, sample)) = state.samples.next() else {
            state.finish();
            return Ok::<_, AppError>(None);
        };

        let program = state.program().await?;
        let execution = state.executor.execute(&program, &sample.input).await?;
        let result = SampleResult::new(index + 1, sample.expected_output.clone(), execution);

        tracing::debug!(
            sample = result.sample_number,
            verdict = %result.verdict,
            exit_code = result.execution.exit_code,
            elapsed_ms = result.execution.elapsed_ms,
            "Sample judged"
        );
        if result.verdict == Verdict::WrongAnswer {
            tracing::debug!(
                sample = result.sample_number,
                input = %sample.input_preview(40),
                line = ?first_mismatch(&sample.expected_output, &result.execution.output),
                "Output differs"
            );
        }

        Ok::<_, AppError>(Some((result, state)))
    })
}
