//! The checker's command-line front end.
//!
//! Wires configuration, sample fetching and the judge together and reports
//! progress as each sample finishes.

use std::io::{self, Write};
use std::path::Path;
use std::pin::pin;

use futures::StreamExt;

use crate::{
    config::{CheckerConfig, Config, default_config_path},
    constants::exit_status,
    error::AppError,
    judge::{ExecutionLimits, LanguageRegistry, Session, SessionSummary},
    models::SampleCase,
    services::{BojClient, SampleProvider},
};

pub mod args;
pub mod report;

pub use args::CheckerArgs;
pub use report::Reporter;

/// How a checking session ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// Every sample was judged
    Completed(SessionSummary),
    /// A session-scoped error stopped judging
    Fatal(AppError),
}

impl SessionOutcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Completed(summary) if summary.all_passed() => exit_status::ALL_ACCEPTED,
            Self::Completed(_) => exit_status::SAMPLE_FAILED,
            Self::Fatal(_) => exit_status::FATAL,
        }
    }
}

/// Run the checker for parsed arguments, returning the process exit status
pub async fn run(args: &CheckerArgs, config: &Config) -> anyhow::Result<u8> {
    let registry = load_registry(args).await?;
    let samples = BojClient::new(&config.boj)?.fetch(args.problem_id).await?;

    let mut reporter = Reporter::stdout();
    let outcome = check(
        &args.file,
        &samples,
        &registry,
        &args.workspace_root(),
        config.execution.limits(),
        &mut reporter,
    )
    .await?;

    Ok(outcome.exit_status())
}

async fn load_registry(args: &CheckerArgs) -> anyhow::Result<LanguageRegistry> {
    if args.no_config {
        return Ok(LanguageRegistry::builtin());
    }

    let path = args.config_file.clone().or_else(default_config_path);
    let Some(path) = path else {
        tracing::warn!("No config location could be determined, using built-in languages");
        return Ok(LanguageRegistry::builtin());
    };

    tracing::debug!(path = %path.display(), "Loading checker config");
    Ok(CheckerConfig::load(&path).await?.into_registry()?)
}

/// Judge `source` against `samples`, reporting as results arrive
pub async fn check<W: Write>(
    source: &Path,
    samples: &[SampleCase],
    registry: &LanguageRegistry,
    workspace_root: &Path,
    limits: ExecutionLimits,
    reporter: &mut Reporter<W>,
) -> io::Result<SessionOutcome> {
    reporter.header(samples.len())?;

    let session = Session::new(source, samples, registry, workspace_root).with_limits(limits);
    let mut verdicts = pin!(session.evaluate());
    let mut results = Vec::with_capacity(samples.len());

    for sample_number in 1..=samples.len() {
        reporter.sample_started(sample_number)?;
        match verdicts.next().await {
            Some(Ok(result)) => {
                reporter.sample_finished(&result)?;
                results.push(result);
            }
            Some(Err(e)) => {
                tracing::debug!(code = e.error_code(), error = %e, "Session aborted");
                reporter.fatal(&e)?;
                return Ok(SessionOutcome::Fatal(e));
            }
            None => {
                let e = AppError::Internal("verdict stream ended early".to_string());
                reporter.fatal(&e)?;
                return Ok(SessionOutcome::Fatal(e));
            }
        }
    }

    // Drains the stream so the workspace is released
    while let Some(extra) = verdicts.next().await {
        if let Err(e) = extra {
            tracing::warn!(error = %e, "Unexpected item after last sample");
        }
    }

    let summary = SessionSummary::from_results(&results);
    tracing::info!(
        verdict = %summary.verdict,
        passed = summary.passed_count,
        total = summary.total_count,
        "Session finished"
    );
    reporter.summary(&summary)?;
    Ok(SessionOutcome::Completed(summary))
}
