//! boj-checker - Application Entry Point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boj_checker::{
    Config, cli,
    cli::CheckerArgs,
    constants::{DEFAULT_LOG_FILTER, exit_status},
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CheckerArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(exit_status::FATAL);
        }
    };
    args.apply(&mut config);

    // Logs go to stderr so they never mix with verdict output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        problem_id = args.problem_id,
        file = %args.file.display(),
        "Starting boj-checker"
    );

    match cli::run(&args, &config).await {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            tracing::error!(error = %e, "Checker failed");
            eprintln!("error: {e:#}");
            ExitCode::from(exit_status::FATAL)
        }
    }
}
