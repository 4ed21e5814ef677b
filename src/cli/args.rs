//! Command-line arguments for the checker.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;

/// Check a solution against a BOJ problem's sample I/O.
#[derive(Debug, Parser)]
#[command(name = "boj-checker", version, about = "Check solutions against sample IO.")]
pub struct CheckerArgs {
    /// The problem ID for the solution
    #[arg(value_name = "PROB_ID")]
    pub problem_id: u32,

    /// The solution code to test
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// The path of the config file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Path of the temporary directory to build in
    #[arg(short = 't', long, value_name = "PATH")]
    pub temp_directory: Option<PathBuf>,

    /// Do not load the config file
    #[arg(long, conflicts_with = "config_file")]
    pub no_config: bool,

    /// Run timeout per sample, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Compile timeout, in seconds
    #[arg(long, value_name = "SECS")]
    pub compile_timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CheckerArgs {
    /// Apply flag overrides on top of environment configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(secs) = self.timeout {
            config.execution.run_timeout_secs = secs;
        }
        if let Some(secs) = self.compile_timeout {
            config.execution.compile_timeout_secs = secs;
        }
        if let Some(filter) = self.log_filter() {
            config.log_filter = filter;
        }
    }

    fn log_filter(&self) -> Option<String> {
        let level = match self.verbose {
            0 => return None,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Some(format!("boj_checker={level}"))
    }

    /// Workspace root: the given directory or `<system temp>/boj-checker`
    pub fn workspace_root(&self) -> PathBuf {
        self.temp_directory
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(crate::constants::CONFIG_DIR_NAME))
    }
}
