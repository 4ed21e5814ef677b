//! boj-checker - Sample I/O checker for Baekjoon Online Judge solutions
//!
//! Fetches a problem's sample cases, builds the solution once in a
//! content-addressed workspace and runs it against every sample, yielding a
//! verdict per sample.
//!
//! # Architecture
//!
//! - **Judge**: language registry, command templates, workspaces, process
//!   execution, output comparison and the per-session verdict stream
//! - **Services**: sample retrieval
//! - **CLI**: argument parsing and terminal reporting
//! - **Models**: shared data types

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod judge;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
