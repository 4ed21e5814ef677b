//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// EXECUTION DEFAULTS
// =============================================================================

/// Default wall-clock limit for a solution run, in seconds
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 10;

/// Default wall-clock limit for a compiler invocation, in seconds
pub const DEFAULT_COMPILE_TIMEOUT_SECS: u64 = 60;

/// Artifact name for single-binary compiled languages
pub const EXECUTABLE_NAME: &str = "a.out";

/// Read buffer size used when hashing source files
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

// =============================================================================
// TEMPLATE PLACEHOLDERS
// =============================================================================

/// Replaced with the absolute path of the source file
pub const SOURCE_PATH_PLACEHOLDER: &str = "{source_path}";

/// Replaced with the absolute path of the executable (or output directory)
pub const EXEC_PATH_PLACEHOLDER: &str = "{exec_path}";

// =============================================================================
// SAMPLE FETCHING
// =============================================================================

/// Default Baekjoon Online Judge base URL
pub const DEFAULT_BOJ_BASE_URL: &str = "https://www.acmicpc.net";

/// Default HTTP timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// User agent sent with problem page requests
pub const USER_AGENT: &str = concat!("boj-checker/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// CONFIGURATION FILE
// =============================================================================

/// Directory name under the user's config base directory
pub const CONFIG_DIR_NAME: &str = "boj-checker";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "boj_checker=warn";

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// File extensions of the built-in languages
pub mod file_extensions {
    pub const C: &str = "c";
    pub const CC: &str = "cc";
    pub const CPP: &str = "cpp";
    pub const RUST: &str = "rs";
    pub const GO: &str = "go";
    pub const ZIG: &str = "zig";
    pub const PYTHON: &str = "py";
    pub const JAVA: &str = "java";

    /// All built-in extensions
    pub const ALL: &[&str] = &[C, CC, CPP, RUST, GO, ZIG, PYTHON, JAVA];
}

// =============================================================================
// EXIT STATUSES
// =============================================================================

/// Process exit statuses of the CLI
pub mod exit_status {
    /// Every sample accepted
    pub const ALL_ACCEPTED: u8 = 0;
    /// At least one sample failed
    pub const SAMPLE_FAILED: u8 = 1;
    /// The session could not run to completion
    pub const FATAL: u8 = 2;
}
