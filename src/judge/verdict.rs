//! Verdict types and determination logic

use serde::{Deserialize, Serialize};

use super::compare::outputs_match;
use super::executor::ExecutionResult;

/// Verdict for a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Output matches the expected answer
    Accepted,
    /// Output does not match expected
    WrongAnswer,
    /// Program exited with a nonzero code or was killed by a signal
    RuntimeError,
    /// Program hit the run timeout
    TimeLimitExceeded,
}

impl Verdict {
    /// Get short code for verdict
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Accepted => "AC",
            Verdict::WrongAnswer => "WA",
            Verdict::RuntimeError => "RTE",
            Verdict::TimeLimitExceeded => "TLE",
        }
    }

    /// Check if verdict is a failure (not accepted)
    pub fn is_failure(&self) -> bool {
        !matches!(self, Verdict::Accepted)
    }

    /// Classify one run against the expected output.
    ///
    /// Timeout is checked first, then the exit code, then the output.
    pub fn determine(expected: &str, execution: &ExecutionResult) -> Self {
        if execution.timed_out {
            Verdict::TimeLimitExceeded
        } else if execution.exit_code != 0 {
            Verdict::RuntimeError
        } else if outputs_match(expected, &execution.output) {
            Verdict::Accepted
        } else {
            Verdict::WrongAnswer
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of judging a single sample
#[derive(Debug, Clone)]
pub struct SampleResult {
    /// Sample number (1-indexed)
    pub sample_number: usize,

    /// Verdict for this sample
    pub verdict: Verdict,

    /// Expected output as provided by the sample
    pub expected_output: String,

    /// What the program did
    pub execution: ExecutionResult,
}

impl SampleResult {
    pub fn new(sample_number: usize, expected_output: String, execution: ExecutionResult) -> Self {
        let verdict = Verdict::determine(&expected_output, &execution);
        Self {
            sample_number,
            verdict,
            expected_output,
            execution,
        }
    }
}

/// Aggregated result for a session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Overall verdict
    pub verdict: Verdict,

    /// Number of accepted samples
    pub passed_count: usize,

    /// Total number of judged samples
    pub total_count: usize,
}

impl SessionSummary {
    /// Create summary from sample results
    pub fn from_results(results: &[SampleResult]) -> Self {
        let total_count = results.len();
        let passed_count = results
            .iter()
            .filter(|r| r.verdict == Verdict::Accepted)
            .count();

        let verdict = results
            .iter()
            .find(|r| r.verdict.is_failure())
            .map_or(Verdict::Accepted, |r| r.verdict);

        Self {
            verdict,
            passed_count,
            total_count,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed_count == self.total_count
    }
}
