//! Sample case model

use serde::{Deserialize, Serialize};

/// One sample input/expected-output pair of a problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCase {
    pub input: String,
    pub expected_output: String,
}

impl SampleCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Get a preview of the input (truncated)
    pub fn input_preview(&self, max_chars: usize) -> String {
        preview(&self.input, max_chars)
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
