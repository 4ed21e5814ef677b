//! User-facing output for a checking session.

use std::io::{self, Write};

use colored::{Color, Colorize};

use crate::error::AppError;
use crate::judge::{SampleResult, SessionSummary, Verdict};

/// Writes session progress to a terminal or buffer
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl Reporter<io::Stdout> {
    /// Colored stdout reporter; `colored` drops the escapes when `NO_COLOR` is set
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            color: true,
        }
    }
}

impl<W: Write> Reporter<W> {
    pub fn plain(out: W) -> Self {
        Self { out, color: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn header(&mut self, sample_count: usize) -> io::Result<()> {
        let plural = if sample_count == 1 { "" } else { "s" };
        writeln!(self.out, "Testing code for {sample_count} sample{plural}")
    }

    /// Announce a sample before it runs
    pub fn sample_started(&mut self, sample_number: usize) -> io::Result<()> {
        write!(self.out, "Testing sample #{sample_number}: ")?;
        self.out.flush()
    }

    pub fn sample_finished(&mut self, result: &SampleResult) -> io::Result<()> {
        let verdict = self.paint(result.verdict.code(), verdict_color(result.verdict));
        writeln!(self.out, "{verdict}")?;

        match result.verdict {
            Verdict::WrongAnswer => {
                let expected = self.paint(&result.expected_output, Color::Green);
                let actual = self.paint(&result.execution.output, Color::Red);
                writeln!(self.out, "Expected output >>>")?;
                writeln!(self.out, "{expected}")?;
                writeln!(self.out, "Actual output >>>")?;
                writeln!(self.out, "{actual}")?;
            }
            Verdict::RuntimeError => {
                writeln!(self.out, "Exit code: {}", result.execution.exit_code)?;
                if !result.execution.stderr.is_empty() {
                    let stderr = self.paint(&result.execution.stderr, Color::Red);
                    writeln!(self.out, "{stderr}")?;
                }
            }
            Verdict::Accepted | Verdict::TimeLimitExceeded => {}
        }
        Ok(())
    }

    /// Report an error that ended the session
    pub fn fatal(&mut self, error: &AppError) -> io::Result<()> {
        let marker = self.paint(error.marker(), Color::Blue);
        writeln!(self.out, "{marker}")?;

        match error {
            AppError::UnsupportedLanguage(_) => Ok(()),
            AppError::CompilationFailed { stderr, .. } => {
                if stderr.is_empty() {
                    Ok(())
                } else {
                    writeln!(self.out, "{}", stderr.trim_end())
                }
            }
            other => writeln!(self.out, "{other}"),
        }
    }

    pub fn summary(&mut self, summary: &SessionSummary) -> io::Result<()> {
        let counts = format!("{}/{}", summary.passed_count, summary.total_count);
        let color = if summary.all_passed() {
            Color::Green
        } else {
            Color::Red
        };
        let counts = self.paint(&counts, color);
        writeln!(self.out, "{counts} samples passed")
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Accepted => Color::Green,
        Verdict::WrongAnswer | Verdict::RuntimeError => Color::Red,
        Verdict::TimeLimitExceeded => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::ExecutionResult;

    fn result(sample_number: usize, expected: &str, output: &str, exit_code: i32) -> SampleResult {
        SampleResult::new(
            sample_number,
            expected.to_string(),
            ExecutionResult {
                output: output.to_string(),
                exit_code,
                stderr: if exit_code != 0 { "boom".to_string() } else { String::new() },
                elapsed_ms: 1,
                timed_out: false,
            },
        )
    }

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = Reporter::plain(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_header_pluralization() {
        assert_eq!(render(|r| r.header(1)), "Testing code for 1 sample\n");
        assert_eq!(render(|r| r.header(3)), "Testing code for 3 samples\n");
        assert_eq!(render(|r| r.header(0)), "Testing code for 0 samples\n");
    }

    #[test]
    fn test_accepted_line() {
        let out = render(|r| {
            r.sample_started(1)?;
            r.sample_finished(&result(1, "3\n", "3\n", 0))
        });
        assert_eq!(out, "Testing sample #1: AC\n");
    }

    #[test]
    fn test_wrong_answer_shows_both_outputs() {
        let out = render(|r| r.sample_finished(&result(2, "3", "4", 0)));
        assert_eq!(out, "WA\nExpected output >>>\n3\nActual output >>>\n4\n");
    }

    #[test]
    fn test_runtime_error_shows_exit_code() {
        let out = render(|r| r.sample_finished(&result(1, "3", "", 7)));
        assert_eq!(out, "RTE\nExit code: 7\nboom\n");
    }

    #[test]
    fn test_fatal_markers() {
        let out = render(|r| r.fatal(&AppError::UnsupportedLanguage("xyz".into())));
        assert_eq!(out, "Unknown language\n");

        let out = render(|r| {
            r.fatal(&AppError::CompilationFailed {
                exit_code: 1,
                stderr: "main.c:1: error\n".into(),
            })
        });
        assert_eq!(out, "Compilation Error\nmain.c:1: error\n");
    }

    #[test]
    fn test_summary_line() {
        let results = [result(1, "1", "1", 0), result(2, "2", "9", 0)];
        let out = render(|r| r.summary(&SessionSummary::from_results(&results)));
        assert_eq!(out, "1/2 samples passed\n");
    }
}
