//! Command templates
//!
//! A template is an argument vector whose tokens may contain the
//! `{source_path}` and `{exec_path}` placeholders. Rendering never goes
//! through a shell: every token becomes exactly one process argument.

use std::ffi::{OsStr, OsString};
use std::path::{self, Path};

use serde::{Deserialize, Serialize};

use crate::constants::{EXEC_PATH_PLACEHOLDER, SOURCE_PATH_PLACEHOLDER};
use crate::error::{AppError, AppResult};

/// Ordered list of command tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(Vec<String>);

impl CommandTemplate {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Render the template into a concrete argument vector.
    ///
    /// Both paths are made absolute against the current directory before
    /// substitution (lexically, symlinks are not resolved). Path bytes are
    /// passed through untouched, whether or not they are valid UTF-8.
    pub fn render(&self, source_path: &Path, exec_path: &Path) -> AppResult<Vec<OsString>> {
        let source = absolute(source_path)?;
        let exec = absolute(exec_path)?;

        Ok(self
            .0
            .iter()
            .map(|token| substitute(token, source.as_os_str(), exec.as_os_str()))
            .collect())
    }
}

fn absolute(path: &Path) -> AppResult<std::path::PathBuf> {
    path::absolute(path).map_err(|e| {
        AppError::Internal(format!("cannot absolutize {}: {}", path.display(), e))
    })
}

/// Replace placeholders in a single left-to-right pass.
///
/// Substituted text is never scanned again, so a path that itself contains
/// `{exec_path}` or `{source_path}` is inserted literally.
fn substitute(token: &str, source: &OsStr, exec: &OsStr) -> OsString {
    let mut rendered = OsString::with_capacity(token.len());
    let mut rest = token;

    while let Some(open) = rest.find('{') {
        rendered.push(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix(SOURCE_PATH_PLACEHOLDER) {
            rendered.push(source);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(EXEC_PATH_PLACEHOLDER) {
            rendered.push(exec);
            rest = after;
        } else {
            rendered.push("{");
            rest = &tail[1..];
        }
    }
    rendered.push(rest);
    rendered
}

/// Split a rendered argument vector into program and arguments.
pub fn split_program(argv: &[OsString]) -> AppResult<(&OsStr, &[OsString])> {
    match argv.split_first() {
        Some((program, args)) => Ok((program.as_os_str(), args)),
        None => Err(AppError::Internal("empty command line".to_string())),
    }
}
