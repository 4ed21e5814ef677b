//! Content-addressed build workspaces
//!
//! Each source file gets a directory named `<file name>-<sha256 of contents>`
//! under the workspace root. The same bytes under the same name always map
//! to the same directory. The directory lives for one session and is
//! removed through [`WorkspaceGuard`] on every exit path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use walkdir::WalkDir;

use crate::error::{AppError, AppResult};
use crate::utils::hash_file;

/// Directory name derived from a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creates and removes workspaces under a root directory
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Derive the workspace id from the current contents of `source_path`
    pub async fn name_for(&self, source_path: &Path) -> AppResult<WorkspaceId> {
        let file_name = source_path.file_name().ok_or_else(|| AppError::SourceFile {
            path: source_path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "path has no file name"),
        })?;

        let digest = hash_file(source_path)
            .await
            .map_err(|source| AppError::SourceFile {
                path: source_path.to_path_buf(),
                source,
            })?;

        Ok(WorkspaceId(format!("{}-{}", file_name.to_string_lossy(), digest)))
    }

    pub fn path_of(&self, id: &WorkspaceId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Create the workspace directory if it does not exist yet
    pub async fn ensure(&self, id: &WorkspaceId) -> AppResult<PathBuf> {
        let path = self.path_of(id);
        fs::create_dir_all(&path).await?;
        tracing::debug!(workspace = %path.display(), "Workspace ready");
        Ok(path)
    }

    /// Remove the workspace and everything below it.
    ///
    /// Entries that are already gone are skipped, so destroying a workspace
    /// twice (or one that was never created) succeeds. Other failures do not
    /// stop the walk; the first one is returned after everything else has
    /// been attempted.
    pub fn destroy(&self, id: &WorkspaceId) -> AppResult<()> {
        let path = self.path_of(id);
        let mut first_error: Option<std::io::Error> = None;

        for entry in WalkDir::new(&path).contents_first(true) {
            let result = match entry {
                Ok(entry) if entry.file_type().is_dir() => std::fs::remove_dir(entry.path()),
                Ok(entry) => std::fs::remove_file(entry.path()),
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        workspace = %path.display(),
                        error = %e,
                        "Failed to remove workspace entry"
                    );
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => {
                tracing::debug!(workspace = %path.display(), "Workspace removed");
                Ok(())
            }
        }
    }

    /// Hash the source once, create its workspace and hand back a guard
    /// that removes it when dropped.
    pub async fn acquire(&self, source_path: &Path) -> AppResult<WorkspaceGuard> {
        let id = self.name_for(source_path).await?;
        let path = self.ensure(&id).await?;
        Ok(WorkspaceGuard {
            manager: self.clone(),
            id,
            path,
            released: false,
        })
    }
}

/// Scoped ownership of one workspace directory.
///
/// The directory is removed exactly once: either by [`WorkspaceGuard::release`]
/// or, failing that, when the guard is dropped.
#[derive(Debug)]
pub struct WorkspaceGuard {
    manager: WorkspaceManager,
    id: WorkspaceId,
    path: PathBuf,
    released: bool,
}

impl WorkspaceGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the workspace now and report the outcome
    pub fn release(mut self) -> AppResult<()> {
        self.released = true;
        self.manager.destroy(&self.id)
    }
}

impl Drop for WorkspaceGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.manager.destroy(&self.id) {
            tracing::warn!(
                workspace = %self.path.display(),
                error = %e,
                "Failed to clean up workspace"
            );
        }
    }
}
