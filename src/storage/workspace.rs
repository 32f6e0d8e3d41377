//! Per-request scratch directories
//!
//! Every upload gets its own directory under the configured work root,
//! named by a fresh UUID so concurrent requests can never collide. The
//! directory lives exactly as long as the request: [`Workspace::release`]
//! removes it on the normal paths, and a `Drop` backstop removes it if the
//! task panics or is cancelled, so no partial decode or encode output
//! survives a failed request.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// An owned scratch directory for a single request.
///
/// Holding a `Workspace` is holding the directory; dropping it (or calling
/// [`release`](Self::release)) deletes the directory and everything in it.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    released: bool,
}

impl Workspace {
    /// Create a fresh, uniquely named scratch directory under `root`.
    ///
    /// On failure the returned error carries a summary only; the failing
    /// path is logged here and stays out of anything a caller might show.
    pub async fn acquire(root: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(root).await.map_err(|e| {
            error!("cannot prepare work root {}: {}", root.display(), e);
            Error::ResourceUnavailable("workspace allocation failed".to_string())
        })?;

        let path = root.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir(&path).await.map_err(|e| {
            error!("cannot create workspace {}: {}", path.display(), e);
            Error::ResourceUnavailable("workspace allocation failed".to_string())
        })?;

        debug!("acquired workspace {}", path.display());
        Ok(Self {
            path,
            released: false,
        })
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the workspace directory and all its contents.
    ///
    /// Consumes the workspace, so a double release cannot be written. If
    /// removal fails (or the future is cancelled mid-removal) the `Drop`
    /// backstop takes one more swing at it.
    pub async fn release(mut self) -> Result<()> {
        tokio::fs::remove_dir_all(&self.path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to remove workspace {}: {}", self.path.display(), e),
            ))
        })?;
        self.released = true;
        debug!("released workspace {}", self.path.display());
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // Synchronous removal: Drop runs on panic and cancellation paths
        // where no async context is available.
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "failed to clean up workspace {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}
