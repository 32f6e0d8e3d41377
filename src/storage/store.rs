//! Output artifact store
//!
//! Finished reversals land in one shared directory under collision-proof
//! names (`reversed_<uuid>.wav`). Artifacts are moved in from a request
//! workspace only after encoding has fully succeeded, so everything in the
//! store is a complete, playable file.

use crate::audio::{WAV_CONTENT_TYPE, WAV_EXTENSION};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use uuid::Uuid;

/// A completed artifact in the output store.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    /// Unique filename within the store, e.g. `reversed_<uuid>.wav`.
    pub filename: String,
    /// MIME type of the artifact.
    pub content_type: &'static str,
}

/// Directory of finished reversal outputs.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    /// Open (creating if needed) the output directory.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            error!("cannot prepare output directory {}: {}", dir.display(), e);
            Error::ResourceUnavailable("output store unavailable".to_string())
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Promote a finished WAV from a workspace into the store under a
    /// fresh unique name.
    ///
    /// `src` must be a fully written file; the copy happens before the
    /// workspace is torn down, so a failure here leaves no store entry.
    /// Path detail on failure goes to the log, not the returned error.
    pub async fn store_file(&self, src: &Path) -> Result<StoredArtifact> {
        let filename = format!("reversed_{}.{}", Uuid::new_v4(), WAV_EXTENSION);
        let dest = self.dir.join(&filename);

        tokio::fs::copy(src, &dest).await.map_err(|e| {
            error!("cannot store artifact {}: {}", dest.display(), e);
            Error::ResourceUnavailable("artifact storage failed".to_string())
        })?;

        debug!("stored artifact {}", dest.display());
        Ok(StoredArtifact {
            filename,
            content_type: WAV_CONTENT_TYPE,
        })
    }

    /// Read a stored artifact back by filename.
    ///
    /// Rejects anything that is not a bare filename, so a crafted name can
    /// never escape the store directory.
    pub async fn fetch(&self, filename: &str) -> Result<Vec<u8>> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return Err(Error::NotFound(format!("no such artifact: {}", filename)));
        }

        let path = self.dir.join(filename);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(format!("no such artifact: {}", filename)))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}
