//! Reversal pipeline
//!
//! Drives one upload through the full sequence: workspace acquire, write
//! input, decode, reverse, encode, move to the output store, release the
//! workspace. Stage boundaries are where failures are classified; whatever
//! happens, the workspace is torn down before the result is returned.
//!
//! Decode and encode are CPU-bound, so they run on a blocking thread via
//! `spawn_blocking` rather than stalling the async runtime.

use crate::audio::{reverse, AudioDecoder, WavEncoder};
use crate::error::{Error, Result};
use crate::storage::{OutputStore, StoredArtifact, Workspace};
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

/// Reverse one uploaded audio byte stream and store the result.
///
/// On success the returned [`StoredArtifact`] names a complete WAV in the
/// output store. On any failure nothing is stored, and in both cases the
/// request's scratch directory is gone by the time this returns.
pub async fn reverse_upload(
    work_root: &Path,
    store: &OutputStore,
    data: Vec<u8>,
    original_filename: Option<&str>,
) -> Result<StoredArtifact> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] reversing upload ({} bytes, name: {})",
        request_id,
        data.len(),
        original_filename.unwrap_or("<none>")
    );

    let workspace = Workspace::acquire(work_root).await?;

    let result = run_stages(request_id, &workspace, store, data, original_filename).await;

    // Cleanup happens on success and failure alike. A cleanup error is
    // logged but never masks the pipeline outcome.
    if let Err(e) = workspace.release().await {
        warn!("[{}] workspace cleanup failed: {}", request_id, e);
    }

    match &result {
        Ok(artifact) => info!("[{}] stored {}", request_id, artifact.filename),
        Err(e) => info!("[{}] failed: {}", request_id, e),
    }
    result
}

async fn run_stages(
    request_id: Uuid,
    workspace: &Workspace,
    store: &OutputStore,
    data: Vec<u8>,
    original_filename: Option<&str>,
) -> Result<StoredArtifact> {
    // Keep the upload's extension so the decoder gets its format hint
    let extension = original_filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");

    let input_path = workspace.file(&format!("input.{}", extension));
    tokio::fs::write(&input_path, &data).await.map_err(|e| {
        Error::ResourceUnavailable(format!("cannot write upload to workspace: {}", e))
    })?;
    drop(data);

    let output_path = workspace.file("reversed.wav");

    let decode_input = input_path.clone();
    let encode_output = output_path.clone();
    let (frames, sample_rate, channels) = tokio::task::spawn_blocking(move || {
        let decoded = AudioDecoder::decode_file(&decode_input)?;
        let reversed = reverse::reverse(&decoded);
        WavEncoder::encode_file(&reversed, &encode_output)?;
        Ok::<_, Error>((
            reversed.frame_count(),
            reversed.sample_rate,
            reversed.channels,
        ))
    })
    .await
    .map_err(|e| Error::Internal(format!("audio processing task failed: {}", e)))??;

    info!(
        "[{}] reversed {} frames ({} Hz, {} channel(s))",
        request_id, frames, sample_rate, channels
    );

    store.store_file(&output_path).await
}
