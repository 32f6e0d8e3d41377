//! HTTP request handlers
//!
//! Implements the REST endpoints: audio reversal upload, status check-ins,
//! and health. Handlers validate the request shape, then delegate; every
//! failure funnels through the `Error` type's response translation, so
//! callers always see a uniform `{"error": ...}` body with a fixed status
//! per failure kind.

use crate::api::server::AppContext;
use crate::db::status::{self, StatusCheck};
use crate::error::{Error, Result};
use crate::pipeline;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    client_name: String,
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "retrograde".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// API Root
// ============================================================================

/// GET /api/ - Root greeting
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

// ============================================================================
// Status Check Endpoints
// ============================================================================

/// POST /api/status - Record a client check-in
pub async fn create_status_check(
    State(ctx): State<AppContext>,
    Json(input): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>> {
    let created = status::insert_status_check(&ctx.db_pool, &input.client_name).await?;
    Ok(Json(created))
}

/// GET /api/status - List recorded check-ins
pub async fn list_status_checks(State(ctx): State<AppContext>) -> Result<Json<Vec<StatusCheck>>> {
    let checks = status::list_status_checks(&ctx.db_pool).await?;
    Ok(Json(checks))
}

// ============================================================================
// Audio Reversal Endpoint
// ============================================================================

/// POST /api/reverse-audio - Reverse an uploaded audio file
///
/// Accepts a multipart form with a single `file` field, runs the upload
/// through the reversal pipeline, and responds with the reversed audio as
/// a WAV attachment under its generated filename.
/// Translate a multipart read failure.
///
/// A body-limit overrun can surface at either read call depending on how
/// the body is chunked, so both go through here: overruns become the
/// upload-size policy error, anything else is a malformed request.
fn multipart_read_error(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::UploadTooLarge("upload exceeds the configured size limit".to_string())
    } else {
        Error::BadRequest(format!("malformed multipart body: {}", e))
    }
}

pub async fn reverse_audio(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    // ------------------------------------------------------------------
    // Pull the file field out of the multipart body
    // ------------------------------------------------------------------
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_read_error)?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().map(|name| name.to_string());
            let data = field.bytes().await.map_err(multipart_read_error)?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| Error::BadRequest("missing multipart field 'file'".to_string()))?;

    if data.len() > ctx.config.max_upload_bytes {
        return Err(Error::UploadTooLarge(format!(
            "upload of {} bytes exceeds the {} byte limit",
            data.len(),
            ctx.config.max_upload_bytes
        )));
    }

    // ------------------------------------------------------------------
    // Run the pipeline and serve the stored artifact back
    // ------------------------------------------------------------------
    let artifact =
        pipeline::reverse_upload(&ctx.config.work_dir, &ctx.store, data, filename.as_deref())
            .await?;

    let body = ctx.store.fetch(&artifact.filename).await?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];

    Ok((headers, body))
}
