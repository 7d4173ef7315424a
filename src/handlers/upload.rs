use crate::{
    AppState,
    error::ApiError,
    models::{ApiResponse, PresignedUrlRequest, PresignedUrlResponse},
    storage::sanitize_key,
};
use axum::{Json, extract::State};
use uuid::Uuid;

/// get_presigned_url
///
/// [Authenticated Route] Issues a short-lived signed URL for a direct
/// client-to-bucket upload, keeping media traffic off the API server.
///
/// The object key is a fresh UUID under the `uploads/` prefix; only the file
/// extension is derived from the client-supplied name, and it is sanitized
/// before use.
#[utoipa::path(
    post,
    path = "/api/v1/upload",
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "Upload URL", body = PresignedUrlResponse),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn get_presigned_url(
    State(state): State<AppState>,
    Json(payload): Json<PresignedUrlRequest>,
) -> Result<Json<ApiResponse<PresignedUrlResponse>>, ApiError> {
    if payload.filename.trim().is_empty() {
        return Err(ApiError::Validation("filename is required".to_string()));
    }
    if payload.file_type.trim().is_empty() {
        return Err(ApiError::Validation("file_type is required".to_string()));
    }

    let extension = std::path::Path::new(&payload.filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("bin");
    let object_key = sanitize_key(&format!("uploads/{}.{}", Uuid::new_v4(), extension));

    let upload_url = state
        .storage
        .presigned_upload_url(&object_key, &payload.file_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "presigned url generation failed");
            ApiError::Internal
        })?;

    Ok(Json(ApiResponse::ok(PresignedUrlResponse {
        upload_url,
        resource_key: object_key,
    })))
}
