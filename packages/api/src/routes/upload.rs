use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::validate_image_bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generous envelope for the whole multipart body; per-file size is
/// enforced against the configured limit below.
const BODY_LIMIT: usize = 32 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/images", post(upload_images))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct UploadImagesResponse {
    pub urls: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/upload/images",
    tag = "upload",
    responses(
        (status = 200, description = "Hosted image URLs", body = UploadImagesResponse),
        (status = 400, description = "Too many files or unsupported format"),
        (status = 413, description = "File exceeds the size limit"),
        (status = 503, description = "Image host not configured")
    ),
    security(("admin_password" = []))
)]
#[tracing::instrument(name = "POST /upload/images", skip(state, multipart))]
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadImagesResponse>, ApiError> {
    let host = state
        .image_host
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Image host not configured"))?;

    let mut urls = Vec::new();
    let mut count = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let declared_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;

        if data.is_empty() {
            continue;
        }

        count += 1;
        if count > host.max_files {
            return Err(ApiError::bad_request(format!(
                "Too many files, at most {} allowed",
                host.max_files
            )));
        }
        if data.len() > host.max_file_bytes {
            return Err(ApiError::payload_too_large(format!(
                "File exceeds the {} byte limit",
                host.max_file_bytes
            )));
        }

        // The declared content type is ignored; the bytes decide.
        let extension = validate_image_bytes(&data)
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        let file_name =
            declared_name.unwrap_or_else(|| format!("upload-{}.{}", count, extension));

        let url = host
            .upload(&file_name, data)
            .await
            .map_err(|e| ApiError::upstream("UPLOAD_ERROR", e))?;
        urls.push(url);
    }

    if urls.is_empty() {
        return Err(ApiError::bad_request("No files provided"));
    }

    tracing::info!(count = urls.len(), "Uploaded product images");
    Ok(Json(UploadImagesResponse { urls }))
}
