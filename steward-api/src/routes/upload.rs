//! Multipart image upload for member avatars and the app logo.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// POST /api/upload
///
/// Accepts a single `file` field. The stored name is a fresh uuid with an
/// extension derived from the declared content type; the response carries the
/// public URL under `/uploads/`.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Value>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Missing content type".to_string()))?;
        let extension = extension_for(&content_type).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Unsupported image type '{content_type}', expected jpeg, png, gif or webp"
            ))
        })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Could not read upload: {e}")))?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::BadRequest(
                "File exceeds the 5 MB limit".to_string(),
            ));
        }

        tokio::fs::create_dir_all(&state.config.upload_dir).await?;
        let filename = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(state.config.upload_dir.join(&filename), &data).await?;

        return Ok((
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "url": format!("/uploads/{filename}"),
            })),
        ));
    }

    Err(ApiError::BadRequest("Missing file field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for("text/html"), None);
    }
}
