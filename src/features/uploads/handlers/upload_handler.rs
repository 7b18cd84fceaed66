use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::error::AppError;
use crate::features::uploads::dtos::UploadImageDto;
use crate::features::uploads::services::ImageIngestService;
use crate::shared::types::ApiResponse;

/// Upload an image
///
/// Accepts multipart/form-data with a `file` field. The image is shrunk so that
/// neither side exceeds the configured maximum and stored under a timestamp name.
#[utoipa::path(
    post,
    path = "/api/reports/upload",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image file to store",
    ),
    responses(
        (status = 200, description = "Image stored; the message names the stored path"),
        (status = 400, description = "No file, or the file could not be stored")
    )
)]
pub async fn upload_image(
    State(service): State<Arc<ImageIngestService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart field: {}", e);
        AppError::UploadFailed
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let data = field.bytes().await.map_err(|e| {
            warn!("Failed to read upload {}: {}", file_name, e);
            AppError::UploadFailed
        })?;

        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let stored = service.ingest(&file_name, data).await.map_err(|e| {
        warn!("Upload of {} failed: {}", file_name, e);
        AppError::UploadFailed
    })?;

    let message = format!(
        "Successfully uploaded and compressed {} to {}",
        stored.original_filename,
        stored.path.display()
    );

    Ok(Json(ApiResponse::success(None, Some(message), None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::path::Path;

    use crate::core::config::UploadConfig;
    use crate::features::uploads::routes;
    use crate::shared::constants::UPLOAD_FAILED_MESSAGE;
    use crate::shared::test_helpers::png_bytes;

    fn server(dir: &Path) -> TestServer {
        let service = Arc::new(ImageIngestService::new(&UploadConfig {
            dir: dir.to_path_buf(),
            max_dimension: 800,
        }));
        TestServer::new(routes::routes(service, 10 * 1024 * 1024)).unwrap()
    }

    fn file_form(name: &str, bytes: Vec<u8>) -> MultipartForm {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(bytes).file_name(name).mime_type("image/png"),
        )
    }

    #[tokio::test]
    async fn test_upload_stores_resized_image() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(dir.path())
            .post("/api/reports/upload")
            .multipart(file_form("banner.png", png_bytes(1600, 900)))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Successfully uploaded and compressed banner.png to "));

        let stored_path = message.rsplit(" to ").next().unwrap();
        let saved = image::open(stored_path).unwrap();
        assert_eq!((saved.width(), saved.height()), (800, 450));
    }

    #[tokio::test]
    async fn test_corrupt_upload_returns_generic_message() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(dir.path())
            .post("/api/reports/upload")
            .multipart(file_form("broken.png", b"\x89PNG garbage".to_vec()))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], UPLOAD_FAILED_MESSAGE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let form = MultipartForm::new().add_text("caption", "no file here");
        let response = server(dir.path())
            .post("/api/reports/upload")
            .multipart(form)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "File is required");
    }
}
