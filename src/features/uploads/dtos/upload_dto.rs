use utoipa::ToSchema;

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to store; its extension picks the output format
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}
