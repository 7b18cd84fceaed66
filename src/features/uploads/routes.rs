use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::handlers::upload_image;
use crate::features::uploads::services::ImageIngestService;

/// Create routes for the image upload feature
///
/// Mounted under the reports collection root next to the report routes.
pub fn routes(service: Arc<ImageIngestService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/reports/upload",
            post(upload_image).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(service)
}
