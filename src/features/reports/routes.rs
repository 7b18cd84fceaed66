use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// Static segments (`latest`, `search`, `category/category_count`) win over
/// the `{id}` and `{category}` captures.
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route(
            "/api/reports/category/category_count",
            get(handlers::get_category_count),
        )
        .route("/api/reports/latest", get(handlers::list_latest_reports))
        .route("/api/reports/search", get(handlers::search_reports))
        .route(
            "/api/reports/category/{category}",
            get(handlers::list_reports_by_category),
        )
        .route(
            "/api/reports/cover/{id}",
            put(handlers::update_report_cover),
        )
        .route(
            "/api/reports/{id}",
            get(handlers::get_report)
                .put(handlers::update_report)
                .delete(handlers::delete_report),
        )
        .route(
            "/api/reports/{id}/images",
            get(handlers::list_report_images),
        )
        .with_state(service)
}
