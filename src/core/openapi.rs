use utoipa::{Modify, OpenApi};

use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::get_category_count,
        reports_handlers::report_handler::list_latest_reports,
        reports_handlers::report_handler::search_reports,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::list_report_images,
        reports_handlers::report_handler::list_reports_by_category,
        reports_handlers::report_handler::create_report,
        reports_handlers::report_handler::update_report,
        reports_handlers::report_handler::update_report_cover,
        reports_handlers::report_handler::delete_report,
        // Uploads
        uploads_handlers::upload_handler::upload_image,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::CreateReportImageDto,
            reports_dtos::CreateReportWithImagesDto,
            reports_dtos::UpdateReportDto,
            reports_dtos::UpdateCoverDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportImageResponseDto,
            reports_dtos::ReportWithImagesDto,
            reports_dtos::ReportListDto,
            reports_dtos::CategoryReportListDto,
            reports_dtos::LatestReportListDto,
            reports_dtos::CategoryCountDto,
            ApiResponse<Vec<reports_dtos::ReportListDto>>,
            ApiResponse<Vec<reports_dtos::CategoryCountDto>>,
            ApiResponse<Vec<reports_dtos::LatestReportListDto>>,
            ApiResponse<Vec<reports_dtos::CategoryReportListDto>>,
            ApiResponse<Vec<reports_dtos::ReportImageResponseDto>>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<reports_dtos::ReportWithImagesDto>,
            // Uploads
            uploads_dtos::UploadImageDto,
        )
    ),
    tags(
        (name = "reports", description = "Market research reports and their images"),
        (name = "uploads", description = "Image upload and thumbnailing"),
    ),
    info(
        title = "Report Catalog API",
        version = "0.1.0",
        description = "Catalog of market research reports and their images",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/reports",
            "/api/reports/latest",
            "/api/reports/search",
            "/api/reports/{id}",
            "/api/reports/category/{category}",
            "/api/reports/category/category_count",
            "/api/reports/upload",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "d".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
