use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    CategoryCountDto, CategoryReportListDto, CreateReportWithImagesDto, LatestReportListDto,
    ReportImageResponseDto, ReportListDto, ReportResponseDto, ReportWithImagesDto,
    SearchReportsQuery, UpdateCoverDto, UpdateReportDto,
};
use crate::features::reports::models::{CreateReportImage, ReportFields};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta, PageQuery};

/// The path and the body must name the same report
fn ensure_same_id(path_id: i64, body_id: i64) -> Result<()> {
    if path_id != body_id {
        return Err(AppError::BadRequest(format!(
            "Report id in body ({}) does not match id in path ({})",
            body_id, path_id
        )));
    }
    Ok(())
}

/// List every report
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportListDto>>),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportListDto>>>> {
    let reports: Vec<ReportListDto> = service
        .list_all()
        .await?
        .into_iter()
        .map(ReportListDto::from)
        .collect();
    let total = reports.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Count reports per category
#[utoipa::path(
    get,
    path = "/api/reports/category/category_count",
    responses(
        (status = 200, description = "Report count per category", body = ApiResponse<Vec<CategoryCountDto>>),
    ),
    tag = "reports"
)]
pub async fn get_category_count(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<CategoryCountDto>>>> {
    let counts = service.category_counts().await?;
    let dtos: Vec<CategoryCountDto> = counts.into_iter().map(|c| c.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Latest reports by creation date, paginated
#[utoipa::path(
    get,
    path = "/api/reports/latest",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of latest reports", body = ApiResponse<Vec<LatestReportListDto>>),
        (status = 400, description = "Missing or malformed page parameters")
    ),
    tag = "reports"
)]
pub async fn list_latest_reports(
    State(service): State<Arc<ReportService>>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<LatestReportListDto>>>> {
    let reports = service.list_latest(&page).await?;
    let dtos: Vec<LatestReportListDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Search report titles, paginated
#[utoipa::path(
    get,
    path = "/api/reports/search",
    params(SearchReportsQuery),
    responses(
        (status = 200, description = "Page of matching reports", body = ApiResponse<Vec<CategoryReportListDto>>),
        (status = 400, description = "Missing or malformed query parameters")
    ),
    tag = "reports"
)]
pub async fn search_reports(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<SearchReportsQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryReportListDto>>>> {
    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let reports = service.search(&query.keyword, &page).await?;
    let dtos: Vec<CategoryReportListDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a report by id
///
/// An unknown id answers 200 with `data: null`.
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report, or null data when absent", body = ApiResponse<ReportResponseDto>),
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(
        report.map(ReportResponseDto::from),
        None,
        None,
    )))
}

/// List the images of a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/images",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Images of the report", body = ApiResponse<Vec<ReportImageResponseDto>>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn list_report_images(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ReportImageResponseDto>>>> {
    let images = service.list_images(id).await?;
    let dtos: Vec<ReportImageResponseDto> = images.into_iter().map(|i| i.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Reports in a category, paginated
#[utoipa::path(
    get,
    path = "/api/reports/category/{category}",
    params(
        ("category" = String, Path, description = "Exact category name"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of reports in the category", body = ApiResponse<Vec<CategoryReportListDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "reports"
)]
pub async fn list_reports_by_category(
    State(service): State<Arc<ReportService>>,
    Path(category): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryReportListDto>>>> {
    let reports = service.list_by_category(&category, &page).await?;
    let dtos: Vec<CategoryReportListDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Create a report together with its images
///
/// Each `XXX` in an image name is replaced by the new report's id.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportWithImagesDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportWithImagesDto>),
        (status = 400, description = "Malformed body")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportWithImagesDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportWithImagesDto>>)> {
    let fields = ReportFields::from(dto.report);
    let images: Vec<CreateReportImage> = dto.images.into_iter().map(|i| i.into()).collect();

    let (report, stored) = service.create(&fields, &images).await?;
    let created = ReportWithImagesDto {
        report: report.into(),
        images: stored.into_iter().map(|i| i.into()).collect(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Report added successfully".to_string()),
            None,
        )),
    ))
}

/// Replace every field of a report
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Malformed body or id mismatch"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn update_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    ensure_same_id(id, dto.id)?;

    let report = service.update(id, &ReportFields::from(dto)).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Replace the cover image of a report
#[utoipa::path(
    put,
    path = "/api/reports/cover/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateCoverDto,
    responses(
        (status = 200, description = "Cover updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Malformed body or id mismatch"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn update_report_cover(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCoverDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    ensure_same_id(id, dto.id)?;

    let report = service.update_cover(id, &dto.cover_img).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Delete a report and its images
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::reports::routes;
    use crate::shared::test_helpers::lazy_pool;

    fn server() -> TestServer {
        let service = Arc::new(ReportService::new(lazy_pool()));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn update_body(id: i64) -> Value {
        json!({
            "id": id,
            "title": "t", "url": "u", "category": "c", "description": "d",
            "summary": "s", "toc": "toc", "highlights": "h", "methodology": "m",
            "meta_title": "mt", "meta_desc": "md", "meta_keyword": "mk",
            "pages": "10", "cover_img": "c.png", "created_date": "2024-01-01",
            "faqs": "[]"
        })
    }

    #[test]
    fn test_ensure_same_id() {
        assert!(ensure_same_id(3, 3).is_ok());
        assert!(matches!(ensure_same_id(3, 4), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_bad_request() {
        let response = server().put("/api/reports/1").json(&update_body(2)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_update_cover_with_mismatched_id_is_bad_request() {
        let response = server()
            .put("/api/reports/cover/7")
            .json(&json!({ "id": 8, "cover_img": "x.png" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_partial_update_body_is_rejected() {
        let mut body = update_body(1);
        body.as_object_mut().unwrap().remove("faqs");

        let response = server().put("/api/reports/1").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid report data"));
    }

    #[tokio::test]
    async fn test_create_with_malformed_json_is_bad_request() {
        let response = server()
            .post("/api/reports")
            .content_type("application/json")
            .bytes("{\"report\": ".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let response = server().get("/api/reports/not-a-number").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_latest_requires_page_parameters() {
        let response = server().get("/api/reports/latest?page=1").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
