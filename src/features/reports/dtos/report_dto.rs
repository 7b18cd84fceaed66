use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::{
    CategoryCount, CreateReportImage, LatestReport, Report, ReportFields, ReportImage,
    ReportListing, ReportSummary,
};

// =============================================================================
// REQUESTS
// =============================================================================

/// Report fields submitted on creation
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReportDto {
    pub title: String,
    /// URL slug
    pub url: String,
    pub category: String,
    pub description: String,
    pub summary: String,
    /// Table of contents
    pub toc: String,
    pub highlights: String,
    pub methodology: String,
    pub meta_title: String,
    pub meta_desc: String,
    pub meta_keyword: String,
    /// Page count, stored as text
    pub pages: String,
    pub cover_img: String,
    /// Creation date as free text; must be castable to a timestamp for ordering
    #[schema(example = "2024-03-15")]
    pub created_date: String,
    pub faqs: String,
}

/// Image entry nested in a create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReportImageDto {
    /// Image name; every `XXX` is replaced by the new report's id
    #[schema(example = "reports/XXX/cover.png")]
    pub img_name: String,
    pub img_alt: Option<String>,
}

/// Body of `POST /api/reports`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReportWithImagesDto {
    pub report: CreateReportDto,
    pub images: Vec<CreateReportImageDto>,
}

/// Body of `PUT /api/reports/{id}`; every field is overwritten
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateReportDto {
    /// Must match the id in the path
    pub id: i64,
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: String,
    pub summary: String,
    pub toc: String,
    pub highlights: String,
    pub methodology: String,
    pub meta_title: String,
    pub meta_desc: String,
    pub meta_keyword: String,
    pub pages: String,
    pub cover_img: String,
    pub created_date: String,
    pub faqs: String,
}

/// Body of `PUT /api/reports/cover/{id}`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCoverDto {
    /// Must match the id in the path
    pub id: i64,
    pub cover_img: String,
}

/// Query of `GET /api/reports/search`
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchReportsQuery {
    /// Page number (1-indexed)
    pub page: i64,
    /// Number of items per page
    pub per_page: i64,
    /// Case-insensitive substring matched against the title
    pub keyword: String,
}

impl From<CreateReportDto> for ReportFields {
    fn from(dto: CreateReportDto) -> Self {
        Self {
            title: dto.title,
            url: dto.url,
            category: dto.category,
            description: dto.description,
            summary: dto.summary,
            toc: dto.toc,
            highlights: dto.highlights,
            methodology: dto.methodology,
            meta_title: dto.meta_title,
            meta_desc: dto.meta_desc,
            meta_keyword: dto.meta_keyword,
            pages: dto.pages,
            cover_img: dto.cover_img,
            created_date: dto.created_date,
            faqs: dto.faqs,
        }
    }
}

impl From<UpdateReportDto> for ReportFields {
    fn from(dto: UpdateReportDto) -> Self {
        Self {
            title: dto.title,
            url: dto.url,
            category: dto.category,
            description: dto.description,
            summary: dto.summary,
            toc: dto.toc,
            highlights: dto.highlights,
            methodology: dto.methodology,
            meta_title: dto.meta_title,
            meta_desc: dto.meta_desc,
            meta_keyword: dto.meta_keyword,
            pages: dto.pages,
            cover_img: dto.cover_img,
            created_date: dto.created_date,
            faqs: dto.faqs,
        }
    }
}

impl From<CreateReportImageDto> for CreateReportImage {
    fn from(dto: CreateReportImageDto) -> Self {
        Self {
            img_name: dto.img_name,
            img_alt: dto.img_alt,
        }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Full report record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: String,
    pub summary: String,
    pub toc: String,
    pub highlights: String,
    pub methodology: String,
    pub meta_title: String,
    pub meta_desc: String,
    pub meta_keyword: String,
    pub pages: String,
    pub cover_img: String,
    pub created_date: String,
    pub faqs: String,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            title: r.title,
            url: r.url,
            category: r.category,
            description: r.description,
            summary: r.summary,
            toc: r.toc,
            highlights: r.highlights,
            methodology: r.methodology,
            meta_title: r.meta_title,
            meta_desc: r.meta_desc,
            meta_keyword: r.meta_keyword,
            pages: r.pages,
            cover_img: r.cover_img,
            created_date: r.created_date,
            faqs: r.faqs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportImageResponseDto {
    pub id: i64,
    pub report_id: i64,
    pub img_name: String,
    pub img_alt: Option<String>,
}

impl From<ReportImage> for ReportImageResponseDto {
    fn from(i: ReportImage) -> Self {
        Self {
            id: i.id,
            report_id: i.report_id,
            img_name: i.img_name,
            img_alt: i.img_alt,
        }
    }
}

/// A freshly created report with the images stored for it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportWithImagesDto {
    pub report: ReportResponseDto,
    pub images: Vec<ReportImageResponseDto>,
}

/// Entry of the unpaginated listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportListDto {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub category: String,
    pub summary: String,
}

impl From<ReportSummary> for ReportListDto {
    fn from(r: ReportSummary) -> Self {
        Self {
            id: r.id,
            title: r.title,
            url: r.url,
            category: r.category,
            summary: r.summary,
        }
    }
}

/// Entry of the search and by-category listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryReportListDto {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub title: String,
    pub summary: String,
    pub pages: String,
    pub created_date: String,
}

impl From<ReportListing> for CategoryReportListDto {
    fn from(r: ReportListing) -> Self {
        Self {
            id: r.id,
            url: r.url,
            category: r.category,
            title: r.title,
            summary: r.summary,
            pages: r.pages,
            created_date: r.created_date,
        }
    }
}

/// Entry of the latest listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LatestReportListDto {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub title: String,
    pub summary: String,
    pub pages: String,
    pub cover_img: String,
    pub created_date: String,
}

impl From<LatestReport> for LatestReportListDto {
    fn from(r: LatestReport) -> Self {
        Self {
            id: r.id,
            url: r.url,
            category: r.category,
            title: r.title,
            summary: r.summary,
            pages: r.pages,
            cover_img: r.cover_img,
            created_date: r.created_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: String,
    pub count: i64,
}

impl From<CategoryCount> for CategoryCountDto {
    fn from(c: CategoryCount) -> Self {
        Self {
            category: c.category,
            count: c.count,
        }
    }
}
