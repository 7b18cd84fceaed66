use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    CategoryCount, CreateReportImage, LatestReport, Report, ReportFields, ReportImage,
    ReportListing, ReportSummary,
};
use crate::shared::types::PageQuery;

const REPORT_COLUMNS: &str = "id, title, url, category, description, summary, toc, highlights, \
     methodology, meta_title, meta_desc, meta_keyword, pages, cover_img, created_date, faqs";

const LISTING_COLUMNS: &str = "id, url, category, summary, title, pages, created_date";

const IMAGE_COLUMNS: &str = "id, report_id, img_name, img_alt";

/// `created_date` is free text; ordering reads it as a timestamp
const ORDER_BY_CREATED_DESC: &str = "ORDER BY CAST(created_date AS TIMESTAMP) DESC";

/// Reject a missing category before it reaches the store
fn require_category(category: &str) -> Result<&str> {
    if category.is_empty() {
        return Err(AppError::NotFound("Category not found".to_string()));
    }
    Ok(category)
}

/// `%keyword%` for an ILIKE substring match
fn title_pattern(keyword: &str) -> String {
    format!("%{}%", keyword)
}

/// Service for report and report image operations
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every report, unpaginated
    pub async fn list_all(&self) -> Result<Vec<ReportSummary>> {
        let query = "SELECT id, url, category, summary, title FROM reports ORDER BY id";

        sqlx::query_as::<_, ReportSummary>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Number of reports per distinct category
    pub async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        let query = r#"
            SELECT category, COUNT(category) AS count
            FROM reports
            GROUP BY category
            ORDER BY category
        "#;

        sqlx::query_as::<_, CategoryCount>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports per category: {:?}", e);
                AppError::Database(e)
            })
    }

    /// One page of reports, newest creation date first
    pub async fn list_latest(&self, page: &PageQuery) -> Result<Vec<LatestReport>> {
        let query = format!(
            r#"
            SELECT id, url, category, summary, title, pages, cover_img, created_date
            FROM reports
            {}
            LIMIT $1 OFFSET $2
            "#,
            ORDER_BY_CREATED_DESC
        );

        sqlx::query_as::<_, LatestReport>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list latest reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// One page of reports whose title contains `keyword`, ignoring case
    pub async fn search(&self, keyword: &str, page: &PageQuery) -> Result<Vec<ReportListing>> {
        let query = format!(
            r#"
            SELECT {}
            FROM reports
            WHERE title ILIKE $1
            {}
            LIMIT $2 OFFSET $3
            "#,
            LISTING_COLUMNS, ORDER_BY_CREATED_DESC
        );

        sqlx::query_as::<_, ReportListing>(&query)
            .bind(title_pattern(keyword))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// One page of reports in exactly `category`
    pub async fn list_by_category(
        &self,
        category: &str,
        page: &PageQuery,
    ) -> Result<Vec<ReportListing>> {
        let category = require_category(category)?;

        let query = format!(
            r#"
            SELECT {}
            FROM reports
            WHERE category = $1
            {}
            LIMIT $2 OFFSET $3
            "#,
            LISTING_COLUMNS, ORDER_BY_CREATED_DESC
        );

        sqlx::query_as::<_, ReportListing>(&query)
            .bind(category)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports by category: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Full report, or `None` when the id is unknown
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Report>> {
        let query = format!("SELECT {} FROM reports WHERE id = $1", REPORT_COLUMNS);

        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report by id: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Images of an existing report, oldest first
    pub async fn list_images(&self, report_id: i64) -> Result<Vec<ReportImage>> {
        if self.get_by_id(report_id).await?.is_none() {
            return Err(AppError::NotFound("Report not found".to_string()));
        }

        let query = format!(
            "SELECT {} FROM report_images WHERE report_id = $1 ORDER BY id",
            IMAGE_COLUMNS
        );

        sqlx::query_as::<_, ReportImage>(&query)
            .bind(report_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list report images: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Insert a report, then each of its images.
    ///
    /// Every statement commits on its own. If an image insert fails the report and
    /// the images inserted before it stay in place.
    pub async fn create(
        &self,
        fields: &ReportFields,
        images: &[CreateReportImage],
    ) -> Result<(Report, Vec<ReportImage>)> {
        let query = format!(
            r#"
            INSERT INTO reports (
                title, url, category, description, summary, toc, highlights, methodology,
                meta_title, meta_desc, meta_keyword, pages, cover_img, created_date, faqs
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        let report = sqlx::query_as::<_, Report>(&query)
            .bind(&fields.title)
            .bind(&fields.url)
            .bind(&fields.category)
            .bind(&fields.description)
            .bind(&fields.summary)
            .bind(&fields.toc)
            .bind(&fields.highlights)
            .bind(&fields.methodology)
            .bind(&fields.meta_title)
            .bind(&fields.meta_desc)
            .bind(&fields.meta_keyword)
            .bind(&fields.pages)
            .bind(&fields.cover_img)
            .bind(&fields.created_date)
            .bind(&fields.faqs)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created report: {} ({})", report.id, report.url);

        let mut stored = Vec::with_capacity(images.len());
        for image in images {
            let stored_image = self.insert_image(report.id, image).await.map_err(|e| {
                tracing::error!(
                    "Report {} kept with {} of {} images; image insert failed",
                    report.id,
                    stored.len(),
                    images.len()
                );
                e
            })?;
            stored.push(stored_image);
        }

        Ok((report, stored))
    }

    async fn insert_image(&self, report_id: i64, image: &CreateReportImage) -> Result<ReportImage> {
        let query = format!(
            r#"
            INSERT INTO report_images (report_id, img_name, img_alt)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        );

        let stored = sqlx::query_as::<_, ReportImage>(&query)
            .bind(report_id)
            .bind(image.resolve_name(report_id))
            .bind(&image.img_alt)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create report image: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::debug!(
            "Created image {} for report {}: {}",
            stored.id,
            report_id,
            stored.img_name
        );

        Ok(stored)
    }

    /// Overwrite every mutable column of an existing report
    pub async fn update(&self, id: i64, fields: &ReportFields) -> Result<Report> {
        let query = format!(
            r#"
            UPDATE reports
            SET title = $1,
                url = $2,
                category = $3,
                description = $4,
                summary = $5,
                toc = $6,
                highlights = $7,
                methodology = $8,
                meta_title = $9,
                meta_desc = $10,
                meta_keyword = $11,
                pages = $12,
                cover_img = $13,
                created_date = $14,
                faqs = $15
            WHERE id = $16
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        let report = sqlx::query_as::<_, Report>(&query)
            .bind(&fields.title)
            .bind(&fields.url)
            .bind(&fields.category)
            .bind(&fields.description)
            .bind(&fields.summary)
            .bind(&fields.toc)
            .bind(&fields.highlights)
            .bind(&fields.methodology)
            .bind(&fields.meta_title)
            .bind(&fields.meta_desc)
            .bind(&fields.meta_keyword)
            .bind(&fields.pages)
            .bind(&fields.cover_img)
            .bind(&fields.created_date)
            .bind(&fields.faqs)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        tracing::info!("Updated report: {}", report.id);

        Ok(report)
    }

    /// Replace only the cover image reference
    pub async fn update_cover(&self, id: i64, cover_img: &str) -> Result<Report> {
        let query = format!(
            "UPDATE reports SET cover_img = $1 WHERE id = $2 RETURNING {}",
            REPORT_COLUMNS
        );

        let report = sqlx::query_as::<_, Report>(&query)
            .bind(cover_img)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report cover: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        tracing::info!("Updated cover of report: {}", report.id);

        Ok(report)
    }

    /// Remove a report; its images go with it through the foreign key cascade
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Report not found".to_string()));
        }

        tracing::info!("Deleted report: {}", id);

        Ok(())
    }
}
