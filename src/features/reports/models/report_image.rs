use sqlx::FromRow;

use crate::shared::constants::IMAGE_NAME_PLACEHOLDER;

/// Database model for an image owned by a report
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ReportImage {
    pub id: i64,
    pub report_id: i64,
    pub img_name: String,
    pub img_alt: Option<String>,
}

/// Image entry submitted alongside a new report, before the report id is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReportImage {
    pub img_name: String,
    pub img_alt: Option<String>,
}

impl CreateReportImage {
    /// Replace every placeholder token in the image name with the report id
    pub fn resolve_name(&self, report_id: i64) -> String {
        self.img_name
            .replace(IMAGE_NAME_PLACEHOLDER, &report_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> CreateReportImage {
        CreateReportImage {
            img_name: name.to_string(),
            img_alt: None,
        }
    }

    #[test]
    fn test_resolve_name_substitutes_report_id() {
        assert_eq!(image("report-XXX-cover.png").resolve_name(42), "report-42-cover.png");
    }

    #[test]
    fn test_resolve_name_replaces_every_token() {
        assert_eq!(image("XXX/XXX.jpg").resolve_name(7), "7/7.jpg");
    }

    #[test]
    fn test_resolve_name_without_token_is_unchanged() {
        assert_eq!(image("static/banner.webp").resolve_name(9), "static/banner.webp");
    }

    #[test]
    fn test_resolve_name_is_case_sensitive() {
        assert_eq!(image("xxx-XXX.png").resolve_name(3), "xxx-3.png");
    }
}
