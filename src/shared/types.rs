use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Envelope wrapping every response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Page selection shared by the paginated report listings.
///
/// Both values are required. They are not range-checked; see [`PageQuery::offset`]
/// and [`PageQuery::limit`] for how out-of-range values reach the store.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed)
    pub page: i64,

    /// Number of items per page
    pub per_page: i64,
}

impl PageQuery {
    /// SQL OFFSET, `(page - 1) * per_page`, floored at zero.
    ///
    /// PostgreSQL rejects a negative OFFSET, so `page <= 0` reads like page 1.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit())
            .max(0)
    }

    /// SQL LIMIT, `per_page` floored at zero (an empty page)
    pub fn limit(&self) -> i64 {
        self.per_page.max(0)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: i64, per_page: i64) -> PageQuery {
        PageQuery { page, per_page }
    }

    #[test]
    fn test_offset_first_pages() {
        assert_eq!(page(1, 10).offset(), 0);
        assert_eq!(page(2, 5).offset(), 5);
        assert_eq!(page(3, 20).offset(), 40);
    }

    #[test]
    fn test_offset_non_positive_page_reads_as_first() {
        assert_eq!(page(0, 10).offset(), 0);
        assert_eq!(page(-4, 10).offset(), 0);
    }

    #[test]
    fn test_limit_non_positive_per_page_is_empty() {
        assert_eq!(page(1, 0).limit(), 0);
        assert_eq!(page(1, -3).limit(), 0);
        assert_eq!(page(5, -3).offset(), 0);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        assert_eq!(page(i64::MAX, i64::MAX).offset(), i64::MAX);
    }

    #[test]
    fn test_page_query_requires_both_fields() {
        let parsed: PageQuery = serde_json::from_str(r#"{"page":2,"per_page":5}"#).unwrap();
        assert_eq!(parsed.page, 2);
        assert_eq!(parsed.per_page, 5);

        assert!(serde_json::from_str::<PageQuery>(r#"{"page":2}"#).is_err());
    }

    #[test]
    fn test_envelope_keys() {
        let ok = ApiResponse::success(Some(vec![1, 2]), None, None);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], serde_json::json!([1, 2]));

        let err = ApiResponse::<()>::error(Some("Report not found".to_string()), None);
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Report not found");
        assert!(value["data"].is_null());
    }
}
