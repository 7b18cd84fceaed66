use sqlx::FromRow;

/// Database model for report
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Report {
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

/// Every mutable column of a report, used for both insert and full overwrite.
///
/// The store assigns `id`; nothing here can change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
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

#[cfg(test)]
impl Report {
    /// The report's mutable columns, detached from its id
    pub fn fields(&self) -> ReportFields {
        ReportFields {
            title: self.title.clone(),
            url: self.url.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            summary: self.summary.clone(),
            toc: self.toc.clone(),
            highlights: self.highlights.clone(),
            methodology: self.methodology.clone(),
            meta_title: self.meta_title.clone(),
            meta_desc: self.meta_desc.clone(),
            meta_keyword: self.meta_keyword.clone(),
            pages: self.pages.clone(),
            cover_img: self.cover_img.clone(),
            created_date: self.created_date.clone(),
            faqs: self.faqs.clone(),
        }
    }
}

/// Row of the unpaginated listing
#[derive(Debug, Clone, FromRow)]
pub struct ReportSummary {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub summary: String,
    pub title: String,
}

/// Row of the search and by-category listings
#[derive(Debug, Clone, FromRow)]
pub struct ReportListing {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub summary: String,
    pub title: String,
    pub pages: String,
    pub created_date: String,
}

/// Row of the latest listing; a [`ReportListing`] plus the cover image
#[derive(Debug, Clone, FromRow)]
pub struct LatestReport {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub summary: String,
    pub title: String,
    pub pages: String,
    pub cover_img: String,
    pub created_date: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
