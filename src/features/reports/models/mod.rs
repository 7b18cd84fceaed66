mod report;
mod report_image;

pub use report::{CategoryCount, LatestReport, Report, ReportFields, ReportListing, ReportSummary};
pub use report_image::{CreateReportImage, ReportImage};
