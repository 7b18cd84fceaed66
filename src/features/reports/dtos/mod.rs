pub mod report_dto;

pub use report_dto::{
    CategoryCountDto, CategoryReportListDto, CreateReportDto, CreateReportImageDto,
    CreateReportWithImagesDto, LatestReportListDto, ReportImageResponseDto, ReportListDto,
    ReportResponseDto, ReportWithImagesDto, SearchReportsQuery, UpdateCoverDto, UpdateReportDto,
};
