mod image_ingest_service;

pub use image_ingest_service::ImageIngestService;
