use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::UploadConfig;
use crate::shared::constants::UPLOAD_TIMESTAMP_FORMAT;

#[derive(Debug, Error)]
pub enum ImageIngestError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to save image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Where an upload ended up
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub original_filename: String,
    pub path: PathBuf,
}

/// Stores uploaded images on local disk, shrunk to fit a square bound
pub struct ImageIngestService {
    upload_dir: PathBuf,
    max_dimension: u32,
}

impl ImageIngestService {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            upload_dir: config.dir.clone(),
            max_dimension: config.max_dimension,
        }
    }

    /// Timestamp name with the original extension, e.g. `20240315090507.png`.
    ///
    /// The extension is whatever follows the last `.` (the whole name when there
    /// is none), keeping only ASCII alphanumerics so it cannot leave the upload dir.
    pub fn stored_file_name(original_filename: &str, now: DateTime<Local>) -> String {
        let extension: String = original_filename
            .rsplit('.')
            .next()
            .unwrap_or(original_filename)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        format!("{}.{}", now.format(UPLOAD_TIMESTAMP_FORMAT), extension)
    }

    /// Decode, shrink and save an upload.
    ///
    /// A file already stored under the same generated name is overwritten.
    /// `contents` is consumed on every path.
    pub async fn ingest(
        &self,
        original_filename: &str,
        contents: Vec<u8>,
    ) -> Result<StoredImage, ImageIngestError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|source| ImageIngestError::CreateDir {
                path: self.upload_dir.clone(),
                source,
            })?;

        let file_name = Self::stored_file_name(original_filename, Local::now());
        let path = self.upload_dir.join(file_name);
        let max_dimension = self.max_dimension;

        let target = path.clone();
        tokio::task::spawn_blocking(move || store_resized(&contents, &target, max_dimension))
            .await??;

        info!(
            "Stored upload {} at {}",
            original_filename,
            path.display()
        );

        Ok(StoredImage {
            original_filename: original_filename.to_string(),
            path,
        })
    }
}

/// Scale `img` down so neither side exceeds `max_dimension`, keeping the aspect ratio.
/// Images already within bounds are returned untouched.
fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if img.width() <= max_dimension && img.height() <= max_dimension {
        return img;
    }
    img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

fn store_resized(contents: &[u8], path: &Path, max_dimension: u32) -> Result<(), ImageIngestError> {
    let img = image::load_from_memory(contents).map_err(ImageIngestError::Decode)?;
    let (width, height) = (img.width(), img.height());

    let mut img = fit_within(img, max_dimension);
    debug!(
        "Resized upload from {}x{} to {}x{}",
        width,
        height,
        img.width(),
        img.height()
    );

    // JPEG has no alpha channel
    if matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg)) && img.color().has_alpha() {
        img = DynamicImage::ImageRgb8(img.to_rgb8());
    }

    img.save(path).map_err(|source| ImageIngestError::Save {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{png_bytes, rgba_png_bytes};
    use chrono::TimeZone;

    fn service(dir: &Path) -> ImageIngestService {
        ImageIngestService::new(&UploadConfig {
            dir: dir.to_path_buf(),
            max_dimension: 800,
        })
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, h, m, s).single().unwrap()
    }

    #[test]
    fn test_stored_file_name_keeps_extension() {
        assert_eq!(
            ImageIngestService::stored_file_name("chart.final.PNG", at(9, 5, 7)),
            "20240315090507.PNG"
        );
    }

    #[test]
    fn test_stored_file_name_without_dot_uses_whole_name() {
        assert_eq!(
            ImageIngestService::stored_file_name("jpeg", at(23, 59, 1)),
            "20240315235901.jpeg"
        );
    }

    #[test]
    fn test_stored_file_name_strips_path_characters() {
        assert_eq!(
            ImageIngestService::stored_file_name("x./../../etc", at(0, 0, 0)),
            "20240315000000.etc"
        );
        assert_eq!(
            ImageIngestService::stored_file_name("a.p/n\\g", at(0, 0, 0)),
            "20240315000000.png"
        );
    }

    #[test]
    fn test_fit_within_leaves_small_images() {
        let img = image::load_from_memory(&png_bytes(300, 200)).unwrap();
        let fitted = fit_within(img, 800);
        assert_eq!((fitted.width(), fitted.height()), (300, 200));
    }

    #[test]
    fn test_fit_within_bounds_tall_images_by_height() {
        let img = image::load_from_memory(&png_bytes(400, 1600)).unwrap();
        let fitted = fit_within(img, 800);
        assert_eq!((fitted.width(), fitted.height()), (200, 800));
    }

    #[tokio::test]
    async fn test_ingest_shrinks_wide_image_to_max_width() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("images");
        let stored = service(&upload_dir)
            .ingest("wide.png", png_bytes(1000, 333))
            .await
            .unwrap();

        assert_eq!(stored.original_filename, "wide.png");
        assert!(stored.path.starts_with(&upload_dir));

        let saved = image::open(&stored.path).unwrap();
        assert_eq!(saved.width(), 800);
        let expected_height = 333.0 * 800.0 / 1000.0;
        assert!((saved.height() as f64 - expected_height).abs() <= 1.0);
    }

    #[tokio::test]
    async fn test_ingest_creates_directory_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("nested").join("images");
        std::fs::create_dir_all(&upload_dir).unwrap();

        let stored = service(&upload_dir)
            .ingest("small.png", png_bytes(10, 10))
            .await
            .unwrap();
        assert!(stored.path.exists());
    }

    #[tokio::test]
    async fn test_ingest_converts_alpha_for_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let stored = service(dir.path())
            .ingest("photo.jpg", rgba_png_bytes(900, 300))
            .await
            .unwrap();

        let saved = image::open(&stored.path).unwrap();
        assert_eq!(saved.width(), 800);
    }

    #[tokio::test]
    async fn test_ingest_rejects_corrupt_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path())
            .ingest("broken.png", b"definitely not an image".to_vec())
            .await;

        assert!(matches!(result, Err(ImageIngestError::Decode(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_ingest_rejects_unknown_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path())
            .ingest("notes.txt", png_bytes(20, 20))
            .await;

        assert!(matches!(result, Err(ImageIngestError::Save { .. })));
    }
}
