/// Token in an image name that is replaced by the owning report's id on creation
pub const IMAGE_NAME_PLACEHOLDER: &str = "XXX";

// =============================================================================
// UPLOADS
// =============================================================================

/// Directory uploaded images land in when `UPLOAD_DIR` is not set
pub const DEFAULT_UPLOAD_DIR: &str = "images";

/// Longest side, in pixels, of a stored image when `IMAGE_MAX_DIMENSION` is not set
pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 800;

/// Second-resolution timestamp used to name stored uploads
pub const UPLOAD_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// The only failure message an upload ever reports
pub const UPLOAD_FAILED_MESSAGE: &str = "There was an error uploading the file";
