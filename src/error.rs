use thiserror::Error;

/// Errors that can occur while encoding or decoding surface images
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to encode surface as PNG: {0}")]
    Encode(String),

    #[error("Malformed data URL: {0}")]
    DataUrl(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
