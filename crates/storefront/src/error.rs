//! Unified error handling for the storefront widgets.
//!
//! Each concern has its own error enum; `AppError` wraps them so handlers
//! can return a single `Result<T>`.

use thiserror::Error;

use stall_core::PriceError;

use crate::carousel::CarouselError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors produced while accepting a product upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The price field did not hold a usable amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The form was submitted without an image file.
    #[error("No image file selected")]
    MissingImage,

    /// The selected image could not be read.
    #[error("Failed to read image {file_name}: {source}")]
    ImageRead {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A template failed to render.
#[derive(Debug, Error)]
#[error("Render error in {renderer}: {source}")]
pub struct RenderError {
    pub renderer: &'static str,
    #[source]
    pub source: askama::Error,
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistent store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Upload was rejected or the image could not be read.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// A view could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Carousel markup is missing or empty.
    #[error("Carousel error: {0}")]
    Carousel(#[from] CarouselError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
