//! Product upload form.
//!
//! Submitting the form decodes the selected image into a `data:` URI, then
//! appends the product to the catalog, saves the catalog and resets the form.
//! The decode is the only await point and does not touch storefront state.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, instrument};

use stall_core::{Price, Product};

use crate::error::{Result, UploadError};
use crate::notify::Notice;
use crate::page::Change;
use crate::storefront::Storefront;
use crate::store::{KeyValueStore, PRODUCTS_KEY};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Where the selected file's bytes come from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A file picked in the image field.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    /// Declared MIME type, if the picker supplied one.
    pub mime: Option<String>,
    pub source: ImageSource,
}

impl ImageFile {
    /// A file on disk, typed by its extension.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            file_name,
            mime: None,
            source: ImageSource::Path(path),
        }
    }

    /// In-memory file contents.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            source: ImageSource::Bytes(bytes),
        }
    }

    /// Override the MIME type.
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Declared type, else one guessed from the extension.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.mime
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| mime_from_extension(Path::new(&self.file_name)))
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        _ => FALLBACK_MIME,
    }
}

/// Upload form fields.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub name: String,
    /// Price as typed.
    pub price: String,
    pub image: Option<ImageFile>,
}

impl UploadForm {
    #[must_use]
    pub fn new(name: impl Into<String>, price: impl Into<String>, image: Option<ImageFile>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image,
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Read `file` and encode it as a `data:{mime};base64,...` URI.
///
/// # Errors
///
/// Returns `UploadError::ImageRead` if the file cannot be read.
pub async fn decode_data_uri(file: &ImageFile) -> std::result::Result<String, UploadError> {
    let bytes = match &file.source {
        ImageSource::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| UploadError::ImageRead {
                    file_name: file.file_name.clone(),
                    source,
                })?
        }
        ImageSource::Bytes(bytes) => bytes.clone(),
    };
    Ok(format!(
        "data:{};base64,{}",
        file.mime_type(),
        STANDARD.encode(bytes)
    ))
}

impl<S: KeyValueStore> Storefront<S> {
    /// Handle an upload form submission.
    ///
    /// On success the form is reset and the stored product is returned. On
    /// error nothing is created and the form keeps its values.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MissingImage` when no file is selected,
    /// `UploadError::InvalidPrice` for an unusable price, and store errors if
    /// the catalog cannot be saved.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn upload(&mut self, form: &mut UploadForm) -> Result<Product> {
        let image = form.image.as_ref().ok_or(UploadError::MissingImage)?;
        let price = Price::parse_input(&form.price).map_err(UploadError::from)?;
        let data_uri = decode_data_uri(image).await?;

        let product = self.complete_upload(form.name.clone(), price, data_uri)?;
        form.reset();
        Ok(product)
    }

    /// Completion step of an upload, once the image has been decoded.
    ///
    /// # Errors
    ///
    /// Returns store errors if the catalog cannot be saved, and render errors
    /// if the gallery cannot be rebuilt.
    pub fn complete_upload(&mut self, name: String, price: Price, image: String) -> Result<Product> {
        let id = self.state.catalog.next_id((self.clock)());
        let product = Product {
            id,
            name,
            price,
            image,
        };
        let mut catalog = self.state.catalog.clone();
        catalog.push(product.clone());
        self.store.save(PRODUCTS_KEY, &catalog)?;
        self.state.catalog = catalog;
        info!(product_id = %id, price = %product.price, "Product uploaded");

        self.emit(Change::Catalog)?;
        self.notify(&Notice::ProductUploaded);
        Ok(product)
    }
}
