//! Upload form and gallery commands.

use std::path::PathBuf;

use tracing::info;

use stall_storefront::config::StorefrontConfig;
use stall_storefront::handlers::{ImageFile, UploadForm};
use stall_storefront::page::{Page, Region};

use super::{CommandError, open, print_line};

/// Submit the upload form.
///
/// # Errors
///
/// Returns an error if the form is rejected or the catalog cannot be saved.
pub async fn upload(
    config: &StorefrontConfig,
    name: String,
    price: String,
    image: Option<PathBuf>,
    mime: Option<String>,
) -> Result<(), CommandError> {
    let mut storefront = open(config, Page::upload())?;

    let image = image.map(|path| {
        let file = ImageFile::from_path(path);
        match mime {
            Some(mime) => file.with_mime(mime),
            None => file,
        }
    });
    let mut form = UploadForm::new(name, price, image);

    let product = storefront.upload(&mut form).await?;
    info!(product_id = %product.id, "Stored product");
    print_line(&format!("id: {}", product.id))
}

/// Print the gallery markup.
///
/// # Errors
///
/// Returns an error if the stored records cannot be loaded.
pub fn gallery(config: &StorefrontConfig) -> Result<(), CommandError> {
    let storefront = open(config, Page::blank().with_region(Region::Gallery))?;
    print_line(storefront.page().text(Region::Gallery).unwrap_or_default())
}
