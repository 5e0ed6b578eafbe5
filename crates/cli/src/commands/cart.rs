//! Add-to-cart, cart view, checkout and reset commands.

use tracing::warn;

use stall_storefront::AppError;
use stall_storefront::config::StorefrontConfig;
use stall_storefront::handlers::{
    ADD_TO_CART_CLASS, CheckoutOutcome, ClickOutcome, ClickTarget, OrderForm,
};
use stall_storefront::page::{Page, Region};
use stall_storefront::store::{FileStore, clear_records};

use super::{CommandError, open, print_line};

/// Click the add-to-cart control carrying `data_id`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn add(config: &StorefrontConfig, data_id: &str) -> Result<(), CommandError> {
    let mut storefront = open(config, Page::index(0))?;
    let target = ClickTarget {
        classes: vec![ADD_TO_CART_CLASS.to_string()],
        data_id: Some(data_id.to_string()),
    };

    match storefront.click_gallery(&target)? {
        ClickOutcome::Added { id, quantity } => {
            if storefront.state().catalog.find(id).is_none() {
                warn!(product_id = %id, "Product is not in the catalog and will not be shown in the cart");
            }
            print_line(&format!("{id} x{quantity}"))?;
        }
        ClickOutcome::Ignored => warn!(data_id, "Not a product id, nothing added"),
    }
    print_line(&format!(
        "Cart items: {}",
        storefront.page().text(Region::CartCount).unwrap_or("0")
    ))
}

/// Print the cart markup and total.
///
/// # Errors
///
/// Returns an error if the stored records cannot be loaded.
pub fn show(config: &StorefrontConfig) -> Result<(), CommandError> {
    let storefront = open(config, Page::checkout())?;
    let page = storefront.page();
    print_line(page.text(Region::CartItems).unwrap_or_default())?;
    print_line(page.text(Region::TotalPrice).unwrap_or_default())
}

/// Submit the order form.
///
/// # Errors
///
/// Returns an error if the cart record cannot be removed.
pub fn checkout(
    config: &StorefrontConfig,
    full_name: String,
    address: String,
) -> Result<(), CommandError> {
    let mut storefront = open(config, Page::checkout())?;
    let mut form = OrderForm::new(full_name, address);
    if storefront.checkout(&mut form)? == CheckoutOutcome::Rejected {
        warn!("Nothing to check out");
    }
    Ok(())
}

/// Clear both stored records. Works on corrupt records, since nothing is
/// parsed.
///
/// # Errors
///
/// Returns an error if the store cannot be modified.
pub fn reset(config: &StorefrontConfig) -> Result<(), CommandError> {
    let mut store = FileStore::open(&config.storage_dir, &config.origin).map_err(AppError::from)?;
    clear_records(&mut store).map_err(AppError::from)?;
    print_line("Cleared products and cart")
}
