//! Add-to-cart clicks in the product gallery.

use tracing::{info, instrument, warn};

use stall_core::ProductId;

use crate::error::Result;
use crate::notify::Notice;
use crate::page::Change;
use crate::storefront::Storefront;
use crate::store::{CART_KEY, KeyValueStore};

/// Class carried by the add-to-cart control on each product card.
pub const ADD_TO_CART_CLASS: &str = "add-to-cart";

/// The element a click inside the gallery landed on.
#[derive(Debug, Clone, Default)]
pub struct ClickTarget {
    pub classes: Vec<String>,
    /// Value of the element's `data-id` attribute.
    pub data_id: Option<String>,
}

impl ClickTarget {
    /// The add-to-cart control of product `id`.
    #[must_use]
    pub fn add_to_cart(id: ProductId) -> Self {
        Self {
            classes: vec![ADD_TO_CART_CLASS.to_string()],
            data_id: Some(id.to_string()),
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// What a gallery click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was not on an add-to-cart control, or its ID was unreadable.
    Ignored,
    /// The product's cart line now holds `quantity` units.
    Added { id: ProductId, quantity: u32 },
}

impl<S: KeyValueStore> Storefront<S> {
    /// Handle a click inside the gallery.
    ///
    /// # Errors
    ///
    /// Returns store errors if the cart cannot be saved.
    pub fn click_gallery(&mut self, target: &ClickTarget) -> Result<ClickOutcome> {
        if !target.has_class(ADD_TO_CART_CLASS) {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(id) = target.data_id.as_deref().and_then(ProductId::parse_leading) else {
            warn!(data_id = ?target.data_id, "Add-to-cart control without a readable product id");
            return Ok(ClickOutcome::Ignored);
        };
        let quantity = self.add_to_cart(id)?;
        Ok(ClickOutcome::Added { id, quantity })
    }

    /// Add one unit of `id` to the cart and return the line's quantity.
    ///
    /// The product does not have to be in the catalog.
    ///
    /// # Errors
    ///
    /// Returns store errors if the cart cannot be saved.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32> {
        let mut cart = self.state.cart.clone();
        let quantity = cart.add(id);
        self.store.save(CART_KEY, &cart)?;
        self.state.cart = cart;
        info!(quantity, "Added to cart");

        self.emit(Change::Cart)?;
        self.notify(&Notice::AddedToCart);
        Ok(quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use stall_core::{Cart, Price};

    use crate::error::AppError;
    use crate::notify::RecordingNotifier;
    use crate::page::{Page, Region};
    use crate::store::{MemoryStore, PersistentStore, ReadOnlyStore, StoreError};

    use super::*;

    fn storefront(notifier: &Arc<RecordingNotifier>) -> Storefront<MemoryStore> {
        Storefront::load(MemoryStore::new(), notifier.clone(), Page::index(1)).unwrap()
    }

    #[test]
    fn test_repeat_clicks_count_up() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf = storefront(&notifier);
        let target = ClickTarget::add_to_cart(ProductId::new(1));
        for n in 1..=4 {
            assert_eq!(
                sf.click_gallery(&target).unwrap(),
                ClickOutcome::Added {
                    id: ProductId::new(1),
                    quantity: n
                }
            );
        }
        assert_eq!(sf.state().cart.quantity_of(ProductId::new(1)), 4);
        assert_eq!(sf.page().text(Region::CartCount), Some("4"));
        assert_eq!(notifier.notices().len(), 4);
    }

    #[test]
    fn test_unknown_product_still_added() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf = storefront(&notifier);
        sf.add_to_cart(ProductId::new(999)).unwrap();

        let stored: Cart = PersistentStore::new(sf.store().inner().clone())
            .load(CART_KEY)
            .unwrap();
        assert_eq!(stored.quantity_of(ProductId::new(999)), 1);
        assert_eq!(notifier.last(), Some(Notice::AddedToCart));
    }

    #[test]
    fn test_clicks_elsewhere_are_ignored() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf = storefront(&notifier);
        let card = ClickTarget {
            classes: vec!["product-card".to_string()],
            data_id: Some("1".to_string()),
        };
        assert_eq!(sf.click_gallery(&card).unwrap(), ClickOutcome::Ignored);
        assert!(sf.state().cart.is_empty());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_unreadable_id_is_ignored() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf = storefront(&notifier);
        let target = ClickTarget {
            classes: vec![ADD_TO_CART_CLASS.to_string()],
            data_id: Some("abc".to_string()),
        };
        assert_eq!(sf.click_gallery(&target).unwrap(), ClickOutcome::Ignored);
        let missing = ClickTarget {
            classes: vec![ADD_TO_CART_CLASS.to_string()],
            data_id: None,
        };
        assert_eq!(sf.click_gallery(&missing).unwrap(), ClickOutcome::Ignored);
        assert!(sf.state().cart.is_empty());
    }

    #[test]
    fn test_data_id_read_like_parse_int() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf = storefront(&notifier);
        let target = ClickTarget {
            classes: vec!["btn".to_string(), ADD_TO_CART_CLASS.to_string()],
            data_id: Some(" 42abc".to_string()),
        };
        assert_eq!(
            sf.click_gallery(&target).unwrap(),
            ClickOutcome::Added {
                id: ProductId::new(42),
                quantity: 1
            }
        );
    }

    #[test]
    fn test_huge_price_does_not_break_the_cart() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf =
            Storefront::load(MemoryStore::new(), notifier.clone(), Page::checkout()).unwrap();
        let product = sf
            .complete_upload(
                "Big".to_string(),
                Price::parse_input("5e28").unwrap(),
                String::new(),
            )
            .unwrap();

        sf.add_to_cart(product.id).unwrap();
        assert_eq!(sf.add_to_cart(product.id).unwrap(), 2);
        let total = sf.page().text(Region::TotalPrice).unwrap();
        assert!(total.starts_with("Total: ₦79,228,162,514"));

        // The saved records load again on the next page.
        let reloaded = Storefront::load(
            sf.store().inner().clone(),
            notifier.clone(),
            Page::checkout(),
        )
        .unwrap();
        assert_eq!(reloaded.page().text(Region::TotalPrice), Some(total));
    }

    #[test]
    fn test_failed_save_leaves_cart_untouched() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut sf = Storefront::load(ReadOnlyStore, notifier.clone(), Page::index(1)).unwrap();

        let err = sf.add_to_cart(ProductId::new(1)).unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::Io { .. })));
        assert!(sf.state().cart.is_empty());
        assert_eq!(sf.page().text(Region::CartCount), Some("0"));
        assert!(notifier.notices().is_empty());
    }
}
