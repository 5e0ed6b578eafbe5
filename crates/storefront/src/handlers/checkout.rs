//! Order form on the checkout page.
//!
//! Placing an order only confirms it to the user and empties the cart; no
//! order record is kept.

use tracing::{info, instrument};

use crate::error::Result;
use crate::notify::Notice;
use crate::page::{Change, Region};
use crate::render::total_label;
use crate::storefront::Storefront;
use crate::store::{CART_KEY, KeyValueStore};

/// Order form fields.
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub full_name: String,
    pub address: String,
}

impl OrderForm {
    #[must_use]
    pub fn new(full_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            address: address.into(),
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the user was shown for a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub full_name: String,
    pub address: String,
    pub total_label: String,
}

/// Result of submitting the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing changed.
    Rejected,
    /// The order was confirmed and the cart cleared.
    Placed(OrderConfirmation),
}

impl<S: KeyValueStore> Storefront<S> {
    /// Handle an order form submission.
    ///
    /// # Errors
    ///
    /// Returns store errors if the cart record cannot be removed.
    #[instrument(skip_all)]
    pub fn checkout(&mut self, form: &mut OrderForm) -> Result<CheckoutOutcome> {
        if self.state.cart.is_empty() {
            info!("Checkout rejected, cart is empty");
            self.notify(&Notice::EmptyCart);
            return Ok(CheckoutOutcome::Rejected);
        }

        // The total as shown on the page, falling back to a fresh computation
        // when the page has no total region.
        let total_label = self
            .page
            .text(Region::TotalPrice)
            .filter(|text| !text.is_empty())
            .map_or_else(|| total_label(&self.state), str::to_string);

        let confirmation = OrderConfirmation {
            full_name: form.full_name.clone(),
            address: form.address.clone(),
            total_label,
        };
        self.notify(&Notice::OrderPlaced {
            full_name: confirmation.full_name.clone(),
            address: confirmation.address.clone(),
            total_label: confirmation.total_label.clone(),
        });

        self.store.remove(CART_KEY)?;
        self.state.cart.clear();
        info!(total = %confirmation.total_label, "Order placed");

        self.emit(Change::Cart)?;
        form.reset();
        Ok(CheckoutOutcome::Placed(confirmation))
    }
}
