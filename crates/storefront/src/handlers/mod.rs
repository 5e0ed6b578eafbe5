//! Event handlers.
//!
//! Each handler is a method on [`Storefront`](crate::Storefront) that mutates
//! state, saves the record it touched, emits a change and notifies the user.

pub mod cart;
pub mod checkout;
pub mod upload;

pub use cart::{ADD_TO_CART_CLASS, ClickOutcome, ClickTarget};
pub use checkout::{CheckoutOutcome, OrderConfirmation, OrderForm};
pub use upload::{ImageFile, ImageSource, UploadForm, decode_data_uri};
