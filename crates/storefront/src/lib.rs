//! Stall storefront widgets.
//!
//! A product gallery, a shopping cart, an order checkout form and an image
//! carousel, backed by origin-scoped persistent key-value storage.
//!
//! # Architecture
//!
//! - [`store`] - `products` and `cart` records as JSON over a key-value store
//! - [`page`] - named page regions and the changes that invalidate them
//! - [`render`] - askama views subscribed to state changes
//! - [`handlers`] - upload, add-to-cart and checkout events
//! - [`carousel`] - cyclic slider with a tokio autoplay timer
//! - [`notify`] - the "tell the user" capability
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use stall_storefront::handlers::ClickTarget;
//! use stall_storefront::notify::LogNotifier;
//! use stall_storefront::page::{Page, Region};
//! use stall_storefront::store::MemoryStore;
//! use stall_storefront::Storefront;
//! use stall_core::ProductId;
//!
//! let mut storefront =
//!     Storefront::load(MemoryStore::new(), Arc::new(LogNotifier), Page::index(3))?;
//! storefront.click_gallery(&ClickTarget::add_to_cart(ProductId::new(1)))?;
//! assert_eq!(storefront.page().text(Region::CartCount), Some("1"));
//! # Ok::<(), stall_storefront::AppError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod page;
pub mod render;
pub mod state;
pub mod store;
mod storefront;

pub use error::{AppError, Result};
pub use storefront::{Clock, Storefront};
