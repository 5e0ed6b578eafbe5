//! Stall Core - Shared types library.
//!
//! This crate provides the records the storefront widgets operate on:
//! - `Product` and `Catalog` - everything that has been uploaded
//! - `CartLine` and `Cart` - product-id/quantity pairs selected for purchase
//! - `Price` - Naira amounts with en-NG display formatting
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no storage,
//! no rendering. The `storefront` crate layers persistence and views on top.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog and cart records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
