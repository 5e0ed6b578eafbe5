//! Core types for Stall.
//!
//! This module provides type-safe wrappers for the catalog and cart records.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine, ResolvedLine};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Catalog, Product};
