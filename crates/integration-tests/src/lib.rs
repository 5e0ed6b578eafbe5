//! Integration tests for the Stall storefront widgets.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stall-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Upload, add-to-cart and checkout across page loads
//! - `persistence` - File store layout, origin scoping and corrupt records
//! - `carousel` - Manual navigation and autoplay

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use stall_storefront::notify::RecordingNotifier;
use stall_storefront::page::Page;
use stall_storefront::store::FileStore;
use stall_storefront::{Result, Storefront};

/// Origin used by [`TestShop`] unless a test picks another.
pub const TEST_ORIGIN: &str = "http://shop.test";

/// A file-backed storefront in a temporary directory.
///
/// Every [`TestShop::load`] is a fresh page load over the same stored
/// records; notices from every load are collected in one recorder.
pub struct TestShop {
    root: TempDir,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestShop {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    /// Root of the file store.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Load `page` for [`TEST_ORIGIN`].
    ///
    /// # Errors
    ///
    /// Returns an error if the stored records cannot be read.
    pub fn load(&self, page: Page) -> Result<Storefront<FileStore>> {
        self.load_origin(TEST_ORIGIN, page)
    }

    /// Load `page` for another origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored records cannot be read.
    pub fn load_origin(&self, origin: &str, page: Page) -> Result<Storefront<FileStore>> {
        let store = FileStore::open(self.root(), origin)?;
        Storefront::load(store, self.notifier.clone(), page)
    }
}

impl Default for TestShop {
    fn default() -> Self {
        Self::new()
    }
}
