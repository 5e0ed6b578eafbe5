//! The storefront: state, store, page and the views subscribed to them.

use std::sync::Arc;

use tracing::{debug, info};

use stall_core::{Cart, Catalog};

use crate::error::Result;
use crate::notify::{Notice, Notifier};
use crate::page::{Change, Page};
use crate::render::{Renderer, default_renderers};
use crate::state::AppState;
use crate::store::{CART_KEY, KeyValueStore, PRODUCTS_KEY, PersistentStore, clear_records};

/// Milliseconds since the Unix epoch.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A loaded page of the storefront.
///
/// Handlers (see [`crate::handlers`]) take `&mut self`, so at most one runs
/// at a time. Each one mutates `state`, saves the record it touched and emits
/// a [`Change`] to the subscribed renderers.
pub struct Storefront<S> {
    pub(crate) state: AppState,
    pub(crate) store: PersistentStore<S>,
    pub(crate) page: Page,
    pub(crate) clock: Clock,
    notifier: Arc<dyn Notifier>,
    renderers: Vec<Box<dyn Renderer>>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Load both records from `store` and render every default view into
    /// `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored record is unreadable or corrupt, or a
    /// view fails to render.
    pub fn load(store: S, notifier: Arc<dyn Notifier>, page: Page) -> Result<Self> {
        let store = PersistentStore::new(store);
        let catalog: Catalog = store.load(PRODUCTS_KEY)?;
        let cart: Cart = store.load(CART_KEY)?;
        info!(
            products = catalog.len(),
            cart_lines = cart.len(),
            "Loaded storefront state"
        );

        let mut storefront = Self {
            state: AppState::new(catalog, cart),
            store,
            page,
            clock: system_clock,
            notifier,
            renderers: default_renderers(),
        };
        storefront.mount()?;
        Ok(storefront)
    }

    /// Replace the clock used to stamp new products.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Add a view. It is rendered immediately and after every change it
    /// subscribes to.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial render fails.
    pub fn subscribe(&mut self, renderer: Box<dyn Renderer>) -> Result<()> {
        renderer.render(&self.state, &mut self.page)?;
        self.renderers.push(renderer);
        Ok(())
    }

    /// Render every view.
    ///
    /// # Errors
    ///
    /// Returns an error if a view fails to render.
    pub fn mount(&mut self) -> Result<()> {
        for renderer in &self.renderers {
            renderer.render(&self.state, &mut self.page)?;
        }
        Ok(())
    }

    /// Re-render the views subscribed to `change`.
    pub(crate) fn emit(&mut self, change: Change) -> Result<()> {
        for renderer in &self.renderers {
            if renderer.subscribes_to(change) {
                debug!(renderer = renderer.name(), ?change, "Re-rendering");
                renderer.render(&self.state, &mut self.page)?;
            }
        }
        Ok(())
    }

    pub(crate) fn notify(&self, notice: &Notice) {
        self.notifier.notify(notice);
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub const fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    /// Remove both records from the store and reset to an empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be modified.
    pub fn reset(&mut self) -> Result<()> {
        clear_records(self.store.inner_mut())?;
        self.state = AppState::default();
        info!("Cleared stored products and cart");
        self.mount()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use stall_core::{Price, ProductId};

    use crate::error::{AppError, RenderError};
    use crate::notify::RecordingNotifier;
    use crate::page::Region;
    use crate::store::{MemoryStore, StoreError};

    use super::*;

    /// Counts renders; subscribed to cart changes only.
    struct CartWatcher(Arc<AtomicUsize>);

    impl Renderer for CartWatcher {
        fn name(&self) -> &'static str {
            "cart_watcher"
        }

        fn subscribes_to(&self, change: Change) -> bool {
            change == Change::Cart
        }

        fn render(
            &self,
            _state: &AppState,
            _page: &mut Page,
        ) -> std::result::Result<(), RenderError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_load_empty_store() {
        let storefront = Storefront::load(
            MemoryStore::new(),
            Arc::new(RecordingNotifier::new()),
            Page::index(3),
        )
        .unwrap();
        assert!(storefront.state().catalog.is_empty());
        assert!(storefront.state().cart.is_empty());
        assert_eq!(storefront.page().text(Region::CartCount), Some("0"));
        assert_eq!(
            storefront.page().text(Region::Gallery).map(str::trim),
            Some("<h2>Our Products</h2>")
        );
    }

    #[test]
    fn test_load_corrupt_store_fails() {
        let mut raw = MemoryStore::new();
        raw.set_item(PRODUCTS_KEY, "not json").unwrap();
        let result = Storefront::load(raw, Arc::new(RecordingNotifier::new()), Page::index(1));
        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::Corrupt { .. }))
        ));
    }

    #[test]
    fn test_load_renders_persisted_state() {
        let mut raw = MemoryStore::new();
        raw.set_item(
            PRODUCTS_KEY,
            r#"[{"id":1,"name":"Bag","price":5000,"image":"data:image/png;base64,AA=="}]"#,
        )
        .unwrap();
        raw.set_item(CART_KEY, r#"[{"id":1,"quantity":2}]"#).unwrap();

        let storefront =
            Storefront::load(raw, Arc::new(RecordingNotifier::new()), Page::checkout()).unwrap();
        assert_eq!(storefront.page().text(Region::CartCount), Some("2"));
        assert_eq!(
            storefront.page().text(Region::TotalPrice),
            Some("Total: ₦10,000")
        );
    }

    #[test]
    fn test_reset_clears_store() {
        let mut raw = MemoryStore::new();
        raw.set_item(CART_KEY, r#"[{"id":1,"quantity":2}]"#).unwrap();
        let mut storefront =
            Storefront::load(raw, Arc::new(RecordingNotifier::new()), Page::checkout()).unwrap();
        storefront.reset().unwrap();
        assert!(storefront.state().cart.is_empty());
        assert_eq!(storefront.store().inner().get_item(CART_KEY).unwrap(), None);
        assert_eq!(storefront.page().text(Region::CartCount), Some("0"));
    }

    #[test]
    fn test_emit_reaches_only_subscribed_views() {
        let mut storefront = Storefront::load(
            MemoryStore::new(),
            Arc::new(RecordingNotifier::new()),
            Page::index(1),
        )
        .unwrap();
        let renders = Arc::new(AtomicUsize::new(0));
        storefront
            .subscribe(Box::new(CartWatcher(Arc::clone(&renders))))
            .unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 1);

        storefront
            .complete_upload("Bag".to_string(), Price::from_whole(5000), String::new())
            .unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 1);

        storefront.add_to_cart(ProductId::new(1)).unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 2);

        storefront.mount().unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 3);
    }
}
