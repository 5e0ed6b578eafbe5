//! Application state shared across handlers.

use stall_core::{Cart, Catalog};

/// In-memory mirror of the persisted records.
///
/// Handlers mutate it and then save the touched record; renderers only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub catalog: Catalog,
    pub cart: Cart,
}

impl AppState {
    #[must_use]
    pub const fn new(catalog: Catalog, cart: Cart) -> Self {
        Self { catalog, cart }
    }
}
