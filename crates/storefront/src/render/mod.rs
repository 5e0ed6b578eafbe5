//! Views that project application state into page regions.
//!
//! Each [`Renderer`] subscribes to the [`Change`]s it depends on and rebuilds
//! its regions from scratch when one is emitted. Renderers whose regions are
//! not mounted on the current page do nothing.

pub mod cart;
pub mod gallery;

pub use cart::{CartCountRenderer, CartItemsRenderer, total_label};
pub use gallery::GalleryRenderer;

use crate::error::RenderError;
use crate::page::{Change, Page};
use crate::state::AppState;

/// A view subscribed to state changes.
pub trait Renderer: Send {
    /// Name used in logs and render errors.
    fn name(&self) -> &'static str;

    /// Whether this view must be rebuilt after `change`.
    fn subscribes_to(&self, change: Change) -> bool;

    /// Rebuild this view's regions.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    fn render(&self, state: &AppState, page: &mut Page) -> Result<(), RenderError>;
}

/// The gallery, cart and header count views.
#[must_use]
pub fn default_renderers() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(GalleryRenderer),
        Box::new(CartItemsRenderer),
        Box::new(CartCountRenderer),
    ]
}
