//! Cart views: line items with total, and the header item count.

use askama::Template;
use tracing::debug;

use stall_core::ResolvedLine;

use crate::error::RenderError;
use crate::page::{Change, Page, Region};
use crate::state::AppState;

use super::Renderer;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<ResolvedLine<'_>> for CartLineView {
    fn from(line: ResolvedLine<'_>) -> Self {
        Self {
            name: line.product.name.clone(),
            quantity: line.quantity,
            line_total: line.line_total().display(),
        }
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart_empty: bool,
    pub lines: Vec<CartLineView>,
}

impl CartItemsTemplate {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            cart_empty: state.cart.is_empty(),
            lines: state
                .cart
                .resolve(&state.catalog)
                .map(CartLineView::from)
                .collect(),
        }
    }
}

/// Text of the cart total, e.g. `Total: ₦10,000`.
#[must_use]
pub fn total_label(state: &AppState) -> String {
    format!("Total: {}", state.cart.total(&state.catalog).display())
}

/// Renders resolved cart lines into [`Region::CartItems`] and the total into
/// [`Region::TotalPrice`]. Needs both regions mounted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartItemsRenderer;

impl Renderer for CartItemsRenderer {
    fn name(&self) -> &'static str {
        "cart_items"
    }

    fn subscribes_to(&self, change: Change) -> bool {
        matches!(change, Change::Cart | Change::Catalog)
    }

    fn render(&self, state: &AppState, page: &mut Page) -> Result<(), RenderError> {
        if !page.is_mounted(Region::CartItems) || !page.is_mounted(Region::TotalPrice) {
            return Ok(());
        }
        let template = CartItemsTemplate::new(state);
        let shown = template.lines.len();
        let html = template.render().map_err(|source| RenderError {
            renderer: self.name(),
            source,
        })?;
        page.set(Region::CartItems, html);
        page.set(Region::TotalPrice, total_label(state));
        debug!(lines = state.cart.len(), shown, "Rendered cart");
        Ok(())
    }
}

/// Renders the number of items in the cart into [`Region::CartCount`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCountRenderer;

impl Renderer for CartCountRenderer {
    fn name(&self) -> &'static str {
        "cart_count"
    }

    fn subscribes_to(&self, change: Change) -> bool {
        change == Change::Cart
    }

    fn render(&self, state: &AppState, page: &mut Page) -> Result<(), RenderError> {
        page.set(Region::CartCount, state.cart.item_count().to_string());
        Ok(())
    }
}
