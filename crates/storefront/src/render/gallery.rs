//! Product gallery view.

use askama::Template;
use tracing::debug;

use stall_core::{Catalog, Product};

use crate::error::RenderError;
use crate::page::{Change, Page, Region};
use crate::state::AppState;

use super::Renderer;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
        }
    }
}

/// Gallery fragment template.
#[derive(Template)]
#[template(path = "partials/gallery.html")]
pub struct GalleryTemplate {
    pub products: Vec<ProductCard>,
}

impl GalleryTemplate {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            products: catalog.iter().map(ProductCard::from).collect(),
        }
    }
}

/// Renders the catalog into [`Region::Gallery`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryRenderer;

impl Renderer for GalleryRenderer {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn subscribes_to(&self, change: Change) -> bool {
        change == Change::Catalog
    }

    fn render(&self, state: &AppState, page: &mut Page) -> Result<(), RenderError> {
        if !page.is_mounted(Region::Gallery) {
            return Ok(());
        }
        let html = GalleryTemplate::new(&state.catalog)
            .render()
            .map_err(|source| RenderError {
                renderer: self.name(),
                source,
            })?;
        debug!(products = state.catalog.len(), "Rendered gallery");
        page.set(Region::Gallery, html);
        Ok(())
    }
}
