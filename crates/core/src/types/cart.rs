//! Cart records and the cart/catalog join.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::{Catalog, Product};

/// One product-id/quantity pair.
///
/// The ID is not checked against the catalog; lines whose product is missing
/// are skipped when the cart is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub quantity: u32,
}

/// A cart line joined with its product.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl ResolvedLine<'_> {
    /// Price of the line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Selected products, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartLine>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add one unit of `id`, returning the line's new quantity.
    pub fn add(&mut self, id: ProductId) -> u32 {
        if let Some(line) = self.0.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.0.push(CartLine { id, quantity: 1 });
        1
    }

    /// Quantity held for `id`, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.0
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of quantities over every line, resolvable or not.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.0.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines whose product exists in `catalog`, in cart order.
    pub fn resolve<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = ResolvedLine<'a>> {
        self.0.iter().filter_map(|line| {
            catalog.find(line.id).map(|product| ResolvedLine {
                product,
                quantity: line.quantity,
            })
        })
    }

    /// Sum of line totals over resolvable lines.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        self.resolve(catalog).map(|line| line.line_total()).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.0.iter()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self(lines)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
