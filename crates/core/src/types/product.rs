//! Catalog records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// An uploaded product.
///
/// Products are never edited or deleted once appended to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Embedded image as a `data:` URI.
    pub image: String,
}

/// All uploaded products, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.0.iter().find(|p| p.id == id)
    }

    /// Append a product.
    pub fn push(&mut self, product: Product) {
        self.0.push(product);
    }

    /// Pick the ID for a product created at `now_ms`.
    ///
    /// Uses the timestamp unless an existing product already holds it or a
    /// later one, in which case the ID is one past the largest in the catalog.
    #[must_use]
    pub fn next_id(&self, now_ms: i64) -> ProductId {
        let candidate = match self.0.iter().map(|p| p.id.as_i64()).max() {
            Some(max) if max >= now_ms => max.saturating_add(1),
            _ => now_ms,
        };
        ProductId::new(candidate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.0.iter()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self(products)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_whole(price),
            image: "data:image/png;base64,AA==".to_string(),
        }
    }

    #[test]
    fn test_next_id_uses_timestamp_when_free() {
        let catalog = Catalog::from(vec![product(100, 1)]);
        assert_eq!(catalog.next_id(200), ProductId::new(200));
        assert_eq!(Catalog::new().next_id(5), ProductId::new(5));
    }

    #[test]
    fn test_next_id_never_collides() {
        let catalog = Catalog::from(vec![product(100, 1), product(300, 1)]);
        assert_eq!(catalog.next_id(300), ProductId::new(301));
        assert_eq!(catalog.next_id(150), ProductId::new(301));
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::from(vec![product(1, 5000), product(2, 10)]);
        assert_eq!(catalog.find(ProductId::new(2)).unwrap().price, Price::from_whole(10));
        assert!(catalog.find(ProductId::new(3)).is_none());
    }

    #[test]
    fn test_catalog_json_layout() {
        let catalog = Catalog::from(vec![product(1, 5000)]);
        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["name"], "Product 1");
        assert_eq!(value[0]["price"].as_f64(), Some(5000.0));
        assert_eq!(value[0]["image"], "data:image/png;base64,AA==");

        let parsed: Catalog = serde_json::from_str(
            r#"[{"id":1,"name":"Bag","price":5000,"image":"data:image/png;base64,AA=="}]"#,
        )
        .unwrap();
        assert_eq!(parsed.find(ProductId::new(1)).unwrap().name, "Bag");
    }
}
