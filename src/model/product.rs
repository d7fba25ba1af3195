//! Catalog products and stock records.

use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Represents a product as served by the catalog and as stored in the cart.
///
/// The `amount` field is overloaded: in the catalog cache it is unused (zero),
/// inside a [`Cart`](crate::model::Cart) it holds the selected quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    #[serde(default)]
    pub amount: u32,
}

impl Product {
    /// Creates a new catalog Product (amount zero).
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `image_url` - Picture shown next to the product
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: image_url.into(),
            amount: 0,
        }
    }

    /// Returns a copy of this product carrying the given quantity.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// Maximum purchasable quantity for a product, as reported by the stock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub product_id: ProductId,
    pub amount: u32,
}

impl StockRecord {
    pub fn new(product_id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_uses_camel_case_on_the_wire() {
        let product = Product::new(1, "Sneaker", 179.9, "https://img/1.jpg").with_amount(2);
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["imageUrl"], "https://img/1.jpg");
        assert_eq!(json["amount"], 2);
    }

    #[test]
    fn test_catalog_product_without_amount_defaults_to_zero() {
        let json = r#"{"id":3,"name":"Boot","price":99.5,"imageUrl":"x"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId(3));
        assert_eq!(product.amount, 0);
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId(7).to_string(), "product_7");
    }
}
