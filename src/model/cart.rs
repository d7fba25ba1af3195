//! The shopper's cart and its pure state transitions.
//!
//! Every transition takes `&self` and returns a brand new [`Cart`] on success,
//! so the previous value is never observed half-mutated. The cart actor only
//! swaps its state when a transition returns `Ok`.

use crate::cart_actor::CartError;
use crate::model::{Product, ProductId, StockRecord};
use crate::services::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A product in the cart; its `amount` is the selected quantity (always ≥ 1).
pub type CartLineItem = Product;

/// Ordered collection of line items, in insertion order.
///
/// Invariants: a product id appears at most once and no quantity is zero.
/// Deserialization goes through [`Cart::from_items`], so a decoded cart holds them too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw items.
    ///
    /// # Errors
    /// * [`CartError::InvalidAmount`] - an item has quantity zero
    /// * [`CartError::AlreadyInCart`] - a product id appears twice
    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, CartError> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.amount == 0 {
                return Err(CartError::InvalidAmount(item.amount));
            }
            if !seen.insert(item.id) {
                return Err(CartError::AlreadyInCart(item.id));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Selected quantity for a product, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Raises the quantity of an existing line item by one, bounded by `stock`.
    pub fn increment(&self, id: ProductId, stock: &StockRecord) -> Result<Cart, CartError> {
        let current = self.get(id).ok_or(CartError::NotFound(id))?.amount;
        let requested = current.checked_add(1).ok_or(CartError::InvalidAmount(current))?;
        self.set_amount(id, requested, stock)
    }

    /// Appends a catalog product with quantity one.
    ///
    /// The product must not already be in the cart; use [`Cart::increment`] for that.
    pub fn insert_new(&self, product: &Product) -> Result<Cart, CartError> {
        if self.contains(product.id) {
            return Err(CartError::AlreadyInCart(product.id));
        }
        let mut items = self.items.clone();
        items.push(product.with_amount(1));
        Ok(Self { items })
    }

    /// Deletes the line item for `id`, leaving every other item in place.
    pub fn remove(&self, id: ProductId) -> Result<Cart, CartError> {
        if !self.contains(id) {
            return Err(CartError::NotFound(id));
        }
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Ok(Self { items })
    }

    /// Sets the absolute quantity of an existing line item, bounded by `stock`.
    pub fn set_amount(
        &self,
        id: ProductId,
        amount: u32,
        stock: &StockRecord,
    ) -> Result<Cart, CartError> {
        if amount == 0 {
            return Err(CartError::InvalidAmount(amount));
        }
        if !self.contains(id) {
            return Err(CartError::NotFound(id));
        }
        if stock.product_id != id {
            return Err(CartError::Collaborator(ServiceError::InvalidResponse(format!(
                "stock record for {} while checking {id}",
                stock.product_id
            ))));
        }
        if stock.amount < amount {
            return Err(CartError::InsufficientStock {
                product_id: id,
                requested: amount,
                available: stock.amount,
            });
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok(Self { items })
    }
}

/// DTO for setting the absolute quantity of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker() -> Product {
        Product::new(1, "Sneaker", 179.9, "https://img/1.jpg")
    }

    fn boot() -> Product {
        Product::new(2, "Boot", 239.9, "https://img/2.jpg")
    }

    fn cart_with(items: Vec<CartLineItem>) -> Cart {
        Cart::from_items(items).unwrap()
    }

    #[test]
    fn test_insert_new_appends_with_amount_one() {
        let cart = cart_with(vec![sneaker().with_amount(2)]);

        let next = cart.insert_new(&boot()).unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next.items()[0], sneaker().with_amount(2));
        assert_eq!(next.items()[1], boot().with_amount(1));
        // the original value is untouched
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_insert_new_rejects_duplicate() {
        let cart = cart_with(vec![sneaker().with_amount(1)]);

        let result = cart.insert_new(&sneaker());

        assert!(matches!(result, Err(CartError::AlreadyInCart(ProductId(1)))));
    }

    #[test]
    fn test_increment_within_stock() {
        let cart = cart_with(vec![sneaker().with_amount(2)]);

        let next = cart.increment(ProductId(1), &StockRecord::new(1, 5)).unwrap();

        assert_eq!(next.amount_of(ProductId(1)), 3);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_increment_beyond_stock_is_rejected() {
        let cart = cart_with(vec![sneaker().with_amount(2)]);

        let result = cart.increment(ProductId(1), &StockRecord::new(1, 2));

        match result {
            Err(CartError::InsufficientStock {
                product_id,
                requested,
                available,
            }) => {
                assert_eq!(product_id, ProductId(1));
                assert_eq!(requested, 3);
                assert_eq!(available, 2);
            }
            other => panic!("Expected InsufficientStock, got {:?}", other),
        }
        assert_eq!(cart.amount_of(ProductId(1)), 2);
    }

    #[test]
    fn test_remove_deletes_only_the_matching_item() {
        let cart = cart_with(vec![sneaker().with_amount(1), boot().with_amount(3)]);

        let next = cart.remove(ProductId(1)).unwrap();

        assert_eq!(next.items(), &[boot().with_amount(3)]);
    }

    #[test]
    fn test_remove_missing_item_is_not_found() {
        let cart = cart_with(vec![sneaker().with_amount(1)]);

        assert!(matches!(cart.remove(ProductId(2)), Err(CartError::NotFound(ProductId(2)))));
    }

    #[test]
    fn test_set_amount_keeps_position() {
        let cart = cart_with(vec![sneaker().with_amount(1), boot().with_amount(1)]);

        let next = cart.set_amount(ProductId(1), 4, &StockRecord::new(1, 4)).unwrap();

        assert_eq!(next.items()[0].id, ProductId(1));
        assert_eq!(next.items()[0].amount, 4);
        assert_eq!(next.items()[1], boot().with_amount(1));
    }

    #[test]
    fn test_set_amount_zero_is_invalid() {
        let cart = cart_with(vec![sneaker().with_amount(1)]);

        let result = cart.set_amount(ProductId(1), 0, &StockRecord::new(1, 10));

        assert!(matches!(result, Err(CartError::InvalidAmount(0))));
    }

    #[test]
    fn test_stock_record_for_another_product_is_rejected() {
        let cart = cart_with(vec![sneaker().with_amount(1)]);

        let increment = cart.increment(ProductId(1), &StockRecord::new(2, 10));
        let set = cart.set_amount(ProductId(1), 3, &StockRecord::new(2, 10));

        assert!(matches!(
            increment,
            Err(CartError::Collaborator(ServiceError::InvalidResponse(_)))
        ));
        assert!(matches!(
            set,
            Err(CartError::Collaborator(ServiceError::InvalidResponse(_)))
        ));
        assert_eq!(cart.amount_of(ProductId(1)), 1);
    }

    #[test]
    fn test_from_items_rejects_broken_invariants() {
        assert!(matches!(
            Cart::from_items(vec![sneaker()]),
            Err(CartError::InvalidAmount(0))
        ));
        assert!(matches!(
            Cart::from_items(vec![sneaker().with_amount(1), sneaker().with_amount(2)]),
            Err(CartError::AlreadyInCart(ProductId(1)))
        ));
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let zero = r#"[{"id":1,"name":"Sneaker","price":179.9,"imageUrl":"x","amount":0}]"#;
        let duplicate = r#"[
            {"id":1,"name":"Sneaker","price":179.9,"imageUrl":"x","amount":1},
            {"id":1,"name":"Sneaker","price":179.9,"imageUrl":"x","amount":2}
        ]"#;

        let zero_err = serde_json::from_str::<Cart>(zero).unwrap_err();
        let duplicate_err = serde_json::from_str::<Cart>(duplicate).unwrap_err();

        assert!(zero_err.to_string().contains("Invalid quantity: 0"));
        assert!(duplicate_err.to_string().contains("Product already in cart: product_1"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let cart = cart_with(vec![sneaker().with_amount(2)]);

        let json = serde_json::to_value(&cart).unwrap();

        assert!(json.is_array());
        assert_eq!(serde_json::from_value::<Cart>(json).unwrap(), cart);
    }
}
