//! Types for the shopping cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Product;

/// A line in the cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    /// Id to pass to [`CartClient::remove_from_cart`](super::CartClient::remove_from_cart)
    pub id: u64,
    pub product: Option<Product>,
    pub qty: u32,
    /// Unit price captured when the item was added
    pub price: Decimal,
    pub subtotal: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The current user's cart. Totals are computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    pub id: u64,
    pub items: Vec<CartItem>,
    pub total_amount: Option<Decimal>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cart {
    /// Total number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Body of `POST /api/cart/add/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub product_id: u64,
    pub qty: u32,
}

/// Body of `POST /api/cart/remove/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromCart {
    pub item_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: u32) -> CartItem {
        CartItem {
            qty,
            ..CartItem::default()
        }
    }

    #[test]
    fn item_count_sums_quantities() {
        let cart = Cart {
            items: vec![item(2), item(3)],
            ..Cart::default()
        };
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.is_empty());
        assert_eq!(Cart::default().item_count(), 0);
    }

    #[test]
    fn item_count_does_not_overflow_u32() {
        let cart = Cart {
            items: vec![item(u32::MAX), item(u32::MAX)],
            ..Cart::default()
        };
        assert_eq!(cart.item_count(), 2 * u64::from(u32::MAX));
    }
}
