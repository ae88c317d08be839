//! Cart endpoints

mod types;

use crate::error::Error;
use crate::fetch::ApiContext;
use crate::orders::Order;

pub use types::*;

/// Client for `/api/cart/`
pub struct CartClient {
    ctx: ApiContext,
}

impl CartClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Current cart contents
    pub async fn fetch_cart(&self) -> Result<Cart, Error> {
        let url = self.ctx.options.api_url("/cart/");
        self.ctx.get(&url, "fetch cart")?.execute().await
    }

    /// Add `qty` units of a product. Adding a product already in the cart
    /// sets its quantity rather than incrementing it.
    pub async fn add_to_cart(&self, product_id: u64, qty: u32) -> Result<Cart, Error> {
        let url = self.ctx.options.api_url("/cart/add/");
        self.ctx
            .post(&url, "add to cart")?
            .json(&AddToCart { product_id, qty })?
            .execute()
            .await
    }

    /// Remove a cart line by item id
    pub async fn remove_from_cart(&self, item_id: u64) -> Result<Cart, Error> {
        let url = self.ctx.options.api_url("/cart/remove/");
        self.ctx
            .post(&url, "remove from cart")?
            .json(&RemoveFromCart { item_id })?
            .execute()
            .await
    }

    /// Turn the cart into an order. Fails with "Cart is empty" on an empty cart.
    pub async fn checkout(&self) -> Result<Order, Error> {
        let url = self.ctx.options.api_url("/cart/checkout/");
        self.ctx.post(&url, "checkout cart")?.execute().await
    }
}
