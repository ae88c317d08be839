//! Order endpoints

mod types;

use crate::error::Error;
use crate::fetch::ApiContext;
use crate::list::ListResponse;

pub use types::*;

/// Client for `/api/orders/`
pub struct OrdersClient {
    ctx: ApiContext,
}

impl OrdersClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// The current user's orders, newest first, unwrapped from the
    /// pagination envelope. No query string is sent when `filter` is empty.
    pub async fn fetch_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, Error> {
        let url = self.ctx.options.api_url("/orders/");
        let mut fetch = self.ctx.get(&url, "fetch orders")?;
        for (key, value) in filter.to_query_params() {
            fetch = fetch.query_param(key, value);
        }
        let orders: ListResponse<Order> = fetch.execute().await?;
        Ok(orders.into_results())
    }
}
