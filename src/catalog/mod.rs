//! Product and category endpoints

mod types;

use crate::error::Error;
use crate::fetch::ApiContext;
use crate::list::ListResponse;

pub use types::*;

/// Client for `/api/products/` and `/api/categories/`
pub struct CatalogClient {
    ctx: ApiContext,
}

impl CatalogClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// List products, one page at a time
    ///
    /// # Example
    ///
    /// ```no_run
    /// use storefront_client::{Storefront, catalog::ProductQuery};
    ///
    /// # async fn run() -> Result<(), storefront_client::error::Error> {
    /// let shop = Storefront::new("http://localhost:8000");
    /// let page = shop
    ///     .catalog()
    ///     .fetch_products(&ProductQuery::new().category(3).in_stock_only(true))
    ///     .await?;
    /// for product in page.results() {
    ///     println!("{} {}", product.name, product.price);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ListResponse<Product>, Error> {
        let url = self.ctx.options.api_url("/products/");
        let mut fetch = self.ctx.get(&url, "fetch products")?;
        for (key, value) in query.to_query_params() {
            fetch = fetch.query_param(key, value);
        }
        fetch.execute().await
    }

    /// Get one product by its slug. An empty slug is rejected locally since
    /// `/api/products//` would hit the list endpoint.
    pub async fn fetch_product_by_slug(&self, slug: &str) -> Result<Product, Error> {
        if slug.trim().is_empty() {
            return Err(Error::invalid_argument("product slug must not be empty"));
        }
        let mut url = url::Url::parse(&self.ctx.options.api_url("/products/"))?;
        url.path_segments_mut()
            .map_err(|_| Error::config("backend base URL cannot carry a path"))?
            .pop_if_empty()
            .push(slug)
            .push("");
        self.ctx
            .get(url.as_str(), "fetch product")?
            .execute()
            .await
    }

    /// All categories, unwrapped from the pagination envelope
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
        let url = self.ctx.options.api_url("/categories/");
        let categories: ListResponse<Category> = self
            .ctx
            .get(&url, "fetch categories")?
            .execute()
            .await?;
        Ok(categories.into_results())
    }

    /// Products in one category. Unlike [`fetch_products`](Self::fetch_products)
    /// no page number is sent, so the backend's first page is returned.
    pub async fn fetch_products_by_category(
        &self,
        category_id: u64,
    ) -> Result<ListResponse<Product>, Error> {
        let url = self.ctx.options.api_url("/products/");
        self.ctx
            .get(&url, "fetch products for category")?
            .query_param("category", category_id)
            .execute()
            .await
    }
}
