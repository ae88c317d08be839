//! Types for the product catalog

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: u64,
    pub name: String,
    /// URL slug, unique per category
    pub slug: String,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A name/value product attribute such as "Color: Red"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSpecification {
    pub name: String,
    pub value: String,
}

/// A product as the catalog endpoints return it.
///
/// `id`, `name` and `slug` are required so that a body which is not a
/// product (a list envelope, say) fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// URL slug used by
    /// [`CatalogClient::fetch_product_by_slug`](super::CatalogClient::fetch_product_by_slug)
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Decimal,
    /// Units on hand
    #[serde(default)]
    pub stock: u64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub specifications: Vec<ProductSpecification>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Whether at least one unit is on hand
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Filters for the product list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// 1-based page number, always sent
    pub page: u32,
    /// Restrict to one category id
    pub category: Option<u64>,
    /// Only products with `stock >= 1`
    pub in_stock_only: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            category: None,
            in_stock_only: false,
        }
    }
}

impl ProductQuery {
    /// First page, no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Filter by category id
    pub fn category(mut self, category_id: u64) -> Self {
        self.category = Some(category_id);
        self
    }

    /// Only list products in stock
    pub fn in_stock_only(mut self, value: bool) -> Self {
        self.in_stock_only = value;
        self
    }

    /// Query pairs in the order the backend expects them
    pub(crate) fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if self.in_stock_only {
            params.push(("stock__gte", "1".to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn product_accepts_backend_shape() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Laptop",
            "slug": "laptop",
            "description": "",
            "price": "499.00",
            "stock": 2,
            "category": {"id": 1, "name": "Electronics", "slug": "electronics"},
            "specifications": [{"name": "RAM", "value": "16GB"}],
            "created_at": "2024-05-01T10:00:00.123456Z",
            "updated_at": "2024-05-02T10:00:00Z",
            "images": []
        }))
        .unwrap();

        assert_eq!(product.price, Decimal::from_str("499.00").unwrap());
        assert!(product.in_stock());
        assert_eq!(product.category.as_ref().unwrap().slug, "electronics");
        assert_eq!(product.specifications[0].value, "16GB");
        assert_eq!(product.extra.get("images"), Some(&json!([])));
    }

    #[test]
    fn sparse_product_still_parses() {
        let product: Product =
            serde_json::from_value(json!({"id": 9, "name": "Pen", "slug": "pen", "price": 10}))
                .unwrap();
        assert_eq!(product.id, 9);
        assert_eq!(product.price, Decimal::from(10));
        assert!(!product.in_stock());
        assert!(product.category.is_none());
    }

    #[test]
    fn product_requires_identity_fields() {
        assert!(serde_json::from_value::<Product>(json!({"id": 9, "price": 10})).is_err());

        let envelope = json!({"count": 1, "next": null, "previous": null, "results": []});
        assert!(serde_json::from_value::<Product>(envelope).is_err());
    }

    #[test]
    fn query_params_follow_filters() {
        assert_eq!(ProductQuery::new().to_query_params(), vec![("page", "1".to_string())]);
        assert_eq!(
            ProductQuery::new().page(3).category(4).in_stock_only(true).to_query_params(),
            vec![
                ("page", "3".to_string()),
                ("category", "4".to_string()),
                ("stock__gte", "1".to_string()),
            ]
        );
    }
}
