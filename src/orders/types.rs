//! Types for orders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::catalog::Product;

/// Order lifecycle state. Values the client does not know are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Wire value
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => OrderStatus::Pending,
            "paid" => OrderStatus::Paid,
            "shipped" => OrderStatus::Shipped,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        OrderStatus::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer record attached to an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A line of an order, priced at checkout time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub id: u64,
    pub product: Option<Product>,
    pub qty: u32,
    pub price: Decimal,
    pub subtotal: Decimal,
}

/// An order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: u64,
    pub customer: Option<Customer>,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters for the order list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Exact status match
    pub status: Option<OrderStatus>,
    /// Lower bound on creation time, passed through as given
    /// (a date such as `2024-01-31` or an ISO 8601 timestamp)
    pub created_after: Option<String>,
}

impl OrderFilter {
    /// No filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Only orders in `status`
    pub fn status(mut self, status: impl Into<OrderStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Only orders created at or after `value`
    pub fn created_after(mut self, value: &str) -> Self {
        self.created_after = Some(value.to_string());
        self
    }

    /// Only orders created at or after `instant`
    pub fn created_since(self, instant: DateTime<Utc>) -> Self {
        self.created_after(&instant.to_rfc3339())
    }

    pub(crate) fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status.as_ref().filter(|s| !s.as_str().is_empty()) {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(created_after) = self.created_after.as_ref().filter(|s| !s.is_empty()) {
            params.push(("created_at__gte", created_after.clone()));
        }
        params
    }
}
