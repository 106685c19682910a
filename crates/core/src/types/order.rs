//! Completed orders, as reported by the backend.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::price::Price;
use super::timestamp::OrderTimestamp;

/// Placeholder shown when an order has no customer email.
pub const ANONYMOUS_CUSTOMER: &str = "Anonymous";

/// A completed checkout.
///
/// `product_name` is a snapshot taken when the order was placed, not a live
/// reference to a [`Product`](super::Product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_name: String,
    pub amount: Price,
    pub timestamp: OrderTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl Order {
    /// The customer email, or "Anonymous" when absent or blank.
    #[must_use]
    pub fn customer_label(&self) -> &str {
        self.customer_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .unwrap_or(ANONYMOUS_CUSTOMER)
    }

    /// Sample orders substituted by the admin panel when the backend cannot
    /// be reached, placed relative to `now`.
    #[must_use]
    pub fn demo_orders(now: DateTime<Utc>) -> Vec<Self> {
        [
            ("1", "Small Coffee", 300, Duration::minutes(30), Some("john@example.com")),
            ("2", "Medium Coffee", 500, Duration::hours(2), Some("sarah@example.com")),
            ("3", "Large Coffee", 700, Duration::days(1), Some("mike@example.com")),
            ("4", "Coffee Bundle", 1500, Duration::days(2), None),
        ]
        .into_iter()
        .map(|(id, product_name, cents, age, email)| Self {
            id: OrderId::new(id),
            product_name: product_name.to_owned(),
            amount: Price::from_cents(cents),
            timestamp: OrderTimestamp::from_datetime(&(now - age)),
            customer_email: email.map(str::to_owned),
        })
        .collect()
    }
}

/// Body of `GET /orders`.
///
/// The documented shape is `{ "orders": [...] }`; a bare array is accepted
/// as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrdersResponse {
    Wrapped { orders: Vec<Order> },
    Bare(Vec<Order>),
}

impl OrdersResponse {
    /// The orders, in the order the backend returned them.
    #[must_use]
    pub fn into_orders(self) -> Vec<Order> {
        match self {
            Self::Wrapped { orders } | Self::Bare(orders) => orders,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "id": "cs_test_a1",
        "product_name": "Small Coffee",
        "amount": 3,
        "timestamp": 0,
        "customer_email": "john@example.com"
    }"#;

    #[test]
    fn test_wrapped_and_bare_lists() {
        let wrapped: OrdersResponse =
            serde_json::from_str(&format!(r#"{{"orders":[{ORDER_JSON}]}}"#)).unwrap();
        let bare: OrdersResponse = serde_json::from_str(&format!("[{ORDER_JSON}]")).unwrap();

        let wrapped = wrapped.into_orders();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped, bare.into_orders());
        assert_eq!(wrapped[0].amount.display(), "$3.00");
    }

    #[test]
    fn test_missing_email_is_anonymous() {
        let order: Order = serde_json::from_str(
            r#"{"id":"2","product_name":"Coffee Bundle","amount":15,"timestamp":1}"#,
        )
        .unwrap();
        assert_eq!(order.customer_email, None);
        assert_eq!(order.customer_label(), ANONYMOUS_CUSTOMER);

        let order = Order {
            customer_email: Some(String::new()),
            ..order
        };
        assert_eq!(order.customer_label(), ANONYMOUS_CUSTOMER);
    }

    #[test]
    fn test_invalid_timestamp_keeps_order() {
        let orders: OrdersResponse = serde_json::from_str(
            r#"{"orders":[{"id":"3","product_name":"Large Coffee","amount":7,"timestamp":"2025-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        let orders = orders.into_orders();
        assert!(matches!(orders[0].timestamp, OrderTimestamp::Invalid(_)));
    }

    #[test]
    fn test_demo_orders() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let orders = Order::demo_orders(now);
        assert_eq!(orders.len(), 4);
        assert_eq!(
            orders[0].timestamp,
            OrderTimestamp::Seconds(1_700_000_000 - 30 * 60)
        );
        assert_eq!(orders[3].customer_label(), ANONYMOUS_CUSTOMER);
    }
}
