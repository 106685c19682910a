//! Checkout session request and response bodies.

use serde::{Deserialize, Serialize};

use super::id::PriceId;

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: PriceId,
}

/// A backend-issued redirect target for the external payment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}
