//! Core types for Coffee Stand.
//!
//! This module provides type-safe wrappers for the backend's resources.

pub mod checkout;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod timestamp;

pub use checkout::{CheckoutRequest, CheckoutSession};
pub use id::*;
pub use order::{ANONYMOUS_CUSTOMER, Order, OrdersResponse};
pub use price::{Price, PriceError};
pub use product::{NewProduct, Product, ProductDraft, ProductInputError};
pub use timestamp::{INVALID_DATE, OrderTimestamp};
