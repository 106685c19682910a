//! Coffee Stand Core - Shared types and backend client.
//!
//! This crate provides the types used across all Coffee Stand components:
//! - `storefront` - Public product grid and checkout redirect
//! - `admin` - Product management and order listing dashboard
//! - `cli` - Command-line access to the same backend operations
//!
//! # Architecture
//!
//! Products, orders and checkout sessions are owned by an external backend
//! reached over REST. This crate only describes their shape and, behind the
//! `client` feature, the single HTTP client every view goes through.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, orders and timestamps
//! - [`client`] - `BackendClient` and `RequestError` (feature `client`)

#![cfg_attr(not(test), forbid(unsafe_code))]

#[cfg(feature = "client")]
pub mod client;
pub mod types;

pub use types::*;
