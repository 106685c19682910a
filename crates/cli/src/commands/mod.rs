//! Command implementations.
//!
//! Each command takes the backend client and an output sink so it can be
//! driven from tests.

pub mod checkout;
pub mod orders;
pub mod products;

use coffee_stand_core::client::RequestError;
use coffee_stand_core::{PriceError, ProductInputError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The backend call failed.
    #[error("Backend request failed: {0}")]
    Request(#[from] RequestError),

    /// Product input was rejected before any call was made.
    #[error("Invalid product: {0}")]
    Input(#[from] ProductInputError),

    /// A price argument could not be parsed.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// A destructive command ran without `--yes`.
    #[error("Refusing to delete product {0} without --yes")]
    NotConfirmed(String),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
