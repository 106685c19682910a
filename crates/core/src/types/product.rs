//! Product records and admin form input.

use serde::{Deserialize, Serialize};

use super::id::{PriceId, ProductId};
use super::price::{Price, PriceError};

/// A purchasable product as returned by the backend.
///
/// `id` and `price_id` are assigned by the backend; the frontend never
/// invents them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub price_id: PriceId,
}

impl Product {
    /// Sample catalog substituted by the admin panel when the backend
    /// cannot be reached.
    #[must_use]
    pub fn demo_catalog() -> Vec<Self> {
        [
            ("1", "Small Coffee", 300, "price_small"),
            ("2", "Medium Coffee", 500, "price_medium"),
            ("3", "Large Coffee", 700, "price_large"),
            ("4", "Coffee Bundle", 1500, "price_bundle"),
        ]
        .into_iter()
        .map(|(id, name, cents, price_id)| Self {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_cents(cents),
            price_id: PriceId::new(price_id),
        })
        .collect()
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
}

/// Errors found while validating product form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductInputError {
    /// The product name is empty.
    #[error("Product name is required")]
    MissingName,
    /// The price is missing or invalid.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),
}

/// Raw product form values, kept exactly as typed.
///
/// Drafts survive failed submissions so the user's input is never lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

impl ProductDraft {
    /// Pre-fill a draft from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.input_value(),
        }
    }

    /// Validate the draft into a create request.
    ///
    /// # Errors
    ///
    /// Returns [`ProductInputError::MissingName`] for a blank name and
    /// [`ProductInputError::Price`] when the price is not a positive amount.
    pub fn validate(&self) -> Result<NewProduct, ProductInputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductInputError::MissingName);
        }

        let price = Price::parse(&self.price)?;

        Ok(NewProduct {
            name: name.to_owned(),
            price,
        })
    }
}
