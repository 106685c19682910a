//! Product management commands.
//!
//! # Usage
//!
//! ```bash
//! coffee-cli products list
//! coffee-cli products add --name "Iced Latte" --price 4.50
//! coffee-cli products update 3 --name "Large Coffee" --price 7 --price-id price_large
//! coffee-cli products delete 3 --yes
//! ```

use std::io::Write;

use coffee_stand_core::client::BackendClient;
use coffee_stand_core::{Price, PriceId, Product, ProductDraft, ProductId};

use super::CommandError;

/// Format one product as a table row.
fn product_row(product: &Product) -> String {
    format!(
        "{:<10} {:<28} {:>10}  {}",
        product.id,
        product.name,
        product.price.display(),
        product.price_id
    )
}

/// Print every product.
///
/// # Errors
///
/// Returns an error if the backend call or output fails.
pub async fn list(client: &BackendClient, out: &mut impl Write) -> Result<(), CommandError> {
    let products = client.list_products().await?;

    if products.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    writeln!(out, "{:<10} {:<28} {:>10}  PRICE ID", "ID", "NAME", "PRICE")?;
    for product in &products {
        writeln!(out, "{}", product_row(product))?;
    }
    Ok(())
}

/// Validate and create a product.
///
/// # Errors
///
/// Returns an error if the input is invalid (no call is made) or the
/// backend rejects it.
pub async fn add(
    client: &BackendClient,
    name: &str,
    price: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let input = ProductDraft {
        name: name.to_string(),
        price: price.to_string(),
    }
    .validate()?;

    let created = client.create_product(&input).await?;
    writeln!(out, "{} has been added to your store.", created.name)?;
    writeln!(out, "{}", product_row(&created))?;
    Ok(())
}

/// Replace a product's name and price.
///
/// # Errors
///
/// Returns an error if the input is invalid or the backend rejects it.
pub async fn update(
    client: &BackendClient,
    id: &str,
    name: &str,
    price: &str,
    price_id: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let input = ProductDraft {
        name: name.to_string(),
        price: price.to_string(),
    }
    .validate()?;
    let id = ProductId::new(id);

    let product = Product {
        id: id.clone(),
        name: input.name,
        price: input.price,
        price_id: PriceId::new(price_id),
    };

    let updated = client.update_product(&id, &product).await?;
    writeln!(out, "{} has been updated.", updated.name)?;
    writeln!(out, "{}", product_row(&updated))?;
    Ok(())
}

/// Delete a product. Without `confirmed` nothing is sent.
///
/// # Errors
///
/// Returns [`CommandError::NotConfirmed`] if `confirmed` is false, or an
/// error if the backend rejects the delete.
pub async fn delete(
    client: &BackendClient,
    id: &str,
    confirmed: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if !confirmed {
        return Err(CommandError::NotConfirmed(id.to_string()));
    }

    client.delete_product(&ProductId::new(id)).await?;
    writeln!(out, "The product has been removed from your store.")?;
    Ok(())
}

/// Parse a `--price` argument eagerly so clap reports bad values.
///
/// # Errors
///
/// Returns the parse failure as a string for clap.
pub fn parse_price_arg(value: &str) -> Result<String, String> {
    Price::parse(value)
        .map(|_| value.trim().to_string())
        .map_err(|e| e.to_string())
}
