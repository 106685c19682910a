//! Checkout session command.

use std::io::Write;

use coffee_stand_core::PriceId;
use coffee_stand_core::client::BackendClient;

use super::CommandError;

/// Create a checkout session and print its URL.
///
/// # Errors
///
/// Returns an error if the backend cannot create the session.
pub async fn create(
    client: &BackendClient,
    price_id: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let session = client
        .create_checkout_session(&PriceId::new(price_id))
        .await?;
    writeln!(out, "{}", session.url)?;
    Ok(())
}
