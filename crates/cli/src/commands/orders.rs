//! Order listing command.

use std::io::Write;

use coffee_stand_core::Order;
use coffee_stand_core::client::BackendClient;

use super::CommandError;

/// Format one order as a table row (local time, "Anonymous" for no email).
fn order_row(order: &Order) -> String {
    format!(
        "{:<24} {:<20} {:>10}  {:<24} {}",
        order.id,
        order.product_name,
        order.amount.display(),
        order.timestamp.format_local(),
        order.customer_label()
    )
}

/// Print every order in backend order.
///
/// # Errors
///
/// Returns an error if the backend call or output fails.
pub async fn list(client: &BackendClient, out: &mut impl Write) -> Result<(), CommandError> {
    let orders = client.list_orders().await?;

    if orders.is_empty() {
        writeln!(out, "No orders found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<24} {:<20} {:>10}  {:<24} CUSTOMER",
        "ORDER ID", "PRODUCT", "AMOUNT", "DATE"
    )?;
    for order in &orders {
        writeln!(out, "{}", order_row(order))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use coffee_stand_core::client::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_list_formats_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": [
                {"id": "cs_1", "product_name": "Small Coffee", "amount": 3, "timestamp": "yesterday"},
                {"id": "cs_2", "product_name": "Large Coffee", "amount": 7, "timestamp": 0,
                 "customer_email": "mike@example.com"}
            ]})))
            .mount(&server)
            .await;
        let url = BackendConfig::parse_base_url(&server.uri()).unwrap();
        let client = BackendClient::new(&BackendConfig::new(url)).unwrap();

        let mut out = Vec::new();
        list(&client, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Invalid date"));
        assert!(lines[1].ends_with("Anonymous"));
        assert!(lines[2].contains("$7.00"));
        assert!(lines[2].ends_with("mike@example.com"));
    }
}
