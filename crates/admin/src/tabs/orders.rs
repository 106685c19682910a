//! Orders tab: read-only list of completed checkouts.

use chrono::{DateTime, Utc};
use coffee_stand_core::Order;
use coffee_stand_core::client::BackendClient;
use tracing::instrument;

use super::{Phase, RowSource, failed_source};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersTab {
    pub phase: Phase,
    pub rows: Vec<Order>,
    pub source: RowSource,
}

impl OrdersTab {
    /// Mount the tab: fetch orders once, keeping backend order.
    ///
    /// `now` anchors the ages of the demo orders used on failure.
    #[instrument(skip(client, now))]
    pub async fn load(client: &BackendClient, fallback: bool, now: DateTime<Utc>) -> Self {
        let (rows, source) = match client.list_orders().await {
            Ok(rows) => (rows, RowSource::Live),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching orders");
                let source = failed_source(fallback);
                let rows = if source.is_demo() {
                    Order::demo_orders(now)
                } else {
                    Vec::new()
                };
                (rows, source)
            }
        };

        Self {
            phase: Phase::Ready,
            rows,
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use coffee_stand_core::OrderTimestamp;
    use coffee_stand_core::client::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> BackendClient {
        let url = BackendConfig::parse_base_url(&server.uri()).unwrap();
        BackendClient::new(&BackendConfig::new(url)).unwrap()
    }

    #[tokio::test]
    async fn test_load_keeps_backend_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": [
                {"id": "cs_2", "product_name": "Large Coffee", "amount": 7, "timestamp": 200},
                {"id": "cs_1", "product_name": "Small Coffee", "amount": 3, "timestamp": 100}
            ]})))
            .expect(1)
            .mount(&server)
            .await;

        let tab = OrdersTab::load(&client_for(&server), true, Utc::now()).await;

        assert_eq!(tab.phase, Phase::Ready);
        assert_eq!(tab.source, RowSource::Live);
        let ids: Vec<&str> = tab.rows.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["cs_2", "cs_1"]);
    }

    #[tokio::test]
    async fn test_empty_list_is_live_not_demo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let tab = OrdersTab::load(&client_for(&server), true, Utc::now()).await;

        assert_eq!(tab.source, RowSource::Live);
        assert!(tab.rows.is_empty());
    }

    #[tokio::test]
    async fn test_failure_uses_demo_orders() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let now = DateTime::from_timestamp(1_741_964_966, 0).unwrap();

        let tab = OrdersTab::load(&client_for(&server), true, now).await;

        assert_eq!(tab.source, RowSource::Demo);
        assert_eq!(tab.rows.len(), 4);
        assert_eq!(
            tab.rows[0].timestamp,
            OrderTimestamp::from_datetime(&(now - chrono::Duration::minutes(30)))
        );
        assert_eq!(tab.rows[3].customer_label(), "Anonymous");
    }

    #[tokio::test]
    async fn test_failure_without_fallback_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let tab = OrdersTab::load(&client_for(&server), false, Utc::now()).await;

        assert_eq!(tab.source, RowSource::Unavailable);
        assert!(tab.rows.is_empty());
    }
}
