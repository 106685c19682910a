//! Integration tests for Coffee Stand.
//!
//! [`TestContext`] starts the storefront and admin routers on ephemeral
//! ports, both pointed at a `wiremock` server standing in for the backend.
//! Requests go through a cookie-keeping `reqwest` client that does not
//! follow redirects, so redirect targets can be asserted directly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coffee-stand-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::Router;
use coffee_stand_admin::config::AdminConfig;
use coffee_stand_storefront::config::StorefrontConfig;
use reqwest::{Client, RequestBuilder, redirect::Policy};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Running storefront and admin apps plus their mock backend.
pub struct TestContext {
    /// Mock backend; expectations are verified when the context drops.
    pub backend: MockServer,
    /// Cookie-keeping client that does not follow redirects.
    pub client: Client,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestContext {
    /// Start both apps with admin demo fallback enabled.
    pub async fn new() -> Self {
        Self::with_demo_fallback(true).await
    }

    /// Start both apps with the given admin demo fallback setting.
    pub async fn with_demo_fallback(demo_fallback: bool) -> Self {
        let backend = MockServer::start().await;
        let vars = HashMap::from([
            ("BACKEND_URL".to_string(), backend.uri()),
            (
                "ADMIN_DEMO_FALLBACK".to_string(),
                demo_fallback.to_string(),
            ),
        ]);
        let lookup = |key: &str| vars.get(key).cloned();

        let storefront_config =
            StorefrontConfig::from_lookup(lookup).expect("storefront config");
        let storefront_state = coffee_stand_storefront::state::AppState::new(storefront_config)
            .expect("storefront state");
        let storefront_addr = serve(coffee_stand_storefront::app(storefront_state)).await;

        let admin_config = AdminConfig::from_lookup(lookup).expect("admin config");
        let admin_state =
            coffee_stand_admin::state::AppState::new(admin_config).expect("admin state");
        let admin_addr = serve(coffee_stand_admin::app(admin_state)).await;

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            backend,
            client,
            storefront_url: format!("http://{storefront_addr}"),
            admin_url: format!("http://{admin_addr}"),
        }
    }

    /// GET a storefront path.
    pub fn storefront_get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{path}", self.storefront_url))
    }

    /// POST a form to a storefront path.
    pub fn storefront_post(&self, path: &str, form: &[(&str, &str)]) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.storefront_url))
            .form(form)
    }

    /// GET an admin path as htmx would.
    pub fn admin_get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", self.admin_url))
            .header("HX-Request", "true")
    }

    /// POST a form to an admin path as htmx would.
    pub fn admin_post(&self, path: &str, form: &[(&str, &str)]) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.admin_url))
            .header("HX-Request", "true")
            .form(form)
    }

    /// Serve `GET /products` with the given body.
    pub async fn mock_products(&self, products: Value) {
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products))
            .mount(&self.backend)
            .await;
    }

    /// Fail every request to `path` with the given status.
    pub async fn mock_failure(&self, http_method: &str, route: &str, status: u16) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": "boom"})))
            .mount(&self.backend)
            .await;
    }
}

/// A small two-product catalog.
#[must_use]
pub fn sample_catalog() -> Value {
    json!([
        {"id": "1", "name": "Small Coffee", "price": 3, "price_id": "price_small"},
        {"id": "2", "name": "Large Coffee", "price": 7, "price_id": "price_large"}
    ])
}

/// Count rendered product rows in an admin products fragment.
#[must_use]
pub fn product_row_count(html: &str) -> usize {
    html.matches(r#"<tr id="product-"#).count()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}
