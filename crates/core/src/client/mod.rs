//! Backend REST client.
//!
//! [`BackendClient`] is the only place endpoint paths are spelled out. Every
//! call is a single attempt: no retries, no caching, no auth header. A
//! timeout is applied only when one is configured.
//!
//! # Endpoints
//!
//! ```text
//! GET    /products         -> [Product]
//! POST   /products         {name, price} -> Product
//! PUT    /products/{id}    Product -> Product
//! DELETE /products/{id}    -> (body ignored)
//! GET    /orders           -> {orders: [Order]} | [Order]
//! POST   /checkout         {price_id} -> {url}
//! ```

mod error;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

pub use error::RequestError;

use crate::types::{
    CheckoutRequest, CheckoutSession, NewProduct, Order, OrdersResponse, PriceId, Product,
    ProductId,
};

/// Default backend location used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL; endpoint paths are appended to it.
    pub base_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    /// Create a configuration without a timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    /// Set a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Parse and check a base URL (must be http or https).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUrl`] if the value is not an absolute
    /// http(s) URL.
    pub fn parse_base_url(value: &str) -> Result<Url, RequestError> {
        let url = Url::parse(value).map_err(|e| RequestError::InvalidUrl(format!("{value}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(RequestError::InvalidUrl(format!(
                "{value}: unsupported scheme {other}"
            ))),
        }
    }
}

/// REST client for the products, orders and checkout backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    fn product_url(&self, id: &ProductId) -> String {
        self.url(&format!("products/{}", urlencoding::encode(id.as_str())))
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-2xx status, or the body is not a product array.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, RequestError> {
        let response = send(self.inner.client.get(self.url("products"))).await?;
        let products: Vec<Product> = parse_json(response).await?;
        tracing::debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Create a product. The backend assigns `id` and `price_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip_all, fields(name = %input.name))]
    pub async fn create_product(&self, input: &NewProduct) -> Result<Product, RequestError> {
        let request = self.inner.client.post(self.url("products")).json(input);
        let product: Product = parse_json(send(request).await?).await?;
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Replace a product's name and price.
    ///
    /// The backend may issue a new `price_id`; callers should keep the
    /// returned record rather than the one they sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<Product, RequestError> {
        let request = self.inner.client.put(self.product_url(id)).json(product);
        let updated: Product = parse_json(send(request).await?).await?;
        tracing::info!(price_id = %updated.price_id, "Updated product");
        Ok(updated)
    }

    /// Delete a product. Any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), RequestError> {
        send(self.inner.client.delete(self.product_url(id)))
            .await?;
        tracing::info!("Deleted product");
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List completed orders, in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not an order
    /// list.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, RequestError> {
        let response = send(self.inner.client.get(self.url("orders"))).await?;
        let orders = parse_json::<OrdersResponse>(response).await?.into_orders();
        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Ask the backend for a checkout session for one unit of `price_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend rejects it, or the
    /// returned URL is not an absolute http(s) URL.
    #[instrument(skip_all, fields(price_id = %price_id))]
    pub async fn create_checkout_session(
        &self,
        price_id: &PriceId,
    ) -> Result<CheckoutSession, RequestError> {
        let body = CheckoutRequest {
            price_id: price_id.clone(),
        };
        let request = self.inner.client.post(self.url("checkout")).json(&body);
        let session: CheckoutSession = parse_json(send(request).await?).await?;

        BackendConfig::parse_base_url(&session.url)
            .map_err(|_| RequestError::Parse(format!("invalid checkout url: {}", session.url)))?;

        Ok(session)
    }

}

/// Send a request and turn non-2xx responses into errors.
async fn send(request: RequestBuilder) -> Result<Response, RequestError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Backend request failed");
        return Err(RequestError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

/// Decode a JSON body, keeping transport and decode failures apart.
async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| RequestError::Parse(e.to_string()))
}
