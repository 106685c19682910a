//! Home page and product grid fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use coffee_stand_core::Product;
use coffee_stand_core::client::RequestError;
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Placeholder cards shown while the grid loads.
pub const SKELETON_CARDS: usize = 4;

/// Message of the blocking checkout alert.
pub const CHECKOUT_FAILED_MESSAGE: &str =
    "Sorry, there was an error processing your purchase. Please try again.";

/// Product card display data.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub name: String,
    pub price: String,
    pub price_id: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.display_compact(),
            price_id: product.price_id.to_string(),
        }
    }
}

/// Home page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Set to `failed` after a non-htmx checkout could not be started.
    pub checkout: Option<String>,
}

/// Home page template. The grid itself arrives as a fragment.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub admin_url: String,
    pub skeleton_cards: usize,
    pub checkout_alert: Option<&'static str>,
}

/// Home page handler.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> HomeTemplate {
    HomeTemplate {
        admin_url: state.config().admin_url.clone(),
        skeleton_cards: SKELETON_CARDS,
        checkout_alert: (query.checkout.as_deref() == Some("failed"))
            .then_some(CHECKOUT_FAILED_MESSAGE),
    }
}

/// Product grid fragment: ready cards, or an inline error and no cards.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
    pub error: Option<String>,
}

impl From<Result<Vec<Product>, RequestError>> for ProductGridTemplate {
    fn from(result: Result<Vec<Product>, RequestError>) -> Self {
        match result {
            Ok(products) => Self {
                cards: products.iter().map(ProductCardView::from).collect(),
                error: None,
            },
            Err(e) => Self {
                cards: Vec::new(),
                error: Some(grid_error_message(&e)),
            },
        }
    }
}

/// Short, user-facing description of a failed product fetch.
fn grid_error_message(error: &RequestError) -> String {
    match error {
        RequestError::Status { status, .. } => {
            format!("Failed to fetch products: backend returned {status}")
        }
        RequestError::Http(_) | RequestError::InvalidUrl(_) => {
            "Failed to fetch products: the backend could not be reached".to_string()
        }
        RequestError::Parse(_) => {
            "Failed to fetch products: unexpected response from the backend".to_string()
        }
    }
}

/// Product grid fragment handler; fetches once per mount, no fallback data.
#[instrument(skip(state))]
pub async fn product_grid(State(state): State<AppState>) -> ProductGridTemplate {
    let result = state.backend().list_products().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Error fetching products");
    }
    ProductGridTemplate::from(result)
}
