//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Home page (skeleton grid, loads the fragment)
//! GET  /products/grid  - Product grid fragment
//! POST /checkout       - Create checkout session and redirect
//! GET  /success        - Payment completed
//! GET  /cancel         - Payment cancelled
//! ```

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

pub mod checkout;
pub mod home;
pub mod outcome;

/// Build the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products/grid", get(home::product_grid))
        .route("/checkout", post(checkout::checkout))
        .route("/success", get(outcome::success))
        .route("/cancel", get(outcome::cancel))
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
