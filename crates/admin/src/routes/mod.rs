//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Redirect to /admin
//! GET  /admin                             - Dashboard shell (?tab=products|orders)
//!
//! # Products tab (fragments)
//! GET  /admin/tabs/products               - Mount (fresh fetch)
//! POST /admin/tabs/products               - Submit add form
//! GET  /admin/tabs/products/new           - Open add dialog
//! POST /admin/tabs/products/dialog/close  - Close dialog
//! POST /admin/tabs/products/{id}          - Submit edit form
//! GET  /admin/tabs/products/{id}/edit     - Open edit dialog
//! POST /admin/tabs/products/{id}/delete   - Delete (confirmed=true)
//!
//! # Orders tab (fragment)
//! GET  /admin/tabs/orders                 - Mount (fresh fetch)
//! ```

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod dashboard;
pub mod orders;
pub mod products;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::root))
        .route("/admin", get(dashboard::index))
        .route(
            "/admin/tabs/products",
            get(products::mount).post(products::create),
        )
        .route("/admin/tabs/products/new", get(products::open_add))
        .route(
            "/admin/tabs/products/dialog/close",
            post(products::close_dialog),
        )
        .route("/admin/tabs/products/{id}", post(products::update))
        .route("/admin/tabs/products/{id}/edit", get(products::open_edit))
        .route("/admin/tabs/products/{id}/delete", post(products::delete))
        .route("/admin/tabs/orders", get(orders::mount))
}
