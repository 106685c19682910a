//! Checkout handler.
//!
//! Buying hands the browser off to the backend's payment page. htmx callers
//! get an `HX-Redirect` header; plain form posts get a `303 See Other`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use coffee_stand_core::PriceId;
use serde::Deserialize;
use tracing::instrument;

use super::home::CHECKOUT_FAILED_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;

/// Buy form body.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub price_id: String,
}

/// Blocking alert shown when a checkout session cannot be created.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_alert.html")]
pub struct CheckoutAlertTemplate {
    pub message: &'static str,
}

/// Whether the request was issued by htmx.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes() == b"true")
}

/// Create a checkout session for one product and redirect to it.
#[instrument(skip(state, headers))]
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let price_id = form.price_id.trim();
    if price_id.is_empty() {
        return Err(AppError::BadRequest("price_id is required".to_string()));
    }
    let htmx = is_htmx(&headers);

    match state
        .backend()
        .create_checkout_session(&PriceId::new(price_id))
        .await
    {
        Ok(session) => {
            tracing::info!(price_id, "Checkout session created");
            if htmx {
                Ok([("HX-Redirect", session.url)].into_response())
            } else {
                Ok(Redirect::to(&session.url).into_response())
            }
        }
        Err(e) => {
            tracing::error!(price_id, error = %e, "Error during checkout");
            if htmx {
                Ok(CheckoutAlertTemplate {
                    message: CHECKOUT_FAILED_MESSAGE,
                }
                .into_response())
            } else {
                Ok(Redirect::to("/?checkout=failed").into_response())
            }
        }
    }
}
