//! Pages the payment flow returns to.

use askama::Template;
use askama_web::WebTemplate;

use crate::filters;

#[derive(Template, WebTemplate)]
#[template(path = "success.html")]
pub struct SuccessTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "cancel.html")]
pub struct CancelTemplate;

/// Payment completed.
pub async fn success() -> SuccessTemplate {
    tracing::info!("Payment successful");
    SuccessTemplate
}

/// Payment abandoned.
pub async fn cancel() -> CancelTemplate {
    tracing::info!("Payment cancelled");
    CancelTemplate
}
