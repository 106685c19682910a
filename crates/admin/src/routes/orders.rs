//! Orders tab route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use coffee_stand_core::Order;
use tracing::instrument;

use crate::state::AppState;
use crate::tabs::OrdersTab;

/// Order row display data.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub product_name: String,
    pub amount: String,
    pub date: String,
    pub customer: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            product_name: order.product_name.clone(),
            amount: order.amount.display(),
            date: order.timestamp.format_local(),
            customer: order.customer_label().to_string(),
        }
    }
}

/// Orders tab fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/orders_tab.html")]
pub struct OrdersTabTemplate {
    pub rows: Vec<OrderRowView>,
    pub demo: bool,
    pub unavailable: bool,
}

impl From<&OrdersTab> for OrdersTabTemplate {
    fn from(tab: &OrdersTab) -> Self {
        Self {
            rows: tab.rows.iter().map(OrderRowView::from).collect(),
            demo: tab.source.is_demo(),
            unavailable: tab.source.is_unavailable(),
        }
    }
}

/// Mount the orders tab with a fresh fetch.
#[instrument(skip(state))]
pub async fn mount(State(state): State<AppState>) -> OrdersTabTemplate {
    let tab = OrdersTab::load(state.backend(), state.demo_fallback(), chrono::Utc::now()).await;
    OrdersTabTemplate::from(&tab)
}
