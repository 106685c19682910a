//! Dashboard shell.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Products,
    Orders,
}

impl AdminTab {
    /// URL slug and fragment path segment.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Orders => "Orders",
        }
    }
}

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

impl DashboardQuery {
    /// The requested tab; unknown values fall back to products.
    #[must_use]
    pub fn active_tab(&self) -> AdminTab {
        match self.tab.as_deref() {
            Some("orders") => AdminTab::Orders,
            _ => AdminTab::Products,
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub tabs: [AdminTab; 2],
    pub active: AdminTab,
}

/// Dashboard shell: tab bar plus a panel that mounts the active tab.
#[instrument]
pub async fn index(Query(query): Query<DashboardQuery>) -> DashboardTemplate {
    DashboardTemplate {
        tabs: [AdminTab::Products, AdminTab::Orders],
        active: query.active_tab(),
    }
}

/// `/` has no content of its own.
pub async fn root() -> Redirect {
    Redirect::to("/admin")
}
