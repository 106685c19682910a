//! Products tab route handlers.
//!
//! Every handler answers with the re-rendered tab fragment, which htmx
//! swaps in place of `#products-tab`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use coffee_stand_core::{Product, ProductDraft, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::tabs::products::SESSION_KEY;
use crate::tabs::{Confirmation, Dialog, Notice, ProductsTab};

/// Event fired after a confirmed mutation.
pub const PRODUCTS_CHANGED_EVENT: &str = "products-changed";

const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

// =============================================================================
// Views
// =============================================================================

/// Product row display data.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: String,
    pub path_id: String,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            path_id: urlencoding::encode(product.id.as_str()).into_owned(),
            name: product.name.clone(),
            price: product.price.display(),
        }
    }
}

/// Open dialog display data.
#[derive(Debug, Clone)]
pub struct DialogView {
    pub title: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub field_prefix: &'static str,
    pub name: String,
    pub price: String,
}

impl DialogView {
    fn from_dialog(dialog: &Dialog) -> Option<Self> {
        match dialog {
            Dialog::Closed => None,
            Dialog::Adding(draft) => Some(Self {
                title: "Add New Product",
                action: "/admin/tabs/products".to_string(),
                submit_label: "Add Product",
                field_prefix: "add",
                name: draft.name.clone(),
                price: draft.price.clone(),
            }),
            Dialog::Editing { id, draft } => Some(Self {
                title: "Edit Product",
                action: format!("/admin/tabs/products/{}", urlencoding::encode(id.as_str())),
                submit_label: "Save Changes",
                field_prefix: "edit",
                name: draft.name.clone(),
                price: draft.price.clone(),
            }),
        }
    }
}

/// Products tab fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/products_tab.html")]
pub struct ProductsTabTemplate {
    pub rows: Vec<ProductRowView>,
    pub demo: bool,
    pub unavailable: bool,
    pub dialog: Option<DialogView>,
    pub notice: Option<Notice>,
    pub delete_prompt: &'static str,
}

impl ProductsTabTemplate {
    fn new(tab: &ProductsTab, notice: Option<Notice>) -> Self {
        Self {
            rows: tab.rows.iter().map(ProductRowView::from).collect(),
            demo: tab.source.is_demo(),
            unavailable: tab.source.is_unavailable(),
            dialog: DialogView::from_dialog(&tab.dialog),
            notice,
            delete_prompt: DELETE_PROMPT,
        }
    }
}

// =============================================================================
// Session helpers
// =============================================================================

/// The mounted tab, or a fresh mount if the session has none.
async fn current_tab(state: &AppState, session: &Session) -> Result<ProductsTab, AppError> {
    if let Some(tab) = session.get::<ProductsTab>(SESSION_KEY).await? {
        return Ok(tab);
    }
    Ok(ProductsTab::load(state.backend(), state.demo_fallback()).await)
}

/// Store the tab and render it, showing any pending notice once.
async fn store_and_render(session: &Session, mut tab: ProductsTab) -> Result<Response, AppError> {
    let notice = tab.take_notice();
    session.insert(SESSION_KEY, &tab).await?;

    let changed = notice.as_ref().is_some_and(|n| !n.is_error());
    let template = ProductsTabTemplate::new(&tab, notice);

    if changed {
        Ok(([("HX-Trigger", PRODUCTS_CHANGED_EVENT)], template).into_response())
    } else {
        Ok(template.into_response())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Mount the products tab with a fresh fetch.
#[instrument(skip(state, session))]
pub async fn mount(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let tab = ProductsTab::load(state.backend(), state.demo_fallback()).await;
    store_and_render(&session, tab).await
}

/// Open the add dialog.
#[instrument(skip(state, session))]
pub async fn open_add(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let mut tab = current_tab(&state, &session).await?;
    tab.open_add();
    store_and_render(&session, tab).await
}

/// Open the edit dialog for one row.
#[instrument(skip(state, session))]
pub async fn open_edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    let mut tab = current_tab(&state, &session).await?;
    tab.open_edit(&id)?;
    store_and_render(&session, tab).await
}

/// Close the open dialog without saving.
#[instrument(skip(state, session))]
pub async fn close_dialog(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let mut tab = current_tab(&state, &session).await?;
    tab.close_dialog();
    store_and_render(&session, tab).await
}

/// Submit the add form.
#[instrument(skip(state, session))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(draft): Form<ProductDraft>,
) -> Result<Response, AppError> {
    let mut tab = current_tab(&state, &session).await?;
    tab.submit_add(state.backend(), draft).await;
    store_and_render(&session, tab).await
}

/// Submit the edit form.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Form(draft): Form<ProductDraft>,
) -> Result<Response, AppError> {
    let mut tab = current_tab(&state, &session).await?;
    tab.submit_edit(state.backend(), &id, draft).await?;
    store_and_render(&session, tab).await
}

/// Delete form body; htmx sends `confirmed=true` once the prompt is accepted.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirmed: String,
}

/// Delete one row.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let confirmation = Confirmation::from(form.confirmed == "true");
    let mut tab = current_tab(&state, &session).await?;
    tab.delete(state.backend(), &id, confirmation).await?;
    store_and_render(&session, tab).await
}
