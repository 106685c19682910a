//! Products tab: list, add, edit and delete.
//!
//! Rows change only after the backend confirms a mutation. The whole tab is
//! stored in the browser session between requests, so a mutation always
//! applies to the mount that issued it.

use coffee_stand_core::client::BackendClient;
use coffee_stand_core::{Product, ProductDraft, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Notice, Phase, RowSource, TabError, failed_source};

/// Session key holding the mounted products tab.
pub const SESSION_KEY: &str = "admin.products_tab";

const ADD_FAILED: &str = "Failed to add product. Please try again.";
const UPDATE_FAILED: &str = "Failed to update product. Please try again.";
const DELETE_FAILED: &str = "Failed to delete product. Please try again.";

/// The product dialog. At most one is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialog {
    #[default]
    Closed,
    Adding(ProductDraft),
    Editing { id: ProductId, draft: ProductDraft },
}

/// Whether the user answered the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Unconfirmed,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Unconfirmed
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsTab {
    pub phase: Phase,
    pub rows: Vec<Product>,
    pub source: RowSource,
    pub dialog: Dialog,
    pub notice: Option<Notice>,
}

impl ProductsTab {
    /// Mount the tab: fetch the product list once.
    ///
    /// On failure the demo catalog is shown when `fallback` is set,
    /// otherwise the tab is marked unavailable with no rows.
    #[instrument(skip(client))]
    pub async fn load(client: &BackendClient, fallback: bool) -> Self {
        let (rows, source) = match client.list_products().await {
            Ok(rows) => (rows, RowSource::Live),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
                let source = failed_source(fallback);
                let rows = if source.is_demo() {
                    Product::demo_catalog()
                } else {
                    Vec::new()
                };
                (rows, source)
            }
        };

        Self {
            phase: Phase::Ready,
            rows,
            source,
            dialog: Dialog::Closed,
            notice: None,
        }
    }

    /// Look up a row by id.
    #[must_use]
    pub fn row(&self, id: &ProductId) -> Option<&Product> {
        self.rows.iter().find(|p| &p.id == id)
    }

    /// Open an empty add dialog.
    pub fn open_add(&mut self) {
        self.dialog = Dialog::Adding(ProductDraft::default());
    }

    /// Open the edit dialog pre-filled from a row.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::UnknownProduct`] if no row has that id.
    pub fn open_edit(&mut self, id: &ProductId) -> Result<(), TabError> {
        let product = self
            .row(id)
            .ok_or_else(|| TabError::UnknownProduct(id.clone()))?;
        self.dialog = Dialog::Editing {
            id: id.clone(),
            draft: ProductDraft::from_product(product),
        };
        Ok(())
    }

    /// Close the dialog, discarding its draft.
    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::Closed;
    }

    /// Submit the add form.
    ///
    /// Invalid input never reaches the backend. On success the created
    /// record is appended and the dialog closes; on failure the dialog
    /// stays open with the draft intact.
    #[instrument(skip(self, client))]
    pub async fn submit_add(&mut self, client: &BackendClient, draft: ProductDraft) {
        let input = match draft.validate() {
            Ok(input) => input,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                self.dialog = Dialog::Adding(draft);
                return;
            }
        };

        match client.create_product(&input).await {
            Ok(created) => {
                self.notice = Some(Notice::success(
                    "Product added",
                    format!("{} has been added to your store.", created.name),
                ));
                self.rows.push(created);
                self.dialog = Dialog::Closed;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding product");
                self.notice = Some(Notice::error(ADD_FAILED));
                self.dialog = Dialog::Adding(draft);
            }
        }
    }

    /// Submit the edit form for one row.
    ///
    /// The row is replaced by the backend's response, which may carry a new
    /// `price_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::UnknownProduct`] if no row has that id.
    #[instrument(skip(self, client, draft), fields(product_id = %id))]
    pub async fn submit_edit(
        &mut self,
        client: &BackendClient,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<(), TabError> {
        let current = self
            .row(id)
            .cloned()
            .ok_or_else(|| TabError::UnknownProduct(id.clone()))?;

        let input = match draft.validate() {
            Ok(input) => input,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                self.dialog = Dialog::Editing {
                    id: id.clone(),
                    draft,
                };
                return Ok(());
            }
        };

        let product = Product {
            id: current.id,
            name: input.name,
            price: input.price,
            price_id: current.price_id,
        };

        match client.update_product(id, &product).await {
            Ok(updated) => {
                self.notice = Some(Notice::success(
                    "Product updated",
                    format!("{} has been updated.", updated.name),
                ));
                if let Some(row) = self.rows.iter_mut().find(|p| &p.id == id) {
                    *row = updated;
                }
                self.dialog = Dialog::Closed;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error updating product");
                self.notice = Some(Notice::error(UPDATE_FAILED));
                self.dialog = Dialog::Editing {
                    id: id.clone(),
                    draft,
                };
            }
        }

        Ok(())
    }

    /// Delete a row after the user confirmed.
    ///
    /// An unconfirmed delete does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::UnknownProduct`] if no row has that id.
    #[instrument(skip(self, client), fields(product_id = %id))]
    pub async fn delete(
        &mut self,
        client: &BackendClient,
        id: &ProductId,
        confirmation: Confirmation,
    ) -> Result<(), TabError> {
        if self.row(id).is_none() {
            return Err(TabError::UnknownProduct(id.clone()));
        }
        if confirmation == Confirmation::Unconfirmed {
            tracing::debug!("Delete not confirmed");
            return Ok(());
        }

        match client.delete_product(id).await {
            Ok(()) => {
                self.rows.retain(|p| &p.id != id);
                if matches!(&self.dialog, Dialog::Editing { id: editing, .. } if editing == id) {
                    self.dialog = Dialog::Closed;
                }
                self.notice = Some(Notice::success(
                    "Product deleted",
                    "The product has been removed from your store.",
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "Error deleting product");
                self.notice = Some(Notice::error(DELETE_FAILED));
            }
        }

        Ok(())
    }

    /// Remove the pending notification so it is shown only once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use coffee_stand_core::client::BackendConfig;
    use coffee_stand_core::{Price, PriceId};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> BackendClient {
        let url = BackendConfig::parse_base_url(&server.uri()).unwrap();
        BackendClient::new(&BackendConfig::new(url)).unwrap()
    }

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: price.to_string(),
        }
    }

    async fn mount_catalog(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "name": "Small Coffee", "price": 3, "price_id": "price_small"},
                {"id": "2", "name": "Large Coffee", "price": 7, "price_id": "price_large"}
            ])))
            .mount(server)
            .await;
    }

    async fn ready_tab(server: &MockServer) -> (BackendClient, ProductsTab) {
        mount_catalog(server).await;
        let client = client_for(server);
        let tab = ProductsTab::load(&client, true).await;
        (client, tab)
    }

    #[tokio::test]
    async fn test_load_live_rows() {
        let server = MockServer::start().await;
        assert_eq!(ProductsTab::default().phase, Phase::Loading);

        let (_, tab) = ready_tab(&server).await;

        assert_eq!(tab.phase, Phase::Ready);
        assert_eq!(tab.source, RowSource::Live);
        assert_eq!(tab.rows.len(), 2);
        assert_eq!(tab.dialog, Dialog::Closed);
    }

    #[tokio::test]
    async fn test_load_failure_uses_demo_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tab = ProductsTab::load(&client_for(&server), true).await;

        assert_eq!(tab.phase, Phase::Ready);
        assert_eq!(tab.source, RowSource::Demo);
        let names: Vec<&str> = tab.rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Small Coffee", "Medium Coffee", "Large Coffee", "Coffee Bundle"]
        );
    }

    #[tokio::test]
    async fn test_load_failure_without_fallback_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let tab = ProductsTab::load(&client_for(&server), false).await;

        assert_eq!(tab.source, RowSource::Unavailable);
        assert!(tab.rows.is_empty());
    }

    #[tokio::test]
    async fn test_submit_add_appends_server_record() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .and(body_json(json!({"name": "Iced Latte", "price": 4.5})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "prod_99", "name": "Iced Latte", "price": 4.5, "price_id": "price_99"
            })))
            .expect(1)
            .mount(&server)
            .await;

        tab.open_add();
        tab.submit_add(&client, draft("  Iced Latte ", "4.50")).await;

        assert_eq!(tab.rows.len(), 3);
        let added = tab.rows.last().unwrap();
        assert_eq!(added.id, ProductId::new("prod_99"));
        assert_eq!(added.price_id, PriceId::new("price_99"));
        assert_eq!(added.price, Price::from_cents(450));
        assert_eq!(tab.dialog, Dialog::Closed);

        let notice = tab.take_notice().unwrap();
        assert_eq!(notice.message, "Iced Latte has been added to your store.");
        assert!(tab.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_submit_add_invalid_input_makes_no_call() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        tab.open_add();
        tab.submit_add(&client, draft("", "3")).await;
        tab.submit_add(&client, draft("Mocha", "0")).await;
        tab.submit_add(&client, draft("Mocha", "1.999")).await;

        assert_eq!(tab.rows.len(), 2);
        assert_eq!(tab.dialog, Dialog::Adding(draft("Mocha", "1.999")));
        assert!(tab.notice.as_ref().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_submit_add_failure_keeps_draft() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        tab.open_add();
        tab.submit_add(&client, draft("Mocha", "6")).await;

        assert_eq!(tab.rows.len(), 2);
        assert_eq!(tab.dialog, Dialog::Adding(draft("Mocha", "6")));
        assert_eq!(tab.take_notice().unwrap().message, ADD_FAILED);
    }

    #[tokio::test]
    async fn test_edit_then_cancel_leaves_row_unchanged() {
        let server = MockServer::start().await;
        let (_, mut tab) = ready_tab(&server).await;
        let before = tab.rows.clone();

        tab.open_edit(&ProductId::new("1")).unwrap();
        assert_eq!(
            tab.dialog,
            Dialog::Editing {
                id: ProductId::new("1"),
                draft: draft("Small Coffee", "3"),
            }
        );
        tab.close_dialog();

        assert_eq!(tab.rows, before);
        assert_eq!(tab.dialog, Dialog::Closed);
    }

    #[tokio::test]
    async fn test_open_edit_unknown_row() {
        let server = MockServer::start().await;
        let (_, mut tab) = ready_tab(&server).await;

        assert_eq!(
            tab.open_edit(&ProductId::new("nope")),
            Err(TabError::UnknownProduct(ProductId::new("nope")))
        );
        assert_eq!(tab.dialog, Dialog::Closed);
    }

    #[tokio::test]
    async fn test_submit_edit_replaces_row_with_response() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("PUT"))
            .and(path("/products/1"))
            .and(body_json(json!({
                "id": "1", "name": "Small Coffee", "price": 3.5, "price_id": "price_small"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1", "name": "Small Coffee", "price": 3.5, "price_id": "price_small_v2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = ProductId::new("1");
        tab.open_edit(&id).unwrap();
        tab.submit_edit(&client, &id, draft("Small Coffee", "3.50"))
            .await
            .unwrap();

        assert_eq!(tab.rows.len(), 2);
        assert_eq!(tab.rows[0].price, Price::from_cents(350));
        assert_eq!(tab.rows[0].price_id, PriceId::new("price_small_v2"));
        assert_eq!(tab.dialog, Dialog::Closed);
        assert_eq!(
            tab.take_notice().unwrap().message,
            "Small Coffee has been updated."
        );
    }

    #[tokio::test]
    async fn test_submit_edit_failure_keeps_row_and_dialog() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("PUT"))
            .and(path("/products/2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        let before = tab.rows.clone();

        let id = ProductId::new("2");
        tab.open_edit(&id).unwrap();
        tab.submit_edit(&client, &id, draft("Huge Coffee", "9"))
            .await
            .unwrap();

        assert_eq!(tab.rows, before);
        assert!(matches!(tab.dialog, Dialog::Editing { .. }));
        assert_eq!(tab.take_notice().unwrap().message, UPDATE_FAILED);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        tab.delete(&client, &ProductId::new("1"), Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(tab.rows.len(), 1);
        assert_eq!(tab.rows[0].id, ProductId::new("2"));
        assert_eq!(
            tab.take_notice().unwrap().message,
            "The product has been removed from your store."
        );
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_makes_no_call() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        tab.delete(&client, &ProductId::new("1"), Confirmation::from(false))
            .await
            .unwrap();

        assert_eq!(tab.rows.len(), 2);
        assert!(tab.notice.is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_row() {
        let server = MockServer::start().await;
        let (client, mut tab) = ready_tab(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/products/2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        tab.delete(&client, &ProductId::new("2"), Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(tab.rows.len(), 2);
        assert_eq!(tab.take_notice().unwrap().message, DELETE_FAILED);
    }

    #[test]
    fn test_tab_survives_session_serialization() {
        let mut tab = ProductsTab {
            phase: Phase::Ready,
            rows: Product::demo_catalog(),
            source: RowSource::Demo,
            ..ProductsTab::default()
        };
        tab.open_edit(&ProductId::new("4")).unwrap();

        let value = serde_json::to_value(&tab).unwrap();
        let restored: ProductsTab = serde_json::from_value(value).unwrap();
        assert_eq!(restored, tab);
    }
}
