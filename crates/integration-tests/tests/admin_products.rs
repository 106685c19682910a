//! Admin products tab flows against a mock backend.

#![allow(clippy::unwrap_used)]

use coffee_stand_integration_tests::{TestContext, product_row_count, sample_catalog};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_tab(ctx: &TestContext) -> String {
    let resp = ctx.admin_get("/admin/tabs/products").send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_dashboard() {
    let ctx = TestContext::new().await;

    let resp = ctx.admin_get("/").send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/admin");

    let html = ctx.admin_get("/admin").send().await.unwrap().text().await.unwrap();
    assert!(html.contains(r#"hx-get="/admin/tabs/products""#));

    let html = ctx
        .admin_get("/admin?tab=orders")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"hx-get="/admin/tabs/orders""#));
}

#[tokio::test]
async fn test_mount_lists_live_products() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;

    let html = mount_tab(&ctx).await;

    assert_eq!(product_row_count(&html), 2);
    assert!(html.contains("$3.00"));
    assert!(!html.contains("Demo data"));
}

#[tokio::test]
async fn test_failed_fetch_shows_four_demo_rows() {
    let ctx = TestContext::new().await;
    ctx.mock_failure("GET", "/products", 500).await;

    let html = mount_tab(&ctx).await;

    assert_eq!(product_row_count(&html), 4);
    for name in ["Small Coffee", "Medium Coffee", "Large Coffee", "Coffee Bundle"] {
        assert!(html.contains(name), "missing {name}");
    }
    assert!(html.contains("Demo data"));
    assert!(!html.contains("No products found"));
}

#[tokio::test]
async fn test_failed_fetch_without_fallback_offers_retry() {
    let ctx = TestContext::with_demo_fallback(false).await;
    ctx.mock_failure("GET", "/products", 500).await;

    let html = mount_tab(&ctx).await;

    assert_eq!(product_row_count(&html), 0);
    assert!(html.contains("Retry"));
    assert!(!html.contains("No products found"));
}

#[tokio::test]
async fn test_add_product_appends_server_record() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({"name": "Iced Latte", "price": 4.5})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "prod_77", "name": "Iced Latte", "price": 4.5, "price_id": "price_77"
        })))
        .expect(1)
        .mount(&ctx.backend)
        .await;

    mount_tab(&ctx).await;
    let html = ctx
        .admin_get("/admin/tabs/products/new")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Add New Product"));
    assert!(html.contains("<dialog open"));

    let resp = ctx
        .admin_post(
            "/admin/tabs/products",
            &[("name", "Iced Latte"), ("price", "4.50")],
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("HX-Trigger").unwrap(), "products-changed");
    let html = resp.text().await.unwrap();

    assert_eq!(product_row_count(&html), 3);
    assert!(html.contains(r#"<tr id="product-prod_77">"#));
    assert!(html.contains("$4.50"));
    assert!(html.contains("Iced Latte has been added to your store."));
    assert!(!html.contains("<dialog open"));
}

#[tokio::test]
async fn test_invalid_product_is_not_sent() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.backend)
        .await;

    mount_tab(&ctx).await;
    ctx.admin_get("/admin/tabs/products/new").send().await.unwrap();
    let html = ctx
        .admin_post("/admin/tabs/products", &[("name", "Mocha"), ("price", "0")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(product_row_count(&html), 2);
    assert!(html.contains("<dialog open"));
    assert!(html.contains(r#"value="Mocha""#));
}

#[tokio::test]
async fn test_failed_add_keeps_dialog_and_input() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;
    ctx.mock_failure("POST", "/products", 500).await;

    mount_tab(&ctx).await;
    let html = ctx
        .admin_post("/admin/tabs/products", &[("name", "Mocha"), ("price", "6")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(product_row_count(&html), 2);
    assert!(html.contains("Failed to add product. Please try again."));
    assert!(html.contains(r#"value="Mocha""#));
}

#[tokio::test]
async fn test_edit_then_cancel_leaves_row_unchanged() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.backend)
        .await;

    let before = mount_tab(&ctx).await;
    let html = ctx
        .admin_get("/admin/tabs/products/1/edit")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Edit Product"));
    assert!(html.contains(r#"value="Small Coffee""#));

    let after = ctx
        .admin_post("/admin/tabs/products/dialog/close", &[])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(after, before);
}

#[tokio::test]
async fn test_edit_replaces_row_with_server_response() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;
    Mock::given(method("PUT"))
        .and(path("/products/2"))
        .and(body_json(json!({
            "id": "2", "name": "Huge Coffee", "price": 9.0, "price_id": "price_large"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "2", "name": "Huge Coffee", "price": 9.0, "price_id": "price_huge"
        })))
        .expect(1)
        .mount(&ctx.backend)
        .await;

    mount_tab(&ctx).await;
    ctx.admin_get("/admin/tabs/products/2/edit").send().await.unwrap();
    let html = ctx
        .admin_post(
            "/admin/tabs/products/2",
            &[("name", "Huge Coffee"), ("price", "9")],
        )
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(product_row_count(&html), 2);
    assert!(html.contains("Huge Coffee has been updated."));
    assert!(html.contains("$9.00"));
    assert!(!html.contains("Large Coffee"));
}

#[tokio::test]
async fn test_edit_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;

    mount_tab(&ctx).await;
    let resp = ctx
        .admin_get("/admin/tabs/products/999/edit")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;
    Mock::given(method("DELETE"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.backend)
        .await;

    mount_tab(&ctx).await;

    let html = ctx
        .admin_post("/admin/tabs/products/1/delete", &[])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(product_row_count(&html), 2);

    let html = ctx
        .admin_post("/admin/tabs/products/1/delete", &[("confirmed", "true")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(product_row_count(&html), 1);
    assert!(!html.contains("Small Coffee"));
    assert!(html.contains("The product has been removed from your store."));
}

#[tokio::test]
async fn test_remount_discards_local_state() {
    let ctx = TestContext::new().await;
    ctx.mock_products(sample_catalog()).await;

    mount_tab(&ctx).await;
    let html = ctx
        .admin_get("/admin/tabs/products/new")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<dialog open"));

    let html = mount_tab(&ctx).await;
    assert!(!html.contains("<dialog open"));
    assert_eq!(product_row_count(&html), 2);
}
