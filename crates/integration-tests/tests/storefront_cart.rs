//! Integration tests for the cart and checkout.
//!
//! Prices: starter $24 / 5 lb, grower $69 / 20 lb, compost $52 / 10 lb.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use loam_integration_tests::TestContext;

// =============================================================================
// Empty cart
// =============================================================================

#[tokio::test]
async fn test_home_shows_empty_cart() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Cart is empty. Add your first bag!"));
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$0.00</dd>"#));
    assert!(resp.body.contains(r#"<dd id="cart-weight">0 lb</dd>"#));
    assert!(resp.body.contains(r#"id="checkout-button" type="submit" disabled"#));
}

#[tokio::test]
async fn test_home_lists_every_product() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/").await;

    for id in ["starter", "grower", "compost", "bulk"] {
        assert!(
            resp.body.contains(&format!(r#"data-product-id="{id}""#)),
            "missing product card for {id}"
        );
    }
    assert!(resp.body.contains("$480.00"));
    assert!(resp.body.contains("1000 lb"));
}

// =============================================================================
// Cart operations
// =============================================================================

#[tokio::test]
async fn test_add_with_htmx_returns_fragment_and_trigger() {
    let mut ctx = TestContext::new();
    let resp = ctx
        .post_form_htmx("/cart/add", &[("product_id", "starter")])
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("hx-trigger"), Some("cart-updated"));
    assert!(resp.body.starts_with(r#"<div id="cart""#));
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$24.00</dd>"#));
    assert!(resp.body.contains(r#"<dd id="cart-weight">5 lb</dd>"#));
    assert!(!resp.body.contains("Cart is empty"));
}

#[tokio::test]
async fn test_add_without_htmx_redirects_to_cart() {
    let mut ctx = TestContext::new();
    let resp = ctx.post_form("/cart/add", &[("product_id", "compost")]).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/#cart"));

    let home = ctx.get("/").await;
    assert!(home.body.contains(r#"<dd id="cart-subtotal">$52.00</dd>"#));
}

#[tokio::test]
async fn test_cart_totals_across_products() {
    let mut ctx = TestContext::new();
    ctx.post_form_htmx("/cart/add", &[("product_id", "starter")]).await;
    ctx.post_form_htmx("/cart/add", &[("product_id", "starter")]).await;
    let resp = ctx
        .post_form_htmx("/cart/add", &[("product_id", "grower")])
        .await;

    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$117.00</dd>"#));
    assert!(resp.body.contains(r#"<dd id="cart-weight">30 lb</dd>"#));
    assert!(resp.body.contains("3 items"));

    let count = ctx.get_htmx("/cart/count").await;
    assert!(count.body.contains(">3</span>"));
}

#[tokio::test]
async fn test_unknown_product_is_ignored() {
    let mut ctx = TestContext::new();
    let resp = ctx
        .post_form_htmx("/cart/add", &[("product_id", "peat-moss")])
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("hx-trigger"), None);
    assert!(resp.body.contains("Cart is empty. Add your first bag!"));
}

#[tokio::test]
async fn test_decrease_stops_at_one() {
    let mut ctx = TestContext::new();
    ctx.post_form_htmx("/cart/add", &[("product_id", "compost")]).await;

    let resp = ctx
        .post_form_htmx(
            "/cart/update",
            &[("product_id", "compost"), ("action", "decrease")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<span class="quantity">1</span>"#));
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$52.00</dd>"#));
}

#[tokio::test]
async fn test_increase_then_remove() {
    let mut ctx = TestContext::new();
    ctx.post_form_htmx("/cart/add", &[("product_id", "grower")]).await;

    let resp = ctx
        .post_form_htmx(
            "/cart/update",
            &[("product_id", "grower"), ("action", "increase")],
        )
        .await;
    assert!(resp.body.contains(r#"<span class="quantity">2</span>"#));
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$138.00</dd>"#));

    let resp = ctx
        .post_form_htmx("/cart/remove", &[("product_id", "grower")])
        .await;
    assert_eq!(resp.header("hx-trigger"), Some("cart-updated"));
    assert!(resp.body.contains("Cart is empty. Add your first bag!"));
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$0.00</dd>"#));
}

#[tokio::test]
async fn test_update_rejects_unknown_action() {
    let mut ctx = TestContext::new();
    let resp = ctx
        .post_form_htmx(
            "/cart/update",
            &[("product_id", "grower"), ("action", "double")],
        )
        .await;

    assert!(resp.status.is_client_error());
}

#[tokio::test]
async fn test_cart_is_per_browser() {
    let mut ctx = TestContext::new();
    ctx.post_form_htmx("/cart/add", &[("product_id", "bulk")]).await;

    let mut other = ctx.fresh_browser();
    let resp = other.get("/").await;
    assert!(resp.body.contains("Cart is empty. Add your first bag!"));

    let resp = ctx.get("/").await;
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$480.00</dd>"#));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_is_rejected() {
    let mut ctx = TestContext::new();
    let resp = ctx.post_form_htmx("/checkout", &[]).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Cart is empty");
}

#[tokio::test]
async fn test_checkout_summarizes_item_count() {
    let mut ctx = TestContext::new();
    ctx.post_form_htmx("/cart/add", &[("product_id", "starter")]).await;
    ctx.post_form_htmx("/cart/add", &[("product_id", "compost")]).await;
    ctx.post_form_htmx("/cart/add", &[("product_id", "compost")]).await;

    let resp = ctx.post_form_htmx("/checkout", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="checkout-result""#));
    assert!(resp.body.contains("secure invoice for 3 item(s)."));

    // Checkout leaves the cart alone.
    let count = ctx.get_htmx("/cart/count").await;
    assert!(count.body.contains(">3</span>"));
}

#[tokio::test]
async fn test_checkout_without_htmx_renders_home() {
    let mut ctx = TestContext::new();
    ctx.post_form("/cart/add", &[("product_id", "grower")]).await;

    let resp = ctx.post_form("/checkout", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<!DOCTYPE html>"));
    assert!(resp.body.contains("secure invoice for 1 item(s)."));
    assert!(resp.body.contains(r#"<dd id="cart-subtotal">$69.00</dd>"#));
}
