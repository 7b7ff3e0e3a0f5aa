//! Cart workflow tests against a running deployment.

#![allow(clippy::unwrap_used)]

use charted_art_integration_tests::TestContext;
use serde_json::{Value, json};

#[tokio::test]
async fn anonymous_cart_count_is_zero() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("skipping: CHARTED_ART_STOREFRONT_URL not set");
        return;
    };

    let resp = ctx
        .client
        .get(format!("{}/cart/count", ctx.storefront_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn add_to_cart_creates_cart_and_counts_one() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("skipping: CHARTED_ART_STOREFRONT_URL not set");
        return;
    };

    // Fresh identity each run so the cart starts empty
    let email = format!("cart-test-{}@example.com", std::process::id());
    let resp = ctx
        .client
        .post(format!("{}/auth/login", ctx.storefront_url))
        .json(&json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = ctx
        .client
        .post(format!("{}/kit/add-to-cart", ctx.storefront_url))
        .json(&json!({
            "size": "A3",
            "frame": "none",
            "image_url": "/uploads/test/fixture.jpg",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["item_count"], 1);

    let resp = ctx
        .client
        .get(format!("{}/cart", ctx.storefront_url))
        .send()
        .await
        .unwrap();
    let items: Value = resp.json().await.unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 1);
    assert_eq!(items[0]["price"], "699.99");
}

#[tokio::test]
async fn storefront_health_is_ok() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("skipping: CHARTED_ART_STOREFRONT_URL not set");
        return;
    };

    let resp = ctx
        .client
        .get(format!("{}/health", ctx.storefront_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
