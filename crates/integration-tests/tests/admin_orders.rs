//! Admin order-surface tests against a running deployment.

#![allow(clippy::unwrap_used)]

use charted_art_integration_tests::TestContext;
use serde_json::json;

#[tokio::test]
async fn orders_require_authentication() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("skipping: CHARTED_ART_STOREFRONT_URL not set");
        return;
    };

    // No session cookie at all
    let resp = reqwest::get(format!("{}/orders", ctx.admin_url)).await.unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn non_admin_is_denied_with_no_data() {
    let Some(ctx) = TestContext::from_env() else {
        eprintln!("skipping: CHARTED_ART_STOREFRONT_URL not set");
        return;
    };

    // Sign in as an ordinary (non-allowlisted) user on the storefront
    let email = format!("not-an-admin-{}@example.com", std::process::id());
    let resp = ctx
        .client
        .post(format!("{}/auth/login", ctx.storefront_url))
        .json(&json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // The shared session cookie reaches the admin service but the
    // allowlist check rejects it
    let resp = ctx
        .client
        .get(format!("{}/orders", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}
