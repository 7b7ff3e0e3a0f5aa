//! Integration tests for ChartedArt.
//!
//! # Running Tests
//!
//! The tests drive the running services over HTTP and need them (and the
//! migrated database) up first:
//!
//! ```bash
//! cargo run -p charted-art-cli -- migrate
//! cargo run -p charted-art-storefront &
//! cargo run -p charted-art-admin &
//!
//! CHARTED_ART_STOREFRONT_URL=http://127.0.0.1:3000 \
//! CHARTED_ART_ADMIN_URL=http://127.0.0.1:3001 \
//!     cargo test -p charted-art-integration-tests
//! ```
//!
//! Without `CHARTED_ART_STOREFRONT_URL` set, every test is a no-op skip,
//! so a plain `cargo test` of the workspace stays green.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Connection details for a running deployment under test.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestContext {
    /// Build a context from the environment, or `None` when the target
    /// URLs are not configured (tests should then skip).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let storefront_url = std::env::var("CHARTED_ART_STOREFRONT_URL").ok()?;
        let admin_url = std::env::var("CHARTED_ART_ADMIN_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3001".to_string());

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        Some(Self {
            client,
            storefront_url,
            admin_url,
        })
    }
}
