//! Zoho Inventory API client.
//!
//! Access tokens are cached in memory and refreshed automatically when
//! within a minute of expiry.

use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::instrument;

use super::auth::{ZohoToken, fetch_access_token};
use super::types::{
    ContactAddress, ContactEnvelope, ContactSearchEnvelope, CreatedItem, ItemEnvelope, NewContact,
    NewItem, NewSalesOrder, SalesOrderInput, shipment_window,
};
use super::ZohoError;
use crate::config::ZohoConfig;

/// Zoho Inventory API base URL.
const API_BASE: &str = "https://www.zohoapis.com/inventory/v1";

/// Zoho Inventory API client.
#[derive(Clone)]
pub struct ZohoClient {
    inner: Arc<ZohoClientInner>,
}

struct ZohoClientInner {
    http: reqwest::Client,
    config: ZohoConfig,
    /// In-memory token cache
    token: RwLock<Option<ZohoToken>>,
}

impl ZohoClient {
    /// Create a new client from the configured credential block.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created, which does not happen
    /// with the standard TLS configuration.
    #[must_use]
    pub fn new(config: ZohoConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ZohoClientInner {
                http,
                config,
                token: RwLock::new(None),
            }),
        }
    }

    /// A valid access token, exchanging the refresh token if needed.
    async fn access_token(&self) -> Result<SecretString, ZohoError> {
        {
            let cached = self.inner.token.read().await;
            if let Some(token) = cached.as_ref()
                && !token.is_expired()
            {
                return Ok(token.access_token.clone());
            }
        }

        let token = fetch_access_token(&self.inner.http, &self.inner.config).await?;
        let access = token.access_token.clone();
        *self.inner.token.write().await = Some(token);
        Ok(access)
    }

    /// POST a JSON body to an inventory endpoint and decode the response.
    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ZohoError> {
        let token = self.access_token().await?;
        let response = self
            .inner
            .http
            .post(format!("{API_BASE}/{path}"))
            .query(&[("organization_id", self.inner.config.organization_id.as_str())])
            .header(
                "Authorization",
                format!("Zoho-oauthtoken {}", token.expose_secret()),
            )
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ZohoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Create an inventory item for a newly minted product variant.
    ///
    /// # Errors
    ///
    /// Returns `ZohoError` on token or API failure; callers in the primary
    /// workflows log and swallow it.
    #[instrument(skip(self), fields(sku = %sku))]
    pub async fn create_item(
        &self,
        name: &str,
        sku: &str,
        rate: Decimal,
    ) -> Result<CreatedItem, ZohoError> {
        let body = NewItem::new(
            name,
            sku,
            rate,
            &self.inner.config.sales_account_id,
            &self.inner.config.tax_id,
        );

        let envelope: ItemEnvelope = self.post_json("items", &body).await?;
        Ok(envelope.item)
    }

    /// Mirror a placed order as a Zoho sales order.
    ///
    /// Creates the customer contact (or falls back to looking one up by
    /// name when the create is rejected as a duplicate), then books the
    /// sales order with today's date and a shipment date seven days out.
    ///
    /// # Errors
    ///
    /// Returns `ZohoError` on token or API failure.
    #[instrument(skip_all, fields(customer = %order.customer_name))]
    pub async fn create_sales_order(&self, order: &SalesOrderInput) -> Result<(), ZohoError> {
        let customer_id = self.resolve_customer(order).await?;
        let (date, shipment_date) = shipment_window(chrono::Utc::now().date_naive());

        let body = NewSalesOrder {
            customer_id: &customer_id,
            date,
            shipment_date,
            line_items: &order.line_items,
            shipping_address: ContactAddress::from(&order.shipping_address),
        };

        self.post_json::<_, serde_json::Value>("salesorders", &body)
            .await?;
        Ok(())
    }

    /// Create the customer contact, or find an existing one by name.
    async fn resolve_customer(&self, order: &SalesOrderInput) -> Result<String, ZohoError> {
        let contact = NewContact {
            contact_name: &order.customer_name,
            contact_type: "customer",
            billing_address: ContactAddress::from(&order.shipping_address),
            shipping_address: ContactAddress::from(&order.shipping_address),
        };

        match self.post_json::<_, ContactEnvelope>("contacts", &contact).await {
            Ok(envelope) => Ok(envelope.contact.contact_id),
            Err(create_err) => {
                tracing::debug!("contact create rejected, searching by name: {create_err}");
                self.find_customer(&order.customer_name).await
            }
        }
    }

    async fn find_customer(&self, name: &str) -> Result<String, ZohoError> {
        let token = self.access_token().await?;
        let response = self
            .inner
            .http
            .get(format!("{API_BASE}/contacts"))
            .query(&[
                ("organization_id", self.inner.config.organization_id.as_str()),
                ("contact_name", name),
            ])
            .header(
                "Authorization",
                format!("Zoho-oauthtoken {}", token.expose_secret()),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ZohoError::CustomerUnresolved);
        }

        let envelope: ContactSearchEnvelope = response.json().await?;
        envelope
            .contacts
            .into_iter()
            .next()
            .map(|c| c.contact_id)
            .ok_or(ZohoError::CustomerUnresolved)
    }
}
