//! Checkout and order-history route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::db::profiles::ProfileRepository;
use crate::db::variants::VariantRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Order, ShippingAddress};
use crate::services::zoho::{SalesOrderInput, SalesOrderLine};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping: ShippingAddress,
}

/// Place an order from the caller's cart.
///
/// Creates the order and its denormalized line items, empties the cart,
/// and fire-and-forgets a Zoho sales-order mirror. The mirror never
/// delays or fails the checkout.
#[instrument(skip(state, body))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .create_from_cart(user.id, &body.shipping)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::Validation("your cart is empty".to_string()),
            other => AppError::Database(other),
        })?;

    spawn_sales_order_mirror(&state, &user, &order, body.shipping);

    Ok(Json(order))
}

/// The caller's orders, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}

/// Mirror a placed order into Zoho as a sales order.
///
/// Skipped with a log line when Zoho is unconfigured or when any line's
/// variant was never mirrored (there is nothing to reference); failures
/// are logged and swallowed.
fn spawn_sales_order_mirror(
    state: &AppState,
    user: &CurrentUser,
    order: &Order,
    shipping: ShippingAddress,
) {
    let Some(zoho) = state.zoho().cloned() else {
        tracing::warn!("skipping sales-order mirror for {}: Zoho not configured", order.id);
        return;
    };

    let state = state.clone();
    let order_id = order.id;
    let user_id = user.id;
    let fallback_name = user.email.to_string();
    let items: Vec<(charted_art_core::VariantId, rust_decimal::Decimal, i64)> = order
        .items
        .iter()
        .map(|item| (item.product_id, item.price, i64::from(item.quantity)))
        .collect();

    tokio::spawn(async move {
        let variant_ids: Vec<_> = items.iter().map(|(id, _, _)| *id).collect();
        let zoho_ids = match VariantRepository::new(state.pool())
            .zoho_item_ids(&variant_ids)
            .await
        {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("failed to load Zoho item ids for order {order_id}: {e}");
                return;
            }
        };

        let mut line_items = Vec::with_capacity(items.len());
        for (variant, rate, quantity) in items {
            let Some(item_id) = zoho_ids.get(&variant) else {
                tracing::warn!(
                    "skipping sales-order mirror for {order_id}: variant {variant} has no Zoho item"
                );
                return;
            };
            line_items.push(SalesOrderLine {
                item_id: item_id.clone(),
                rate,
                quantity,
            });
        }

        let customer_name = match ProfileRepository::new(state.pool()).get(user_id).await {
            Ok(Some(profile)) => profile.full_name.unwrap_or(fallback_name),
            _ => fallback_name,
        };

        let input = SalesOrderInput {
            customer_name,
            line_items,
            shipping_address: shipping,
        };

        match zoho.create_sales_order(&input).await {
            Ok(()) => tracing::info!("mirrored order {order_id} into Zoho"),
            Err(e) => tracing::warn!("failed to mirror order {order_id} into Zoho: {e}"),
        }
    });
}
