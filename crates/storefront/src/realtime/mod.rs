//! Change notification over PostgreSQL `LISTEN/NOTIFY`.
//!
//! Statement-level triggers (see `migrations/`) publish the affected table
//! name on the `table_changed` channel; nothing else about the change is
//! carried. [`ChangeListener`] fans those notifications out to any number
//! of in-process subscribers; [`CartCountCache`] is the one consumer the
//! storefront ships, keeping per-user cart counts fresh.

use std::sync::Arc;

use moka::future::Cache;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::sync::broadcast;

use charted_art_core::UserId;

use crate::db::carts::CartRepository;

/// Notification channel published by the schema triggers.
const CHANNEL: &str = "table_changed";

/// Buffered events per subscriber before lagging ones are dropped.
const SUBSCRIBER_BUFFER: usize = 64;

/// A change notification: some rows in `table` were inserted, updated,
/// or deleted. No row-level payload is guaranteed.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub table: String,
}

/// Fans out `pg_notify` events to in-process subscribers.
#[derive(Clone)]
pub struct ChangeListener {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeListener {
    /// Connect a listener and start its pump task.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the LISTEN connection cannot be established.
    pub async fn connect(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(CHANNEL).await?;

        let (tx, _) = broadcast::channel(SUBSCRIBER_BUFFER);
        let pump = tx.clone();
        tokio::spawn(async move {
            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        // Send fails only when nobody is subscribed; fine.
                        let _ = pump.send(ChangeEvent {
                            table: notification.payload().to_owned(),
                        });
                    }
                    Err(e) => {
                        // recv re-establishes the connection internally on
                        // the next call; just note the gap.
                        tracing::warn!("change listener interrupted: {e}");
                    }
                }
            }
        });

        Ok(Self { tx })
    }

    /// Subscribe to changes on one table. Dropping the subscription
    /// unsubscribes.
    #[must_use]
    pub fn subscribe(&self, table: &str) -> TableSubscription {
        TableSubscription {
            table: table.to_owned(),
            rx: self.tx.subscribe(),
        }
    }
}

/// A cancellable stream of [`ChangeEvent`]s for a single table.
pub struct TableSubscription {
    table: String,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl TableSubscription {
    /// Next event for the subscribed table, or `None` when the listener
    /// has shut down. Missed events while lagging are coalesced into
    /// whatever arrives next, which is all a "something changed" signal
    /// needs.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.table == self.table => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Cached per-user cart item counts, invalidated on every `cart_items`
/// change event.
///
/// The subscription is global: any cart line change anywhere flushes the
/// whole cache, and each user's count is recomputed lazily on next read.
/// That keeps recompute storms cheap without per-cart filtering.
#[derive(Clone)]
pub struct CartCountCache {
    inner: Arc<CartCountCacheInner>,
}

struct CartCountCacheInner {
    pool: PgPool,
    cache: Cache<UserId, i64>,
}

impl CartCountCache {
    /// Create the cache and start its invalidation task.
    #[must_use]
    pub fn new(pool: PgPool, listener: &ChangeListener) -> Self {
        let cache = Cache::builder().max_capacity(10_000).build();

        let this = Self {
            inner: Arc::new(CartCountCacheInner { pool, cache }),
        };

        let mut subscription = listener.subscribe("cart_items");
        let weak = Arc::downgrade(&this.inner);
        tokio::spawn(async move {
            while let Some(_event) = subscription.recv().await {
                let Some(inner) = weak.upgrade() else { break };
                inner.cache.invalidate_all();
            }
        });

        this
    }

    /// The user's current cart item count.
    ///
    /// Errors are logged and reported as 0 so a transient store failure
    /// reads as an empty badge rather than a broken page.
    pub async fn count_for(&self, user: UserId) -> i64 {
        let pool = self.inner.pool.clone();
        let result = self
            .inner
            .cache
            .try_get_with(user, async move {
                CartRepository::new(&pool).item_count(user).await
            })
            .await;

        match result {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("failed to compute cart count: {e}");
                0
            }
        }
    }
}
