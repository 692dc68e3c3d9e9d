// Rust guideline compliant 2026-10-16

//! SQLite adapter for the `OrderSource` port.
//!
//! Reads orders from a SQLite file via `sqlx` and hydrates each one with
//! its user and line items. The schema mirrors the storefront's relational
//! layout: `users`, `products`, `orders`, and `order_items`.
//!
//! # Missing products
//!
//! Line items reach products through a `LEFT JOIN`. A line whose product
//! row is gone hydrates as `product: None`; a product row with a NULL `sku`
//! hydrates as `Some(ProductRef { sku: None, .. })`. The classifier treats
//! these two cases differently, so the distinction must survive the query.
//!
//! # SKU snapshots
//!
//! Each line stores the SKU it was sold under. Product rows are written
//! once and never updated, so a later order reusing a product id cannot
//! rewrite the SKU an earlier order reads back.
//!
//! # Non-finite totals
//!
//! SQLite stores NaN as NULL, so `orders.total` is nullable and a NULL
//! total reads back as `f64::NAN`.

use domain::{OrderItem, OrderRecord, OrderSource, ProductRef, SourceError, UserRef};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Row shape of the paged order query.
type OrderRow = (String, String, Option<f64>, Option<String>, Option<String>, Option<i64>);

/// `OrderSource` adapter backed by a SQLite database via `sqlx`.
#[derive(Debug, Clone)]
pub struct SqliteOrderSource {
    pool: sqlx::SqlitePool,
}

impl SqliteOrderSource {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// The pool holds a single connection: an in-memory database exists
    /// only inside the connection that created it.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        let opts = db_url.parse::<SqliteConnectOptions>()?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(1).connect_with(opts).await?;
        for ddl in [
            "CREATE TABLE IF NOT EXISTS users (
                id        TEXT    PRIMARY KEY,
                email     TEXT,
                is_active INTEGER NOT NULL DEFAULT 1
            )",
            "CREATE TABLE IF NOT EXISTS products (
                id  TEXT PRIMARY KEY,
                sku TEXT
            )",
            "CREATE TABLE IF NOT EXISTS orders (
                id           TEXT PRIMARY KEY,
                order_number TEXT NOT NULL,
                total        REAL,
                notes        TEXT,
                user_id      TEXT
            )",
            "CREATE TABLE IF NOT EXISTS order_items (
                order_id   TEXT    NOT NULL,
                position   INTEGER NOT NULL,
                product_id TEXT,    -- dangling or NULL when the product was deleted
                sku        TEXT,
                PRIMARY KEY (order_id, position)
            )",
        ] {
            sqlx::query(ddl).execute(&pool).await?;
        }
        Ok(Self { pool })
    }

    /// Number of stored orders.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the query fails.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(&self.pool).await
    }

    /// Store `order` together with its user, products and line items.
    ///
    /// The user row is keyed by the order id. A product row is only created
    /// when its id is new; the line keeps its own SKU. A line with
    /// `product: None` is stored with a NULL `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when any statement fails; the whole order is
    /// rolled back.
    pub async fn insert_order(&self, order: &OrderRecord) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user_id = match &order.user {
            Some(user) => {
                let user_id = format!("user-{}", order.id);
                sqlx::query("INSERT OR REPLACE INTO users (id, email, is_active) VALUES (?, ?, ?)")
                    .bind(&user_id)
                    .bind(user.email.as_deref())
                    .bind(i64::from(user.is_active))
                    .execute(&mut *tx)
                    .await?;
                Some(user_id)
            }
            None => None,
        };

        sqlx::query(
            "INSERT INTO orders (id, order_number, total, notes, user_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(order.total)
        .bind(order.notes.as_deref())
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        for (position, item) in order.order_items.iter().flatten().enumerate() {
            let product_id = item.product.as_ref().map(|p| p.id.as_str());
            let sku = item.product.as_ref().and_then(|p| p.sku.as_deref());
            if let Some(product) = &item.product {
                sqlx::query("INSERT OR IGNORE INTO products (id, sku) VALUES (?, ?)")
                    .bind(&product.id)
                    .bind(product.sku.as_deref())
                    .execute(&mut *tx)
                    .await?;
            }
            sqlx::query(
                "INSERT INTO order_items (order_id, position, product_id, sku) VALUES (?, ?, ?, ?)",
            )
            .bind(&order.id)
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .bind(product_id)
            .bind(sku)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    async fn fetch_items(&self, order_id: &str) -> Result<Vec<OrderItem>, SourceError> {
        let rows: Vec<(Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT p.id, i.sku
             FROM order_items i
             LEFT JOIN products p ON p.id = i.product_id
             WHERE i.order_id = ?
             ORDER BY i.position",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(product_id, sku)| OrderItem {
                product: product_id.map(|id| ProductRef { id, sku }),
            })
            .collect())
    }
}

impl OrderSource for SqliteOrderSource {
    /// Read one page of orders in insertion order and hydrate each of them.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` on any `sqlx` error. The underlying
    /// error is logged at `error` level before mapping.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<OrderRecord>, SourceError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT o.id, o.order_number, o.total, o.notes, u.email, u.is_active
             FROM orders o
             LEFT JOIN users u ON u.id = o.user_id
             ORDER BY o.rowid
             LIMIT ? OFFSET ?",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        let mut orders = Vec::with_capacity(rows.len());
        for (id, order_number, total, notes, email, is_active) in rows {
            let order_items = Some(self.fetch_items(&id).await?);
            // `is_active` is NOT NULL, so a NULL here means the join found no user.
            let user = is_active.map(|active| UserRef { email, is_active: active != 0 });
            let total = total.unwrap_or(f64::NAN);
            orders.push(OrderRecord { id, order_number, total, notes, order_items, user });
        }
        Ok(orders)
    }
}

fn unavailable(e: sqlx::Error) -> SourceError {
    tracing::error!(error = %e, "sqlite_orders.query_failed");
    SourceError::Unavailable { reason: e.to_string() }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::SqliteOrderSource;
    use domain::{OrderItem, OrderRecord, OrderSource as _, ProductRef, UserRef, ValidationConfig};
    use order_validation::OrderLegitimacyClassifier;

    async fn make_source() -> SqliteOrderSource {
        SqliteOrderSource::new("sqlite::memory:")
            .await
            .expect("in-memory SQLite should open")
    }

    fn make_order(id: &str, items: Vec<OrderItem>) -> OrderRecord {
        OrderRecord {
            id: id.to_owned(),
            order_number: format!("ORD-{id}"),
            total: 59.0_f64,
            notes: None,
            order_items: Some(items),
            user: Some(UserRef { email: Some(format!("{id}@shop.io")), is_active: true }),
        }
    }

    fn product(id: &str, sku: Option<&str>) -> OrderItem {
        OrderItem {
            product: Some(ProductRef { id: id.to_owned(), sku: sku.map(str::to_owned) }),
        }
    }

    // SO-T01: a stored order reads back unchanged.
    #[tokio::test]
    async fn order_round_trips() {
        let source = make_source().await;
        let order = OrderRecord {
            notes: Some("leave at door".to_owned()),
            ..make_order("a1", vec![product("p1", Some("TEE-1")), product("p2", Some("CAP-2"))])
        };
        source.insert_order(&order).await.unwrap();
        let page = source.fetch_page(0, 10).await.unwrap();
        assert_eq!(page, vec![order]);
    }

    // SO-T02: deleted product and SKU-less product stay distinguishable.
    #[tokio::test]
    async fn missing_product_differs_from_missing_sku() {
        let source = make_source().await;
        let order = make_order("a1", vec![product("p1", None), OrderItem { product: None }]);
        source.insert_order(&order).await.unwrap();

        let items = source.fetch_page(0, 1).await.unwrap().remove(0).order_items.unwrap();
        assert_eq!(items[0].product, Some(ProductRef { id: "p1".to_owned(), sku: None }));
        assert_eq!(items[1].product, None);
    }

    // SO-T03: orders without a user or items hydrate as such.
    #[tokio::test]
    async fn absent_user_and_empty_items() {
        let source = make_source().await;
        let order = OrderRecord { user: None, ..make_order("a1", vec![]) };
        source.insert_order(&order).await.unwrap();
        let read = source.fetch_page(0, 1).await.unwrap().remove(0);
        assert!(read.user.is_none());
        assert_eq!(read.order_items, Some(vec![]));
    }

    // SO-T04: inactive flag and NULL email survive storage.
    #[tokio::test]
    async fn inactive_user_without_email() {
        let source = make_source().await;
        let order = OrderRecord {
            user: Some(UserRef { email: None, is_active: false }),
            ..make_order("a1", vec![product("p1", Some("TEE-1"))])
        };
        source.insert_order(&order).await.unwrap();
        let read = source.fetch_page(0, 1).await.unwrap().remove(0);
        assert_eq!(read.user, Some(UserRef { email: None, is_active: false }));
    }

    // SO-T05: pages follow insertion order and end with an empty page.
    #[tokio::test]
    async fn paging_follows_insertion_order() {
        let source = make_source().await;
        for i in 0..5 {
            source
                .insert_order(&make_order(&format!("o{i}"), vec![product("p1", Some("TEE-1"))]))
                .await
                .unwrap();
        }
        assert_eq!(source.count().await.unwrap(), 5);
        let ids: Vec<String> = source
            .fetch_page(2, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, ["o2", "o3"]);
        assert!(source.fetch_page(5, 2).await.unwrap().is_empty());
    }

    // SO-T06: duplicate order ids are rejected and the failed insert leaves nothing behind.
    #[tokio::test]
    async fn duplicate_order_is_rejected() {
        let source = make_source().await;
        let order = make_order("a1", vec![product("p1", Some("TEE-1"))]);
        source.insert_order(&order).await.unwrap();
        assert!(source.insert_order(&order).await.is_err());
        assert_eq!(source.count().await.unwrap(), 1);
        let read = source.fetch_page(0, 10).await.unwrap();
        assert_eq!(read[0].order_items.as_ref().map(Vec::len), Some(1));
    }

    // SO-T07: hydrated orders classify the same as the originals.
    #[tokio::test]
    async fn hydrated_orders_classify_like_originals() {
        let source = make_source().await;
        let originals = vec![
            make_order("ok", vec![product("p1", Some("TEE-1"))]),
            make_order("gone", vec![OrderItem { product: None }]),
            make_order("demo", vec![product("p9", Some("demo-hat"))]),
            OrderRecord { total: 0.0_f64, ..make_order("zero", vec![product("p1", Some("TEE-1"))]) },
        ];
        for order in &originals {
            source.insert_order(order).await.unwrap();
        }
        let classifier = OrderLegitimacyClassifier::new(ValidationConfig::default());
        let hydrated = source.fetch_page(0, 10).await.unwrap();
        assert_eq!(
            classifier.partition(&hydrated).summary(),
            classifier.partition(&originals).summary()
        );
    }

    // SO-T08: a later order reusing a product id keeps earlier SKUs intact.
    #[tokio::test]
    async fn shared_product_id_keeps_each_line_sku() {
        let source = make_source().await;
        let demo = make_order("a", vec![product("p1", Some("DEMO-HAT"))]);
        let genuine = make_order("b", vec![product("p1", Some("TEE-1"))]);
        source.insert_order(&demo).await.unwrap();
        source.insert_order(&genuine).await.unwrap();

        let hydrated = source.fetch_page(0, 10).await.unwrap();
        assert_eq!(hydrated, vec![demo, genuine]);

        let classifier = OrderLegitimacyClassifier::new(ValidationConfig::default());
        assert!(classifier.classify(&hydrated[0]).is_dummy());
        assert!(classifier.classify(&hydrated[1]).is_valid());
    }

    // SO-T09: a NaN total is stored as NULL and reads back as NaN.
    #[tokio::test]
    async fn nan_total_round_trips() {
        let source = make_source().await;
        let order = OrderRecord {
            total: f64::NAN,
            ..make_order("a1", vec![product("p1", Some("TEE-1"))])
        };
        source.insert_order(&order).await.unwrap();

        let read = source.fetch_page(0, 1).await.unwrap().remove(0);
        assert!(read.total.is_nan());
        let classifier = OrderLegitimacyClassifier::new(ValidationConfig::default());
        assert!(classifier.classify(&read).is_valid());
    }
}
