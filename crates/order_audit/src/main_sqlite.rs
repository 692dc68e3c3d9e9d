// Rust guideline compliant 2026-10-16

//! Order audit entry point -- `SQLite` source.
//!
//! Same audit as the `order_audit` binary, but orders are read from a
//! `SQLite` database. The URL comes from `ORDER_AUDIT_DB` (default
//! `sqlite:orders.db` in the current working directory). An empty database
//! is seeded with demo orders first so the binary works out of the box.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=info cargo run --bin order_audit_sqlite
//!
//! # Development build with the bypass on: every order passes
//! APP_ENV=development ORDER_VALIDATION_DEV_BYPASS=1 RUST_LOG=info \
//!     cargo run --bin order_audit_sqlite
//! ```

mod adapters;

// Load sqlite_orders directly so it only enters this binary's module tree.
#[path = "adapters/sqlite_orders.rs"]
mod sqlite_orders;

use adapters::demo_orders::DemoOrders;
use adapters::env_settings::EnvSettings;
use adapters::log_sink::LogSink;
use anyhow::Context as _;
use auditor::{Auditor, AuditorConfig};
use order_validation::OrderLegitimacyClassifier;
use sqlite_orders::SqliteOrderSource;
use tracing::Instrument as _;

/// Environment variable holding the database URL.
const DB_URL_VAR: &str = "ORDER_AUDIT_DB";
/// Database used when `ORDER_AUDIT_DB` is unset.
const DEFAULT_DB_URL: &str = "sqlite:orders.db";
/// Orders written into an empty database.
const SEED_ORDER_COUNT: usize = 200;
/// Fixed seed so a freshly seeded database is reproducible.
const SEED: u64 = 2024;
/// Orders requested per page.
const PAGE_SIZE: usize = 100;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any async work.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db_url = std::env::var(DB_URL_VAR).unwrap_or_else(|_| DEFAULT_DB_URL.to_owned());
    let source = SqliteOrderSource::new(&db_url)
        .await
        .with_context(|| format!("failed to open SQLite order source at {db_url}"))?;

    if source.count().await.context("failed to count orders")? == 0 {
        let demo = DemoOrders::generate(SEED_ORDER_COUNT, Some(SEED));
        for order in demo.orders() {
            source
                .insert_order(order)
                .await
                .with_context(|| format!("failed to seed order {}", order.id))?;
        }
        tracing::info!(orders = SEED_ORDER_COUNT, db_url = %db_url, "main.database.seeded");
    }

    let classifier = OrderLegitimacyClassifier::new(EnvSettings::new());
    let auditor = Auditor::new(
        AuditorConfig::builder(PAGE_SIZE)
            .build()
            .context("failed to build auditor config")?,
    );

    let sink = LogSink::new();
    let audit = auditor
        .run(&classifier, &source, &sink)
        .instrument(tracing::info_span!("audit", db_url = %db_url));

    // Race the audit against CTRL+C; a partial audit reports nothing.
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("main.shutdown: ctrl_c received, audit abandoned");
        }
        result = audit => {
            let summary = result.context("audit failed")?;
            tracing::info!(
                total = summary.total,
                hidden = summary.hidden(),
                "main.audit.finished"
            );
        }
    }

    Ok(())
}
