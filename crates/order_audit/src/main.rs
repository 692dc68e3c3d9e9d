// Rust guideline compliant 2026-10-16

//! Order audit entry point -- in-memory demo.
//!
//! Generates a batch of storefront-like orders, runs the legitimacy
//! classifier over them page by page, and logs every dummy or suspicious
//! order plus the final bucket counts.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=info cargo run --bin order_audit
//!
//! # Also show every flagged order's classification details
//! RUST_LOG=debug cargo run --bin order_audit
//!
//! # Kill-switch: every order passes
//! ORDER_VALIDATION_ENABLED=false RUST_LOG=info cargo run --bin order_audit
//! ```

mod adapters;

use adapters::demo_orders::DemoOrders;
use adapters::env_settings::EnvSettings;
use adapters::log_sink::LogSink;
use anyhow::Context as _;
use auditor::{Auditor, AuditorConfig};
use order_validation::OrderLegitimacyClassifier;
use tracing::Instrument as _;

/// Orders generated for the demo run.
const DEMO_ORDER_COUNT: usize = 500;
/// Orders requested per page.
const PAGE_SIZE: usize = 50;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any async work.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // OS-seeded: each run audits a different mix.
    let source = DemoOrders::generate(DEMO_ORDER_COUNT, None);
    tracing::info!(orders = source.orders().len(), "main.demo_orders.generated");

    let classifier = OrderLegitimacyClassifier::new(EnvSettings::new());
    let auditor = Auditor::new(
        AuditorConfig::builder(PAGE_SIZE)
            .build()
            .context("failed to build auditor config")?,
    );

    let summary = auditor
        .run(&classifier, &source, &LogSink::new())
        .instrument(tracing::info_span!("audit"))
        .await
        .context("audit failed")?;

    tracing::info!(
        total = summary.total,
        hidden = summary.hidden(),
        "main.audit.finished"
    );
    Ok(())
}
