// Rust guideline compliant 2026-10-16

//! Auditor component -- pages orders from an `OrderSource`, classifies them,
//! reports non-legitimate orders to an `AuditSink`, and tallies the buckets.
//!
//! Entry points: [`Auditor::audit_page`], [`Auditor::run`].
//! Configuration via [`AuditorConfig::builder`].

use domain::{
    AuditPartition, AuditSink, AuditSummary, OrderRecord, OrderSource, SettingsSource, SinkError,
    SourceError,
};
use order_validation::OrderLegitimacyClassifier;

// ---------------------------------------------------------------------------
// AuditorError
// ---------------------------------------------------------------------------

/// Errors that can occur during an audit run.
#[derive(Debug, thiserror::Error)]
pub enum AuditorError {
    /// The supplied configuration is invalid.
    #[error("invalid auditor configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The order source failed.
    #[error("order source error: {0}")]
    Source(SourceError),
}

// ---------------------------------------------------------------------------
// AuditorConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for an [`Auditor`].
///
/// Construct via [`AuditorConfig::builder`].
#[derive(Debug)]
pub struct AuditorConfig {
    /// Number of orders requested from the source per page.
    pub page_size: usize,
    /// Optional upper bound on the number of pages. `None` reads until exhausted.
    pub max_pages: Option<u64>,
}

/// Builder for [`AuditorConfig`].
///
/// Obtain via [`AuditorConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct AuditorConfigBuilder {
    page_size: usize,
    max_pages: Option<u64>,
}

impl AuditorConfig {
    /// Create a builder. `page_size` is the only required parameter.
    ///
    /// Default values: `max_pages = None`.
    #[must_use]
    pub fn builder(page_size: usize) -> AuditorConfigBuilder {
        AuditorConfigBuilder { page_size, max_pages: None }
    }
}

impl AuditorConfigBuilder {
    /// Stop after `n` pages even if the source has more orders.
    #[must_use]
    pub fn max_pages(mut self, n: u64) -> Self {
        self.max_pages = Some(n);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuditorError::InvalidConfig`] when `page_size` is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<AuditorConfig, AuditorError> {
        if self.page_size == 0 {
            return Err(AuditorError::InvalidConfig {
                reason: "page_size must be >= 1".to_owned(),
            });
        }
        Ok(AuditorConfig { page_size: self.page_size, max_pages: self.max_pages })
    }
}

// ---------------------------------------------------------------------------
// Auditor
// ---------------------------------------------------------------------------

/// Runs the legitimacy classifier over every order a source can provide.
///
/// Generic over the settings, source and sink ports for static dispatch.
/// Holds no adapter references -- dependencies are injected per call.
#[derive(Debug)]
pub struct Auditor {
    config: AuditorConfig,
}

impl Auditor {
    /// Create a new auditor from `config`.
    #[must_use]
    pub fn new(config: AuditorConfig) -> Self {
        Self { config }
    }

    /// Classify one page of orders and flag every non-legitimate one.
    ///
    /// Each order is classified once; the same result drives both the
    /// bucket and the sink report. Sink failures are collected, never fatal.
    pub async fn audit_page<S, K>(
        &self,
        classifier: &OrderLegitimacyClassifier<S>,
        orders: &[OrderRecord],
        sink: &K,
    ) -> (AuditSummary, Vec<SinkError>)
    where
        S: SettingsSource,
        K: AuditSink,
    {
        let mut partition = AuditPartition::new();
        let mut sink_errors: Vec<SinkError> = vec![];
        for order in orders {
            let result = classifier.classify(order);
            if !result.is_valid()
                && let Err(e) = sink.flag(order, &result).await
            {
                sink_errors.push(e);
            }
            partition.insert(order, &result);
        }
        (partition.summary(), sink_errors)
    }

    /// Audit the whole source, page by page.
    ///
    /// Stops cleanly when:
    /// - the source returns an empty or short page, or
    /// - `config.max_pages` pages have been audited.
    ///
    /// Reports the final counts to `sink.complete`; sink failures are logged
    /// as warnings and do not abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`AuditorError::Source`] when a page cannot be fetched.
    pub async fn run<S, O, K>(
        &self,
        classifier: &OrderLegitimacyClassifier<S>,
        source: &O,
        sink: &K,
    ) -> Result<AuditSummary, AuditorError>
    where
        S: SettingsSource,
        O: OrderSource,
        K: AuditSink,
    {
        let page_size = self.config.page_size;
        let mut summary = AuditSummary::default();
        let mut offset = 0usize;
        let mut pages = 0u64;

        loop {
            let page = source
                .fetch_page(offset, page_size)
                .await
                .map_err(AuditorError::Source)?;
            if page.is_empty() {
                tracing::info!(pages, "auditor.run.stopped: source exhausted");
                break;
            }
            tracing::debug!(offset, size = page.len(), "auditor.page.fetched");

            let (page_summary, sink_errors) = self.audit_page(classifier, &page, sink).await;
            for e in &sink_errors {
                tracing::warn!(error = %e, "auditor.sink.flag_failed");
            }
            summary += page_summary;
            offset += page.len();
            pages += 1;
            tracing::info!(
                page = pages,
                legitimate = page_summary.legitimate,
                suspicious = page_summary.suspicious,
                dummy = page_summary.dummy,
                "auditor.page.audited"
            );

            if page.len() < page_size {
                tracing::info!(pages, "auditor.run.stopped: short page");
                break;
            }
            if let Some(max) = self.config.max_pages
                && pages >= max
            {
                tracing::info!(pages, "auditor.run.stopped: page limit reached");
                break;
            }
        }

        if let Err(e) = sink.complete(&summary).await {
            tracing::warn!(error = %e, "auditor.sink.complete_failed");
        }
        Ok(summary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
