// Rust guideline compliant 2026-10-16

//! Demo adapter for the `AuditSink` port.
//!
//! Logs flagged orders via `tracing::warn!` and the final counts via
//! `tracing::info!`. Always returns `Ok(())`.

use domain::{AuditSink, AuditSummary, OrderRecord, SinkError, ValidationResult};

/// `AuditSink` adapter that writes findings to the log.
#[derive(Debug)]
pub struct LogSink;

impl LogSink {
    /// Create a new log sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for LogSink {
    async fn flag(&self, order: &OrderRecord, result: &ValidationResult) -> Result<(), SinkError> {
        tracing::warn!(
            order_id = %order.id,
            order_number = %order.order_number,
            dummy = result.is_dummy(),
            suspicious = result.is_suspicious(),
            issues = ?result.issues(),
            "log_sink.order_flagged"
        );
        Ok(())
    }

    async fn complete(&self, summary: &AuditSummary) -> Result<(), SinkError> {
        tracing::info!(
            total = summary.total,
            legitimate = summary.legitimate,
            suspicious = summary.suspicious,
            dummy = summary.dummy,
            hidden = summary.hidden(),
            "log_sink.audit_complete"
        );
        Ok(())
    }
}
