// Rust guideline compliant 2026-10-16

//! Order legitimacy classifier.
//!
//! [`OrderLegitimacyClassifier`] decides whether a hydrated order is a
//! genuine customer order or test/demo/corrupted data that operational
//! views should hide. Classification is a pure function of the order and
//! of the switches returned by the injected `domain::SettingsSource`,
//! which is consulted once per call. Bulk operations load the switches
//! once and apply them to the whole batch.
//!
//! Rules run in a fixed order and report violations as data; nothing here
//! returns an error.

pub mod patterns;

use domain::{
    AuditPartition, OrderItem, OrderRecord, SettingsSource, ValidationConfig, ValidationResult,
};
use patterns::{EMAIL_PATTERNS, NOTES_PATTERNS, ORDER_NUMBER_PATTERNS, SKU_PATTERNS};

/// Smallest plausible order total.
pub const MIN_ORDER_TOTAL: f64 = 1.0;

/// Issue reported when an order carries no line items.
pub const NO_ITEMS_ISSUE: &str = "Order has no items";

/// Issue reported when at least one line references a missing or demo product.
pub const DEMO_PRODUCTS_ISSUE: &str = "Invalid/demo products found";

// ---------------------------------------------------------------------------
// OrderLegitimacyClassifier
// ---------------------------------------------------------------------------

/// Rule engine separating legitimate orders from dummy and suspicious ones.
///
/// Generic over any `SettingsSource`; holds no state besides it, so a
/// classifier is safe to share across threads whenever `S` is.
#[derive(Debug, Clone)]
pub struct OrderLegitimacyClassifier<S: SettingsSource> {
    settings: S,
}

impl<S: SettingsSource> OrderLegitimacyClassifier<S> {
    /// Create a classifier reading its switches from `settings`.
    #[must_use]
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    /// The injected settings source.
    #[must_use]
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Classify one order.
    ///
    /// Returns a passing result without evaluating any rule when validation
    /// is disabled or bypassed for a development build.
    #[must_use]
    pub fn classify(&self, order: &OrderRecord) -> ValidationResult {
        classify_with(&self.settings.load(), order)
    }

    /// Keep only the legitimate orders, in their original order.
    ///
    /// Settings are loaded once for the whole slice.
    #[must_use]
    pub fn filter_legitimate<'a>(&self, orders: &'a [OrderRecord]) -> Vec<&'a OrderRecord> {
        let config = self.settings.load();
        let kept: Vec<&OrderRecord> =
            orders.iter().filter(|order| classify_with(&config, order).is_valid()).collect();
        tracing::debug!(
            input = orders.len(),
            kept = kept.len(),
            "order_validation.filter_legitimate"
        );
        kept
    }

    /// Split `orders` into legitimate, suspicious and dummy buckets.
    ///
    /// Every order is classified exactly once, under one settings snapshot,
    /// and lands in exactly one bucket.
    #[must_use]
    pub fn partition<'a>(&self, orders: &'a [OrderRecord]) -> AuditPartition<'a> {
        let config = self.settings.load();
        let mut partition = AuditPartition::new();
        for order in orders {
            let result = classify_with(&config, order);
            partition.insert(order, &result);
        }
        let summary = partition.summary();
        tracing::debug!(
            legitimate = summary.legitimate,
            suspicious = summary.suspicious,
            dummy = summary.dummy,
            "order_validation.partition"
        );
        partition
    }

    /// Check an order number on its own, before a full record exists.
    ///
    /// Honors only the global kill-switch.
    #[must_use]
    pub fn quick_check_order_number(&self, order_number: &str) -> bool {
        !self.settings.load().enabled || !ORDER_NUMBER_PATTERNS.is_match(order_number)
    }

    /// Check a user email on its own, before a full record exists.
    ///
    /// Honors only the global kill-switch.
    #[must_use]
    pub fn quick_check_email(&self, email: &str) -> bool {
        !self.settings.load().enabled || !EMAIL_PATTERNS.is_match(email)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Classify `order` under an already loaded `config`.
fn classify_with(config: &ValidationConfig, order: &OrderRecord) -> ValidationResult {
    if config.is_bypassed() {
        tracing::trace!(order_id = %order.id, "order_validation.classify.bypassed");
        return ValidationResult::pass();
    }

    let result = evaluate(order);
    if !result.is_valid() {
        tracing::debug!(
            order_id = %order.id,
            order_number = %order.order_number,
            dummy = result.is_dummy(),
            suspicious = result.is_suspicious(),
            issues = result.issues().len(),
            "order_validation.classify.flagged"
        );
    }
    result
}

/// Run every rule in order, accumulating issues and flags.
fn evaluate(order: &OrderRecord) -> ValidationResult {
    let mut result = ValidationResult::pass();

    if let Some(pattern) = ORDER_NUMBER_PATTERNS.first_match(&order.order_number) {
        result.flag_dummy(format!("Dummy order number pattern: {}", pattern.source()));
    }

    if let Some(notes) = &order.notes
        && let Some(pattern) = NOTES_PATTERNS.first_match(notes)
    {
        result.flag_dummy(format!("Dummy notes pattern: {}", pattern.source()));
    }

    if let Some(email) = order.user.as_ref().and_then(|u| u.email.as_deref())
        && let Some(pattern) = EMAIL_PATTERNS.first_match(email)
    {
        result.flag_dummy(format!("Dummy email pattern: {}", pattern.source()));
    }

    // NaN compares false and is left to the caller's schema checks.
    if order.total < MIN_ORDER_TOTAL {
        result.flag_suspicious(format!(
            "Order total {} is below minimum {MIN_ORDER_TOTAL}",
            order.total
        ));
    }

    if let Some(user) = &order.user
        && !user.is_active
    {
        result.flag_suspicious("User account is inactive");
    }

    match &order.order_items {
        None => result.flag_dummy(NO_ITEMS_ISSUE),
        Some(items) => {
            if items.is_empty() {
                result.flag_dummy(NO_ITEMS_ISSUE);
            }
            if items.iter().any(is_invalid_item) {
                result.flag_dummy(DEMO_PRODUCTS_ISSUE);
            }
        }
    }

    result
}

/// A line is invalid when its product is gone or carries a demo SKU.
///
/// A product without any SKU is tolerated.
fn is_invalid_item(item: &OrderItem) -> bool {
    match &item.product {
        None => true,
        Some(product) => product.sku.as_deref().is_some_and(|sku| SKU_PATTERNS.is_match(sku)),
    }
}
