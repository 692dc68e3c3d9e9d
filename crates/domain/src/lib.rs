// Rust guideline compliant 2026-10-16

//! Shared domain types for the order legitimacy audit.
//!
//! Defines the order record shape consumed by the classifier, the
//! `ValidationResult` / `AuditPartition` outputs, the validation switches,
//! and the hexagonal port traits: `SettingsSource`, `OrderSource`, and
//! `AuditSink`. All workspace crates depend on this crate; no other
//! workspace crate is imported here.

// ---------------------------------------------------------------------------
// Order records
// ---------------------------------------------------------------------------

/// A storefront order hydrated with its user and line items.
///
/// Supplied by the caller; the classifier only ever borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// Opaque identifier. Not used by any rule.
    pub id: String,
    /// Human-facing order code (e.g. `"ORD-123456"`).
    pub order_number: String,
    /// Order total in the store currency.
    pub total: f64,
    /// Free-text notes attached at checkout or by an admin.
    pub notes: Option<String>,
    /// Line items. `None` means the relation was never loaded or is missing.
    pub order_items: Option<Vec<OrderItem>>,
    /// Purchasing account, when one is attached.
    pub user: Option<UserRef>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Referenced product. `None` when the product row no longer exists.
    pub product: Option<ProductRef>,
}

/// The product referenced by an order line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRef {
    /// Product identifier.
    pub id: String,
    /// Stock keeping unit; catalog entries may lack one.
    pub sku: Option<String>,
}

/// The account that placed an order.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRef {
    /// Login email. `None` for malformed records.
    pub email: Option<String>,
    /// `false` once the account has been deactivated.
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of classifying a single order.
///
/// Flags only ever go from `false` to `true`; `is_valid` is derived from
/// them, so `is_valid() == !is_dummy() && !is_suspicious()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    issues: Vec<String>,
    is_dummy: bool,
    is_suspicious: bool,
}

impl ValidationResult {
    /// A passing result: valid, no issues, neither flag raised.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    /// Record a hard fabrication signal.
    pub fn flag_dummy(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
        self.is_dummy = true;
    }

    /// Record a soft plausibility signal.
    pub fn flag_suspicious(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
        self.is_suspicious = true;
    }

    /// `true` iff the order should be treated as a genuine customer order.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_dummy && !self.is_suspicious
    }

    /// Rule violations, in the order the rules fired.
    #[must_use]
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// `true` if any hard signal fired.
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.is_dummy
    }

    /// `true` if any soft signal fired.
    #[must_use]
    pub fn is_suspicious(&self) -> bool {
        self.is_suspicious
    }
}

// ---------------------------------------------------------------------------
// AuditPartition + AuditSummary
// ---------------------------------------------------------------------------

/// Orders split into three disjoint, order-preserving buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditPartition<'a> {
    /// Orders that triggered no rule.
    pub legitimate: Vec<&'a OrderRecord>,
    /// Orders with a soft signal and no hard one.
    pub suspicious: Vec<&'a OrderRecord>,
    /// Orders with at least one hard signal.
    pub dummy: Vec<&'a OrderRecord>,
}

impl<'a> AuditPartition<'a> {
    /// Create an empty partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `order` to the bucket selected by `result`.
    ///
    /// Dummy wins over suspicious.
    pub fn insert(&mut self, order: &'a OrderRecord, result: &ValidationResult) {
        if result.is_dummy() {
            self.dummy.push(order);
        } else if result.is_suspicious() {
            self.suspicious.push(order);
        } else {
            self.legitimate.push(order);
        }
    }

    /// Total number of orders across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legitimate.len() + self.suspicious.len() + self.dummy.len()
    }

    /// `true` when no order has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket counts for dashboards and reports.
    #[must_use]
    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            total: self.len(),
            legitimate: self.legitimate.len(),
            suspicious: self.suspicious.len(),
            dummy: self.dummy.len(),
        }
    }
}

/// Bucket counts of an audit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    /// Orders examined.
    pub total: usize,
    /// Orders classified as legitimate.
    pub legitimate: usize,
    /// Orders classified as suspicious.
    pub suspicious: usize,
    /// Orders classified as dummy.
    pub dummy: usize,
}

impl AuditSummary {
    /// Orders hidden from operational views (suspicious + dummy).
    #[must_use]
    pub fn hidden(&self) -> usize {
        self.suspicious + self.dummy
    }
}

impl std::ops::AddAssign for AuditSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.legitimate += rhs.legitimate;
        self.suspicious += rhs.suspicious;
        self.dummy += rhs.dummy;
    }
}

// ---------------------------------------------------------------------------
// Validation switches
// ---------------------------------------------------------------------------

/// Process-wide switches controlling whether validation runs at all.
///
/// The default enables validation with no development bypass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Global kill-switch. `false` passes every order.
    pub enabled: bool,
    /// `true` when running a non-production build.
    pub development_build: bool,
    /// Skip validation; honored only when `development_build` is set.
    pub development_bypass: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { enabled: true, development_build: false, development_bypass: false }
    }
}

impl ValidationConfig {
    /// `true` when no rule should be evaluated.
    #[must_use]
    pub fn is_bypassed(&self) -> bool {
        !self.enabled || (self.development_build && self.development_bypass)
    }
}

/// Hexagonal port: supplies the current validation switches.
///
/// Consulted once per classifier call; implementations must not assume
/// their value is cached by the caller.
pub trait SettingsSource {
    /// Return the switches in effect right now.
    fn load(&self) -> ValidationConfig;
}

impl SettingsSource for ValidationConfig {
    fn load(&self) -> ValidationConfig {
        *self
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the `OrderSource` port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// The backing store could not be reached or queried.
    #[error("order source unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
    /// A stored row could not be turned into an `OrderRecord`.
    #[error("corrupt order data: {reason}")]
    Corrupt {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the `AuditSink` port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SinkError {
    /// The report could not be delivered.
    #[error("delivery failed: {reason}")]
    DeliveryFailed {
        /// Human-readable description.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Hexagonal port: paged read access to hydrated orders.
///
/// Implementations must return each order with its user and items
/// already attached, in a stable order across pages.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait OrderSource {
    /// Fetch up to `limit` orders starting at `offset`.
    ///
    /// An empty vector signals the end of the data.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` when the store cannot be queried,
    /// or `SourceError::Corrupt` when a row cannot be hydrated.
    async fn fetch_page(&self, offset: usize, limit: usize)
    -> Result<Vec<OrderRecord>, SourceError>;
}

/// Hexagonal port: receives the findings of an audit run.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait AuditSink {
    /// Report one non-legitimate order together with its classification.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::DeliveryFailed` when the report cannot be delivered.
    async fn flag(&self, order: &OrderRecord, result: &ValidationResult) -> Result<(), SinkError>;

    /// Report the final bucket counts.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::DeliveryFailed` when the report cannot be delivered.
    async fn complete(&self, summary: &AuditSummary) -> Result<(), SinkError>;
}
