//! Shared primitive types used across the ROI engine.

/// Number of leading periods a query includes. `None` means all of them.
pub type Cursor = Option<usize>;

/// Opaque display label of an accounting period.
pub type PeriodLabel = String;
