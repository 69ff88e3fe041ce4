//! Port interfaces for site time-log consolidation
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vision_domain::{Result, SiteTimeLogCategory, SiteTimeLogType, TimeSegment};

/// Filter handed to the segment store.
///
/// The store is expected to push the date-range, category, and employee
/// filters down. The type filter is advisory only: the consolidation service
/// never pushes it down, because dropping a segment at the store can drop the
/// terminating counterpart of an interval and corrupt reconstruction. Filters
/// keyed on reconstructed state (site, country, works order, equipment) do
/// not appear here at all; they are applied after reconstruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentFilter {
    /// Lower bound on the segment instant.
    pub start_utc: Option<DateTime<Utc>>,
    /// Upper bound on the segment instant.
    pub end_utc: Option<DateTime<Utc>>,
    /// Restrict to these categories; empty means all.
    pub categories: Vec<SiteTimeLogCategory>,
    /// Advisory type restriction; empty means all.
    pub types: Vec<SiteTimeLogType>,
    /// Restrict to these employees; empty means all.
    pub employee_ids: Vec<Uuid>,
}

/// Trait for reading raw time-log segments.
pub trait SegmentRepository: Send + Sync {
    /// Fetch segments matching the filter.
    ///
    /// Implementations may apply the filter partially; the core re-applies
    /// everything it cannot trust the store with.
    fn fetch_segments(&self, filter: &SegmentFilter) -> Result<Vec<TimeSegment>>;
}
