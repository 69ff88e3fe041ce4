//! Mock repository implementations for testing
//!
//! Provides an in-memory segment store, enabling deterministic consolidation
//! tests without database dependencies.

use std::sync::Arc;

use vision_core::{SegmentFilter, SegmentRepository};
use vision_domain::{Result as DomainResult, TimeSegment};

/// In-memory mock for `SegmentRepository`.
///
/// Stores a fixed set of segments and applies the push-down filters a real
/// store would: date range, category, and employee. The advisory type filter
/// is deliberately ignored, matching the contract that the core never relies
/// on it.
#[derive(Default, Clone)]
pub struct MockSegmentRepository {
    segments: Arc<Vec<TimeSegment>>,
}

impl MockSegmentRepository {
    /// Create a new mock seeded with the provided segments.
    pub fn new(segments: Vec<TimeSegment>) -> Self {
        Self { segments: Arc::new(segments) }
    }

    /// Convenience helper for adding a single segment to the mock.
    pub fn with_segment(mut self, segment: TimeSegment) -> Self {
        Arc::make_mut(&mut self.segments).push(segment);
        self
    }
}

impl SegmentRepository for MockSegmentRepository {
    fn fetch_segments(&self, filter: &SegmentFilter) -> DomainResult<Vec<TimeSegment>> {
        Ok(self
            .segments
            .iter()
            .filter(|segment| {
                let Some(instant) = segment.sort_instant() else {
                    return true;
                };
                if filter.start_utc.is_some_and(|start| instant < start) {
                    return false;
                }
                if filter.end_utc.is_some_and(|end| instant > end) {
                    return false;
                }
                if !filter.categories.is_empty()
                    && !filter.categories.contains(&segment.log_type.category())
                {
                    return false;
                }
                if !filter.employee_ids.is_empty()
                    && !filter.employee_ids.contains(&segment.employee.id)
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect())
    }
}
