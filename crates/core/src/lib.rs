//! # Vision Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits)
//! - The site time-log consolidation pipeline and timesheet hours engine
//!
//! ## Architecture Principles
//! - Only depends on `vision-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod timesheet;

// Re-export the service surface and the standalone pipeline stages
pub use timesheet::hours::{generate_site_hours_summary, hours_within_range};
pub use timesheet::localize::{derive_countries, localize};
pub use timesheet::merge::merge_overlapping;
pub use timesheet::ports::{SegmentFilter, SegmentRepository};
pub use timesheet::reconstruct::{reconstruct_time_logs, ReconstructionOutcome};
pub use timesheet::service::{ConsolidationQuery, SiteTimeLogService};
pub use timesheet::split::{portions_within_range, PortionFilter};
