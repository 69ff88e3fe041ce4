//! Site time-log type and category vocabulary.
//!
//! The type set is a fixed business enumeration, not data-driven: the
//! reconstruction termination rules and the payroll summary table are both
//! written against these variants so the rule cascade stays exhaustively
//! checkable.

use serde::{Deserialize, Serialize};

/// Grouping of log types governing interval-termination matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteTimeLogCategory {
    /// Work attributed to a specific site (termination requires a site match).
    ProjectTime,
    /// Everything else; terminates without an extra key unless the type
    /// carries one of its own.
    NonProjectTime,
}

/// The kind of activity a time-log segment records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteTimeLogType {
    /// On-site service work.
    Service,
    /// Presence on a site; its finish events may also terminate an open
    /// `Service` interval for the same site.
    SiteAttendance,
    /// Visit to a country; termination requires a country match.
    CountryVisit,
    /// Travel to or from site.
    TravelTime,
    /// Paid hours where no work was available.
    PaidHoursForNoWork,
    /// Training time.
    Training,
    /// Paid rest day.
    PaidRestDay,
    /// College attendance.
    College,
    /// Annual leave.
    AnnualLeave,
    /// Site subsistence allowance.
    SiteSubs,
    /// Site subsistence allowance while abroad.
    SiteSubsAbroad,
    /// Standby duty.
    Standby,
    /// Site closed.
    SiteClosed,
}

impl SiteTimeLogType {
    /// The category this type belongs to.
    ///
    /// `Service` and `SiteAttendance` are site-bound project time; every
    /// other type is non-project time. Keeping `SiteAttendance` in project
    /// time lets callers push a category filter down to the segment store
    /// without discarding the attendance events that terminate open service
    /// intervals.
    pub const fn category(self) -> SiteTimeLogCategory {
        match self {
            Self::Service | Self::SiteAttendance => SiteTimeLogCategory::ProjectTime,
            _ => SiteTimeLogCategory::NonProjectTime,
        }
    }
}
