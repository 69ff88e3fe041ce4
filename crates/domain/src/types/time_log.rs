//! Raw segments, reconstructed time logs, and split portions.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VisionError};
use crate::types::log_type::SiteTimeLogType;
use crate::types::refs::{CountryRef, EmployeeRef, EquipmentRef, SiteRef, WorksOrderRef};

/// A single logged event: an arrival, a departure, or occasionally both.
///
/// Segments are the raw input to reconstruction. At least one of
/// `start_utc`/`finish_utc` must be present; [`TimeSegment::validate`]
/// rejects a segment with neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSegment {
    /// Employee the event belongs to.
    pub employee: EmployeeRef,
    /// Kind of activity logged.
    pub log_type: SiteTimeLogType,
    /// Country attribution, when recorded at the point of logging.
    pub country: Option<CountryRef>,
    /// Site the event was logged against.
    pub site: Option<SiteRef>,
    /// Equipment the event was logged against.
    pub equipment: Option<EquipmentRef>,
    /// Works order the event was logged against.
    pub works_order: Option<WorksOrderRef>,
    /// Event start, if this segment records one.
    pub start_utc: Option<DateTime<Utc>>,
    /// Event finish, if this segment records one.
    pub finish_utc: Option<DateTime<Utc>>,
}

impl TimeSegment {
    /// Create a segment with no timestamps or optional references set.
    ///
    /// Callers attach timestamps with [`with_start`](Self::with_start) /
    /// [`with_finish`](Self::with_finish); a segment must end up with at
    /// least one of them.
    pub fn new(employee: EmployeeRef, log_type: SiteTimeLogType) -> Self {
        Self {
            employee,
            log_type,
            country: None,
            site: None,
            equipment: None,
            works_order: None,
            start_utc: None,
            finish_utc: None,
        }
    }

    /// Attach a start timestamp.
    #[must_use]
    pub fn with_start(mut self, start_utc: DateTime<Utc>) -> Self {
        self.start_utc = Some(start_utc);
        self
    }

    /// Attach a finish timestamp.
    #[must_use]
    pub fn with_finish(mut self, finish_utc: DateTime<Utc>) -> Self {
        self.finish_utc = Some(finish_utc);
        self
    }

    /// Attach a country reference.
    #[must_use]
    pub fn with_country(mut self, country: CountryRef) -> Self {
        self.country = Some(country);
        self
    }

    /// Attach a site reference.
    #[must_use]
    pub fn with_site(mut self, site: SiteRef) -> Self {
        self.site = Some(site);
        self
    }

    /// Attach an equipment reference.
    #[must_use]
    pub fn with_equipment(mut self, equipment: EquipmentRef) -> Self {
        self.equipment = Some(equipment);
        self
    }

    /// Attach a works order reference.
    #[must_use]
    pub fn with_works_order(mut self, works_order: WorksOrderRef) -> Self {
        self.works_order = Some(works_order);
        self
    }

    /// The instant used for chronological ordering: the start when present,
    /// otherwise the finish.
    pub fn sort_instant(&self) -> Option<DateTime<Utc>> {
        self.start_utc.or(self.finish_utc)
    }

    /// Reject a segment carrying neither timestamp; the reconstruction sort
    /// key would be undefined for it.
    pub fn validate(&self) -> Result<()> {
        if self.start_utc.is_none() && self.finish_utc.is_none() {
            return Err(VisionError::InvalidSegment(format!(
                "segment for employee {} has neither start nor finish",
                self.employee.id
            )));
        }
        Ok(())
    }
}

/// A reconstructed time-log interval.
///
/// Complete logs carry both UTC bounds; incomplete ones (unmatched segments)
/// carry only one. Local bounds are filled by the localization stage. Every
/// pipeline stage produces fresh clones; a log is never mutated once it
/// reaches aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    /// Employee the interval belongs to.
    pub employee: EmployeeRef,
    /// Kind of activity logged.
    pub log_type: SiteTimeLogType,
    /// Resolved country attribution (possibly derived after reconstruction).
    pub country: Option<CountryRef>,
    /// Site the interval was logged against.
    pub site: Option<SiteRef>,
    /// Equipment the interval was logged against.
    pub equipment: Option<EquipmentRef>,
    /// Works order the interval was logged against.
    pub works_order: Option<WorksOrderRef>,
    /// Interval start in UTC.
    pub start_utc: Option<DateTime<Utc>>,
    /// Interval finish in UTC.
    pub finish_utc: Option<DateTime<Utc>>,
    /// Interval start as local wall-clock time in the resolved timezone.
    pub start_local: Option<NaiveDateTime>,
    /// Interval finish as local wall-clock time in the resolved timezone.
    pub finish_local: Option<NaiveDateTime>,
}

impl TimeLog {
    /// Build a log from a raw segment, copying its references and whichever
    /// timestamps it carries.
    pub fn from_segment(segment: &TimeSegment) -> Self {
        Self {
            employee: segment.employee.clone(),
            log_type: segment.log_type,
            country: segment.country.clone(),
            site: segment.site,
            equipment: segment.equipment,
            works_order: segment.works_order.clone(),
            start_utc: segment.start_utc,
            finish_utc: segment.finish_utc,
            start_local: None,
            finish_local: None,
        }
    }

    /// Whether both UTC bounds are present.
    pub fn is_complete(&self) -> bool {
        self.start_utc.is_some() && self.finish_utc.is_some()
    }

    /// The instant this log is anchored to: the start when present,
    /// otherwise the finish. Used by country derivation.
    pub fn anchor_instant(&self) -> Option<DateTime<Utc>> {
        self.start_utc.or(self.finish_utc)
    }
}

/// A time log restricted to a sub-range (range clip, single calendar day,
/// or time-of-day window).
///
/// Unlike [`TimeLog`], all four bounds are guaranteed present and
/// `finish_local` is strictly after `start_local`; the splitter discards
/// anything that would violate that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLogPortion {
    /// Employee the portion belongs to.
    pub employee: EmployeeRef,
    /// Kind of activity logged.
    pub log_type: SiteTimeLogType,
    /// Resolved country attribution.
    pub country: Option<CountryRef>,
    /// Site the portion was logged against.
    pub site: Option<SiteRef>,
    /// Equipment the portion was logged against.
    pub equipment: Option<EquipmentRef>,
    /// Works order the portion was logged against.
    pub works_order: Option<WorksOrderRef>,
    /// Portion start in UTC.
    pub start_utc: DateTime<Utc>,
    /// Portion finish in UTC.
    pub finish_utc: DateTime<Utc>,
    /// Portion start as local wall-clock time.
    pub start_local: NaiveDateTime,
    /// Portion finish as local wall-clock time.
    pub finish_local: NaiveDateTime,
}

impl TimeLogPortion {
    /// Local wall-clock duration of the portion.
    pub fn duration(&self) -> chrono::Duration {
        self.finish_local - self.start_local
    }
}

impl From<TimeLogPortion> for TimeLog {
    fn from(portion: TimeLogPortion) -> Self {
        Self {
            employee: portion.employee,
            log_type: portion.log_type,
            country: portion.country,
            site: portion.site,
            equipment: portion.equipment,
            works_order: portion.works_order,
            start_utc: Some(portion.start_utc),
            finish_utc: Some(portion.finish_utc),
            start_local: Some(portion.start_local),
            finish_local: Some(portion.finish_local),
        }
    }
}
