//! Site time-log consolidation service - core business logic

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use vision_domain::{
    Result, SiteHoursSummary, SiteTimeLogCategory, SiteTimeLogType, TimeLog, TimeLogPortion,
};

use super::hours::{generate_site_hours_summary, hours_within_range};
use super::localize::{derive_countries, localize};
use super::merge::merge_overlapping;
use super::ports::{SegmentFilter, SegmentRepository};
use super::reconstruct::reconstruct_time_logs;
use super::split::{portions_within_range, PortionFilter};

/// Filter criteria for one consolidation call.
///
/// Dates, categories, and employees are pushed down to the segment store;
/// every other dimension is applied after reconstruction, against resolved
/// state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidationQuery {
    /// Lower bound on the segment instant.
    pub start_utc: Option<DateTime<Utc>>,
    /// Upper bound on the segment instant.
    pub end_utc: Option<DateTime<Utc>>,
    /// Restrict to these categories; empty means all.
    pub categories: Vec<SiteTimeLogCategory>,
    /// Restrict to these log types; empty means all.
    pub types: Vec<SiteTimeLogType>,
    /// Restrict to these countries (resolved after derivation); empty means all.
    pub country_ids: Vec<Uuid>,
    /// Restrict to these works order numbers; empty means all.
    pub works_order_numbers: Vec<String>,
    /// Restrict to these sites; empty means all.
    pub site_ids: Vec<Uuid>,
    /// Restrict to this equipment; empty means all.
    pub equipment_ids: Vec<Uuid>,
    /// Restrict to these employees; empty means all.
    pub employee_ids: Vec<Uuid>,
    /// Include fully reconstructed intervals in the result.
    pub return_complete: bool,
    /// Include unmatched (incomplete) logs in the result.
    pub return_incomplete: bool,
}

impl ConsolidationQuery {
    /// A query over everything, returning complete logs only.
    pub fn complete_only() -> Self {
        Self { return_complete: true, ..Self::default() }
    }
}

/// Site time-log consolidation and timesheet hours service.
pub struct SiteTimeLogService {
    repository: Arc<dyn SegmentRepository>,
}

impl SiteTimeLogService {
    /// Create a new service over the given segment store.
    pub fn new(repository: Arc<dyn SegmentRepository>) -> Self {
        Self { repository }
    }

    /// Fetch raw segments, reconstruct intervals, resolve countries and
    /// local times, and apply the query's post-reconstruction filters.
    ///
    /// # Errors
    ///
    /// Propagates repository faults, `InvalidSegment` for timestamp-less
    /// segments, and `InvalidTimezone` for unrecognized timezone names.
    pub fn get_consolidated_site_time_logs(
        &self,
        query: &ConsolidationQuery,
    ) -> Result<Vec<TimeLog>> {
        let fetch = SegmentFilter {
            start_utc: query.start_utc,
            end_utc: query.end_utc,
            categories: query.categories.clone(),
            types: Vec::new(),
            employee_ids: query.employee_ids.clone(),
        };
        let segments = self.repository.fetch_segments(&fetch)?;
        let outcome = reconstruct_time_logs(&segments)?;

        // Country derivation runs against its own snapshot, fetched once up
        // to the latest instant in the result set, so the pass never reads a
        // record it has already rewritten.
        let max_instant = outcome
            .complete
            .iter()
            .chain(outcome.incomplete.iter())
            .filter_map(|log| log.finish_utc.or(log.start_utc))
            .max();
        let snapshot = self.repository.fetch_segments(&SegmentFilter {
            start_utc: None,
            end_utc: max_instant,
            categories: Vec::new(),
            types: Vec::new(),
            employee_ids: query.employee_ids.clone(),
        })?;

        let mut logs = Vec::new();
        if query.return_complete {
            logs.extend(localize(&derive_countries(&outcome.complete, &snapshot))?);
        }
        if query.return_incomplete {
            logs.extend(localize(&derive_countries(&outcome.incomplete, &snapshot))?);
        }
        logs.retain(|log| Self::matches_post_filters(log, query));

        debug!(
            segments = segments.len(),
            returned = logs.len(),
            "consolidated site time logs"
        );
        Ok(logs)
    }

    /// Merge temporally overlapping logs into maximal spans.
    pub fn merge_overlapping_site_time_logs(&self, logs: &[TimeLog]) -> Vec<TimeLog> {
        merge_overlapping(logs)
    }

    /// Clip and split logs into portions inside `[start, end]` local time.
    pub fn site_time_log_portions_within_range(
        &self,
        logs: &[TimeLog],
        start: NaiveDateTime,
        end: NaiveDateTime,
        filter: &PortionFilter,
    ) -> Vec<TimeLogPortion> {
        portions_within_range(logs, start, end, filter)
    }

    /// Total hours inside `[start, end]` local time, optionally merging
    /// overlapping portions first.
    pub fn site_time_log_hours_within_range(
        &self,
        logs: &[TimeLog],
        start: NaiveDateTime,
        end: NaiveDateTime,
        filter: &PortionFilter,
        merge: bool,
    ) -> Decimal {
        hours_within_range(logs, start, end, filter, merge)
    }

    /// Build the payroll-category summary for `[start_date, end_date]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the date range is reversed or out of
    /// calendar bounds.
    pub fn generate_site_hours_summary(
        &self,
        logs: &[TimeLog],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<SiteHoursSummary> {
        generate_site_hours_summary(logs, start_date, end_date)
    }

    /// Filters that can only be trusted against reconstructed, resolved
    /// state; push-down on these could discard a terminating counterpart.
    fn matches_post_filters(log: &TimeLog, query: &ConsolidationQuery) -> bool {
        if !query.types.is_empty() && !query.types.contains(&log.log_type) {
            return false;
        }
        if !query.country_ids.is_empty()
            && !log
                .country
                .as_ref()
                .is_some_and(|country| query.country_ids.contains(&country.id))
        {
            return false;
        }
        if !query.site_ids.is_empty()
            && !log.site.is_some_and(|site| query.site_ids.contains(&site.id))
        {
            return false;
        }
        if !query.equipment_ids.is_empty()
            && !log
                .equipment
                .is_some_and(|equipment| query.equipment_ids.contains(&equipment.id))
        {
            return false;
        }
        if !query.works_order_numbers.is_empty()
            && !log
                .works_order
                .as_ref()
                .is_some_and(|order| query.works_order_numbers.contains(&order.number))
        {
            return false;
        }
        true
    }
}
