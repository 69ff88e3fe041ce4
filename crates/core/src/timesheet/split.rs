//! Range clipping and day/time-of-day splitting of intervals into portions.
//!
//! All clipping happens on local wall-clock time. UTC bounds of clipped or
//! split portions are recomputed from the local-minus-UTC offset captured
//! from the original unclamped log, never re-resolved through the timezone,
//! so a portion's two clocks always stay the same distance apart as the log
//! they came from.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use vision_domain::{SiteTimeLogType, TimeLog, TimeLogPortion};

/// Optional narrowing applied while splitting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortionFilter {
    /// Keep only these log types; empty means all.
    pub types: Vec<SiteTimeLogType>,
    /// Keep only portions starting on these weekdays; empty means all.
    pub days_of_week: Vec<Weekday>,
    /// Raise each day portion's start to this time of day.
    pub time_from: Option<NaiveTime>,
    /// Lower each day portion's finish to this time of day. Midnight means
    /// "no upper clip".
    pub time_to: Option<NaiveTime>,
}

impl PortionFilter {
    /// Keep only the given log types.
    #[must_use]
    pub fn with_types(mut self, types: &[SiteTimeLogType]) -> Self {
        self.types = types.to_vec();
        self
    }

    /// Keep only portions starting on the given weekdays.
    #[must_use]
    pub fn with_days(mut self, days: &[Weekday]) -> Self {
        self.days_of_week = days.to_vec();
        self
    }

    /// Apply a time-of-day window. Either bound may be `None`; a `time_to`
    /// of exactly midnight is treated as "no upper clip".
    #[must_use]
    pub fn with_window(mut self, time_from: Option<NaiveTime>, time_to: Option<NaiveTime>) -> Self {
        self.time_from = time_from;
        self.time_to = time_to;
        self
    }

    fn needs_day_split(&self) -> bool {
        !self.days_of_week.is_empty() || self.time_from.is_some() || self.time_to.is_some()
    }

    fn accepts_type(&self, log_type: SiteTimeLogType) -> bool {
        self.types.is_empty() || self.types.contains(&log_type)
    }

    fn accepts_day(&self, weekday: Weekday) -> bool {
        self.days_of_week.is_empty() || self.days_of_week.contains(&weekday)
    }
}

/// Clip the given logs to `[start, end]` local time and, when the filter asks
/// for day-of-week or time-of-day narrowing, explode each clipped interval
/// into per-calendar-day portions.
///
/// Logs missing any bound are skipped; portions with non-positive duration
/// are discarded. Input logs are never mutated.
pub fn portions_within_range(
    logs: &[TimeLog],
    start: NaiveDateTime,
    end: NaiveDateTime,
    filter: &PortionFilter,
) -> Vec<TimeLogPortion> {
    let mut portions = Vec::new();

    for log in logs {
        let (Some(start_local), Some(finish_local), Some(start_utc), Some(_)) =
            (log.start_local, log.finish_local, log.start_utc, log.finish_utc)
        else {
            continue;
        };
        if start_local > end || finish_local < start {
            continue;
        }
        if !filter.accepts_type(log.log_type) {
            continue;
        }

        // Wall-clock distance from UTC, captured before any clamping.
        let offset = start_local - start_utc.naive_utc();
        let clamped_start = start_local.max(start);
        let clamped_finish = finish_local.min(end);

        if filter.needs_day_split() {
            split_days(log, clamped_start, clamped_finish, offset, filter, &mut portions);
        } else if clamped_finish > clamped_start {
            portions.push(make_portion(log, clamped_start, clamped_finish, offset));
        }
    }

    portions
}

/// Explode one clipped interval into per-day portions, applying the
/// time-of-day window and day-of-week filter.
fn split_days(
    log: &TimeLog,
    clamped_start: NaiveDateTime,
    clamped_finish: NaiveDateTime,
    offset: Duration,
    filter: &PortionFilter,
    portions: &mut Vec<TimeLogPortion>,
) {
    let mut day = clamped_start.date();
    let last_day = clamped_finish.date();

    while day <= last_day {
        let day_start = day.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let mut portion_start = clamped_start.max(day_start);
        let mut portion_finish = clamped_finish.min(day_end);

        if let Some(from) = filter.time_from {
            if portion_start.time() < from {
                portion_start = day.and_time(from);
            }
        }
        if let Some(to) = filter.time_to {
            if to != NaiveTime::MIN {
                if portion_finish.time() == NaiveTime::MIN {
                    // A midnight finish means "up to but not including the
                    // next day": re-date it to the previous calendar day at
                    // the window end.
                    if let Some(previous) = portion_finish.date().pred_opt() {
                        portion_finish = previous.and_time(to);
                    }
                } else if portion_finish.time() > to {
                    portion_finish = portion_finish.date().and_time(to);
                }
            }
        }

        if portion_finish > portion_start && filter.accepts_day(portion_start.weekday()) {
            portions.push(make_portion(log, portion_start, portion_finish, offset));
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
}

fn make_portion(
    log: &TimeLog,
    start_local: NaiveDateTime,
    finish_local: NaiveDateTime,
    offset: Duration,
) -> TimeLogPortion {
    TimeLogPortion {
        employee: log.employee.clone(),
        log_type: log.log_type,
        country: log.country.clone(),
        site: log.site,
        equipment: log.equipment,
        works_order: log.works_order.clone(),
        start_utc: utc_from_local(start_local, offset),
        finish_utc: utc_from_local(finish_local, offset),
        start_local,
        finish_local,
    }
}

fn utc_from_local(local: NaiveDateTime, offset: Duration) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(local - offset))
}
