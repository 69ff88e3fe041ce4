//! Shared fixtures for the timesheet unit tests.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;
use vision_domain::{
    CountryRef, EmployeeRef, SiteRef, SiteTimeLogType, TimeLog, TimeSegment,
};

pub(crate) fn employee(n: u128) -> EmployeeRef {
    EmployeeRef::new(Uuid::from_u128(n))
}

pub(crate) fn country(n: u128, timezone: &str) -> CountryRef {
    CountryRef::new(Uuid::from_u128(n), timezone)
}

pub(crate) fn site(n: u128) -> SiteRef {
    SiteRef { id: Uuid::from_u128(n) }
}

pub(crate) fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub(crate) fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
}

pub(crate) fn start_segment(
    employee: EmployeeRef,
    log_type: SiteTimeLogType,
    start: DateTime<Utc>,
) -> TimeSegment {
    TimeSegment::new(employee, log_type).with_start(start)
}

pub(crate) fn finish_segment(
    employee: EmployeeRef,
    log_type: SiteTimeLogType,
    finish: DateTime<Utc>,
) -> TimeSegment {
    TimeSegment::new(employee, log_type).with_finish(finish)
}

/// A complete, already-localized log whose local wall clock equals UTC.
pub(crate) fn localized_log(
    employee: EmployeeRef,
    log_type: SiteTimeLogType,
    start: DateTime<Utc>,
    finish: DateTime<Utc>,
) -> TimeLog {
    let segment = TimeSegment::new(employee, log_type).with_start(start).with_finish(finish);
    let mut log = TimeLog::from_segment(&segment);
    log.start_local = Some(start.naive_utc());
    log.finish_local = Some(finish.naive_utc());
    log
}
