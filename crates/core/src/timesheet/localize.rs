//! Country derivation and UTC-to-local conversion.
//!
//! Reconstructed logs frequently lack a country: the engineer clocked in
//! without one, or the event type never records one. Derivation walks a
//! fixed snapshot of the employee's segment history and attributes the most
//! recent prior country, falling back to the employee's recorded location.
//! The snapshot is fetched once, before any log is touched, so derivation
//! never reads a record mutated by the same pass.

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;
use vision_domain::{CountryRef, Result, TimeLog, TimeSegment, VisionError};

/// Backfill missing country attribution from the segment snapshot.
///
/// For each log without a country: among all snapshot segments for the same
/// employee that carry a country and whose instant is strictly before the
/// log's anchor instant, take the most recent. If none exists, fall back to
/// the employee's currently recorded location. Returns fresh clones; input
/// logs are never mutated.
pub fn derive_countries(logs: &[TimeLog], snapshot: &[TimeSegment]) -> Vec<TimeLog> {
    logs.iter()
        .map(|log| {
            let mut log = log.clone();
            if log.country.is_none() {
                log.country = derive_country(&log, snapshot);
            }
            log
        })
        .collect()
}

fn derive_country(log: &TimeLog, snapshot: &[TimeSegment]) -> Option<CountryRef> {
    let anchor = log.anchor_instant()?;
    let prior = snapshot
        .iter()
        .filter(|segment| segment.employee.id == log.employee.id)
        .filter(|segment| segment.country.is_some())
        .filter(|segment| segment.sort_instant().is_some_and(|instant| instant < anchor))
        .max_by_key(|segment| segment.sort_instant());
    match prior {
        Some(segment) => segment.country.clone(),
        None => log.employee.location.clone(),
    }
}

/// Truncate the UTC bounds to whole minutes and compute the local bounds via
/// the resolved country's timezone.
///
/// Logs without a resolvable country/timezone fall back to the host-local
/// timezone; that is the documented policy default. A country naming an
/// unrecognized timezone is an error.
///
/// # Errors
///
/// Returns [`VisionError::InvalidTimezone`] when a country's timezone name
/// is not in the tz database.
pub fn localize(logs: &[TimeLog]) -> Result<Vec<TimeLog>> {
    logs.iter().map(localize_log).collect()
}

fn localize_log(log: &TimeLog) -> Result<TimeLog> {
    let mut log = log.clone();
    log.start_utc = log.start_utc.map(truncate_to_minute);
    log.finish_utc = log.finish_utc.map(truncate_to_minute);

    let timezone = resolve_timezone(&log)?;
    if timezone.is_none() && log.country.is_none() {
        warn!(employee = %log.employee.id, "no country resolved; using host-local timezone");
    }
    log.start_local = log.start_utc.map(|utc| to_local(utc, timezone));
    log.finish_local = log.finish_utc.map(|utc| to_local(utc, timezone));
    Ok(log)
}

fn resolve_timezone(log: &TimeLog) -> Result<Option<Tz>> {
    match log.country.as_ref().and_then(|country| country.timezone.as_deref()) {
        Some(name) => name
            .parse::<Tz>()
            .map(Some)
            .map_err(|_| VisionError::InvalidTimezone(name.to_string())),
        None => Ok(None),
    }
}

fn to_local(utc: DateTime<Utc>, timezone: Option<Tz>) -> NaiveDateTime {
    match timezone {
        Some(tz) => utc.with_timezone(&tz).naive_local(),
        None => utc.with_timezone(&Local).naive_local(),
    }
}

fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|truncated| truncated.with_nanosecond(0))
        .unwrap_or(instant)
}
