//! Interval reconstruction over unordered start/finish event streams.
//!
//! Segments arrive as half-open events: an arrival, a departure, or
//! occasionally a whole interval. Reconstruction partitions them by employee
//! and type group, orders each partition chronologically, and pairs events
//! into complete intervals with a single-pass scan. Events that cannot be
//! paired come back as incomplete logs so callers can surface them.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;
use vision_domain::{Result, SiteTimeLogCategory, SiteTimeLogType, TimeLog, TimeSegment};

/// Result of one reconstruction pass.
#[derive(Debug, Clone, Default)]
pub struct ReconstructionOutcome {
    /// Intervals with both bounds resolved.
    pub complete: Vec<TimeLog>,
    /// Segments that could not be paired within the queried window.
    pub incomplete: Vec<TimeLog>,
}

/// Reconstruct complete intervals from an unordered segment collection.
///
/// Segments are partitioned by employee, then by type group. A group is
/// normally a single [`SiteTimeLogType`]; the `Service` group additionally
/// carries `SiteAttendance` segments as secondary members, because a site
/// attendance departure can terminate an open service interval on the same
/// site. Ordering within a group is by `start ?? finish` ascending with the
/// original input order as tie-break, so reconstruction is deterministic
/// under re-ordering of tied segments.
///
/// # Errors
///
/// Returns [`vision_domain::VisionError::InvalidSegment`] if any segment
/// carries neither timestamp.
pub fn reconstruct_time_logs(segments: &[TimeSegment]) -> Result<ReconstructionOutcome> {
    for segment in segments {
        segment.validate()?;
    }

    let mut outcome = ReconstructionOutcome::default();

    for employee_segments in partition_by_employee(segments) {
        for group in partition_by_type_group(&employee_segments) {
            scan_group(&group, &mut outcome);
        }
    }

    debug!(
        segments = segments.len(),
        complete = outcome.complete.len(),
        incomplete = outcome.incomplete.len(),
        "reconstructed time logs"
    );
    Ok(outcome)
}

/// Partition segments per employee, preserving input order within and across
/// partitions (first-seen employee order).
fn partition_by_employee<'a>(segments: &'a [TimeSegment]) -> Vec<Vec<&'a TimeSegment>> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut by_employee: HashMap<Uuid, Vec<&'a TimeSegment>> = HashMap::new();
    for segment in segments {
        match by_employee.entry(segment.employee.id) {
            Entry::Vacant(entry) => {
                order.push(segment.employee.id);
                entry.insert(vec![segment]);
            }
            Entry::Occupied(mut entry) => entry.get_mut().push(segment),
        }
    }
    order.into_iter().filter_map(|id| by_employee.remove(&id)).collect()
}

/// A segment inside a type group, marked primary or secondary.
#[derive(Clone, Copy)]
struct GroupedSegment<'a> {
    segment: &'a TimeSegment,
    primary: bool,
}

/// Partition one employee's segments into type groups, each sorted by
/// `start ?? finish` ascending (stable, so tied segments keep input order).
fn partition_by_type_group<'a>(segments: &[&'a TimeSegment]) -> Vec<Vec<GroupedSegment<'a>>> {
    let mut order: Vec<SiteTimeLogType> = Vec::new();
    for segment in segments {
        if !order.contains(&segment.log_type) {
            order.push(segment.log_type);
        }
    }

    let mut groups = Vec::with_capacity(order.len());
    for log_type in order {
        let mut group: Vec<GroupedSegment<'a>> = segments
            .iter()
            .filter_map(|segment| {
                if segment.log_type == log_type {
                    Some(GroupedSegment { segment, primary: true })
                } else if log_type == SiteTimeLogType::Service
                    && segment.log_type == SiteTimeLogType::SiteAttendance
                {
                    Some(GroupedSegment { segment, primary: false })
                } else {
                    None
                }
            })
            .collect();
        group.sort_by_key(|grouped| grouped.segment.sort_instant());
        groups.push(group);
    }
    groups
}

/// Single-pass scan over one ordered type group.
fn scan_group(group: &[GroupedSegment<'_>], outcome: &mut ReconstructionOutcome) {
    let mut active: Option<TimeLog> = None;
    let mut seen_start = false;

    for grouped in group {
        let segment = grouped.segment;
        if !grouped.primary {
            // Secondary (site attendance) events only ever close an open
            // service interval, and only with a departure for the same site.
            if segment.start_utc.is_none() && segment.finish_utc.is_some() {
                let matches = active
                    .as_ref()
                    .is_some_and(|open| finish_terminates(open, segment));
                if matches {
                    close_active(&mut active, segment.finish_utc, &mut outcome.complete);
                }
            }
            continue;
        }

        if segment.start_utc.is_some() {
            seen_start = true;
            // A new start implicitly terminates the prior open interval.
            close_active(&mut active, segment.start_utc, &mut outcome.complete);
            let log = TimeLog::from_segment(segment);
            if log.is_complete() {
                outcome.complete.push(log);
            } else {
                active = Some(log);
            }
            continue;
        }

        // Finish-only segment.
        match active.as_ref() {
            Some(open) if finish_terminates(open, segment) => {
                close_active(&mut active, segment.finish_utc, &mut outcome.complete);
            }
            Some(_) => outcome.incomplete.push(TimeLog::from_segment(segment)),
            None if seen_start => outcome.incomplete.push(TimeLog::from_segment(segment)),
            // A finish before the first start belongs to an interval that
            // began before the queried window; drop it silently.
            None => {}
        }
    }

    if let Some(open) = active {
        outcome.incomplete.push(open);
    }
}

/// Close the active interval with the given finish instant, if one is open.
fn close_active(
    active: &mut Option<TimeLog>,
    finish_utc: Option<chrono::DateTime<chrono::Utc>>,
    complete: &mut Vec<TimeLog>,
) {
    if let Some(mut open) = active.take() {
        open.finish_utc = finish_utc;
        complete.push(open);
    }
}

/// Termination-matching rules for a finish event against the open interval.
/// Evaluated in order, first true wins.
fn finish_terminates(open: &TimeLog, segment: &TimeSegment) -> bool {
    let log_type = segment.log_type;

    // Project time (and site attendance in particular) is keyed on site.
    if log_type.category() == SiteTimeLogCategory::ProjectTime
        || log_type == SiteTimeLogType::SiteAttendance
    {
        return match (open.site, segment.site) {
            (Some(a), Some(b)) => a.id == b.id,
            _ => false,
        };
    }

    // Country visits are keyed on country.
    if log_type == SiteTimeLogType::CountryVisit {
        return match (open.country.as_ref(), segment.country.as_ref()) {
            (Some(a), Some(b)) => a.id == b.id,
            _ => false,
        };
    }

    // Remaining non-project time needs no extra key.
    log_type.category() == SiteTimeLogCategory::NonProjectTime
}
