//! Merging of temporally overlapping intervals.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;
use vision_domain::TimeLog;

/// Merge overlapping complete intervals into maximal non-overlapping spans,
/// per employee.
///
/// Within each employee's logs, ordered by local start, a log whose local
/// start falls strictly inside the active span is absorbed: the local and
/// UTC finishes each become the later of the two, independently (neither is
/// recomputed from the other). Adjacent intervals (start == previous finish)
/// are NOT merged, and different employees' intervals never merge with each
/// other. Logs missing any of the four bounds are skipped. The operation is
/// idempotent and returns fresh clones grouped by employee (first-seen
/// order), ascending by local start within each group.
pub fn merge_overlapping(logs: &[TimeLog]) -> Vec<TimeLog> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut by_employee: HashMap<Uuid, Vec<&TimeLog>> = HashMap::new();
    for log in logs.iter().filter(|log| {
        log.start_local.is_some()
            && log.finish_local.is_some()
            && log.start_utc.is_some()
            && log.finish_utc.is_some()
    }) {
        match by_employee.entry(log.employee.id) {
            Entry::Vacant(entry) => {
                order.push(log.employee.id);
                entry.insert(vec![log]);
            }
            Entry::Occupied(mut entry) => entry.get_mut().push(log),
        }
    }

    let mut merged: Vec<TimeLog> = Vec::new();
    for id in order {
        let Some(mut ordered) = by_employee.remove(&id) else {
            continue;
        };
        ordered.sort_by_key(|log| log.start_local);
        merge_one_employee(&ordered, &mut merged);
    }

    debug!(input = logs.len(), output = merged.len(), "merged overlapping time logs");
    merged
}

/// Single-accumulator sweep over one employee's ordered logs.
fn merge_one_employee(ordered: &[&TimeLog], merged: &mut Vec<TimeLog>) {
    let mut active: Option<TimeLog> = None;

    for log in ordered {
        let overlaps = active
            .as_ref()
            .is_some_and(|span| log.start_local < span.finish_local);
        if overlaps {
            if let Some(span) = active.as_mut() {
                span.finish_local = span.finish_local.max(log.finish_local);
                span.finish_utc = span.finish_utc.max(log.finish_utc);
            }
        } else if let Some(finished) = active.replace((*log).clone()) {
            merged.push(finished);
        }
    }
    if let Some(span) = active {
        merged.push(span);
    }
}
