//! Site time-log consolidation and timesheet hours engine.
//!
//! The pipeline runs in fixed stages, each producing fresh clones:
//!
//! ```text
//! SegmentRepository -> reconstruct -> derive_countries/localize
//!     -> (optional) merge_overlapping -> portions_within_range -> hours
//! ```
//!
//! [`service::SiteTimeLogService`] is the facade callers use; the stage
//! functions are public for callers that already hold reconstructed logs.

pub mod hours;
pub mod localize;
pub mod merge;
pub mod ports;
pub mod reconstruct;
pub mod service;
pub mod split;

#[cfg(test)]
pub(crate) mod testutil;
