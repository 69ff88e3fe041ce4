//! # Vision Domain
//!
//! Business domain types and models for the Vision timesheet engine.
//!
//! This crate contains:
//! - Domain data types (TimeSegment, TimeLog, SiteHoursSummary, etc.)
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Vision crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{Result, VisionError};
pub use types::*;
