//! Domain types and models

pub mod log_type;
pub mod refs;
pub mod summary;
pub mod time_log;

pub use log_type::{SiteTimeLogCategory, SiteTimeLogType};
pub use refs::{CountryRef, EmployeeRef, EquipmentRef, SiteRef, WorksOrderRef};
pub use summary::{SiteHoursParts, SiteHoursSummary};
pub use time_log::{TimeLog, TimeLogPortion, TimeSegment};
