//! Immutable reference snapshots of entities resolved outside the engine.
//!
//! The consolidation pipeline never triggers lookups or lazy loading; callers
//! resolve the entities they care about up front and pass these value
//! snapshots in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Country snapshot, carrying the IANA timezone name used for local-time
/// conversion (e.g. `"Europe/London"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    /// Country id.
    pub id: Uuid,
    /// IANA timezone name, if the country has one recorded.
    pub timezone: Option<String>,
}

impl CountryRef {
    /// Create a country reference with a timezone name.
    pub fn new(id: Uuid, timezone: impl Into<String>) -> Self {
        Self { id, timezone: Some(timezone.into()) }
    }

    /// Create a country reference with no recorded timezone.
    pub fn without_timezone(id: Uuid) -> Self {
        Self { id, timezone: None }
    }
}

/// Employee snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    /// Employee id.
    pub id: Uuid,
    /// The employee's currently recorded location, used as the final
    /// fallback during country derivation.
    pub location: Option<CountryRef>,
}

impl EmployeeRef {
    /// Create an employee reference with no recorded location.
    pub fn new(id: Uuid) -> Self {
        Self { id, location: None }
    }

    /// Attach the employee's currently recorded location.
    #[must_use]
    pub fn with_location(mut self, location: CountryRef) -> Self {
        self.location = Some(location);
        self
    }
}

/// Site identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRef {
    /// Site id.
    pub id: Uuid,
}

/// Equipment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRef {
    /// Equipment id.
    pub id: Uuid,
}

/// Works order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksOrderRef {
    /// Works order id.
    pub id: Uuid,
    /// Human-facing works order number, used by caller-side filters.
    pub number: String,
}
