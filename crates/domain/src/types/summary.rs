//! Payroll-category hours summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Independently measured category totals feeding a [`SiteHoursSummary`].
///
/// The derived figures (`basic`, `basic_total_minus_breaks`, combined
/// double-time) are intentionally absent here; they are computed in
/// [`SiteHoursSummary::from_parts`] and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteHoursParts {
    /// Weekday day-shift hours (plus folded-in evening hours).
    pub normal_hours: Decimal,
    /// Paid office/no-work hours.
    pub no_work_office: Decimal,
    /// Break deductions.
    pub breaks: Decimal,
    /// Evening overtime at 1.33x.
    pub ot_at_1_33: Decimal,
    /// Saturday overtime at 1.5x.
    pub ot_at_1_50: Decimal,
    /// Sunday hours at 2x.
    pub ot_at_2_00_sunday: Decimal,
    /// Night hours (00:00-06:00) at 2x.
    pub ot_at_2_00_night: Decimal,
    /// Weekday travel.
    pub travel: Decimal,
    /// Saturday travel at 1.5x.
    pub travel_at_1_50: Decimal,
    /// Sunday travel at 2x.
    pub travel_at_2_00: Decimal,
    /// Annual leave.
    pub holiday_pay: Decimal,
    /// Site subsistence.
    pub site_subs: Decimal,
    /// Site subsistence abroad.
    pub site_subs_abroad: Decimal,
    /// Standby duty.
    pub standby: Decimal,
    /// Site-closed hours.
    pub site_closed: Decimal,
}

/// Aggregated payroll summary for one employee over one date range.
///
/// Created fresh per query; immutable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteHoursSummary {
    /// Weekday day-shift hours (plus folded-in evening hours).
    pub normal_hours: Decimal,
    /// Paid office/no-work hours.
    pub no_work_office: Decimal,
    /// `normal_hours + no_work_office`; always derived.
    pub basic: Decimal,
    /// Break deductions.
    pub breaks: Decimal,
    /// `basic - breaks`; always derived.
    pub basic_total_minus_breaks: Decimal,
    /// Evening overtime at 1.33x.
    pub ot_at_1_33: Decimal,
    /// Saturday overtime at 1.5x.
    pub ot_at_1_50: Decimal,
    /// Sunday plus night hours at 2x; always derived from its components.
    pub ot_at_2_00: Decimal,
    /// Weekday travel.
    pub travel: Decimal,
    /// Saturday travel at 1.5x.
    pub travel_at_1_50: Decimal,
    /// Sunday travel at 2x.
    pub travel_at_2_00: Decimal,
    /// Annual leave.
    pub holiday_pay: Decimal,
    /// Site subsistence.
    pub site_subs: Decimal,
    /// Site subsistence abroad.
    pub site_subs_abroad: Decimal,
    /// Standby duty.
    pub standby: Decimal,
    /// Site-closed hours.
    pub site_closed: Decimal,
}

impl SiteHoursSummary {
    /// Assemble a summary from measured parts, computing the derived totals.
    pub fn from_parts(parts: SiteHoursParts) -> Self {
        let basic = parts.normal_hours + parts.no_work_office;
        Self {
            normal_hours: parts.normal_hours,
            no_work_office: parts.no_work_office,
            basic,
            breaks: parts.breaks,
            basic_total_minus_breaks: basic - parts.breaks,
            ot_at_1_33: parts.ot_at_1_33,
            ot_at_1_50: parts.ot_at_1_50,
            ot_at_2_00: parts.ot_at_2_00_sunday + parts.ot_at_2_00_night,
            travel: parts.travel,
            travel_at_1_50: parts.travel_at_1_50,
            travel_at_2_00: parts.travel_at_2_00,
            holiday_pay: parts.holiday_pay,
            site_subs: parts.site_subs,
            site_subs_abroad: parts.site_subs_abroad,
            standby: parts.standby,
            site_closed: parts.site_closed,
        }
    }
}
