//! Domain constants
//!
//! Centralized location for the payroll-rule constants used by the hours
//! aggregation pipeline.

use rust_decimal::Decimal;

/// Unpaid break deducted from each qualifying working day, in hours.
///
/// A weekday only qualifies for the deduction when its worked hours exceed
/// this same figure.
pub const DAILY_BREAK_DEDUCTION_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Daily worked-hours threshold (after the break deduction) above which
/// evening work is paid at the 1.33x overtime rate instead of being folded
/// into normal hours.
pub const EVENING_OVERTIME_THRESHOLD_HOURS: Decimal = Decimal::from_parts(95, 0, 0, false, 1);

/// Hour of day at which the standard day shift begins.
pub const DAY_SHIFT_START_HOUR: u32 = 6;

/// Hour of day at which the standard day shift ends.
pub const DAY_SHIFT_END_HOUR: u32 = 16;
