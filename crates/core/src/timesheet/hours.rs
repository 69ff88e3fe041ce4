//! Hours aggregation and the payroll-category summary.
//!
//! The category rules are a fixed business enumeration (see the table in
//! `generate_site_hours_summary`), written out as explicit calls rather than
//! driven from data, so each row stays individually testable. All totals are
//! `Decimal` to keep repeated half-hour deductions exact.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use tracing::debug;
use vision_domain::constants::{
    DAILY_BREAK_DEDUCTION_HOURS, DAY_SHIFT_END_HOUR, DAY_SHIFT_START_HOUR,
    EVENING_OVERTIME_THRESHOLD_HOURS,
};
use vision_domain::{
    Result, SiteHoursParts, SiteHoursSummary, SiteTimeLogType, TimeLog, VisionError,
};

use super::merge::merge_overlapping;
use super::split::{portions_within_range, PortionFilter};

const WEEKDAYS: [Weekday; 5] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
const MON_TO_SAT: [Weekday; 6] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat];

/// Total hours of the given logs inside `[start, end]`, after splitting per
/// the filter and optionally merging overlap on the resulting portions.
pub fn hours_within_range(
    logs: &[TimeLog],
    start: NaiveDateTime,
    end: NaiveDateTime,
    filter: &PortionFilter,
    merge: bool,
) -> Decimal {
    let portions = portions_within_range(logs, start, end, filter);
    if merge {
        let as_logs: Vec<TimeLog> = portions.into_iter().map(TimeLog::from).collect();
        merge_overlapping(&as_logs)
            .iter()
            .filter_map(|log| Some(log.finish_local? - log.start_local?))
            .map(duration_hours)
            .sum()
    } else {
        portions.iter().map(|portion| duration_hours(portion.duration())).sum()
    }
}

/// Build the payroll-category summary for `[start_date, end_date]`
/// (inclusive), always merging overlap within each category query.
///
/// Category table (types / days / time-of-day window):
///
/// | Category        | Types                                   | Days    | Window      |
/// |-----------------|-----------------------------------------|---------|-------------|
/// | NormalHours     | Service, SiteAttendance                 | Mon-Fri | 06:00-16:00 |
/// | NoWorkOffice A  | PaidHoursForNoWork, Training            | Mon-Fri | 06:00-00:00 |
/// | NoWorkOffice B  | PaidRestDay, College                    | any     | all day     |
/// | Breaks          | Service, PaidHoursForNoWork, Training, PaidRestDay, College | Mon-Fri | 0.5h per qualifying day |
/// | OtAt1.33        | evening Service/Training past the daily threshold | Mon-Fri | 16:00-00:00 |
/// | OtAt1.50        | Service, PaidHoursForNoWork, Training   | Sat     | 06:00-00:00 |
/// | OtAt2.00 Sun    | Service, PaidHoursForNoWork, Training   | Sun     | all day     |
/// | OtAt2.00 night  | Service, PaidHoursForNoWork, Training   | Mon-Sat | 00:00-06:00 |
/// | Travel          | TravelTime                              | Mon-Fri | all day     |
/// | TravelAt1.50    | TravelTime                              | Sat     | all day     |
/// | TravelAt2.00    | TravelTime                              | Sun     | all day     |
/// | HolidayPay      | AnnualLeave                             | any     | all day     |
/// | SiteSubs/Abroad/Standby/SiteClosed | respective type      | any     | all day     |
///
/// Weekday evening hours (Service/Training 16:00-00:00) are overtime at
/// 1.33x only when the day's worked hours minus the break deduction exceed
/// the threshold; otherwise they fold into normal hours. `basic`,
/// `basic_total_minus_breaks`, and the combined double-time figure are
/// derived in [`SiteHoursSummary::from_parts`].
///
/// # Errors
///
/// Returns [`VisionError::InvalidInput`] when `end_date` precedes
/// `start_date` or falls outside the calendar range.
pub fn generate_site_hours_summary(
    logs: &[TimeLog],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<SiteHoursSummary> {
    if end_date < start_date {
        return Err(VisionError::InvalidInput(format!(
            "end date {end_date} precedes start date {start_date}"
        )));
    }
    let range_start = start_date.and_time(NaiveTime::MIN);
    let range_end = end_date
        .succ_opt()
        .ok_or_else(|| VisionError::InvalidInput(format!("end date {end_date} out of range")))?
        .and_time(NaiveTime::MIN);

    let shift_start = time_of_day(DAY_SHIFT_START_HOUR);
    let shift_end = time_of_day(DAY_SHIFT_END_HOUR);
    let category = |types: &[SiteTimeLogType],
                    days: &[Weekday],
                    from: Option<NaiveTime>,
                    to: Option<NaiveTime>| {
        let filter = PortionFilter::default().with_types(types).with_days(days).with_window(from, to);
        hours_within_range(logs, range_start, range_end, &filter, true)
    };

    let mut parts = SiteHoursParts {
        normal_hours: category(
            &[SiteTimeLogType::Service, SiteTimeLogType::SiteAttendance],
            &WEEKDAYS,
            Some(shift_start),
            Some(shift_end),
        ),
        no_work_office: category(
            &[SiteTimeLogType::PaidHoursForNoWork, SiteTimeLogType::Training],
            &WEEKDAYS,
            Some(shift_start),
            None,
        ) + category(
            &[SiteTimeLogType::PaidRestDay, SiteTimeLogType::College],
            &[],
            None,
            None,
        ),
        ot_at_1_50: category(
            &[
                SiteTimeLogType::Service,
                SiteTimeLogType::PaidHoursForNoWork,
                SiteTimeLogType::Training,
            ],
            &[Weekday::Sat],
            Some(shift_start),
            None,
        ),
        ot_at_2_00_sunday: category(
            &[
                SiteTimeLogType::Service,
                SiteTimeLogType::PaidHoursForNoWork,
                SiteTimeLogType::Training,
            ],
            &[Weekday::Sun],
            None,
            None,
        ),
        ot_at_2_00_night: category(
            &[
                SiteTimeLogType::Service,
                SiteTimeLogType::PaidHoursForNoWork,
                SiteTimeLogType::Training,
            ],
            &MON_TO_SAT,
            None,
            Some(shift_start),
        ),
        travel: category(&[SiteTimeLogType::TravelTime], &WEEKDAYS, None, None),
        travel_at_1_50: category(&[SiteTimeLogType::TravelTime], &[Weekday::Sat], None, None),
        travel_at_2_00: category(&[SiteTimeLogType::TravelTime], &[Weekday::Sun], None, None),
        holiday_pay: category(&[SiteTimeLogType::AnnualLeave], &[], None, None),
        site_subs: category(&[SiteTimeLogType::SiteSubs], &[], None, None),
        site_subs_abroad: category(&[SiteTimeLogType::SiteSubsAbroad], &[], None, None),
        standby: category(&[SiteTimeLogType::Standby], &[], None, None),
        site_closed: category(&[SiteTimeLogType::SiteClosed], &[], None, None),
        ..SiteHoursParts::default()
    };

    // Breaks and the evening-overtime decision are per-weekday-day rules.
    let mut day = start_date;
    loop {
        if WEEKDAYS.contains(&day.weekday()) {
            apply_weekday_rules(logs, day, shift_start, shift_end, &mut parts);
        }
        if day >= end_date {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    debug!(%start_date, %end_date, logs = logs.len(), "generated site hours summary");
    Ok(SiteHoursSummary::from_parts(parts))
}

/// Per-day break deduction and evening-overtime attribution.
fn apply_weekday_rules(
    logs: &[TimeLog],
    day: NaiveDate,
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    parts: &mut SiteHoursParts,
) {
    let day_start = day.and_time(NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);
    let daily = |types: &[SiteTimeLogType], from: Option<NaiveTime>, to: Option<NaiveTime>| {
        let filter = PortionFilter::default().with_types(types).with_window(from, to);
        hours_within_range(logs, day_start, day_end, &filter, true)
    };

    // One half-hour break per weekday whose qualifying hours exceed the
    // deduction itself.
    let qualifying = daily(
        &[
            SiteTimeLogType::Service,
            SiteTimeLogType::PaidHoursForNoWork,
            SiteTimeLogType::Training,
            SiteTimeLogType::PaidRestDay,
            SiteTimeLogType::College,
        ],
        None,
        None,
    );
    if qualifying > DAILY_BREAK_DEDUCTION_HOURS {
        parts.breaks += DAILY_BREAK_DEDUCTION_HOURS;
    }

    // Evening hours become 1.33x overtime only past the daily threshold;
    // otherwise they count as normal hours.
    let day_shift = daily(
        &[SiteTimeLogType::Service, SiteTimeLogType::SiteAttendance],
        Some(shift_start),
        Some(shift_end),
    );
    let other_paid = daily(
        &[
            SiteTimeLogType::PaidHoursForNoWork,
            SiteTimeLogType::Training,
            SiteTimeLogType::PaidRestDay,
            SiteTimeLogType::College,
            SiteTimeLogType::TravelTime,
        ],
        None,
        None,
    );
    let evening = daily(
        &[SiteTimeLogType::Service, SiteTimeLogType::Training],
        Some(shift_end),
        None,
    );
    if day_shift + other_paid - DAILY_BREAK_DEDUCTION_HOURS > EVENING_OVERTIME_THRESHOLD_HOURS {
        parts.ot_at_1_33 += evening;
    } else {
        parts.normal_hours += evening;
    }
}

fn time_of_day(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn duration_hours(duration: Duration) -> Decimal {
    Decimal::from(duration.num_seconds()) / Decimal::from(3600)
}

#[cfg(test)]
mod tests {
    use vision_domain::SiteTimeLogType;

    use super::*;
    use crate::timesheet::testutil::{employee, local, localized_log, utc};

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    #[test]
    fn hours_sum_portion_durations() {
        let log = localized_log(
            employee(1),
            SiteTimeLogType::Service,
            utc(2024, 3, 4, 8, 0),
            utc(2024, 3, 4, 16, 30),
        );
        let total = hours_within_range(
            &[log],
            local(2024, 3, 4, 0, 0),
            local(2024, 3, 5, 0, 0),
            &PortionFilter::default(),
            false,
        );
        assert_eq!(total, dec("8.5"));
    }

    #[test]
    fn merging_collapses_double_counted_overlap() {
        let emp = employee(1);
        let logs = vec![
            localized_log(
                emp.clone(),
                SiteTimeLogType::Service,
                utc(2024, 3, 4, 8, 0),
                utc(2024, 3, 4, 12, 0),
            ),
            localized_log(
                emp,
                SiteTimeLogType::SiteAttendance,
                utc(2024, 3, 4, 8, 0),
                utc(2024, 3, 4, 13, 0),
            ),
        ];
        let filter = PortionFilter::default()
            .with_types(&[SiteTimeLogType::Service, SiteTimeLogType::SiteAttendance]);
        let range = (local(2024, 3, 4, 0, 0), local(2024, 3, 5, 0, 0));

        let unmerged = hours_within_range(&logs, range.0, range.1, &filter, false);
        let merged = hours_within_range(&logs, range.0, range.1, &filter, true);
        assert_eq!(unmerged, dec("9"));
        assert_eq!(merged, dec("5"));
    }

    #[test]
    fn merging_keeps_employees_separate() {
        // Two people on site over the same window must both be counted.
        let logs = vec![
            localized_log(
                employee(1),
                SiteTimeLogType::Service,
                utc(2024, 3, 4, 8, 0),
                utc(2024, 3, 4, 12, 0),
            ),
            localized_log(
                employee(2),
                SiteTimeLogType::Service,
                utc(2024, 3, 4, 9, 0),
                utc(2024, 3, 4, 13, 0),
            ),
        ];
        let merged = hours_within_range(
            &logs,
            local(2024, 3, 4, 0, 0),
            local(2024, 3, 5, 0, 0),
            &PortionFilter::default(),
            true,
        );
        assert_eq!(merged, dec("8"));
    }

    #[test]
    fn short_day_folds_evening_into_normal_hours() {
        // Monday 08:00-17:00 service: 9 - 0.5 = 8.5 <= 9.5, so the
        // 16:00-17:00 hour stays in normal hours.
        let log = localized_log(
            employee(1),
            SiteTimeLogType::Service,
            utc(2024, 3, 4, 8, 0),
            utc(2024, 3, 4, 17, 0),
        );
        let summary =
            generate_site_hours_summary(&[log], date(2024, 3, 4), date(2024, 3, 10)).unwrap();

        assert_eq!(summary.normal_hours, dec("9"));
        assert_eq!(summary.ot_at_1_33, dec("0"));
        assert_eq!(summary.breaks, dec("0.5"));
        assert_eq!(summary.basic, dec("9"));
        assert_eq!(summary.basic_total_minus_breaks, dec("8.5"));
    }

    #[test]
    fn long_day_pushes_evening_into_overtime() {
        // Monday 05:00-20:00 service plus two hours of travel: day shift 10h
        // + other 2h - 0.5h = 11.5h > 9.5h, so 16:00-20:00 is overtime.
        let emp = employee(1);
        let logs = vec![
            localized_log(
                emp.clone(),
                SiteTimeLogType::Service,
                utc(2024, 3, 4, 5, 0),
                utc(2024, 3, 4, 20, 0),
            ),
            localized_log(
                emp,
                SiteTimeLogType::TravelTime,
                utc(2024, 3, 4, 20, 0),
                utc(2024, 3, 4, 22, 0),
            ),
        ];
        let summary =
            generate_site_hours_summary(&logs, date(2024, 3, 4), date(2024, 3, 10)).unwrap();

        assert_eq!(summary.normal_hours, dec("10"));
        assert_eq!(summary.ot_at_1_33, dec("4"));
        // The 05:00-06:00 hour is night double time.
        assert_eq!(summary.ot_at_2_00, dec("1"));
        assert_eq!(summary.travel, dec("2"));
        assert_eq!(summary.breaks, dec("0.5"));
    }

    #[test]
    fn saturday_and_sunday_rates() {
        let emp = employee(1);
        let logs = vec![
            // Saturday 2024-03-09, 07:00-13:00 service.
            localized_log(
                emp.clone(),
                SiteTimeLogType::Service,
                utc(2024, 3, 9, 7, 0),
                utc(2024, 3, 9, 13, 0),
            ),
            // Sunday 2024-03-10, 08:00-12:00 service and 12:00-14:00 travel.
            localized_log(
                emp.clone(),
                SiteTimeLogType::Service,
                utc(2024, 3, 10, 8, 0),
                utc(2024, 3, 10, 12, 0),
            ),
            localized_log(
                emp,
                SiteTimeLogType::TravelTime,
                utc(2024, 3, 10, 12, 0),
                utc(2024, 3, 10, 14, 0),
            ),
        ];
        let summary =
            generate_site_hours_summary(&logs, date(2024, 3, 4), date(2024, 3, 10)).unwrap();

        assert_eq!(summary.ot_at_1_50, dec("6"));
        assert_eq!(summary.ot_at_2_00, dec("4"));
        assert_eq!(summary.travel_at_2_00, dec("2"));
        assert_eq!(summary.normal_hours, dec("0"));
        assert_eq!(summary.breaks, dec("0"));
    }

    #[test]
    fn saturday_early_hours_are_night_double_time() {
        // Saturday 04:00-08:00 service: 04:00-06:00 is night double time,
        // 06:00-08:00 is Saturday overtime.
        let log = localized_log(
            employee(1),
            SiteTimeLogType::Service,
            utc(2024, 3, 9, 4, 0),
            utc(2024, 3, 9, 8, 0),
        );
        let summary =
            generate_site_hours_summary(&[log], date(2024, 3, 4), date(2024, 3, 10)).unwrap();

        assert_eq!(summary.ot_at_2_00, dec("2"));
        assert_eq!(summary.ot_at_1_50, dec("2"));
    }

    #[test]
    fn flat_categories_count_all_day_any_day() {
        let emp = employee(1);
        let logs = vec![
            localized_log(
                emp.clone(),
                SiteTimeLogType::AnnualLeave,
                utc(2024, 3, 5, 0, 0),
                utc(2024, 3, 6, 0, 0),
            ),
            localized_log(
                emp,
                SiteTimeLogType::Standby,
                utc(2024, 3, 9, 20, 0),
                utc(2024, 3, 10, 2, 0),
            ),
        ];
        let summary =
            generate_site_hours_summary(&logs, date(2024, 3, 4), date(2024, 3, 10)).unwrap();

        assert_eq!(summary.holiday_pay, dec("24"));
        assert_eq!(summary.standby, dec("6"));
    }

    #[test]
    fn breaks_count_distinct_qualifying_weekdays() {
        let emp = employee(1);
        let logs = vec![
            // Monday: 6h, qualifies.
            localized_log(
                emp.clone(),
                SiteTimeLogType::Training,
                utc(2024, 3, 4, 9, 0),
                utc(2024, 3, 4, 15, 0),
            ),
            // Tuesday: 20 minutes, does not qualify.
            localized_log(
                emp.clone(),
                SiteTimeLogType::Training,
                utc(2024, 3, 5, 9, 0),
                utc(2024, 3, 5, 9, 20),
            ),
            // Saturday: 6h, not a weekday.
            localized_log(
                emp,
                SiteTimeLogType::Training,
                utc(2024, 3, 9, 9, 0),
                utc(2024, 3, 9, 15, 0),
            ),
        ];
        let summary =
            generate_site_hours_summary(&logs, date(2024, 3, 4), date(2024, 3, 10)).unwrap();

        assert_eq!(summary.breaks, dec("0.5"));
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let err = generate_site_hours_summary(&[], date(2024, 3, 10), date(2024, 3, 4)).unwrap_err();
        assert!(matches!(err, VisionError::InvalidInput(_)));
    }
}
