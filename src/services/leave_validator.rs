//! Calendar and policy checks a leave request has to pass before it is stored.
//!
//! Rules run in a fixed order and the first failure is reported:
//! the range must not be inverted, casual and vacation leave need
//! `advanceNoticeDays` of notice, and no day in the range may fall on a
//! weekend or a configured holiday.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use thiserror::Error;

use crate::database::models::{Configuration, LeaveType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveValidationError {
    #[error("End date ({end}) cannot be before start date ({start}).")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Casual and vacation leave must be applied for at least {days} days in advance.")]
    InsufficientNotice { days: u32 },

    #[error("Leave period includes a weekend ({date}). Please apply separately.")]
    WeekendInRange { date: NaiveDate },

    #[error("Leave period includes a public holiday ({date}).")]
    HolidayInRange { date: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveCandidate {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Checks `candidate` against `configuration` as of `today` and returns the
/// inclusive number of days it covers.
pub fn validate(
    candidate: &LeaveCandidate,
    configuration: &Configuration,
    today: NaiveDate,
) -> Result<u32, LeaveValidationError> {
    let LeaveCandidate {
        leave_type,
        start_date,
        end_date,
    } = *candidate;

    if end_date < start_date {
        return Err(LeaveValidationError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    if leave_type.requires_advance_notice() {
        let days = configuration.advance_notice_days();
        let earliest = today.checked_add_days(Days::new(u64::from(days)));
        if earliest.is_none_or(|earliest| start_date < earliest) {
            return Err(LeaveValidationError::InsufficientNotice { days });
        }
    }

    for date in start_date.iter_days().take_while(|date| *date <= end_date) {
        if is_weekend(date) {
            return Err(LeaveValidationError::WeekendInRange { date });
        }
        if configuration.is_holiday(date) {
            return Err(LeaveValidationError::HolidayInRange { date });
        }
    }

    Ok(day_count(start_date, end_date))
}

/// Inclusive calendar days between two dates, in either order.
pub fn day_count(start_date: NaiveDate, end_date: NaiveDate) -> u32 {
    let span = (end_date - start_date).num_days().unsigned_abs();
    u32::try_from(span).unwrap_or(u32::MAX - 1) + 1
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn candidate(leave_type: LeaveType, start: &str, end: &str) -> LeaveCandidate {
        LeaveCandidate {
            leave_type,
            start_date: date(start),
            end_date: date(end),
        }
    }

    fn configuration() -> Configuration {
        seed::default_configuration()
    }

    #[test]
    fn inverted_range_fails_before_any_other_rule() {
        // Saturday to Friday, casual, no notice: the range rule still wins.
        let result = validate(
            &candidate(LeaveType::Casual, "2025-06-07", "2025-06-06"),
            &configuration(),
            date("2025-06-06"),
        );

        assert_eq!(
            result,
            Err(LeaveValidationError::InvalidRange {
                start: date("2025-06-07"),
                end: date("2025-06-06"),
            })
        );
    }

    #[test]
    fn single_saturday_is_a_weekend_error() {
        let result = validate(
            &candidate(LeaveType::Sick, "2025-06-07", "2025-06-07"),
            &configuration(),
            date("2025-06-01"),
        );

        assert_eq!(
            result,
            Err(LeaveValidationError::WeekendInRange {
                date: date("2025-06-07")
            })
        );
    }

    #[test]
    fn single_monday_sick_day_passes_with_one_day() {
        let result = validate(
            &candidate(LeaveType::Sick, "2025-06-02", "2025-06-02"),
            &configuration(),
            date("2025-06-02"),
        );

        assert_eq!(result, Ok(1));
    }

    #[test]
    fn casual_and_vacation_need_notice() {
        let today = date("2025-06-02");
        for leave_type in [LeaveType::Casual, LeaveType::Vacation] {
            let result = validate(
                &candidate(leave_type, "2025-06-04", "2025-06-04"),
                &configuration(),
                today,
            );
            assert_eq!(
                result,
                Err(LeaveValidationError::InsufficientNotice { days: 3 })
            );
        }

        // Exactly three days ahead is enough.
        let result = validate(
            &candidate(LeaveType::Casual, "2025-06-05", "2025-06-05"),
            &configuration(),
            today,
        );
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn notice_rule_never_fires_for_other_types() {
        let today = date("2025-06-02");
        for leave_type in [
            LeaveType::Sick,
            LeaveType::Wfh,
            LeaveType::CompOff,
            LeaveType::Academic,
        ] {
            let result = validate(
                &candidate(leave_type, "2025-06-02", "2025-06-02"),
                &configuration(),
                today,
            );
            assert_eq!(result, Ok(1), "{leave_type} should not need notice");
        }
    }

    #[test]
    fn notice_message_names_the_threshold() {
        let mut configuration = configuration();
        configuration.settings.advance_notice_days = 7;

        let error = validate(
            &candidate(LeaveType::Vacation, "2025-06-03", "2025-06-03"),
            &configuration,
            date("2025-06-02"),
        )
        .unwrap_err();

        assert!(error.to_string().contains("at least 7 days"));
    }

    #[test]
    fn holiday_inside_range_is_reported() {
        // 2025-08-15 is a Friday and a configured holiday.
        let result = validate(
            &candidate(LeaveType::Sick, "2025-08-13", "2025-08-15"),
            &configuration(),
            date("2025-08-01"),
        );

        assert_eq!(
            result,
            Err(LeaveValidationError::HolidayInRange {
                date: date("2025-08-15")
            })
        );
    }

    #[test]
    fn first_offending_day_is_reported() {
        // Holiday on Friday comes before the weekend that follows it.
        let result = validate(
            &candidate(LeaveType::Sick, "2025-08-14", "2025-08-18"),
            &configuration(),
            date("2025-08-01"),
        );

        assert_eq!(
            result,
            Err(LeaveValidationError::HolidayInRange {
                date: date("2025-08-15")
            })
        );
    }

    #[test]
    fn weekend_wins_over_holiday_on_the_same_day() {
        let mut configuration = configuration();
        configuration.holidays.insert(date("2025-06-07"));

        let result = validate(
            &candidate(LeaveType::Sick, "2025-06-06", "2025-06-09"),
            &configuration,
            date("2025-06-01"),
        );

        assert_eq!(
            result,
            Err(LeaveValidationError::WeekendInRange {
                date: date("2025-06-07")
            })
        );
    }

    #[test]
    fn working_week_counts_five_days() {
        let result = validate(
            &candidate(LeaveType::Sick, "2025-06-02", "2025-06-06"),
            &configuration(),
            date("2025-06-01"),
        );

        assert_eq!(result, Ok(5));
    }

    #[test]
    fn day_count_is_inclusive_and_symmetric() {
        assert_eq!(day_count(date("2025-06-02"), date("2025-06-02")), 1);
        assert_eq!(day_count(date("2025-06-02"), date("2025-06-06")), 5);
        assert_eq!(day_count(date("2025-06-06"), date("2025-06-02")), 5);
    }
}
