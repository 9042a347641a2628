//! Concrete start, end and midpoint instants for parsed components.
//!
//! Unset fields are completed with start-of-period values for the start
//! instant and end-of-period values for the end instant, so `1990-01`
//! spans `1990-01-01T00:00:00` to `1990-01-31T23:59:59.999999`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, SubsecRound};
use serde::Serialize;

use crate::components::{Components, ParsedComponents};
use crate::error::{Field, IsoDateError, Result};

const LAST_MICROSECOND: u32 = 999_999;

/// The resolved boundaries of a parsed expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundaryInstants {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub mid: NaiveDateTime,
}

impl BoundaryInstants {
    /// Build the start, end and midpoint instants.
    ///
    /// The end endpoint inherits year, month and day from the start when
    /// unset; a missing month becomes December and a missing day the last
    /// day of the resolved month.
    ///
    /// Endpoints are not reordered: an end before the start, as in
    /// `2014/1990`, is returned as given and `mid` still lies halfway
    /// between the two.
    ///
    /// # Errors
    ///
    /// Returns [`IsoDateError::MissingYear`] if the start has no year, or
    /// [`IsoDateError::OutOfRange`] if the components do not name a real
    /// calendar date. Components produced by the parser never fail here.
    pub fn from_components(components: &ParsedComponents) -> Result<Self> {
        let start = start_instant(&components.start)?;
        let end = end_instant(&components.start, &components.resolved_end())?;
        // Instants carry microsecond precision; halving an odd span must not
        // introduce nanoseconds.
        let mid = (start + (end - start) / 2).trunc_subsecs(6);
        Ok(BoundaryInstants { start, end, mid })
    }
}

fn start_instant(start: &Components) -> Result<NaiveDateTime> {
    let year = start.year.ok_or(IsoDateError::MissingYear)?;
    let date = make_date(year, start.month.unwrap_or(1), start.day.unwrap_or(1))?;
    make_time(
        date,
        start.hour.unwrap_or(0),
        start.minute.unwrap_or(0),
        start.second.unwrap_or(0),
        start.microsecond.unwrap_or(0),
    )
}

fn end_instant(start: &Components, end: &Components) -> Result<NaiveDateTime> {
    let year = end.year.or(start.year).ok_or(IsoDateError::MissingYear)?;
    let month = end.month.or(start.month).unwrap_or(12);
    let day = match end.day.or(start.day) {
        Some(day) => day,
        None => days_in_month(year, month),
    };
    let date = make_date(year, month, day)?;
    make_time(
        date,
        end.hour.unwrap_or(23),
        end.minute.unwrap_or(59),
        end.second.unwrap_or(59),
        end.microsecond.unwrap_or(LAST_MICROSECOND),
    )
}

fn make_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(IsoDateError::out_of_range(Field::Month, month.to_string()));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| IsoDateError::out_of_range(Field::Day, day.to_string()))
}

fn make_time(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
) -> Result<NaiveDateTime> {
    date.and_hms_micro_opt(hour, minute, second, microsecond)
        .ok_or_else(|| {
            IsoDateError::out_of_range(Field::Hour, format!("{hour:02}:{minute:02}:{second:02}"))
        })
}

/// Number of days in `month` of `year`, leap years included.
///
/// Returns 0 for a month outside 1-12 or a year chrono cannot represent.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .filter(|last| last.month() == month)
        .map_or(0, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, us)
            .unwrap()
    }

    fn single(start: Components) -> ParsedComponents {
        ParsedComponents {
            start,
            ..Default::default()
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2014, 5), 31);
        assert_eq!(days_in_month(2014, 4), 30);
        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(2015, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2014, 12), 31);
        assert_eq!(days_in_month(2014, 13), 0);
        assert_eq!(days_in_month(2014, 0), 0);
    }

    #[test]
    fn test_year_only_spans_whole_year() {
        let instants = BoundaryInstants::from_components(&single(Components {
            year: Some(1990),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(instants.start, dt(1990, 1, 1, 0, 0, 0, 0));
        assert_eq!(instants.end, dt(1990, 12, 31, 23, 59, 59, 999_999));
    }

    #[test]
    fn test_day_spans_whole_day() {
        let instants = BoundaryInstants::from_components(&single(Components {
            year: Some(1990),
            month: Some(1),
            day: Some(2),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(instants.start, dt(1990, 1, 2, 0, 0, 0, 0));
        assert_eq!(instants.end, dt(1990, 1, 2, 23, 59, 59, 999_999));
        assert_eq!(instants.mid, dt(1990, 1, 2, 11, 59, 59, 999_999));
    }

    #[test]
    fn test_minute_precision_end_fills_seconds() {
        let instants = BoundaryInstants::from_components(&single(Components {
            year: Some(2010),
            month: Some(1),
            day: Some(2),
            hour: Some(3),
            minute: Some(4),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(instants.start, dt(2010, 1, 2, 3, 4, 0, 0));
        assert_eq!(instants.end, dt(2010, 1, 2, 3, 4, 59, 999_999));
    }

    #[test]
    fn test_end_month_uses_last_day() {
        let parsed = ParsedComponents {
            start: Components {
                year: Some(1990),
                month: Some(1),
                ..Default::default()
            },
            end: Components {
                year: Some(2014),
                month: Some(5),
                ..Default::default()
            },
            is_interval: true,
        };
        let instants = BoundaryInstants::from_components(&parsed).unwrap();
        assert_eq!(instants.start, dt(1990, 1, 1, 0, 0, 0, 0));
        assert_eq!(instants.end, dt(2014, 5, 31, 23, 59, 59, 999_999));
    }

    #[test]
    fn test_leap_february_end() {
        let instants = BoundaryInstants::from_components(&single(Components {
            year: Some(2016),
            month: Some(2),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(instants.end, dt(2016, 2, 29, 23, 59, 59, 999_999));
    }

    #[test]
    fn test_end_time_without_date_inherits_start_date() {
        let parsed = ParsedComponents {
            start: Components {
                year: Some(1990),
                month: Some(1),
                day: Some(2),
                hour: Some(3),
                minute: Some(4),
                ..Default::default()
            },
            end: Components {
                hour: Some(7),
                minute: Some(8),
                ..Default::default()
            },
            is_interval: true,
        };
        let instants = BoundaryInstants::from_components(&parsed).unwrap();
        assert_eq!(instants.end, dt(1990, 1, 2, 7, 8, 59, 999_999));
    }

    #[test]
    fn test_mid_is_halfway() {
        let parsed = ParsedComponents {
            start: Components {
                year: Some(2000),
                month: Some(1),
                day: Some(1),
                hour: Some(0),
                minute: Some(0),
                second: Some(0),
                ..Default::default()
            },
            end: Components {
                year: Some(2000),
                month: Some(1),
                day: Some(3),
                hour: Some(0),
                minute: Some(0),
                second: Some(0),
                microsecond: Some(0),
                ..Default::default()
            },
            is_interval: true,
        };
        let instants = BoundaryInstants::from_components(&parsed).unwrap();
        assert_eq!(instants.mid, dt(2000, 1, 2, 0, 0, 0, 0));
    }

    #[test]
    fn test_inverted_range_is_kept_as_given() {
        let parsed = ParsedComponents {
            start: Components {
                year: Some(2014),
                ..Default::default()
            },
            end: Components {
                year: Some(1990),
                ..Default::default()
            },
            is_interval: true,
        };
        let instants = BoundaryInstants::from_components(&parsed).unwrap();
        assert_eq!(instants.start, dt(2014, 1, 1, 0, 0, 0, 0));
        assert_eq!(instants.end, dt(1990, 12, 31, 23, 59, 59, 999_999));
        assert!(instants.end < instants.mid && instants.mid < instants.start);
    }

    #[test]
    fn test_missing_start_year_fails() {
        let err = BoundaryInstants::from_components(&ParsedComponents::default()).unwrap_err();
        assert_eq!(err, IsoDateError::MissingYear);
    }

    #[test]
    fn test_invalid_date_fails_without_partial_result() {
        let err = BoundaryInstants::from_components(&single(Components {
            year: Some(2015),
            month: Some(2),
            day: Some(30),
            ..Default::default()
        }))
        .unwrap_err();
        assert!(matches!(err, IsoDateError::OutOfRange { field: Field::Day, .. }));
    }
}
