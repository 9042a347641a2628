//! Parsed temporal components for each interval endpoint.

use std::fmt;

use serde::Serialize;

/// One side of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// The fields parsed for a single endpoint.
///
/// Every field is optional: an unset field is distinct from zero and is
/// filled in later by inheritance from the start endpoint or by
/// start/end-of-period defaulting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Components {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub microsecond: Option<u32>,
    /// Signed UTC offset in fractional hours (`+06:30` is `6.5`).
    pub timezone: Option<f64>,
}

impl Components {
    /// How many leading date fields are set: 0 (none), 1 (year),
    /// 2 (year-month) or 3 (year-month-day).
    pub fn date_depth(&self) -> usize {
        match (self.year, self.month, self.day) {
            (None, _, _) => 0,
            (Some(_), None, _) => 1,
            (Some(_), Some(_), None) => 2,
            (Some(_), Some(_), Some(_)) => 3,
        }
    }

    /// Fill this endpoint's unset date fields from `start`.
    ///
    /// Only the date is inherited; time-of-day and offset fields are left
    /// as parsed.
    pub fn inherit_date(&self, start: &Components) -> Components {
        Components {
            year: self.year.or(start.year),
            month: self.month.or(start.month),
            day: self.day.or(start.day),
            ..*self
        }
    }
}

/// The raw components of both endpoints.
///
/// `end` stays entirely unset when the input is not an interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ParsedComponents {
    pub start: Components,
    pub end: Components,
    #[serde(skip)]
    pub is_interval: bool,
}

impl ParsedComponents {
    /// The end endpoint with inherited date fields filled in, or a copy of
    /// the start endpoint when the input was not an interval.
    pub fn resolved_end(&self) -> Components {
        if self.is_interval {
            self.end.inherit_date(&self.start)
        } else {
            self.start
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Endpoint::Start.to_string(), "start");
        assert_eq!(Endpoint::End.to_string(), "end");
    }

    #[test]
    fn test_date_depth() {
        let mut c = Components::default();
        assert_eq!(c.date_depth(), 0);
        c.year = Some(1990);
        assert_eq!(c.date_depth(), 1);
        c.month = Some(1);
        assert_eq!(c.date_depth(), 2);
        c.day = Some(2);
        assert_eq!(c.date_depth(), 3);
    }

    #[test]
    fn test_inherit_date_keeps_own_fields() {
        let start = Components {
            year: Some(2008),
            month: Some(2),
            day: Some(15),
            hour: Some(10),
            ..Default::default()
        };
        let end = Components {
            month: Some(3),
            day: Some(14),
            ..Default::default()
        };
        let resolved = end.inherit_date(&start);
        assert_eq!(resolved.year, Some(2008));
        assert_eq!(resolved.month, Some(3));
        assert_eq!(resolved.day, Some(14));
        assert_eq!(resolved.hour, None);
    }

    #[test]
    fn test_resolved_end_mirrors_start_without_interval() {
        let parsed = ParsedComponents {
            start: Components {
                year: Some(1990),
                hour: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(parsed.resolved_end(), parsed.start);
        assert_eq!(parsed.end, Components::default());
    }

    #[test]
    fn test_serializes_start_and_end_keys() {
        let parsed = ParsedComponents {
            start: Components {
                year: Some(1990),
                timezone: Some(-6.5),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(parsed).unwrap();
        assert_eq!(json["start"]["year"], 1990);
        assert_eq!(json["start"]["timezone"], -6.5);
        assert!(json["start"]["month"].is_null());
        assert!(json["end"]["year"].is_null());
        assert!(json.get("is_interval").is_none());
    }
}
