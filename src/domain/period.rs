use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};

/// Inclusive time window. A missing bound is open-ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(FinanceError::InvalidInput(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start)
            && self.end.map_or(true, |end| instant <= end)
    }

    /// Calendar days covered by a bounded window, as seen from `offset`.
    pub fn days(&self, offset: FixedOffset) -> Vec<NaiveDate> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Vec::new();
        };
        let first = start.with_timezone(&offset).date_naive();
        let last = end.with_timezone(&offset).date_naive();
        first.iter_days().take_while(|day| *day <= last).collect()
    }
}

/// Predefined reporting windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[serde(rename = "dia")]
    Today,
    #[serde(rename = "semana")]
    Week,
    #[default]
    #[serde(rename = "mes")]
    Month,
    #[serde(rename = "trimestre")]
    Quarter,
    #[serde(rename = "año")]
    Year,
    #[serde(rename = "total")]
    AllTime,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Today,
        Period::Week,
        Period::Month,
        Period::Quarter,
        Period::Year,
        Period::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Hoy",
            Period::Week => "Esta Semana",
            Period::Month => "Este Mes",
            Period::Quarter => "Este Trimestre",
            Period::Year => "Este Año",
            Period::AllTime => "Total",
        }
    }

    /// Resolves the window containing `now`, in `now`'s local offset.
    /// Weeks start on Sunday; every bound runs from 00:00:00 to 23:59:59.999.
    pub fn window(&self, now: DateTime<FixedOffset>) -> DateWindow {
        let today = now.date_naive();
        let bounds = match self {
            Period::Today => Some((today, today)),
            Period::Week => {
                let start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                Some((start, start + Duration::days(6)))
            }
            Period::Month => month_span(today, 1),
            Period::Quarter => today
                .with_day(1)
                .and_then(|first| first.with_month(today.month0() / 3 * 3 + 1))
                .and_then(|start| month_span(start, 3)),
            Period::Year => today.with_ordinal(1).and_then(|start| month_span(start, 12)),
            Period::AllTime => None,
        };
        // Dates past chrono's range leave the window open.
        let Some((first, last)) = bounds else {
            return DateWindow::unbounded();
        };
        let offset = *now.offset();
        DateWindow {
            start: local_to_utc(first.and_time(NaiveTime::MIN), offset),
            end: last
                .and_hms_milli_opt(23, 59, 59, 999)
                .and_then(|local| local_to_utc(local, offset)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "dia",
            Period::Week => "semana",
            Period::Month => "mes",
            Period::Quarter => "trimestre",
            Period::Year => "año",
            Period::AllTime => "total",
        }
    }
}

impl FromStr for Period {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self> {
        let needle = value.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == needle || p.label().to_lowercase() == needle)
            .ok_or_else(|| FinanceError::InvalidInput(format!("unknown period `{value}`")))
    }
}

/// First day of `start`'s month through the day before `months` months later.
fn month_span(start: NaiveDate, months: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = start.with_day(1)?;
    let last = first.checked_add_months(Months::new(months))?.pred_opt()?;
    Some((first, last))
}

fn local_to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&local)
        .single()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_literals_and_labels() {
        assert_eq!("trimestre".parse::<Period>().unwrap(), Period::Quarter);
        assert_eq!("Este Año".parse::<Period>().unwrap(), Period::Year);
        assert!(matches!(
            "fortnight".parse::<Period>(),
            Err(FinanceError::InvalidInput(_))
        ));
    }

    fn at(offset_hours: i32, y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 15, 30, 0)
            .unwrap()
    }

    fn local_date(instant: Option<DateTime<Utc>>, offset_hours: i32) -> NaiveDate {
        instant
            .unwrap()
            .with_timezone(&FixedOffset::east_opt(offset_hours * 3600).unwrap())
            .date_naive()
    }

    #[test]
    fn today_spans_local_day() {
        let now = at(-6, 2024, 3, 14);
        let window = Period::Today.window(now);
        let start = window.start.unwrap();
        let end = window.end.unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 14, 6, 0, 0).unwrap());
        assert_eq!(end - start, Duration::days(1) - Duration::milliseconds(1));
        assert!(window.contains(now.with_timezone(&Utc)));
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-03-14 is a Thursday.
        let window = Period::Week.window(at(0, 2024, 3, 14));
        assert_eq!(
            local_date(window.start, 0),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(
            local_date(window.end, 0),
            NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()
        );
    }

    #[test]
    fn month_handles_leap_february() {
        let window = Period::Month.window(at(0, 2024, 2, 10));
        assert_eq!(
            local_date(window.end, 0),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn quarter_and_year_bounds() {
        let now = at(-6, 2024, 8, 20);
        let quarter = Period::Quarter.window(now);
        assert_eq!(
            local_date(quarter.start, -6),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
        assert_eq!(
            local_date(quarter.end, -6),
            NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
        );

        let year = Period::Year.window(now);
        assert_eq!(
            local_date(year.start, -6),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            local_date(year.end, -6),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn all_time_is_unbounded() {
        let window = Period::AllTime.window(at(0, 2024, 1, 1));
        assert!(!window.is_bounded());
        assert!(window.contains(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            DateWindow::new(start, end),
            Err(FinanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn days_lists_each_calendar_day() {
        let window = Period::Week.window(at(0, 2024, 3, 14));
        let days = window.days(FixedOffset::east_opt(0).unwrap());
        assert_eq!(days.len(), 7);
        assert!(DateWindow::unbounded().days(FixedOffset::east_opt(0).unwrap()).is_empty());
    }

    #[test]
    fn december_quarter_ends_with_the_year() {
        let now = at(-6, 2024, 12, 15);
        let quarter = Period::Quarter.window(now);
        assert_eq!(
            quarter.start,
            Some(Utc.with_ymd_and_hms(2024, 10, 1, 6, 0, 0).unwrap())
        );
        assert_eq!(
            quarter.end,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 5, 59, 59).unwrap() + Duration::milliseconds(999))
        );
        assert_eq!(
            local_date(Period::Month.window(now).end, -6),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn month_handles_common_february() {
        let window = Period::Month.window(at(5, 2023, 2, 28));
        assert_eq!(
            local_date(window.start, 5),
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()
        );
        assert_eq!(
            local_date(window.end, 5),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }
}
