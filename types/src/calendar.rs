//! Calendar primitives: inclusive date ranges and the edits applied to them.
//!
//! Every [`DateRange`] is ordered (`start <= end`). Constructors reorder
//! their inputs, so no call site has to remember to do it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One edge of a range, as named by a touched element or a "from"/"to" phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEdge {
    From,
    To,
}

/// Paging direction for [`DateRange::page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    Past,
    Future,
}

/// Inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[NaiveDate; 2]", into = "[NaiveDate; 2]")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid range '{0}' (expected YYYY-MM-DD..YYYY-MM-DD)")]
    MissingSeparator(String),
}

impl DateRange {
    /// Build a range from two days in either order.
    #[must_use]
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[must_use]
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// `half_width` days on each side of `center`.
    #[must_use]
    pub fn around(center: NaiveDate, half_width: u64) -> Self {
        let start = center.checked_sub_days(Days::new(half_width)).unwrap_or(center);
        let end = center.checked_add_days(Days::new(half_width)).unwrap_or(center);
        Self { start, end }
    }

    /// The `days` days ending on (and including) `today`.
    #[must_use]
    pub fn last_days(today: NaiveDate, days: u64) -> Self {
        let start = today
            .checked_sub_days(Days::new(days.saturating_sub(1)))
            .unwrap_or(today);
        Self { start, end: today }
    }

    /// Monday through Sunday of the week containing `date`.
    #[must_use]
    pub fn week_of(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        Self { start, end }
    }

    /// The calendar month containing `date`.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        Self {
            start,
            end: last_day_of_month(start),
        }
    }

    /// January 1st through December 31st of `year`, if representable.
    #[must_use]
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, both ends included.
    #[must_use]
    pub fn num_days(self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    #[must_use]
    pub const fn edge(self, edge: TimeEdge) -> NaiveDate {
        match edge {
            TimeEdge::From => self.start,
            TimeEdge::To => self.end,
        }
    }

    /// Move exactly one edge, then reorder the pair.
    #[must_use]
    pub fn with_edge(self, edge: TimeEdge, date: NaiveDate) -> Self {
        match edge {
            TimeEdge::From => Self::new(date, self.end),
            TimeEdge::To => Self::new(self.start, date),
        }
    }

    /// Pull the nearest edge onto `date`.
    ///
    /// Outside the range, the range grows to include `date`. Inside, the
    /// edge fewer calendar days away moves; ties move the start edge.
    #[must_use]
    pub fn snap_edge_to(self, date: NaiveDate) -> Self {
        if date < self.start {
            return Self {
                start: date,
                end: self.end,
            };
        }
        if date > self.end {
            return Self {
                start: self.start,
                end: date,
            };
        }
        let to_start = (date - self.start).num_days();
        let to_end = (self.end - date).num_days();
        if to_start <= to_end {
            self.with_edge(TimeEdge::From, date)
        } else {
            self.with_edge(TimeEdge::To, date)
        }
    }

    /// Whether the range starts on a 1st and ends on a month's last day.
    #[must_use]
    pub fn is_month_aligned(self) -> bool {
        self.start.day() == 1 && self.end == last_day_of_month(self.end)
    }

    fn month_count(self) -> u32 {
        let months = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
        (months(self.end) - months(self.start) + 1).unsigned_abs()
    }

    /// The adjacent range of identical span in `direction`.
    ///
    /// Month-aligned ranges page by whole months so that "March" pages to
    /// "April" rather than to a 31-day window. Returns `self` if the result
    /// would fall outside the representable calendar.
    #[must_use]
    pub fn page(self, direction: ShiftDirection) -> Self {
        let paged = if self.is_month_aligned() {
            let count = self.month_count();
            let start = match direction {
                ShiftDirection::Past => self.start.checked_sub_months(Months::new(count)),
                ShiftDirection::Future => self.start.checked_add_months(Months::new(count)),
            };
            start.and_then(|start| {
                let last_month_start = start.checked_add_months(Months::new(count - 1))?;
                Some(Self {
                    start,
                    end: last_day_of_month(last_month_start),
                })
            })
        } else {
            let days = Days::new(self.num_days());
            match direction {
                ShiftDirection::Past => self
                    .start
                    .checked_sub_days(days)
                    .zip(self.end.checked_sub_days(days)),
                ShiftDirection::Future => self
                    .start
                    .checked_add_days(days)
                    .zip(self.end.checked_add_days(days)),
            }
            .map(|(start, end)| Self { start, end })
        };
        paged.unwrap_or(self)
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Parse a `YYYY-MM-DD` day.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_err| DateRangeError::InvalidDate(text.trim().to_owned()))
}

impl FromStr for DateRange {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once("..")
            .ok_or_else(|| DateRangeError::MissingSeparator(s.to_owned()))?;
        Ok(Self::new(parse_date(a)?, parse_date(b)?))
    }
}

impl From<[NaiveDate; 2]> for DateRange {
    fn from(value: [NaiveDate; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<DateRange> for [NaiveDate; 2] {
    fn from(value: DateRange) -> Self {
        [value.start, value.end]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}
