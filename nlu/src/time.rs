//! Relative calendar expressions anchored to "today".

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use pulse_types::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PeriodUnit {
    Week,
    Month,
    Year,
}

impl PeriodUnit {
    pub(crate) fn parse(word: &str) -> Option<Self> {
        match word {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// "this week" (`offset == 0`) or "last week" (`offset == 1`) and so on.
pub(crate) fn calendar_period(today: NaiveDate, unit: PeriodUnit, offset: u32) -> Option<DateRange> {
    match unit {
        PeriodUnit::Week => {
            let anchor = today.checked_sub_days(Days::new(7 * u64::from(offset)))?;
            Some(DateRange::week_of(anchor))
        }
        PeriodUnit::Month => {
            let anchor = today
                .with_day(1)?
                .checked_sub_months(Months::new(offset))?;
            Some(DateRange::month_of(anchor))
        }
        PeriodUnit::Year => {
            let year = today.year().checked_sub(i32::try_from(offset).ok()?)?;
            DateRange::year(year)
        }
    }
}

pub(crate) fn month_number(name: &str) -> Option<u32> {
    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// The named month in `year`, or its latest occurrence not after today.
pub(crate) fn named_month(today: NaiveDate, month: u32, year: Option<i32>) -> Option<DateRange> {
    let year = match year {
        Some(year) => year,
        None if month <= today.month() => today.year(),
        None => today.year() - 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1).map(DateRange::month_of)
}

/// Most recent `weekday` on or before today; strictly before with `last`.
pub(crate) fn recent_weekday(today: NaiveDate, weekday: Weekday, last: bool) -> Option<NaiveDate> {
    let back = (7 + today.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    let back = if last && back == 0 { 7 } else { back };
    today.checked_sub_days(Days::new(u64::from(back)))
}
