//! Health data sources and the repeating calendar periods they can be
//! aggregated by.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Daily-granularity metric that can be browsed over a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    StepCount,
    HoursSlept,
    SleepRange,
    HeartRate,
    Weight,
}

impl DataSource {
    /// Default presentation order; the first entry is the fallback when
    /// nothing else names a source.
    pub const ALL: [Self; 5] = [
        Self::StepCount,
        Self::HoursSlept,
        Self::SleepRange,
        Self::HeartRate,
        Self::Weight,
    ];

    /// Intraday counterpart, if the metric has sub-day detail.
    #[must_use]
    pub const fn intraday(self) -> Option<IntraDayDataSource> {
        match self {
            Self::StepCount => Some(IntraDayDataSource::StepCount),
            Self::HeartRate => Some(IntraDayDataSource::HeartRate),
            Self::HoursSlept | Self::SleepRange => Some(IntraDayDataSource::Sleep),
            Self::Weight => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StepCount => "step_count",
            Self::HoursSlept => "hours_slept",
            Self::SleepRange => "sleep_range",
            Self::HeartRate => "heart_rate",
            Self::Weight => "weight",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::StepCount => "Step Count",
            Self::HoursSlept => "Hours Slept",
            Self::SleepRange => "Sleep Range",
            Self::HeartRate => "Resting Heart Rate",
            Self::Weight => "Weight",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Metric with sub-day detail, shown on the day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntraDayDataSource {
    StepCount,
    HeartRate,
    Sleep,
}

impl IntraDayDataSource {
    /// Daily source to fall back to when leaving the day view.
    #[must_use]
    pub const fn data_source(self) -> DataSource {
        match self {
            Self::StepCount => DataSource::StepCount,
            Self::HeartRate => DataSource::HeartRate,
            Self::Sleep => DataSource::SleepRange,
        }
    }
}

impl fmt::Display for IntraDayDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepCount => f.write_str("Step Count"),
            Self::HeartRate => f.write_str("Heart Rate"),
            Self::Sleep => f.write_str("Sleep"),
        }
    }
}

/// Repeating calendar period used for cyclic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclicTimeFrame {
    DayOfWeek,
    MonthOfYear,
    SeasonOfYear,
    WeekdayWeekend,
}

impl CyclicTimeFrame {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DayOfWeek => "Days of the Week",
            Self::MonthOfYear => "Months of the Year",
            Self::SeasonOfYear => "Seasons of the Year",
            Self::WeekdayWeekend => "Weekdays and Weekends",
        }
    }

    /// Dimensions of this frame, in calendar order.
    #[must_use]
    pub fn dimensions(self) -> Vec<CycleDimension> {
        CycleDimension::ALL
            .into_iter()
            .filter(|dimension| dimension.cycle_type() == self)
            .collect()
    }
}

impl fmt::Display for CyclicTimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which calendar unit a dimension's members are made of.
///
/// Day-level dimensions ("Mondays") list individual days; year-level
/// dimensions ("Marches") list one range per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarLevel {
    Day,
    Year,
}

/// One bucket of a [`CyclicTimeFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDimension {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    Spring,
    Summer,
    Fall,
    Winter,
    Weekdays,
    Weekends,
}

impl CycleDimension {
    pub const ALL: [Self; 25] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::Spring,
        Self::Summer,
        Self::Fall,
        Self::Winter,
        Self::Weekdays,
        Self::Weekends,
    ];

    #[must_use]
    pub const fn cycle_type(self) -> CyclicTimeFrame {
        match self {
            Self::Monday
            | Self::Tuesday
            | Self::Wednesday
            | Self::Thursday
            | Self::Friday
            | Self::Saturday
            | Self::Sunday => CyclicTimeFrame::DayOfWeek,
            Self::January
            | Self::February
            | Self::March
            | Self::April
            | Self::May
            | Self::June
            | Self::July
            | Self::August
            | Self::September
            | Self::October
            | Self::November
            | Self::December => CyclicTimeFrame::MonthOfYear,
            Self::Spring | Self::Summer | Self::Fall | Self::Winter => {
                CyclicTimeFrame::SeasonOfYear
            }
            Self::Weekdays | Self::Weekends => CyclicTimeFrame::WeekdayWeekend,
        }
    }

    #[must_use]
    pub const fn level(self) -> CalendarLevel {
        match self.cycle_type() {
            CyclicTimeFrame::DayOfWeek | CyclicTimeFrame::WeekdayWeekend => CalendarLevel::Day,
            CyclicTimeFrame::MonthOfYear | CyclicTimeFrame::SeasonOfYear => CalendarLevel::Year,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|dimension| format!("{dimension:?}").eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for CycleDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
