use chrono::{Local, NaiveDate};

use pulse_config::{DEFAULT_DEGRADE_WINDOW_DAYS, DEFAULT_RANGE_DAYS, PulseConfig};
use pulse_types::{DataSource, DateRange, NluOptions};

/// Per-call settings for [`crate::CommandResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub today: NaiveDate,
    /// Sources the UI can show; the first is the last-resort browse source.
    pub viewable_sources: Vec<DataSource>,
    /// Half-width of the window browsed for a day of a source without
    /// intraday detail.
    pub degrade_window_days: u64,
    pub default_range_days: u64,
}

impl ResolveOptions {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            viewable_sources: DataSource::ALL.to_vec(),
            degrade_window_days: DEFAULT_DEGRADE_WINDOW_DAYS,
            default_range_days: DEFAULT_RANGE_DAYS,
        }
    }

    /// Options from config, reading the system clock unless `[app] today` pins it.
    #[must_use]
    pub fn from_config(config: &PulseConfig) -> Self {
        Self {
            today: config.today().unwrap_or_else(|| Local::now().date_naive()),
            viewable_sources: config.viewable_sources(),
            degrade_window_days: config.degrade_window_days(),
            default_range_days: config.default_range_days(),
        }
    }

    /// The range shown at startup and after a reset.
    #[must_use]
    pub fn default_range(&self) -> DateRange {
        DateRange::last_days(self.today, self.default_range_days)
    }

    #[must_use]
    pub fn first_viewable(&self) -> Option<DataSource> {
        self.viewable_sources.first().copied()
    }

    /// Settings passed down to the [`pulse_nlu::Preprocessor`].
    #[must_use]
    pub const fn nlu(&self) -> NluOptions {
        NluOptions { today: self.today }
    }
}
