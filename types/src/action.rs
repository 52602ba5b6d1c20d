//! State-changing commands consumed by [`crate::transition::apply`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{DateRange, ShiftDirection};
use crate::navigation::{HighlightFilter, ParameterKey};
use crate::source::{CycleDimension, CyclicTimeFrame, DataSource, IntraDayDataSource};

/// Every way the navigation state can change.
///
/// `GoTo*` payload fields are optional; the transition falls back to values
/// already present in the current screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetRange {
        range: DateRange,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<ParameterKey>,
    },
    SetDate {
        date: NaiveDate,
    },
    SetDataSource {
        data_source: DataSource,
    },
    SetIntraDayDataSource {
        data_source: IntraDayDataSource,
    },
    SetCycleType {
        cycle_type: CyclicTimeFrame,
    },
    SetCycleDimension {
        dimension: CycleDimension,
    },
    GoToBrowseOverview,
    GoToBrowseRange {
        #[serde(default)]
        data_source: Option<DataSource>,
        #[serde(default)]
        range: Option<DateRange>,
        /// Installed on the new screen; `None` keeps the current filter.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        highlight_filter: Option<HighlightFilter>,
    },
    GoToBrowseDay {
        #[serde(default)]
        data_source: Option<IntraDayDataSource>,
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    GoToComparisonCyclic {
        #[serde(default)]
        data_source: Option<DataSource>,
        #[serde(default)]
        range: Option<DateRange>,
        #[serde(default)]
        cycle_type: Option<CyclicTimeFrame>,
    },
    GoToComparisonTwoRanges {
        #[serde(default)]
        data_source: Option<DataSource>,
        #[serde(default)]
        range_a: Option<DateRange>,
        #[serde(default)]
        range_b: Option<DateRange>,
    },
    GoToCyclicDetailDaily {
        #[serde(default)]
        data_source: Option<DataSource>,
        #[serde(default)]
        range: Option<DateRange>,
        #[serde(default)]
        dimension: Option<CycleDimension>,
    },
    GoToCyclicDetailRange {
        #[serde(default)]
        data_source: Option<DataSource>,
        #[serde(default)]
        range: Option<DateRange>,
        #[serde(default)]
        dimension: Option<CycleDimension>,
    },
    GoBack,
    SetHighlightFilter {
        #[serde(default)]
        filter: Option<HighlightFilter>,
    },
    ShiftAllRanges {
        direction: ShiftDirection,
    },
    Reset {
        range: DateRange,
    },
    MemoUiStatus {
        key: String,
        value: serde_json::Value,
    },
}

impl Action {
    /// Short stable name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetRange { .. } => "set_range",
            Self::SetDate { .. } => "set_date",
            Self::SetDataSource { .. } => "set_data_source",
            Self::SetIntraDayDataSource { .. } => "set_intra_day_data_source",
            Self::SetCycleType { .. } => "set_cycle_type",
            Self::SetCycleDimension { .. } => "set_cycle_dimension",
            Self::GoToBrowseOverview => "go_to_browse_overview",
            Self::GoToBrowseRange { .. } => "go_to_browse_range",
            Self::GoToBrowseDay { .. } => "go_to_browse_day",
            Self::GoToComparisonCyclic { .. } => "go_to_comparison_cyclic",
            Self::GoToComparisonTwoRanges { .. } => "go_to_comparison_two_ranges",
            Self::GoToCyclicDetailDaily { .. } => "go_to_cyclic_detail_daily",
            Self::GoToCyclicDetailRange { .. } => "go_to_cyclic_detail_range",
            Self::GoBack => "go_back",
            Self::SetHighlightFilter { .. } => "set_highlight_filter",
            Self::ShiftAllRanges { .. } => "shift_all_ranges",
            Self::Reset { .. } => "reset",
            Self::MemoUiStatus { .. } => "memo_ui_status",
        }
    }

    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::GoToBrowseOverview
                | Self::GoToBrowseRange { .. }
                | Self::GoToBrowseDay { .. }
                | Self::GoToComparisonCyclic { .. }
                | Self::GoToComparisonTwoRanges { .. }
                | Self::GoToCyclicDetailDaily { .. }
                | Self::GoToCyclicDetailRange { .. }
        )
    }
}

fn or_current<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "current".to_owned(), ToString::to_string)
}

/// Human-readable description, shown when prompting for confirmation.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetRange { range, key: None } => write!(f, "Set range to {range}"),
            Self::SetRange {
                range,
                key: Some(key),
            } => write!(f, "Set {key} to {range}"),
            Self::SetDate { date } => write!(f, "Set date to {date}"),
            Self::SetDataSource { data_source } => write!(f, "Show {data_source}"),
            Self::SetIntraDayDataSource { data_source } => {
                write!(f, "Show {data_source} of the day")
            }
            Self::SetCycleType { cycle_type } => write!(f, "Group by {cycle_type}"),
            Self::SetCycleDimension { dimension } => write!(f, "Show {dimension}"),
            Self::GoToBrowseOverview => f.write_str("Go to overview"),
            Self::GoToBrowseRange {
                data_source,
                range,
                highlight_filter,
            } => {
                write!(
                    f,
                    "Browse {} over {}",
                    or_current(data_source.as_ref()),
                    or_current(range.as_ref())
                )?;
                if let Some(filter) = highlight_filter {
                    write!(f, ", highlighting {filter}")?;
                }
                Ok(())
            }
            Self::GoToBrowseDay { data_source, date } => write!(
                f,
                "Browse {} on {}",
                or_current(data_source.as_ref()),
                or_current(date.as_ref())
            ),
            Self::GoToComparisonCyclic {
                data_source,
                range,
                cycle_type,
            } => write!(
                f,
                "Compare {} by {} over {}",
                or_current(data_source.as_ref()),
                or_current(cycle_type.as_ref()),
                or_current(range.as_ref())
            ),
            Self::GoToComparisonTwoRanges {
                data_source,
                range_a,
                range_b,
            } => write!(
                f,
                "Compare {} between {} and {}",
                or_current(data_source.as_ref()),
                or_current(range_a.as_ref()),
                or_current(range_b.as_ref())
            ),
            Self::GoToCyclicDetailDaily {
                data_source,
                range,
                dimension,
            }
            | Self::GoToCyclicDetailRange {
                data_source,
                range,
                dimension,
            } => write!(
                f,
                "Show {} on {} over {}",
                or_current(data_source.as_ref()),
                or_current(dimension.as_ref()),
                or_current(range.as_ref())
            ),
            Self::GoBack => f.write_str("Go back"),
            Self::SetHighlightFilter { filter: Some(filter) } => {
                write!(f, "Highlight {filter}")
            }
            Self::SetHighlightFilter { filter: None } => f.write_str("Clear highlight"),
            Self::ShiftAllRanges {
                direction: ShiftDirection::Past,
            } => f.write_str("Show previous period"),
            Self::ShiftAllRanges {
                direction: ShiftDirection::Future,
            } => f.write_str("Show next period"),
            Self::Reset { range } => write!(f, "Reset to overview of {range}"),
            Self::MemoUiStatus { key, .. } => write!(f, "Remember {key}"),
        }
    }
}
