//! What the user was touching when the utterance began.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{DateRange, TimeEdge};
use crate::navigation::ParameterKey;
use crate::source::{CycleDimension, DataSource};

/// The part of a time control that was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeElement {
    From,
    To,
    Date,
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionContext {
    /// Nothing touched.
    #[default]
    Global,
    /// A date or range picker.
    Time {
        element: TimeElement,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<ParameterKey>,
    },
    /// A chart or row showing one range of one source.
    RangeElement {
        range: DateRange,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<ParameterKey>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source: Option<DataSource>,
    },
    /// One day's bar or point.
    DateElement {
        date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source: Option<DataSource>,
    },
    /// One bucket of a cyclic comparison ("Mondays").
    CycleDimensionElement {
        dimension: CycleDimension,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source: Option<DataSource>,
    },
    /// A source row on the overview.
    CategoricalElement {
        data_source: DataSource,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<DateRange>,
    },
}

impl InteractionContext {
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// Source implied by the touched element.
    #[must_use]
    pub const fn data_source(&self) -> Option<DataSource> {
        match self {
            Self::RangeElement { data_source, .. }
            | Self::DateElement { data_source, .. }
            | Self::CycleDimensionElement { data_source, .. } => *data_source,
            Self::CategoricalElement { data_source, .. } => Some(*data_source),
            Self::Global | Self::Time { .. } => None,
        }
    }

    #[must_use]
    pub const fn touched_range(&self) -> Option<DateRange> {
        match self {
            Self::RangeElement { range, .. } => Some(*range),
            Self::CategoricalElement { range, .. } => *range,
            _ => None,
        }
    }

    #[must_use]
    pub const fn touched_date(&self) -> Option<NaiveDate> {
        match self {
            Self::DateElement { date, .. } => Some(*date),
            _ => None,
        }
    }

    #[must_use]
    pub const fn parameter_key(&self) -> Option<ParameterKey> {
        match self {
            Self::Time { key, .. } | Self::RangeElement { key, .. } => *key,
            _ => None,
        }
    }

    /// Range edge named by a touched "from"/"to" control.
    #[must_use]
    pub const fn edge(&self) -> Option<TimeEdge> {
        match self {
            Self::Time {
                element: TimeElement::From,
                ..
            } => Some(TimeEdge::From),
            Self::Time {
                element: TimeElement::To,
                ..
            } => Some(TimeEdge::To),
            _ => None,
        }
    }

    /// What the element accepts, for "did you mean" prompts.
    #[must_use]
    pub const fn expectation(&self) -> &'static str {
        match self {
            Self::Global => "any command",
            Self::Time { .. } => "a date or a period",
            Self::RangeElement { .. } => {
                "a data source, a period, a cyclic grouping, or a condition"
            }
            Self::DateElement { .. } | Self::CycleDimensionElement { .. } => "a data source",
            Self::CategoricalElement { .. } => "a data source or a period",
        }
    }

    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::Global => "screen",
            Self::Time { .. } => "time control",
            Self::RangeElement { .. } => "range",
            Self::DateElement { .. } => "date",
            Self::CycleDimensionElement { .. } => "cycle item",
            Self::CategoricalElement { .. } => "data source item",
        }
    }
}
