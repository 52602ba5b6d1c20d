//! Navigation state model: which screen is showing and with what parameters.
//!
//! [`NavigationInfo`] is the equality-relevant descriptor of a screen.
//! [`NavigationState`] wraps a shared info with the back-stack and the UI
//! memo map. States are never mutated in place; the transition function
//! builds new `Arc`s and reuses the old one when nothing applies.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::source::{CycleDimension, CyclicTimeFrame, DataSource, IntraDayDataSource};

// ============================================================================
// Views and parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Overview,
    RangeBrowse,
    DayDetail,
    CyclicCompare,
    CyclicDetailDaily,
    CyclicDetailRange,
    TwoRangeCompare,
}

/// Coarse grouping of views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Browse,
    Compare,
}

impl ViewType {
    /// Whether parameters of `kind` mean anything on this view.
    #[must_use]
    pub const fn accepts(self, kind: ParameterKind) -> bool {
        use ParameterKind as K;
        match self {
            Self::Overview => matches!(kind, K::Range),
            Self::RangeBrowse | Self::TwoRangeCompare => {
                matches!(kind, K::DataSource | K::Range)
            }
            Self::DayDetail => matches!(kind, K::IntraDayDataSource | K::Date),
            Self::CyclicCompare => matches!(kind, K::DataSource | K::Range | K::CycleType),
            Self::CyclicDetailDaily | Self::CyclicDetailRange => {
                matches!(kind, K::DataSource | K::Range | K::CycleDimension)
            }
        }
    }

    #[must_use]
    pub const fn mode(self) -> ViewMode {
        match self {
            Self::Overview | Self::RangeBrowse | Self::DayDetail => ViewMode::Browse,
            Self::CyclicCompare
            | Self::CyclicDetailDaily
            | Self::CyclicDetailRange
            | Self::TwoRangeCompare => ViewMode::Compare,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::RangeBrowse => "range browse",
            Self::DayDetail => "day detail",
            Self::CyclicCompare => "cyclic comparison",
            Self::CyclicDetailDaily => "cyclic detail (daily)",
            Self::CyclicDetailRange => "cyclic detail (ranges)",
            Self::TwoRangeCompare => "two-range comparison",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    DataSource,
    IntraDayDataSource,
    Date,
    Range,
    CycleType,
    CycleDimension,
}

/// Disambiguates several parameters of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKey {
    RangeA,
    RangeB,
    Pivot,
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RangeA => f.write_str("range A"),
            Self::RangeB => f.write_str("range B"),
            Self::Pivot => f.write_str("pivot"),
        }
    }
}

/// A typed parameter value. The kind is derived from the variant, so the two
/// can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParameterValue {
    DataSource(DataSource),
    IntraDayDataSource(IntraDayDataSource),
    Date(NaiveDate),
    Range(DateRange),
    CycleType(CyclicTimeFrame),
    CycleDimension(CycleDimension),
}

impl ParameterValue {
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        match self {
            Self::DataSource(_) => ParameterKind::DataSource,
            Self::IntraDayDataSource(_) => ParameterKind::IntraDayDataSource,
            Self::Date(_) => ParameterKind::Date,
            Self::Range(_) => ParameterKind::Range,
            Self::CycleType(_) => ParameterKind::CycleType,
            Self::CycleDimension(_) => ParameterKind::CycleDimension,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ParameterKey>,
    pub value: ParameterValue,
}

impl Parameter {
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.value.kind()
    }

    fn matches(&self, kind: ParameterKind, key: Option<ParameterKey>) -> bool {
        self.kind() == kind && (key.is_none() || self.key == key)
    }
}

// ============================================================================
// Highlight filter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    Min,
    Max,
    Less,
    More,
}

/// Sub-property of a source that a condition can target (sleep range only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKey {
    Bedtime,
    Waketime,
}

/// A standing numeric condition drawn over the browsed data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightFilter {
    pub data_source: DataSource,
    pub condition: ConditionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<f64>,
}

impl fmt::Display for HighlightFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match self.property {
            Some(PropertyKey::Bedtime) => "bedtime",
            Some(PropertyKey::Waketime) => "wake time",
            None => self.data_source.display_name(),
        };
        match (self.condition, self.reference) {
            (ConditionType::Max, _) => write!(f, "highest {subject}"),
            (ConditionType::Min, _) => write!(f, "lowest {subject}"),
            (ConditionType::More, Some(value)) => write!(f, "{subject} above {value}"),
            (ConditionType::Less, Some(value)) => write!(f, "{subject} below {value}"),
            (ConditionType::More, None) => write!(f, "{subject} above average"),
            (ConditionType::Less, None) => write!(f, "{subject} below average"),
        }
    }
}

// ============================================================================
// NavigationInfo
// ============================================================================

/// The equality-relevant descriptor of one screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationInfo {
    view: ViewType,
    #[serde(default)]
    params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    highlight_filter: Option<HighlightFilter>,
}

impl NavigationInfo {
    #[must_use]
    pub const fn new(view: ViewType) -> Self {
        Self {
            view,
            params: Vec::new(),
            highlight_filter: None,
        }
    }

    /// Overview of `range`, the startup screen.
    #[must_use]
    pub fn overview(range: DateRange) -> Self {
        let mut info = Self::new(ViewType::Overview);
        info.set(ParameterValue::Range(range), None);
        info
    }

    #[must_use]
    pub const fn view(&self) -> ViewType {
        self.view
    }

    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    #[must_use]
    pub const fn highlight_filter(&self) -> Option<&HighlightFilter> {
        self.highlight_filter.as_ref()
    }

    /// First parameter of `kind`, restricted to `key` when one is given.
    #[must_use]
    pub fn get(&self, kind: ParameterKind, key: Option<ParameterKey>) -> Option<&ParameterValue> {
        self.params
            .iter()
            .find(|param| param.matches(kind, key))
            .map(|param| &param.value)
    }

    #[must_use]
    pub fn has(&self, kind: ParameterKind) -> bool {
        self.params.iter().any(|param| param.kind() == kind)
    }

    /// Upsert: replaces the first slot matching (kind, key), else appends.
    pub fn set(&mut self, value: ParameterValue, key: Option<ParameterKey>) {
        let kind = value.kind();
        match self.params.iter_mut().find(|param| param.matches(kind, key)) {
            Some(slot) => slot.value = value,
            None => self.params.push(Parameter { key, value }),
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&Parameter) -> bool) {
        self.params.retain(keep);
    }

    /// Rewrite every range parameter in place, keeping keys and slot order.
    pub fn map_ranges(&mut self, mut f: impl FnMut(DateRange) -> DateRange) {
        for param in &mut self.params {
            if let ParameterValue::Range(range) = param.value {
                param.value = ParameterValue::Range(f(range));
            }
        }
    }

    /// Switch to `view` with no parameters; the highlight filter survives.
    pub fn reset_to(&mut self, view: ViewType) {
        self.view = view;
        self.params.clear();
    }

    pub fn set_view(&mut self, view: ViewType) {
        self.view = view;
    }

    pub fn set_highlight_filter(&mut self, filter: Option<HighlightFilter>) {
        self.highlight_filter = filter;
    }

    #[must_use]
    pub fn data_source(&self) -> Option<DataSource> {
        match self.get(ParameterKind::DataSource, None) {
            Some(ParameterValue::DataSource(source)) => Some(*source),
            _ => None,
        }
    }

    #[must_use]
    pub fn intra_day_data_source(&self) -> Option<IntraDayDataSource> {
        match self.get(ParameterKind::IntraDayDataSource, None) {
            Some(ParameterValue::IntraDayDataSource(source)) => Some(*source),
            _ => None,
        }
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self.get(ParameterKind::Date, None) {
            Some(ParameterValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    #[must_use]
    pub fn range(&self, key: Option<ParameterKey>) -> Option<DateRange> {
        match self.get(ParameterKind::Range, key) {
            Some(ParameterValue::Range(range)) => Some(*range),
            _ => None,
        }
    }

    #[must_use]
    pub fn cycle_type(&self) -> Option<CyclicTimeFrame> {
        match self.get(ParameterKind::CycleType, None) {
            Some(ParameterValue::CycleType(cycle)) => Some(*cycle),
            _ => None,
        }
    }

    #[must_use]
    pub fn cycle_dimension(&self) -> Option<CycleDimension> {
        match self.get(ParameterKind::CycleDimension, None) {
            Some(ParameterValue::CycleDimension(dimension)) => Some(*dimension),
            _ => None,
        }
    }

    /// Every range parameter with its key, in slot order.
    pub fn ranges(&self) -> impl Iterator<Item = (Option<ParameterKey>, DateRange)> + '_ {
        self.params.iter().filter_map(|param| match param.value {
            ParameterValue::Range(range) => Some((param.key, range)),
            _ => None,
        })
    }
}

/// Order-insensitive: every parameter needs a counterpart with the same
/// (kind, key) and an equal value. Highlight filters compare by value.
impl PartialEq for NavigationInfo {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
            && self.params.len() == other.params.len()
            && self.params.iter().all(|a| {
                other
                    .params
                    .iter()
                    .any(|b| a.key == b.key && a.value == b.value)
            })
            && self.highlight_filter == other.highlight_filter
    }
}

impl fmt::Display for NavigationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view)?;
        for param in &self.params {
            let value = match param.value {
                ParameterValue::DataSource(source) => source.to_string(),
                ParameterValue::IntraDayDataSource(source) => source.to_string(),
                ParameterValue::Date(date) => date.to_string(),
                ParameterValue::Range(range) => range.to_string(),
                ParameterValue::CycleType(cycle) => cycle.to_string(),
                ParameterValue::CycleDimension(dimension) => dimension.to_string(),
            };
            match param.key {
                Some(key) => write!(f, " | {key}: {value}")?,
                None => write!(f, " | {value}")?,
            }
        }
        if let Some(filter) = &self.highlight_filter {
            write!(f, " | highlight {filter}")?;
        }
        Ok(())
    }
}

// ============================================================================
// NavigationState
// ============================================================================

/// Transient UI values keyed by widget name; never part of equality.
pub type UiStatus = BTreeMap<String, serde_json::Value>;

/// The current screen plus back-navigation history.
///
/// Always handled as `Arc<NavigationState>`: pointer identity is how the
/// transition function reports that an action did not apply.
#[derive(Debug, Clone)]
pub struct NavigationState {
    pub(crate) info: Arc<NavigationInfo>,
    pub(crate) back_stack: Vec<Arc<NavigationInfo>>,
    pub(crate) ui_status: Arc<UiStatus>,
}

impl NavigationState {
    #[must_use]
    pub fn initial(range: DateRange) -> Arc<Self> {
        Arc::new(Self::from_info(NavigationInfo::overview(range)))
    }

    /// A state showing `info` with empty history.
    #[must_use]
    pub fn from_info(info: NavigationInfo) -> Self {
        Self {
            info: Arc::new(info),
            back_stack: Vec::new(),
            ui_status: Arc::new(UiStatus::new()),
        }
    }

    #[must_use]
    pub fn info(&self) -> &NavigationInfo {
        &self.info
    }

    #[must_use]
    pub fn shared_info(&self) -> &Arc<NavigationInfo> {
        &self.info
    }

    #[must_use]
    pub fn back_stack(&self) -> &[Arc<NavigationInfo>] {
        &self.back_stack
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    #[must_use]
    pub fn ui_status(&self) -> &UiStatus {
        &self.ui_status
    }
}

/// States compare by their info only.
impl PartialEq for NavigationState {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
    }
}
