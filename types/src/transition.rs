//! The transition function: the single place where navigation state changes.
//!
//! [`apply`] is pure and total. When an action means nothing for the current
//! screen it hands back the *same* `Arc` so callers can tell "not
//! applicable" apart from "applied, but equal" by pointer identity.

use std::sync::Arc;

use crate::action::Action;
use crate::calendar::DateRange;
use crate::navigation::{
    NavigationInfo, NavigationState, ParameterKey, ParameterKind, ParameterValue, ViewType,
};
use crate::source::{CycleDimension, DataSource, IntraDayDataSource};

/// Produce the state that results from `action`.
#[must_use]
pub fn apply(state: &Arc<NavigationState>, action: &Action) -> Arc<NavigationState> {
    match action {
        Action::SetRange { range, key } => {
            // Keys only distinguish the two ranges of a comparison.
            let key = match state.info.view() {
                ViewType::TwoRangeCompare => *key,
                _ => None,
            };
            set_parameter(state, ParameterValue::Range(*range), key)
        }
        Action::SetDate { date } => set_parameter(state, ParameterValue::Date(*date), None),
        Action::SetDataSource { data_source } => {
            set_parameter(state, ParameterValue::DataSource(*data_source), None)
        }
        Action::SetIntraDayDataSource { data_source } => {
            set_parameter(state, ParameterValue::IntraDayDataSource(*data_source), None)
        }
        Action::SetCycleType { cycle_type } => {
            set_parameter(state, ParameterValue::CycleType(*cycle_type), None)
        }
        Action::SetCycleDimension { dimension } => {
            set_parameter(state, ParameterValue::CycleDimension(*dimension), None)
        }
        Action::GoToBrowseOverview => go_to_overview(state),
        Action::GoToBrowseRange {
            data_source,
            range,
            highlight_filter,
        } => {
            let info = state.info();
            let Some(data_source) = data_source
                .or_else(|| info.data_source())
                .or_else(|| info.intra_day_data_source().map(IntraDayDataSource::data_source))
            else {
                return Arc::clone(state);
            };
            let Some(range) = range.or_else(|| info.range(None)) else {
                return Arc::clone(state);
            };
            let mut next = info.clone();
            next.reset_to(ViewType::RangeBrowse);
            next.set(ParameterValue::Range(range), None);
            next.set(ParameterValue::DataSource(data_source), None);
            if highlight_filter.is_some() {
                next.set_highlight_filter(*highlight_filter);
            }
            navigate(state, next)
        }
        Action::GoToBrowseDay { data_source, date } => {
            let info = state.info();
            let data_source = data_source
                .or_else(|| info.intra_day_data_source())
                .or_else(|| info.data_source().and_then(DataSource::intraday))
                .unwrap_or(IntraDayDataSource::StepCount);
            let Some(date) = date.or_else(|| info.date()) else {
                return Arc::clone(state);
            };
            let mut next = info.clone();
            next.reset_to(ViewType::DayDetail);
            next.set(ParameterValue::IntraDayDataSource(data_source), None);
            next.set(ParameterValue::Date(date), None);
            navigate(state, next)
        }
        Action::GoToComparisonCyclic {
            data_source,
            range,
            cycle_type,
        } => {
            let info = state.info();
            let (Some(data_source), Some(range), Some(cycle_type)) = (
                data_source.or_else(|| info.data_source()),
                range.or_else(|| info.range(None)),
                cycle_type.or_else(|| info.cycle_type()),
            ) else {
                return Arc::clone(state);
            };
            let mut next = info.clone();
            next.reset_to(ViewType::CyclicCompare);
            next.set(ParameterValue::DataSource(data_source), None);
            next.set(ParameterValue::Range(range), None);
            next.set(ParameterValue::CycleType(cycle_type), None);
            navigate(state, next)
        }
        Action::GoToComparisonTwoRanges {
            data_source,
            range_a,
            range_b,
        } => {
            let info = state.info();
            let (Some(data_source), Some(range_a), Some(range_b)) = (
                data_source.or_else(|| info.data_source()),
                range_a.or_else(|| info.range(Some(ParameterKey::RangeA))),
                range_b.or_else(|| info.range(Some(ParameterKey::RangeB))),
            ) else {
                return Arc::clone(state);
            };
            let mut next = info.clone();
            next.reset_to(ViewType::TwoRangeCompare);
            next.set(ParameterValue::DataSource(data_source), None);
            next.set(ParameterValue::Range(range_a), Some(ParameterKey::RangeA));
            next.set(ParameterValue::Range(range_b), Some(ParameterKey::RangeB));
            navigate(state, next)
        }
        Action::GoToCyclicDetailDaily {
            data_source,
            range,
            dimension,
        } => go_to_cyclic_detail(
            state,
            ViewType::CyclicDetailDaily,
            *data_source,
            *range,
            *dimension,
        ),
        Action::GoToCyclicDetailRange {
            data_source,
            range,
            dimension,
        } => go_to_cyclic_detail(
            state,
            ViewType::CyclicDetailRange,
            *data_source,
            *range,
            *dimension,
        ),
        Action::GoBack => {
            let Some((previous, rest)) = state.back_stack.split_last() else {
                return Arc::clone(state);
            };
            Arc::new(NavigationState {
                info: Arc::clone(previous),
                back_stack: rest.to_vec(),
                ui_status: Arc::clone(&state.ui_status),
            })
        }
        Action::SetHighlightFilter { filter } => {
            let mut next = state.info().clone();
            next.set_highlight_filter(*filter);
            replace_info(state, next)
        }
        Action::ShiftAllRanges { direction } => {
            if !state.info().has(ParameterKind::Range) {
                return Arc::clone(state);
            }
            let mut next = state.info().clone();
            next.map_ranges(|range| range.page(*direction));
            replace_info(state, next)
        }
        Action::Reset { range } => NavigationState::initial(*range),
        Action::MemoUiStatus { key, value } => {
            let mut ui_status = (*state.ui_status).clone();
            ui_status.insert(key.clone(), value.clone());
            Arc::new(NavigationState {
                info: Arc::clone(&state.info),
                back_stack: state.back_stack.clone(),
                ui_status: Arc::new(ui_status),
            })
        }
    }
}

fn set_parameter(
    state: &Arc<NavigationState>,
    value: ParameterValue,
    key: Option<ParameterKey>,
) -> Arc<NavigationState> {
    if !state.info().view().accepts(value.kind()) {
        return Arc::clone(state);
    }
    let mut next = state.info().clone();
    next.set(value, key);
    replace_info(state, next)
}

fn go_to_overview(state: &Arc<NavigationState>) -> Arc<NavigationState> {
    let info = state.info();
    if info.view() == ViewType::Overview {
        return Arc::clone(state);
    }
    let Some(range) = info
        .range(None)
        .or_else(|| info.date().map(DateRange::week_of))
    else {
        return Arc::clone(state);
    };
    let mut next = info.clone();
    next.reset_to(ViewType::Overview);
    next.set(ParameterValue::Range(range), None);
    navigate(state, next)
}

fn go_to_cyclic_detail(
    state: &Arc<NavigationState>,
    view: ViewType,
    data_source: Option<DataSource>,
    range: Option<DateRange>,
    dimension: Option<CycleDimension>,
) -> Arc<NavigationState> {
    let info = state.info();
    let (Some(data_source), Some(range), Some(dimension)) = (
        data_source.or_else(|| info.data_source()),
        range.or_else(|| info.range(None)),
        dimension.or_else(|| info.cycle_dimension()),
    ) else {
        return Arc::clone(state);
    };
    let mut next = info.clone();
    next.reset_to(view);
    next.set(ParameterValue::DataSource(data_source), None);
    next.set(ParameterValue::Range(range), None);
    next.set(ParameterValue::CycleDimension(dimension), None);
    navigate(state, next)
}

/// New screen in place; history untouched.
fn replace_info(state: &NavigationState, info: NavigationInfo) -> Arc<NavigationState> {
    Arc::new(NavigationState {
        info: Arc::new(info),
        back_stack: state.back_stack.clone(),
        ui_status: Arc::clone(&state.ui_status),
    })
}

/// New screen; the old one always goes on the back-stack.
fn navigate(state: &NavigationState, info: NavigationInfo) -> Arc<NavigationState> {
    let mut back_stack = state.back_stack.clone();
    back_stack.push(Arc::clone(&state.info));
    Arc::new(NavigationState {
        info: Arc::new(info),
        back_stack,
        ui_status: Arc::clone(&state.ui_status),
    })
}
