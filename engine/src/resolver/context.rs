//! Slot patterns accepted by each kind of touched element.

use chrono::NaiveDate;

use pulse_types::{
    Action, CalendarLevel, CycleDimension, DataSource, DateRange, HighlightFilter, Intent,
    InteractionContext, ParameterKey, VariableType,
};

use super::{Request, time};

/// The action the touched element makes of the utterance, if it accepts it.
pub(crate) fn resolve(request: &Request<'_>) -> Option<Action> {
    match *request.context {
        InteractionContext::Global => None,
        InteractionContext::Time { .. } => time_element(request),
        InteractionContext::RangeElement { range, key, .. } => range_element(request, range, key),
        InteractionContext::DateElement { date, .. } => date_element(request, date),
        InteractionContext::CycleDimensionElement { dimension, .. } => {
            cycle_dimension_element(request, dimension)
        }
        InteractionContext::CategoricalElement { data_source, range } => {
            categorical_element(request, data_source, range)
        }
    }
}

fn time_element(request: &Request<'_>) -> Option<Action> {
    if request.input.intent == Intent::AssignTrivial && request.time_only() {
        time::resolve(request)
    } else {
        None
    }
}

fn range_element(
    request: &Request<'_>,
    touched: DateRange,
    key: Option<ParameterKey>,
) -> Option<Action> {
    let input = request.input;

    if let Some(source) = request.bare_data_source() {
        tracing::debug!("range element: browse source");
        return Some(Action::GoToBrowseRange {
            data_source: Some(source),
            range: Some(touched),
            highlight_filter: None,
        });
    }

    let no_date_or_cycle =
        !input.is_told(VariableType::Date) && !input.is_told(VariableType::TimeCycle);
    if input.count_of(VariableType::Period) == 1 && no_date_or_cycle {
        let period = input.periods().first().copied()?;
        match input.intent {
            Intent::AssignTrivial if input.only_told(&[VariableType::Period]) => {
                if request.info().range(key) == Some(touched) {
                    tracing::debug!("range element: replace touched range");
                    return Some(Action::SetRange { range: period, key });
                }
            }
            Intent::Compare => {
                tracing::debug!("range element: compare with touched range");
                return Some(Action::GoToComparisonTwoRanges {
                    data_source: request.data_source(),
                    range_a: Some(touched),
                    range_b: Some(period),
                });
            }
            _ => {}
        }
    }

    let no_time = !input.is_told(VariableType::Period) && !input.is_told(VariableType::Date);
    if let Some(cycle) = input.time_cycles().first().copied()
        && no_time
    {
        tracing::debug!("range element: cyclic comparison");
        return Some(Action::GoToComparisonCyclic {
            data_source: request.data_source(),
            range: Some(touched),
            cycle_type: Some(cycle),
        });
    }

    if let Some(condition) = input.conditions().first().copied()
        && no_time
        && !input.is_told(VariableType::TimeCycle)
    {
        let source = condition.implied_source.or_else(|| request.data_source())?;
        tracing::debug!("range element: highlighted browse");
        return Some(Action::GoToBrowseRange {
            data_source: Some(source),
            range: Some(touched),
            highlight_filter: Some(HighlightFilter {
                data_source: source,
                condition: condition.condition,
                property: condition.property,
                reference: condition.reference,
            }),
        });
    }

    None
}

fn date_element(request: &Request<'_>, date: NaiveDate) -> Option<Action> {
    let source = request.bare_data_source()?;
    Some(match source.intraday() {
        Some(intraday) => Action::GoToBrowseDay {
            data_source: Some(intraday),
            date: Some(date),
        },
        None => Action::GoToBrowseRange {
            data_source: Some(source),
            range: Some(DateRange::around(
                date,
                request.options.degrade_window_days,
            )),
            highlight_filter: None,
        },
    })
}

fn cycle_dimension_element(request: &Request<'_>, dimension: CycleDimension) -> Option<Action> {
    let source = request.bare_data_source()?;
    let range = request.info().range(None);
    Some(match dimension.level() {
        CalendarLevel::Day => Action::GoToCyclicDetailDaily {
            data_source: Some(source),
            range,
            dimension: Some(dimension),
        },
        CalendarLevel::Year => Action::GoToCyclicDetailRange {
            data_source: Some(source),
            range,
            dimension: Some(dimension),
        },
    })
}

fn categorical_element(
    request: &Request<'_>,
    touched: DataSource,
    range: Option<DateRange>,
) -> Option<Action> {
    if let Some(source) = request.bare_data_source() {
        return Some(Action::GoToBrowseRange {
            data_source: Some(source),
            range: range.or_else(|| request.info().range(None)),
            highlight_filter: None,
        });
    }
    let input = request.input;
    if input.only_told(&[VariableType::Period]) && input.count_of(VariableType::Period) == 1 {
        return Some(Action::GoToBrowseRange {
            data_source: Some(touched),
            range: input.periods().first().copied(),
            highlight_filter: None,
        });
    }
    None
}
