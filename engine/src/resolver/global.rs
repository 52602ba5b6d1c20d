//! Reading an utterance without regard to what is touched.

use pulse_types::{
    Action, DateRange, HighlightFilter, Intent, InteractionContext, VariableType, ViewType,
};

use super::{Request, time};
use crate::priority::{Prioritized, Priority, resolve_with_priority};
use crate::result::ResolutionResult;

pub(crate) const AMBIGUOUS_RANGES: &str = "There are more than one range.";

pub(crate) fn resolve(request: &Request<'_>) -> ResolutionResult {
    if let Some(result) = resolve_cyclic(request) {
        return result;
    }

    let resolved = match request.input.intent {
        Intent::Compare => resolve_compare(request),
        Intent::AssignTrivial => try_assign(request).or_else(|| resolve_browse(request)),
        Intent::Browse => resolve_browse(request),
        Intent::Highlight => resolve_highlight(request),
    };
    resolved.unwrap_or_else(|| {
        tracing::debug!(intent = ?request.input.intent, "no global reading");
        ResolutionResult::Fail(None)
    })
}

/// A told cyclic frame opens a cyclic comparison before anything else.
fn resolve_cyclic(request: &Request<'_>) -> Option<ResolutionResult> {
    let cycle = request.input.time_cycles().first().copied()?;
    let data_source = request.data_source()?;
    let range = spoken_range(request).map(|range| range.value);
    tracing::debug!(%cycle, %data_source, "cyclic comparison");
    Some(request.classify(Action::GoToComparisonCyclic {
        data_source: Some(data_source),
        range,
        cycle_type: Some(cycle),
    }))
}

fn resolve_compare(request: &Request<'_>) -> Option<ResolutionResult> {
    let mut candidates: Vec<DateRange> = request.input.periods();
    candidates.extend(
        request
            .input
            .dates()
            .into_iter()
            .map(|(date, _)| DateRange::single_day(date)),
    );

    if candidates.len() < 2 {
        let existing: Vec<DateRange> = request.info().ranges().map(|(_, range)| range).collect();
        match existing.as_slice() {
            [] => {}
            [single] => candidates.insert(0, *single),
            _ => {
                tracing::debug!(count = existing.len(), "compare: ambiguous state ranges");
                return Some(ResolutionResult::fail(AMBIGUOUS_RANGES));
            }
        }
    }

    let data_source = request.data_source()?;
    let [range_a, range_b, ..] = candidates.as_slice() else {
        return None;
    };
    Some(request.classify(Action::GoToComparisonTwoRanges {
        data_source: Some(data_source),
        range_a: Some(*range_a),
        range_b: Some(*range_b),
    }))
}

/// Assignments that keep the current screen. `None` hands over to browse.
fn try_assign(request: &Request<'_>) -> Option<ResolutionResult> {
    let input = request.input;
    let info = request.info();

    if request.time_only() {
        return time::resolve(request).map(|action| request.classify(action));
    }

    if input.only_told(&[VariableType::DataSource])
        && info.data_source().is_some()
        && let Some(data_source) = request.told_data_source()
    {
        return Some(request.classify(Action::SetDataSource { data_source }));
    }

    if input.only_told(&[VariableType::TimeCycle])
        && let Some(cycle_type) = input.time_cycles().first().copied()
        && info.cycle_type() == Some(cycle_type)
    {
        return Some(request.classify(Action::SetCycleType { cycle_type }));
    }

    None
}

fn spoken_range(request: &Request<'_>) -> Option<Prioritized<DateRange>> {
    let key = request.context.parameter_key();
    resolve_with_priority([
        (request.input.periods().first().copied(), Priority::Spoken),
        (request.context.touched_range(), Priority::Touched),
        (request.info().range(key), Priority::Implied),
    ])
}

fn resolve_browse(request: &Request<'_>) -> Option<ResolutionResult> {
    let info = request.info();
    let data_source = request
        .data_source()
        .or_else(|| request.options.first_viewable());

    let range = spoken_range(request);
    let date = resolve_with_priority([
        (
            request.input.dates().first().map(|(date, _)| *date),
            Priority::Spoken,
        ),
        (request.context.touched_date(), Priority::Touched),
        (info.date(), Priority::Implied),
    ]);

    let range_wins = match (&range, &date) {
        (None, None) => return None,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (Some(range), Some(date)) => range.priority >= date.priority,
    };

    let action = if range_wins {
        let range = range?.value;
        let stays_on_overview = info.view() == ViewType::Overview
            && request.told_data_source().is_none()
            && matches!(
                request.context,
                InteractionContext::Global | InteractionContext::Time { .. }
            );
        if stays_on_overview {
            Action::SetRange { range, key: None }
        } else if let Some(data_source) = data_source {
            Action::GoToBrowseRange {
                data_source: Some(data_source),
                range: Some(range),
                highlight_filter: None,
            }
        } else {
            Action::SetRange { range, key: None }
        }
    } else {
        let date = date?.value;
        match data_source {
            Some(source) => match source.intraday() {
                Some(intraday) => Action::GoToBrowseDay {
                    data_source: Some(intraday),
                    date: Some(date),
                },
                None => Action::GoToBrowseRange {
                    data_source: Some(source),
                    range: Some(DateRange::around(date, request.options.degrade_window_days)),
                    highlight_filter: None,
                },
            },
            None => Action::GoToBrowseDay {
                data_source: None,
                date: Some(date),
            },
        }
    };
    tracing::debug!(%action, range_wins, "browse");
    Some(request.classify(action))
}

fn resolve_highlight(request: &Request<'_>) -> Option<ResolutionResult> {
    let condition = request.input.conditions().first().copied()?;
    let Some(data_source) = condition.implied_source.or_else(|| request.data_source()) else {
        return Some(ResolutionResult::fail("Which data should be highlighted?"));
    };
    let filter = HighlightFilter {
        data_source,
        condition: condition.condition,
        property: condition.property,
        reference: condition.reference,
    };
    tracing::debug!(%filter, "highlight");
    Some(request.classify(Action::SetHighlightFilter {
        filter: Some(filter),
    }))
}
