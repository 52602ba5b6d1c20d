//! Utterances that only name a date or a period.

use chrono::NaiveDate;

use pulse_types::{Action, DateRange, IntraDayDataSource, ParameterKey, TimeEdge, ViewType};

use super::Request;

/// The action a bare date or period means on the current screen.
///
/// A period replaces the whole range. A date moves one edge: the edge named
/// by the touched control or the date's role tag, else the nearer one.
pub(crate) fn resolve(request: &Request<'_>) -> Option<Action> {
    let info = request.info();
    let period = request.input.periods().first().copied();
    let date = request.input.dates().first().copied();

    match info.view() {
        ViewType::DayDetail => {
            if let Some((date, _)) = date {
                return Some(Action::SetDate { date });
            }
            let data_source = info
                .intra_day_data_source()
                .map(IntraDayDataSource::data_source)
                .or_else(|| info.data_source());
            period.map(|range| Action::GoToBrowseRange {
                data_source,
                range: Some(range),
                highlight_filter: None,
            })
        }
        ViewType::TwoRangeCompare => {
            let key = request.context.parameter_key().unwrap_or(ParameterKey::RangeA);
            edit_range(request, info.range(Some(key)), period, date, Some(key))
        }
        ViewType::Overview
        | ViewType::RangeBrowse
        | ViewType::CyclicCompare
        | ViewType::CyclicDetailDaily
        | ViewType::CyclicDetailRange => edit_range(request, info.range(None), period, date, None),
    }
}

fn edit_range(
    request: &Request<'_>,
    current: Option<DateRange>,
    period: Option<DateRange>,
    date: Option<(NaiveDate, Option<TimeEdge>)>,
    key: Option<ParameterKey>,
) -> Option<Action> {
    if let Some(range) = period {
        return Some(Action::SetRange { range, key });
    }
    let (date, role) = date?;
    let range = match (current, request.context.edge().or(role)) {
        (None, _) => DateRange::single_day(date),
        (Some(current), Some(edge)) => current.with_edge(edge, date),
        (Some(current), None) => current.snap_edge_to(date),
    };
    tracing::debug!(%range, ?key, "edge edit");
    Some(Action::SetRange { range, key })
}
