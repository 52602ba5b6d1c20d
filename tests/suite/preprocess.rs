//! Real utterances through the rule-based extractor and the resolver.

use pulse_engine::{CommandResolver, PreprocessError, ResolutionResult, RulePreprocessor};
use pulse_types::{
    Action, ConditionType, CyclicTimeFrame, DataSource, DateRange, HighlightFilter,
    InteractionContext,
};

use crate::common::{day, options, overview, range, range_browse, say, state};

fn this_week() -> DateRange {
    range(day(2021, 3, 4), day(2021, 3, 10))
}

#[test]
fn compare_last_week_with_this_week() {
    let result = say(
        "Compare steps of last week and this week",
        &InteractionContext::Global,
        &state(overview(this_week())),
    );

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::GoToComparisonTwoRanges {
            data_source: Some(DataSource::StepCount),
            range_a: Some(range(day(2021, 3, 1), day(2021, 3, 7))),
            range_b: Some(range(day(2021, 3, 8), day(2021, 3, 14))),
        })
    );
    insta::assert_snapshot!(
        result.to_string(),
        @"Compare Step Count between 2021-03-01..2021-03-07 and 2021-03-08..2021-03-14"
    );
}

#[test]
fn show_source_over_explicit_span() {
    let result = say(
        "show heart rate from 2021-02-01 to 2021-02-14",
        &InteractionContext::Global,
        &state(overview(this_week())),
    );

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::GoToBrowseRange {
            data_source: Some(DataSource::HeartRate),
            range: Some(range(day(2021, 2, 1), day(2021, 2, 14))),
            highlight_filter: None,
        })
    );
}

#[test]
fn highlight_step_threshold() {
    let result = say(
        "highlight days with more than 10,000 steps",
        &InteractionContext::Global,
        &state(range_browse(DataSource::StepCount, this_week())),
    );

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::SetHighlightFilter {
            filter: Some(HighlightFilter {
                data_source: DataSource::StepCount,
                condition: ConditionType::More,
                property: None,
                reference: Some(10_000.0),
            }),
        })
    );
}

#[test]
fn cyclic_frame_opens_cyclic_comparison() {
    let result = say(
        "show steps by days of the week",
        &InteractionContext::Global,
        &state(overview(this_week())),
    );

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::GoToComparisonCyclic {
            data_source: Some(DataSource::StepCount),
            range: Some(this_week()),
            cycle_type: Some(CyclicTimeFrame::DayOfWeek),
        })
    );
}

#[test]
fn bare_period_on_overview_sets_range() {
    let result = say(
        "last month",
        &InteractionContext::Global,
        &state(overview(this_week())),
    );

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::SetRange {
            range: range(day(2021, 2, 1), day(2021, 2, 28)),
            key: None,
        })
    );
}

#[test]
fn nothing_actionable_fails_without_message() {
    let result = say(
        "hello there",
        &InteractionContext::Global,
        &state(overview(this_week())),
    );
    assert_eq!(result, ResolutionResult::Fail(None));
}

#[test]
fn extractor_errors_propagate() {
    let resolver = CommandResolver::new(RulePreprocessor::new());
    let result = resolver.resolve(
        "  ",
        &InteractionContext::Global,
        &state(overview(this_week())),
        &options(),
    );
    assert_eq!(result, Err(PreprocessError::EmptyInput));
}
