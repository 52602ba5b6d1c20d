//! End-to-end resolution scenarios

use pulse_engine::ResolutionResult;
use pulse_types::{
    Action, DataSource, Effect, Intent, InteractionContext, IntraDayDataSource, ParameterKey,
    TimeElement, VariableValue, classify,
};

use crate::common::{
    day, day_detail, overview, range, range_browse, resolve, state, told, two_ranges,
};

#[test]
fn period_on_overview_sets_range() {
    let current = state(overview(range(day(2021, 1, 1), day(2021, 1, 7))));
    let period = range(day(2021, 2, 1), day(2021, 2, 7));
    let input = told(Intent::AssignTrivial, vec![VariableValue::Period(period)]);

    let result = resolve(&input, &InteractionContext::Global, &current);

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::SetRange {
            range: period,
            key: None
        })
    );
    insta::assert_snapshot!(result.to_string(), @"Set range to 2021-02-01..2021-02-07");
}

#[test]
fn period_on_day_detail_browses_inferred_source() {
    let current = state(day_detail(IntraDayDataSource::Sleep, day(2021, 1, 5)));
    let period = range(day(2021, 1, 10), day(2021, 1, 17));
    let input = told(Intent::AssignTrivial, vec![VariableValue::Period(period)]);

    let result = resolve(&input, &InteractionContext::Global, &current);

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::GoToBrowseRange {
            data_source: Some(DataSource::SleepRange),
            range: Some(period),
            highlight_filter: None,
        })
    );
}

#[test]
fn source_on_touched_range_browses_it() {
    let march = range(day(2021, 3, 1), day(2021, 3, 31));
    let current = state(overview(range(day(2021, 3, 4), day(2021, 3, 10))));
    let context = InteractionContext::RangeElement {
        range: march,
        key: None,
        data_source: None,
    };
    let input = told(
        Intent::Browse,
        vec![VariableValue::DataSource(DataSource::StepCount)],
    );

    let result = resolve(&input, &context, &current);

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::GoToBrowseRange {
            data_source: Some(DataSource::StepCount),
            range: Some(march),
            highlight_filter: None,
        })
    );
    insta::assert_snapshot!(result.to_string(), @"Browse Step Count over 2021-03-01..2021-03-31");
}

#[test]
fn compare_with_two_ranges_on_screen_is_ambiguous() {
    let current = state(two_ranges(
        DataSource::StepCount,
        range(day(2021, 1, 1), day(2021, 1, 7)),
        range(day(2021, 1, 8), day(2021, 1, 14)),
    ));
    let input = told(
        Intent::Compare,
        vec![VariableValue::DataSource(DataSource::Weight)],
    );

    let result = resolve(&input, &InteractionContext::Global, &current);

    assert_eq!(
        result,
        ResolutionResult::Fail(Some("There are more than one range.".to_string()))
    );
}

#[test]
fn set_range_on_day_detail_is_unapplicable() {
    let current = state(day_detail(IntraDayDataSource::StepCount, day(2021, 1, 5)));
    let action = Action::SetRange {
        range: range(day(2021, 1, 1), day(2021, 1, 7)),
        key: None,
    };

    assert_eq!(classify(&current, &action), Effect::Unapplicable);
}

#[test]
fn mismatched_touched_range_prompts_for_global_reading() {
    let march = range(day(2021, 3, 1), day(2021, 3, 31));
    let april = range(day(2021, 4, 1), day(2021, 4, 30));
    let feb = range(day(2021, 2, 1), day(2021, 2, 28));
    let current = state(range_browse(DataSource::Weight, march));
    let context = InteractionContext::RangeElement {
        range: april,
        key: None,
        data_source: Some(DataSource::Weight),
    };
    let input = told(Intent::AssignTrivial, vec![VariableValue::Period(feb)]);

    let result = resolve(&input, &context, &current);

    let ResolutionResult::NeedPromptingToGlobalCommand { message, simulated } = result else {
        panic!("expected a prompt, got {result:?}");
    };
    assert_eq!(
        *simulated,
        ResolutionResult::Effective(Action::SetRange {
            range: feb,
            key: None
        })
    );
    insta::assert_snapshot!(
        message,
        @"The touched range expects a data source, a period, a cyclic grouping, or a condition."
    );
}

#[test]
fn rejected_context_without_global_reading_fails() {
    let current = state(two_ranges(
        DataSource::StepCount,
        range(day(2021, 1, 1), day(2021, 1, 7)),
        range(day(2021, 1, 8), day(2021, 1, 14)),
    ));
    let context = InteractionContext::Time {
        element: TimeElement::From,
        key: Some(ParameterKey::RangeA),
    };
    let input = told(
        Intent::Compare,
        vec![VariableValue::DataSource(DataSource::Weight)],
    );

    assert_eq!(
        resolve(&input, &context, &current),
        ResolutionResult::Fail(Some(
            "The touched time control expects a date or a period.".to_string()
        ))
    );
}
