//! Laws of the transition function and the resolver, checked over small grids.

use std::sync::Arc;

use serde_json::json;

use pulse_engine::ResolutionResult;
use pulse_types::{
    Action, ConditionType, CycleDimension, CyclicTimeFrame, DataSource, Effect, HighlightFilter,
    Intent, InteractionContext, IntraDayDataSource, NavigationState, ParameterKey, ShiftDirection,
    VariableValue, ViewType, apply, classify,
};

use crate::common::{
    day, day_detail, overview, range, range_browse, resolve, state, told, two_ranges,
};

fn screens() -> Vec<Arc<NavigationState>> {
    let week = range(day(2021, 3, 1), day(2021, 3, 7));
    let next_week = range(day(2021, 3, 8), day(2021, 3, 14));
    let browsing = state(range_browse(DataSource::StepCount, week));
    vec![
        state(overview(week)),
        Arc::clone(&browsing),
        state(day_detail(IntraDayDataSource::HeartRate, day(2021, 3, 3))),
        state(two_ranges(DataSource::Weight, week, next_week)),
        apply(
            &browsing,
            &Action::GoToComparisonCyclic {
                data_source: None,
                range: None,
                cycle_type: Some(CyclicTimeFrame::DayOfWeek),
            },
        ),
        apply(
            &browsing,
            &Action::GoToCyclicDetailRange {
                data_source: None,
                range: None,
                dimension: Some(CycleDimension::March),
            },
        ),
    ]
}

fn steps_filter() -> HighlightFilter {
    HighlightFilter {
        data_source: DataSource::StepCount,
        condition: ConditionType::More,
        property: None,
        reference: Some(10_000.0),
    }
}

fn actions() -> Vec<Action> {
    let feb = range(day(2021, 2, 1), day(2021, 2, 28));
    vec![
        Action::SetRange {
            range: feb,
            key: None,
        },
        Action::SetRange {
            range: feb,
            key: Some(ParameterKey::RangeB),
        },
        Action::SetDate {
            date: day(2021, 3, 9),
        },
        Action::SetDataSource {
            data_source: DataSource::HoursSlept,
        },
        Action::SetIntraDayDataSource {
            data_source: IntraDayDataSource::Sleep,
        },
        Action::SetCycleType {
            cycle_type: CyclicTimeFrame::SeasonOfYear,
        },
        Action::SetCycleDimension {
            dimension: CycleDimension::April,
        },
        Action::GoToBrowseOverview,
        Action::GoToBrowseRange {
            data_source: None,
            range: Some(feb),
            highlight_filter: None,
        },
        Action::GoToBrowseDay {
            data_source: None,
            date: Some(day(2021, 3, 2)),
        },
        Action::GoToComparisonCyclic {
            data_source: Some(DataSource::HeartRate),
            range: None,
            cycle_type: Some(CyclicTimeFrame::MonthOfYear),
        },
        Action::GoToComparisonTwoRanges {
            data_source: None,
            range_a: Some(feb),
            range_b: None,
        },
        Action::GoToCyclicDetailDaily {
            data_source: None,
            range: None,
            dimension: Some(CycleDimension::Monday),
        },
        Action::GoBack,
        Action::SetHighlightFilter {
            filter: Some(steps_filter()),
        },
        Action::SetHighlightFilter { filter: None },
        Action::ShiftAllRanges {
            direction: ShiftDirection::Past,
        },
        Action::Reset { range: feb },
        Action::MemoUiStatus {
            key: "zoom".to_string(),
            value: json!(2),
        },
    ]
}

#[test]
fn classify_agrees_with_identity_and_equality() {
    for screen in screens() {
        for action in actions() {
            let next = apply(&screen, &action);
            let expected = if Arc::ptr_eq(&screen, &next) {
                Effect::Unapplicable
            } else if next.info() == screen.info() {
                Effect::Void
            } else {
                Effect::Effective
            };
            assert_eq!(
                classify(&screen, &action),
                expected,
                "{action} on {}",
                screen.info()
            );
        }
    }
}

#[test]
fn classify_never_mutates() {
    for screen in screens() {
        let before = screen.info().clone();
        for action in actions() {
            let _ = classify(&screen, &action);
        }
        assert_eq!(screen.info(), &before);
    }
}

#[test]
fn set_actions_are_idempotent() {
    for screen in screens() {
        for action in actions().into_iter().filter(|action| {
            matches!(
                action,
                Action::SetRange { .. }
                    | Action::SetDate { .. }
                    | Action::SetDataSource { .. }
                    | Action::SetIntraDayDataSource { .. }
                    | Action::SetCycleType { .. }
                    | Action::SetCycleDimension { .. }
                    | Action::SetHighlightFilter { .. }
            )
        }) {
            let once = apply(&screen, &action);
            if Arc::ptr_eq(&screen, &once) {
                continue;
            }
            assert_eq!(
                classify(&once, &action),
                Effect::Void,
                "{action} on {}",
                screen.info()
            );
        }
    }
}

#[test]
fn unapplicable_preserves_identity() {
    for screen in screens() {
        for action in actions() {
            if classify(&screen, &action) == Effect::Unapplicable {
                assert!(Arc::ptr_eq(&screen, &apply(&screen, &action)), "{action}");
            }
        }
    }
}

#[test]
fn go_back_undoes_any_applied_navigation() {
    let with_history: Vec<_> = screens()
        .into_iter()
        .map(|screen| {
            apply(
                &screen,
                &Action::GoToBrowseRange {
                    data_source: Some(DataSource::HeartRate),
                    range: None,
                    highlight_filter: None,
                },
            )
        })
        .collect();
    for screen in screens().into_iter().chain(with_history) {
        for action in actions().into_iter().filter(Action::is_navigation) {
            let next = apply(&screen, &action);
            if Arc::ptr_eq(&screen, &next) {
                continue;
            }
            assert_eq!(next.back_stack().len(), screen.back_stack().len() + 1);
            let back = apply(&next, &Action::GoBack);
            assert_eq!(back.info(), screen.info(), "{action} on {}", screen.info());
            assert_eq!(back.back_stack().len(), screen.back_stack().len());
        }
    }
}

#[test]
fn go_back_after_void_navigation_returns_to_previous_screen() {
    let week = range(day(2021, 3, 1), day(2021, 3, 7));
    let steps = Action::GoToBrowseRange {
        data_source: Some(DataSource::StepCount),
        range: Some(week),
        highlight_filter: None,
    };
    let first = apply(&state(overview(week)), &steps);
    assert_eq!(classify(&first, &steps), Effect::Void);

    let second = apply(&first, &steps);
    let back = apply(&second, &Action::GoBack);
    assert_eq!(back.info(), first.info());
    insta::assert_snapshot!(back.info().to_string(), @"range browse | 2021-03-01..2021-03-07 | Step Count");
}

#[test]
fn go_back_from_day_detail_returns_to_range_browse() {
    let week = range(day(2021, 3, 1), day(2021, 3, 7));
    let browsing = state(range_browse(DataSource::StepCount, week));
    let detail = apply(
        &browsing,
        &Action::GoToBrowseDay {
            data_source: None,
            date: Some(day(2021, 3, 3)),
        },
    );
    assert_eq!(detail.info().view(), ViewType::DayDetail);
    assert_eq!(
        detail.info().intra_day_data_source(),
        Some(IntraDayDataSource::StepCount)
    );

    let back = apply(&detail, &Action::GoBack);
    assert_eq!(back.info().view(), ViewType::RangeBrowse);
    assert_eq!(back.info().range(None), Some(week));
    assert!(!back.can_go_back());
}

#[test]
fn go_back_with_empty_history_is_unapplicable() {
    let screen = state(overview(range(day(2021, 3, 1), day(2021, 3, 7))));
    assert_eq!(classify(&screen, &Action::GoBack), Effect::Unapplicable);
}

#[test]
fn shifting_a_whole_month_keeps_month_alignment() {
    let screen = state(range_browse(
        DataSource::Weight,
        range(day(2021, 2, 1), day(2021, 2, 28)),
    ));
    let next = apply(
        &screen,
        &Action::ShiftAllRanges {
            direction: ShiftDirection::Future,
        },
    );
    assert_eq!(
        next.info().range(None),
        Some(range(day(2021, 3, 1), day(2021, 3, 31)))
    );
}

#[test]
fn shifting_moves_both_compared_ranges() {
    let screen = state(two_ranges(
        DataSource::StepCount,
        range(day(2021, 3, 1), day(2021, 3, 7)),
        range(day(2021, 3, 8), day(2021, 3, 14)),
    ));
    let next = apply(
        &screen,
        &Action::ShiftAllRanges {
            direction: ShiftDirection::Past,
        },
    );
    assert_eq!(
        next.info().range(Some(ParameterKey::RangeA)),
        Some(range(day(2021, 2, 22), day(2021, 2, 28)))
    );
    assert_eq!(
        next.info().range(Some(ParameterKey::RangeB)),
        Some(range(day(2021, 3, 1), day(2021, 3, 7)))
    );
}

#[test]
fn same_highlight_filter_twice_is_void() {
    let screen = state(range_browse(
        DataSource::StepCount,
        range(day(2021, 3, 1), day(2021, 3, 7)),
    ));
    let action = Action::SetHighlightFilter {
        filter: Some(steps_filter()),
    };
    let once = apply(&screen, &action);
    assert_eq!(classify(&screen, &action), Effect::Effective);
    assert_eq!(classify(&once, &action), Effect::Void);
}

#[test]
fn spoken_date_beats_touched_date() {
    let screen = state(range_browse(
        DataSource::StepCount,
        range(day(2021, 3, 1), day(2021, 3, 7)),
    ));
    let context = InteractionContext::DateElement {
        date: day(2021, 3, 5),
        data_source: Some(DataSource::StepCount),
    };
    let input = told(Intent::Browse, vec![VariableValue::Date(day(2021, 3, 20))]);

    let ResolutionResult::NeedPromptingToGlobalCommand { simulated, .. } =
        resolve(&input, &context, &screen)
    else {
        panic!("a date on a touched date is not a context command");
    };
    assert_eq!(
        *simulated,
        ResolutionResult::Effective(Action::GoToBrowseDay {
            data_source: Some(IntraDayDataSource::StepCount),
            date: Some(day(2021, 3, 20)),
        })
    );
}

#[test]
fn touched_range_beats_screen_range() {
    let screen = state(range_browse(
        DataSource::HeartRate,
        range(day(2021, 3, 1), day(2021, 3, 7)),
    ));
    let march = range(day(2021, 3, 1), day(2021, 3, 31));
    let context = InteractionContext::RangeElement {
        range: march,
        key: None,
        data_source: Some(DataSource::HeartRate),
    };
    let input = told(
        Intent::Browse,
        vec![VariableValue::DataSource(DataSource::Weight)],
    );

    assert_eq!(
        resolve(&input, &context, &screen),
        ResolutionResult::Effective(Action::GoToBrowseRange {
            data_source: Some(DataSource::Weight),
            range: Some(march),
            highlight_filter: None,
        })
    );
}

#[test]
fn resolution_results_match_their_classification() {
    let inputs = [
        told(
            Intent::AssignTrivial,
            vec![VariableValue::Period(range(day(2021, 2, 1), day(2021, 2, 7)))],
        ),
        told(Intent::Browse, vec![VariableValue::Date(day(2021, 3, 2))]),
        told(
            Intent::Browse,
            vec![VariableValue::DataSource(DataSource::HeartRate)],
        ),
        told(
            Intent::Compare,
            vec![VariableValue::Period(range(day(2021, 1, 1), day(2021, 1, 31)))],
        ),
        told(
            Intent::AssignTrivial,
            vec![VariableValue::TimeCycle(CyclicTimeFrame::WeekdayWeekend)],
        ),
    ];
    for screen in screens() {
        for input in &inputs {
            let result = resolve(input, &InteractionContext::Global, &screen);
            let Some(action) = result.action() else {
                continue;
            };
            let expected = ResolutionResult::classified(&screen, action.clone());
            assert_eq!(result, expected, "{result} on {}", screen.info());
        }
    }
}
