//! Shared test utilities and fixtures
//!
//! Screens, utterance builders and resolver shortcuts used across the suite.
//! "Today" is pinned to Wednesday 2021-03-10.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use pulse_engine::{
    CommandResolver, ResolutionResult, ResolveOptions, RulePreprocessor, resolve_preprocessed,
};
use pulse_types::{
    DataSource, DateRange, ExtractedVariable, Intent, InteractionContext, IntraDayDataSource,
    NavigationInfo, NavigationState, ParameterKey, ParameterValue, PreprocessedInput,
    VariableValue, ViewType,
};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn range(a: NaiveDate, b: NaiveDate) -> DateRange {
    DateRange::new(a, b)
}

pub fn today() -> NaiveDate {
    day(2021, 3, 10)
}

pub fn options() -> ResolveOptions {
    ResolveOptions::new(today())
}

pub fn state(info: NavigationInfo) -> Arc<NavigationState> {
    Arc::new(NavigationState::from_info(info))
}

pub fn overview(current: DateRange) -> NavigationInfo {
    NavigationInfo::overview(current)
}

pub fn range_browse(source: DataSource, current: DateRange) -> NavigationInfo {
    let mut info = NavigationInfo::new(ViewType::RangeBrowse);
    info.set(ParameterValue::DataSource(source), None);
    info.set(ParameterValue::Range(current), None);
    info
}

pub fn day_detail(source: IntraDayDataSource, date: NaiveDate) -> NavigationInfo {
    let mut info = NavigationInfo::new(ViewType::DayDetail);
    info.set(ParameterValue::IntraDayDataSource(source), None);
    info.set(ParameterValue::Date(date), None);
    info
}

pub fn two_ranges(source: DataSource, a: DateRange, b: DateRange) -> NavigationInfo {
    let mut info = NavigationInfo::new(ViewType::TwoRangeCompare);
    info.set(ParameterValue::DataSource(source), None);
    info.set(ParameterValue::Range(a), Some(ParameterKey::RangeA));
    info.set(ParameterValue::Range(b), Some(ParameterKey::RangeB));
    info
}

/// Extractor output with the given variables in order.
pub fn told(intent: Intent, values: Vec<VariableValue>) -> PreprocessedInput {
    values
        .into_iter()
        .fold(PreprocessedInput::new(intent), |input, value| {
            input.with(ExtractedVariable::new(value, "(test)"))
        })
}

pub fn resolve(
    input: &PreprocessedInput,
    context: &InteractionContext,
    state: &Arc<NavigationState>,
) -> ResolutionResult {
    resolve_preprocessed(input, context, state, &options())
}

/// Resolve real text through the rule-based extractor.
pub fn say(
    text: &str,
    context: &InteractionContext,
    state: &Arc<NavigationState>,
) -> ResolutionResult {
    CommandResolver::new(RulePreprocessor::new())
        .resolve(text, context, state, &options())
        .unwrap()
}
