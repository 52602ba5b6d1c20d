//! Core domain types for Pulse.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! The navigation model, the transition function and effect classification all live
//! here so that touch-only callers and the command resolver share one contract.

#![allow(clippy::missing_errors_doc)]

mod action;
mod calendar;
mod context;
mod effect;
mod navigation;
mod nlu;
mod source;
pub mod transition;

pub use action::Action;
pub use calendar::{DateRange, DateRangeError, ShiftDirection, TimeEdge, parse_date};
pub use context::{InteractionContext, TimeElement};
pub use effect::{Effect, apply_classified, classify};
pub use navigation::{
    ConditionType, HighlightFilter, NavigationInfo, NavigationState, Parameter, ParameterKey,
    ParameterKind, ParameterValue, PropertyKey, UiStatus, ViewMode, ViewType,
};
pub use nlu::{
    ConditionInfo, ExtractedVariable, Intent, NluOptions, PreprocessedInput, VariableId,
    VariableType, VariableValue, VerbInfo,
};
pub use source::{CalendarLevel, CycleDimension, CyclicTimeFrame, DataSource, IntraDayDataSource};
pub use transition::apply;
