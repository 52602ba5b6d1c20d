//! Shape of the language-understanding output the resolver consumes.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{DateRange, TimeEdge};
use crate::navigation::{ConditionType, PropertyKey};
use crate::source::{CyclicTimeFrame, DataSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AssignTrivial,
    Browse,
    Compare,
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    DataSource,
    Date,
    Period,
    TimeCycle,
    Condition,
    Verb,
}

/// A comparison phrase ("more than 10000 steps", "latest bedtime").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionInfo {
    pub condition: ConditionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<f64>,
    /// Source the wording itself implies ("slept" implies hours slept).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implied_source: Option<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbInfo {
    pub root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VariableValue {
    DataSource(DataSource),
    Date(NaiveDate),
    Period(DateRange),
    TimeCycle(CyclicTimeFrame),
    Condition(ConditionInfo),
    Verb(VerbInfo),
}

impl VariableValue {
    #[must_use]
    pub const fn variable_type(&self) -> VariableType {
        match self {
            Self::DataSource(_) => VariableType::DataSource,
            Self::Date(_) => VariableType::Date,
            Self::Period(_) => VariableType::Period,
            Self::TimeCycle(_) => VariableType::TimeCycle,
            Self::Condition(_) => VariableType::Condition,
            Self::Verb(_) => VariableType::Verb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedVariable {
    pub value: VariableValue,
    /// "from"/"to" tag attached to a time expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TimeEdge>,
    pub original_text: String,
}

impl ExtractedVariable {
    #[must_use]
    pub fn new(value: VariableValue, original_text: impl Into<String>) -> Self {
        Self {
            value,
            role: None,
            original_text: original_text.into(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: TimeEdge) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub const fn variable_type(&self) -> VariableType {
        self.value.variable_type()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(u32);

impl VariableId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Intent plus the variables found in one utterance, in text order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessedInput {
    pub intent: Intent,
    pub variables: BTreeMap<VariableId, ExtractedVariable>,
}

impl PreprocessedInput {
    #[must_use]
    pub const fn new(intent: Intent) -> Self {
        Self {
            intent,
            variables: BTreeMap::new(),
        }
    }

    /// Append a variable under the next id.
    pub fn push(&mut self, variable: ExtractedVariable) -> VariableId {
        let id = self
            .variables
            .last_key_value()
            .map_or(VariableId(0), |(last, _)| VariableId(last.0 + 1));
        self.variables.insert(id, variable);
        id
    }

    #[must_use]
    pub fn with(mut self, variable: ExtractedVariable) -> Self {
        self.push(variable);
        self
    }

    pub fn variables_of(&self, kind: VariableType) -> impl Iterator<Item = &ExtractedVariable> {
        self.variables
            .values()
            .filter(move |variable| variable.variable_type() == kind)
    }

    #[must_use]
    pub fn is_told(&self, kind: VariableType) -> bool {
        self.variables_of(kind).next().is_some()
    }

    #[must_use]
    pub fn count_of(&self, kind: VariableType) -> usize {
        self.variables_of(kind).count()
    }

    #[must_use]
    pub fn data_sources(&self) -> Vec<DataSource> {
        self.variables
            .values()
            .filter_map(|variable| match variable.value {
                VariableValue::DataSource(source) => Some(source),
                _ => None,
            })
            .collect()
    }

    /// Told dates with their role tags.
    #[must_use]
    pub fn dates(&self) -> Vec<(NaiveDate, Option<TimeEdge>)> {
        self.variables
            .values()
            .filter_map(|variable| match variable.value {
                VariableValue::Date(date) => Some((date, variable.role)),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn periods(&self) -> Vec<DateRange> {
        self.variables
            .values()
            .filter_map(|variable| match variable.value {
                VariableValue::Period(range) => Some(range),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn time_cycles(&self) -> Vec<CyclicTimeFrame> {
        self.variables
            .values()
            .filter_map(|variable| match variable.value {
                VariableValue::TimeCycle(cycle) => Some(cycle),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn conditions(&self) -> Vec<ConditionInfo> {
        self.variables
            .values()
            .filter_map(|variable| match variable.value {
                VariableValue::Condition(condition) => Some(condition),
                _ => None,
            })
            .collect()
    }

    /// Anything beyond verbs was recognized.
    #[must_use]
    pub fn has_actionable_variables(&self) -> bool {
        self.variables
            .values()
            .any(|variable| variable.variable_type() != VariableType::Verb)
    }

    /// Only variables of the given types were told (verbs are ignored).
    #[must_use]
    pub fn only_told(&self, kinds: &[VariableType]) -> bool {
        self.variables.values().all(|variable| {
            variable.variable_type() == VariableType::Verb
                || kinds.contains(&variable.variable_type())
        })
    }
}

/// Per-call settings for the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NluOptions {
    /// Anchor for relative expressions ("last week").
    pub today: NaiveDate,
}
