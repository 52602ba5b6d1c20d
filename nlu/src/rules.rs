//! Regex-lexicon preprocessor.
//!
//! Rules run in a fixed order over one lowercased copy of the utterance.
//! Each match is blanked out with spaces so later rules cannot reuse the same
//! words; offsets stay valid, which is what keeps variables in text order.

use std::ops::Range;

use chrono::{NaiveDate, Weekday};
use regex::{Captures, Regex};

use pulse_types::{
    ConditionInfo, ConditionType, DataSource, DateRange, ExtractedVariable, Intent, NluOptions,
    PreprocessedInput, PropertyKey, TimeEdge, VariableValue, VerbInfo, parse_date,
};

use crate::Preprocessor;
use crate::error::PreprocessError;
use crate::lexicon::lexicon;
use crate::time::{PeriodUnit, calendar_period, month_number, named_month, recent_weekday};

/// Rule-based extractor over a fixed English lexicon.
#[derive(Debug, Default, Clone, Copy)]
pub struct RulePreprocessor;

impl RulePreprocessor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Preprocessor for RulePreprocessor {
    type Error = PreprocessError;

    fn preprocess(
        &self,
        text: &str,
        options: &NluOptions,
        data_source_hint: Option<DataSource>,
    ) -> Result<PreprocessedInput, PreprocessError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PreprocessError::EmptyInput);
        }

        let mut scan = Scan::new(text);
        extract_time(&mut scan, options.today)?;
        extract_entities(&mut scan)?;
        let condition = extract_condition(&mut scan, data_source_hint)?;
        let verb_intent = extract_verb(&mut scan)?;

        let intent = if condition {
            Intent::Highlight
        } else {
            verb_intent.unwrap_or(Intent::AssignTrivial)
        };

        let mut found = scan.found;
        found.sort_by_key(|(position, _)| *position);
        let mut input = PreprocessedInput::new(intent);
        for (_, variable) in found {
            input.push(variable);
        }

        tracing::debug!(
            intent = ?input.intent,
            variables = input.variables.len(),
            "Preprocessed utterance"
        );
        Ok(input)
    }
}

type Finding = (VariableValue, Option<TimeEdge>);

struct Scan {
    source: String,
    masked: String,
    found: Vec<(usize, ExtractedVariable)>,
}

impl Scan {
    fn new(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let source = lexicon()
            .thousands_separator
            .replace_all(&lowered, "$1$2")
            .into_owned();
        Self {
            masked: source.clone(),
            source,
            found: Vec::new(),
        }
    }

    /// Run `regex` over the unmasked text; every match `interpret` accepts
    /// becomes a variable and is blanked out.
    fn take(
        &mut self,
        regex: &Regex,
        mut interpret: impl FnMut(&Captures<'_>) -> Result<Option<Finding>, PreprocessError>,
    ) -> Result<(), PreprocessError> {
        let mut hits: Vec<(Range<usize>, Finding)> = Vec::new();
        for captures in regex.captures_iter(&self.masked) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if let Some(finding) = interpret(&captures)? {
                hits.push((whole.range(), finding));
            }
        }
        for (span, (value, role)) in hits {
            let original_text = self.source[span.clone()].trim().to_owned();
            self.masked
                .replace_range(span.clone(), &" ".repeat(span.len()));
            self.found.push((
                span.start,
                ExtractedVariable {
                    value,
                    role,
                    original_text,
                },
            ));
        }
        Ok(())
    }
}

fn iso_date(text: &str) -> Result<NaiveDate, PreprocessError> {
    parse_date(text).map_err(|_err| PreprocessError::InvalidDate {
        text: text.to_owned(),
    })
}

fn date_word(text: &str, today: NaiveDate) -> Result<NaiveDate, PreprocessError> {
    match text {
        "today" => Ok(today),
        "yesterday" => today.pred_opt().ok_or_else(|| PreprocessError::InvalidDate {
            text: text.to_owned(),
        }),
        _ => iso_date(text),
    }
}

fn period(range: DateRange) -> Option<Finding> {
    Some((VariableValue::Period(range), None))
}

// ── Time ──────────────────────────────────────────────────────────────────

fn extract_time(scan: &mut Scan, today: NaiveDate) -> Result<(), PreprocessError> {
    let lexicon = lexicon();

    let span = |captures: &Captures<'_>| -> Result<Option<Finding>, PreprocessError> {
        let start = iso_date(&captures[1])?;
        let end = iso_date(&captures[2])?;
        Ok(period(DateRange::new(start, end)))
    };
    scan.take(&lexicon.explicit_span, span)?;
    scan.take(&lexicon.bare_span, span)?;

    scan.take(&lexicon.from_date, |captures| {
        let date = date_word(&captures[1], today)?;
        Ok(Some((VariableValue::Date(date), Some(TimeEdge::From))))
    })?;
    scan.take(&lexicon.to_date, |captures| {
        let date = date_word(&captures[1], today)?;
        Ok(Some((VariableValue::Date(date), Some(TimeEdge::To))))
    })?;
    scan.take(&lexicon.iso_date, |captures| {
        Ok(Some((VariableValue::Date(iso_date(&captures[0])?), None)))
    })?;
    scan.take(&lexicon.relative_day, |captures| {
        Ok(Some((VariableValue::Date(date_word(&captures[1], today)?), None)))
    })?;

    scan.take(&lexicon.last_n_days, |captures| {
        Ok(captures[1]
            .parse::<u64>()
            .ok()
            .filter(|days| *days > 0)
            .and_then(|days| period(DateRange::last_days(today, days))))
    })?;
    scan.take(&lexicon.relative_period, |captures| {
        let offset = u32::from(&captures[1] != "this");
        Ok(PeriodUnit::parse(&captures[2])
            .and_then(|unit| calendar_period(today, unit, offset))
            .and_then(period))
    })?;
    scan.take(&lexicon.month_name, |captures| {
        let year = captures
            .get(2)
            .and_then(|year| year.as_str().parse::<i32>().ok());
        Ok(month_number(&captures[1])
            .and_then(|month| named_month(today, month, year))
            .and_then(period))
    })?;
    scan.take(&lexicon.weekday_name, |captures| {
        let last = captures.get(1).is_some();
        Ok(captures[2]
            .parse::<Weekday>()
            .ok()
            .and_then(|weekday| recent_weekday(today, weekday, last))
            .map(|date| (VariableValue::Date(date), None)))
    })?;
    scan.take(&lexicon.year, |captures| {
        if captures.get(1).is_some() {
            return Ok(None);
        }
        Ok(captures[2]
            .parse::<i32>()
            .ok()
            .and_then(DateRange::year)
            .and_then(period))
    })
}

// ── Data sources and cyclic frames ────────────────────────────────────────

fn extract_entities(scan: &mut Scan) -> Result<(), PreprocessError> {
    let lexicon = lexicon();
    for (regex, source) in &lexicon.data_sources {
        scan.take(regex, |_| Ok(Some((VariableValue::DataSource(*source), None))))?;
    }
    for (regex, cycle) in &lexicon.time_cycles {
        scan.take(regex, |_| Ok(Some((VariableValue::TimeCycle(*cycle), None))))?;
    }
    Ok(())
}

// ── Conditions ────────────────────────────────────────────────────────────

const LESS_WORDS: [&str; 9] = [
    "less", "lower", "fewer", "smaller", "shorter", "earlier", "slower", "below", "under",
];
const MAX_WORDS: [&str; 7] = [
    "max", "maximum", "most", "highest", "latest", "longest", "fastest",
];

/// Extracts at most one condition. Returns whether one was found.
fn extract_condition(
    scan: &mut Scan,
    data_source_hint: Option<DataSource>,
) -> Result<bool, PreprocessError> {
    let lexicon = lexicon();
    let property = if lexicon.bedtime_words.is_match(&scan.source) {
        Some(PropertyKey::Bedtime)
    } else if lexicon.waketime_words.is_match(&scan.source) {
        Some(PropertyKey::Waketime)
    } else {
        None
    };
    let mentions_slept = scan.source.contains("slept");

    let mut found = false;
    scan.take(&lexicon.comparison, |captures| {
        if found {
            return Ok(None);
        }
        found = true;
        let condition = comparison(captures, property, data_source_hint);
        Ok(Some((VariableValue::Condition(condition), None)))
    })?;
    if found {
        return Ok(true);
    }

    scan.take(&lexicon.extreme, |captures| {
        if found {
            return Ok(None);
        }
        found = true;
        let word = &captures[1];
        let condition = if MAX_WORDS.contains(&word) {
            ConditionType::Max
        } else {
            ConditionType::Min
        };
        let implied_source = if property.is_some() {
            Some(DataSource::SleepRange)
        } else if mentions_slept || matches!(word, "longest" | "shortest") {
            Some(DataSource::HoursSlept)
        } else {
            None
        };
        Ok(Some((
            VariableValue::Condition(ConditionInfo {
                condition,
                property,
                reference: None,
                implied_source,
            }),
            None,
        )))
    })?;
    Ok(found)
}

/// Durations are expressed in hours, times of day in minutes after midnight.
fn comparison(
    captures: &Captures<'_>,
    property: Option<PropertyKey>,
    data_source_hint: Option<DataSource>,
) -> ConditionInfo {
    let word = &captures[1];
    let condition = if LESS_WORDS.contains(&word) {
        ConditionType::Less
    } else {
        ConditionType::More
    };
    let number = captures[2].parse::<f64>().ok();
    let unit = captures.get(3).map(|unit| unit.as_str());

    match unit {
        Some(unit @ ("am" | "pm" | "oclock" | "o'clock")) => ConditionInfo {
            condition,
            property,
            reference: number.map(|hour| minutes_after_midnight(hour, unit)),
            implied_source: Some(DataSource::SleepRange),
        },
        Some(unit) => ConditionInfo {
            condition,
            property: None,
            reference: number.map(|value| {
                if unit.starts_with('m') {
                    value / 60.0
                } else {
                    value
                }
            }),
            implied_source: Some(DataSource::HoursSlept),
        },
        None => {
            let implied_source = if property.is_some() {
                Some(DataSource::SleepRange)
            } else if matches!(word, "shorter" | "longer") {
                Some(DataSource::HoursSlept)
            } else {
                data_source_hint
            };
            ConditionInfo {
                condition,
                property,
                reference: number,
                implied_source,
            }
        }
    }
}

fn minutes_after_midnight(hour: f64, unit: &str) -> f64 {
    let hour = match unit {
        "pm" if hour < 12.0 => hour + 12.0,
        "am" if hour >= 12.0 => hour - 12.0,
        _ => hour,
    };
    hour * 60.0
}

// ── Verbs ─────────────────────────────────────────────────────────────────

fn verb_intent(root: &str) -> Intent {
    match root {
        "browse" | "go" | "show" | "explore" => Intent::Browse,
        "compare" => Intent::Compare,
        "highlight" | "count" | "find" => Intent::Highlight,
        _ => Intent::AssignTrivial,
    }
}

/// The first verb sets the intent; later verbs are ignored.
fn extract_verb(scan: &mut Scan) -> Result<Option<Intent>, PreprocessError> {
    let mut intent = None;
    scan.take(&lexicon().verb, |captures| {
        if intent.is_some() {
            return Ok(None);
        }
        let root = match &captures[1] {
            "compared" => "compare",
            other => other,
        };
        let mapped = verb_intent(root);
        intent = Some(mapped);
        Ok(Some((
            VariableValue::Verb(VerbInfo {
                root: root.to_owned(),
                intent: Some(mapped),
            }),
            None,
        )))
    })?;
    Ok(intent)
}
