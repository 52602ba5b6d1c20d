//! Compiled regex lexicon, built once and cached in a `OnceLock`.
//!
//! Patterns run against lowercased text with digit-group commas removed.

use std::sync::OnceLock;

use regex::Regex;

use pulse_types::{CyclicTimeFrame, DataSource};

const ISO_DATE: &str = r"\d{4}-\d{1,2}-\d{1,2}";
const MONTH_NAMES: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
const COMPARISON_WORDS: &str = "more|higher|greater|bigger|larger|longer|later|faster|above|over|less|lower|fewer|smaller|shorter|earlier|slower|below|under";
const WEEKDAY_NAMES: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

#[derive(Debug)]
pub(crate) struct Lexicon {
    // Time
    pub explicit_span: Regex,
    pub bare_span: Regex,
    pub from_date: Regex,
    pub to_date: Regex,
    pub iso_date: Regex,
    pub relative_day: Regex,
    pub last_n_days: Regex,
    pub relative_period: Regex,
    pub month_name: Regex,
    pub weekday_name: Regex,
    pub year: Regex,

    // Entities, in match priority order
    pub data_sources: Vec<(Regex, DataSource)>,
    pub time_cycles: Vec<(Regex, CyclicTimeFrame)>,

    // Conditions
    pub comparison: Regex,
    pub extreme: Regex,
    pub bedtime_words: Regex,
    pub waketime_words: Regex,

    pub verb: Regex,
    pub thousands_separator: Regex,
}

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

pub(crate) fn lexicon() -> &'static Lexicon {
    LEXICON.get_or_init(Lexicon::new)
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid lexicon regex")
}

impl Lexicon {
    fn new() -> Self {
        let date_expr = format!(r"{ISO_DATE}|today|yesterday");
        Self {
            explicit_span: compile(&format!(
                r"\b(?:from|between)\s+({ISO_DATE})\s+(?:to|until|till|through|and)\s+({ISO_DATE})\b"
            )),
            bare_span: compile(&format!(
                r"\b({ISO_DATE})\s*(?:to|until|through|~)\s*({ISO_DATE})\b"
            )),
            from_date: compile(&format!(r"\b(?:from|since|starting)\s+({date_expr})\b")),
            to_date: compile(&format!(
                r"\b(?:until|till|through|ending(?:\s+on)?)\s+({date_expr})\b"
            )),
            iso_date: compile(&format!(r"\b{ISO_DATE}\b")),
            relative_day: compile(r"\b(today|yesterday)\b"),
            last_n_days: compile(r"\b(?:last|past|previous)\s+(\d{1,4})\s+days?\b"),
            relative_period: compile(r"\b(this|last|past|previous)\s+(week|month|year)\b"),
            month_name: compile(&format!(r"\b({MONTH_NAMES})(?:\s+(\d{{4}}))?\b")),
            weekday_name: compile(&format!(r"\b(last\s+)?({WEEKDAY_NAMES})\b")),
            // Group 1 catches comparison numbers ("more than 2000") so they are not read as years.
            year: compile(&format!(
                r"\b(?:({COMPARISON_WORDS})\s+(?:than\s+)?)?(?:year\s+)?([12]\d{{3}})\b"
            )),

            data_sources: vec![
                (
                    compile(r"\b(?:step\s*counts?|steps?|walk(?:ed|ing)?)\b"),
                    DataSource::StepCount,
                ),
                (
                    compile(r"\b(?:(?:resting\s+)?heart\s*rates?|bpm|beats?\s+per\s+minutes?)\b"),
                    DataSource::HeartRate,
                ),
                (
                    compile(
                        r"\b(?:hours?\s+(?:i\s+|of\s+)?(?:slept|sleep)|sleep\s+(?:length|duration|hours?)|(?:length|duration)\s+of\s+(?:[a-z]+\s+)?sleep|i\s+slept)\b",
                    ),
                    DataSource::HoursSlept,
                ),
                (
                    compile(
                        r"\b(?:sleep\s+(?:range|schedules?)|range\s+of\s+(?:[a-z]+\s+)?sleep|sleep)\b",
                    ),
                    DataSource::SleepRange,
                ),
                (
                    compile(r"\b(?:(?:body\s+)?weight|how\s+heavy\s+i\s+(?:was|am))\b"),
                    DataSource::Weight,
                ),
            ],
            time_cycles: vec![
                (
                    compile(
                        r"\b(?:weekdays?\s+(?:and|vs\.?|versus)\s+weekends?|weekends?\s+(?:and|vs\.?|versus)\s+weekdays?)\b",
                    ),
                    CyclicTimeFrame::WeekdayWeekend,
                ),
                (
                    compile(
                        r"\b(?:(?:by\s+)?days?\s+of\s+(?:the\s+)?weeks?|(?:by\s+)?weekly(?:\s+(?:data|pattern))?)\b",
                    ),
                    CyclicTimeFrame::DayOfWeek,
                ),
                (
                    compile(
                        r"\b(?:by\s+months?|(?:by\s+)?months?\s+of\s+(?:the\s+)?years?|monthly(?:\s+(?:data|pattern))?|(?:by\s+)?yearly(?:\s+(?:data|pattern))?)\b",
                    ),
                    CyclicTimeFrame::MonthOfYear,
                ),
                (
                    compile(r"\b(?:(?:by\s+)?seasons?(?:\s+of\s+(?:the\s+)?years?)?|seasonal(?:ly)?)\b"),
                    CyclicTimeFrame::SeasonOfYear,
                ),
            ],

            comparison: compile(&format!(
                r"\b({COMPARISON_WORDS})\s+(?:than\s+)?(\d+(?:\.\d+)?)(?:\s*(hours?|hrs?|h|minutes?|mins?|am|pm|o'?clock))?\b",
            )),
            extreme: compile(
                r"\b(max|maximum|most|highest|latest|longest|fastest|min|minimum|least|lowest|earliest|shortest|slowest|fewest)\b",
            ),
            bedtime_words: compile(r"\b(?:bed|bedtime|asleep|went\s+to\s+sleep|go\s+to\s+sleep)\b"),
            waketime_words: compile(
                r"\b(?:wake|woke|waketime|wake\s*up|got\s+up|get(?:ting)?\s+up)\b",
            ),

            verb: compile(
                r"\b(set|assign|put|change|modify|edit|replace|browse|go|show|explore|compared?|highlight|count|find)\b",
            ),
            thousands_separator: compile(r"(\d),(\d)"),
        }
    }
}
