//! Slash commands of the shell. Anything else is an utterance.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;

use pulse_types::{
    CycleDimension, DataSource, InteractionContext, NavigationInfo, ParameterKey, ShiftDirection,
    TimeElement, parse_date,
};

pub(crate) const HELP: &str = "\
Type a command in plain words, e.g. \"show steps last month\".

  /touch range [a|b]      touch the chart of the current (or keyed) range
  /touch date YYYY-MM-DD  touch one day
  /touch from|to|period [a|b]
                          touch the range picker
  /touch cycle <name>     touch a cycle bucket (monday, winter, weekends, ...)
  /touch row <source>     touch a source row (step_count, weight, ...)
  /release                stop touching
  /yes | /no              accept or dismiss a suggested command
  /back  /overview  /next  /prev  /reset
  /state                  print the current state as JSON
  /help  /quit";

/// What the user is pretending to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Touch {
    Range(Option<ParameterKey>),
    Date(NaiveDate),
    Time(TimeElement, Option<ParameterKey>),
    Cycle(CycleDimension),
    Row(DataSource),
}

impl Touch {
    /// The element as it looks on the current screen.
    pub(crate) fn context(self, info: &NavigationInfo) -> Result<InteractionContext> {
        Ok(match self {
            Self::Range(key) => InteractionContext::RangeElement {
                range: info
                    .range(key)
                    .ok_or_else(|| anyhow!("no range on screen to touch"))?,
                key,
                data_source: info.data_source(),
            },
            Self::Date(date) => InteractionContext::DateElement {
                date,
                data_source: info.data_source(),
            },
            Self::Time(element, key) => InteractionContext::Time { element, key },
            Self::Cycle(dimension) => InteractionContext::CycleDimensionElement {
                dimension,
                data_source: info.data_source(),
            },
            Self::Row(data_source) => InteractionContext::CategoricalElement {
                data_source,
                range: info.range(None),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Touch(Touch),
    Release,
    Accept,
    Dismiss,
    Back,
    Overview,
    Shift(ShiftDirection),
    Reset,
    State,
    Help,
    Quit,
    Utterance(String),
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Utterance(line.to_string()));
        };
        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("touch", [target, rest @ ..]) => Self::Touch(parse_touch(target, rest)?),
            ("touch", []) => bail!("usage: /touch range|date|from|to|period|cycle|row ..."),
            ("release", []) => Self::Release,
            ("yes" | "y", []) => Self::Accept,
            ("no" | "n", []) => Self::Dismiss,
            ("back", []) => Self::Back,
            ("overview", []) => Self::Overview,
            ("next", []) => Self::Shift(ShiftDirection::Future),
            ("prev" | "previous", []) => Self::Shift(ShiftDirection::Past),
            ("reset", []) => Self::Reset,
            ("state", []) => Self::State,
            ("help" | "h" | "?", []) => Self::Help,
            ("quit" | "q" | "exit", []) => Self::Quit,
            _ => bail!("unknown command '/{rest}', try /help"),
        };
        Ok(command)
    }
}

fn parse_touch(target: &str, args: &[&str]) -> Result<Touch> {
    let touch = match (target, args) {
        ("range", [key]) => Touch::Range(Some(parse_key(key)?)),
        ("range", []) => Touch::Range(None),
        ("date", [date]) => Touch::Date(parse_date(date).context("invalid date")?),
        ("from" | "to" | "period", key) => {
            let element = match target {
                "from" => TimeElement::From,
                "to" => TimeElement::To,
                _ => TimeElement::Period,
            };
            let key = match key {
                [] => None,
                [key] => Some(parse_key(key)?),
                _ => bail!("usage: /touch {target} [a|b]"),
            };
            Touch::Time(element, key)
        }
        ("cycle", [name]) => Touch::Cycle(
            CycleDimension::parse(name).ok_or_else(|| anyhow!("unknown cycle item '{name}'"))?,
        ),
        ("row", [name]) => Touch::Row(
            DataSource::parse(name).ok_or_else(|| anyhow!("unknown data source '{name}'"))?,
        ),
        _ => bail!("cannot touch '{target}' with {} argument(s)", args.len()),
    };
    Ok(touch)
}

fn parse_key(raw: &str) -> Result<ParameterKey> {
    match raw.to_ascii_lowercase().as_str() {
        "a" => Ok(ParameterKey::RangeA),
        "b" => Ok(ParameterKey::RangeB),
        other => bail!("unknown range key '{other}', expected a or b"),
    }
}
