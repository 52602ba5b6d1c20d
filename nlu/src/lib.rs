//! Utterance preprocessing for Pulse.
//!
//! A [`Preprocessor`] turns raw utterance text into a [`PreprocessedInput`]:
//! the intent plus typed variables (data sources, dates, periods, cyclic
//! frames, conditions, verbs). The resolver only depends on the trait;
//! [`RulePreprocessor`] is the regex-lexicon implementation shipped with the
//! workspace.

mod error;
mod lexicon;
mod rules;
mod time;

pub use error::PreprocessError;
pub use rules::RulePreprocessor;

use std::error::Error as StdError;

use pulse_types::{DataSource, NluOptions, PreprocessedInput};

/// Extracts variables and intent from an utterance.
///
/// `data_source_hint` is the source currently in view; extractors use it to
/// interpret unit-less comparisons ("more than 80").
pub trait Preprocessor {
    type Error: StdError + Send + Sync + 'static;

    fn preprocess(
        &self,
        text: &str,
        options: &NluOptions,
        data_source_hint: Option<DataSource>,
    ) -> Result<PreprocessedInput, Self::Error>;
}

impl<P: Preprocessor + ?Sized> Preprocessor for &P {
    type Error = P::Error;

    fn preprocess(
        &self,
        text: &str,
        options: &NluOptions,
        data_source_hint: Option<DataSource>,
    ) -> Result<PreprocessedInput, Self::Error> {
        (**self).preprocess(text, options, data_source_hint)
    }
}
