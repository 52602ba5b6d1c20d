//! Utterance + touched element + current state -> classified action.
//!
//! Resolution runs in two phases. With something touched, the element's own
//! slot patterns are tried first ([`context`]); whatever they cannot place is
//! read globally ([`global`]) and, when that reading applies, offered back to
//! the caller as a prompt instead of being dispatched silently.

mod context;
mod global;
mod time;

use std::sync::Arc;

use pulse_nlu::Preprocessor;
use pulse_types::{
    Action, DataSource, InteractionContext, IntraDayDataSource, NavigationInfo, NavigationState,
    PreprocessedInput, VariableType,
};

use crate::ResolveOptions;
use crate::result::ResolutionResult;

/// Everything one resolution looks at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Request<'a> {
    pub(crate) input: &'a PreprocessedInput,
    pub(crate) context: &'a InteractionContext,
    pub(crate) state: &'a Arc<NavigationState>,
    pub(crate) options: &'a ResolveOptions,
}

impl Request<'_> {
    pub(crate) fn info(&self) -> &NavigationInfo {
        self.state.info()
    }

    pub(crate) fn classify(&self, action: Action) -> ResolutionResult {
        ResolutionResult::classified(self.state, action)
    }

    pub(crate) fn told_data_source(&self) -> Option<DataSource> {
        self.input.data_sources().first().copied()
    }

    /// Told, then touched, then on screen, then implied by the intraday source.
    pub(crate) fn data_source(&self) -> Option<DataSource> {
        self.told_data_source()
            .or_else(|| self.context.data_source())
            .or_else(|| self.info().data_source())
            .or_else(|| {
                self.info()
                    .intra_day_data_source()
                    .map(IntraDayDataSource::data_source)
            })
    }

    /// Exactly one data source was said and nothing else that matters.
    pub(crate) fn bare_data_source(&self) -> Option<DataSource> {
        if self.input.count_of(VariableType::DataSource) == 1
            && self.input.only_told(&[VariableType::DataSource])
        {
            self.told_data_source()
        } else {
            None
        }
    }

    /// Only time was said: dates and periods, at least one of them.
    pub(crate) fn time_only(&self) -> bool {
        self.input.only_told(&[VariableType::Date, VariableType::Period])
            && (self.input.is_told(VariableType::Date) || self.input.is_told(VariableType::Period))
    }
}

/// Resolves utterances with a [`Preprocessor`] as the language front end.
#[derive(Debug, Clone, Default)]
pub struct CommandResolver<P> {
    preprocessor: P,
}

impl<P: Preprocessor> CommandResolver<P> {
    pub const fn new(preprocessor: P) -> Self {
        Self { preprocessor }
    }

    pub const fn preprocessor(&self) -> &P {
        &self.preprocessor
    }

    /// Resolve `text` against the current screen.
    ///
    /// Preprocessor errors are returned unchanged. Everything the resolver
    /// cannot place is a [`ResolutionResult::Fail`].
    pub fn resolve(
        &self,
        text: &str,
        context: &InteractionContext,
        state: &Arc<NavigationState>,
        options: &ResolveOptions,
    ) -> Result<ResolutionResult, P::Error> {
        let hint = state.info().data_source().or_else(|| context.data_source());
        let input = self.preprocessor.preprocess(text, &options.nlu(), hint)?;
        Ok(resolve_preprocessed(&input, context, state, options))
    }
}

/// Resolve already extracted variables. Used directly by callers that run
/// their own extractor.
#[must_use]
pub fn resolve_preprocessed(
    input: &PreprocessedInput,
    context: &InteractionContext,
    state: &Arc<NavigationState>,
    options: &ResolveOptions,
) -> ResolutionResult {
    if !input.has_actionable_variables() {
        tracing::debug!("no actionable variables");
        return ResolutionResult::Fail(None);
    }

    let request = Request {
        input,
        context,
        state,
        options,
    };

    if context.is_global() {
        return global::resolve(&request);
    }

    if let Some(action) = context::resolve(&request) {
        tracing::debug!(element = context.element_name(), %action, "resolved in context");
        return request.classify(action);
    }

    let simulated = global::resolve(&request);
    tracing::debug!(element = context.element_name(), %simulated, "context rejected, simulated global");
    let expected = format!(
        "The touched {} expects {}.",
        context.element_name(),
        context.expectation()
    );
    if simulated.is_applicable() {
        ResolutionResult::NeedPromptingToGlobalCommand {
            message: expected,
            simulated: Box::new(simulated),
        }
    } else {
        ResolutionResult::fail(expected)
    }
}
