//! Holder of the current navigation state.
//!
//! Touch gestures dispatch actions directly; utterances go through the
//! resolver first. Either way the state only ever changes by
//! [`pulse_types::apply_classified`], and only when the action applies.

use std::sync::Arc;

use pulse_nlu::Preprocessor;
use pulse_types::{
    Action, Effect, InteractionContext, NavigationInfo, NavigationState, apply_classified,
};

use crate::ResolveOptions;
use crate::resolver::CommandResolver;
use crate::result::ResolutionResult;

/// Owns the single current state and the resolver feeding it.
#[derive(Debug)]
pub struct Navigator<P> {
    resolver: CommandResolver<P>,
    options: ResolveOptions,
    state: Arc<NavigationState>,
    /// Global reading offered after a touched element rejected the utterance.
    pending: Option<ResolutionResult>,
}

impl<P: Preprocessor> Navigator<P> {
    /// Start on the overview of the default range.
    pub fn new(preprocessor: P, options: ResolveOptions) -> Self {
        let state = NavigationState::initial(options.default_range());
        Self {
            resolver: CommandResolver::new(preprocessor),
            options,
            state,
            pending: None,
        }
    }

    pub fn state(&self) -> &Arc<NavigationState> {
        &self.state
    }

    pub fn info(&self) -> &NavigationInfo {
        self.state.info()
    }

    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub const fn pending_prompt(&self) -> Option<&ResolutionResult> {
        self.pending.as_ref()
    }

    /// Resolve an utterance and dispatch the result.
    ///
    /// Effective and Void results are committed. A prompt is held until
    /// [`Self::accept_prompt`] or the next command.
    pub fn handle_utterance(
        &mut self,
        text: &str,
        context: &InteractionContext,
    ) -> Result<ResolutionResult, P::Error> {
        let result = self
            .resolver
            .resolve(text, context, &self.state, &self.options)?;
        self.pending = None;
        match &result {
            ResolutionResult::Effective(action) | ResolutionResult::Void(action) => {
                self.commit(action);
            }
            ResolutionResult::NeedPromptingToGlobalCommand { simulated, .. } => {
                tracing::info!(%simulated, "holding global reading for confirmation");
                self.pending = Some((**simulated).clone());
            }
            ResolutionResult::Unapplicable(action) => {
                tracing::info!(%action, "ignored, not applicable");
            }
            ResolutionResult::Fail(message) => {
                tracing::info!(?message, "resolution failed");
            }
        }
        Ok(result)
    }

    /// Dispatch an action from the touch path.
    pub fn dispatch(&mut self, action: &Action) -> Effect {
        self.pending = None;
        self.commit(action)
    }

    /// Dispatch the held global reading, if any.
    pub fn accept_prompt(&mut self) -> Option<Effect> {
        let pending = self.pending.take()?;
        let action = pending.action()?;
        Some(self.commit(action))
    }

    pub fn dismiss_prompt(&mut self) {
        self.pending = None;
    }

    /// Back to the overview of the default range ending today.
    pub fn reset(&mut self) -> Effect {
        let range = self.options.default_range();
        self.dispatch(&Action::Reset { range })
    }

    fn commit(&mut self, action: &Action) -> Effect {
        let (next, effect) = apply_classified(&self.state, action);
        if effect != Effect::Unapplicable {
            tracing::info!(%action, ?effect, info = %next.info(), "dispatched");
            self.state = next;
        }
        effect
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pulse_nlu::RulePreprocessor;
    use pulse_types::{CyclicTimeFrame, DataSource, DateRange, ShiftDirection, ViewType, classify};
    use serde_json::json;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn navigator() -> Navigator<RulePreprocessor> {
        Navigator::new(RulePreprocessor::new(), ResolveOptions::new(day(2021, 3, 10)))
    }

    #[test]
    fn starts_on_default_overview() {
        let nav = navigator();
        assert_eq!(nav.info().view(), ViewType::Overview);
        assert_eq!(
            nav.info().range(None),
            Some(DateRange::new(day(2021, 3, 4), day(2021, 3, 10)))
        );
        assert!(!nav.state().can_go_back());
    }

    #[test]
    fn utterance_commits_and_back_restores() {
        let mut nav = navigator();
        let before = nav.info().clone();
        let result = nav
            .handle_utterance("show steps", &InteractionContext::Global)
            .unwrap();
        assert!(matches!(result, ResolutionResult::Effective(_)));
        assert_eq!(nav.info().view(), ViewType::RangeBrowse);
        assert_eq!(nav.info().data_source(), Some(DataSource::StepCount));

        assert_eq!(nav.dispatch(&Action::GoBack), Effect::Effective);
        assert_eq!(nav.info(), &before);
    }

    #[test]
    fn unapplicable_touch_keeps_state() {
        let mut nav = navigator();
        let before = Arc::clone(nav.state());
        let effect = nav.dispatch(&Action::SetCycleType {
            cycle_type: CyclicTimeFrame::DayOfWeek,
        });
        assert_eq!(effect, Effect::Unapplicable);
        assert!(Arc::ptr_eq(&before, nav.state()));
    }

    #[test]
    fn memo_is_committed_as_void() {
        let mut nav = navigator();
        let effect = nav.dispatch(&Action::MemoUiStatus {
            key: "scroll".to_string(),
            value: json!(120),
        });
        assert_eq!(effect, Effect::Void);
        assert_eq!(nav.state().ui_status().get("scroll"), Some(&json!(120)));
    }

    #[test]
    fn prompt_is_held_then_accepted() {
        let mut nav = navigator();
        nav.handle_utterance("show steps", &InteractionContext::Global).unwrap();
        let context = InteractionContext::DateElement {
            date: day(2021, 3, 5),
            data_source: Some(DataSource::StepCount),
        };
        let result = nav.handle_utterance("last month", &context).unwrap();
        assert!(matches!(
            result,
            ResolutionResult::NeedPromptingToGlobalCommand { .. }
        ));
        assert!(nav.pending_prompt().is_some());
        assert_eq!(
            nav.info().range(None),
            Some(DateRange::new(day(2021, 3, 4), day(2021, 3, 10)))
        );

        assert_eq!(nav.accept_prompt(), Some(Effect::Effective));
        assert_eq!(
            nav.info().range(None),
            Some(DateRange::new(day(2021, 2, 1), day(2021, 2, 28)))
        );
        assert!(nav.pending_prompt().is_none());
    }

    #[test]
    fn dispatch_reports_what_classify_predicts() {
        let mut nav = navigator();
        let steps = Action::GoToBrowseRange {
            data_source: Some(DataSource::StepCount),
            range: None,
            highlight_filter: None,
        };
        for action in [
            steps.clone(),
            steps,
            Action::SetCycleType {
                cycle_type: CyclicTimeFrame::DayOfWeek,
            },
            Action::GoBack,
            Action::GoBack,
        ] {
            let predicted = classify(nav.state(), &action);
            assert_eq!(nav.dispatch(&action), predicted, "{action}");
        }
        assert_eq!(nav.info().view(), ViewType::Overview);
        assert!(!nav.state().can_go_back());
    }

    #[test]
    fn reset_clears_history() {
        let mut nav = navigator();
        nav.handle_utterance("show weight", &InteractionContext::Global).unwrap();
        nav.dispatch(&Action::ShiftAllRanges {
            direction: ShiftDirection::Past,
        });
        assert!(nav.state().can_go_back());
        assert_eq!(nav.reset(), Effect::Effective);
        assert_eq!(nav.info().view(), ViewType::Overview);
        assert!(!nav.state().can_go_back());
    }
}
