//! Dry-run classification of an action against a state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::navigation::NavigationState;
use crate::transition::apply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// The screen would change.
    Effective,
    /// The action applies but leaves an equal screen.
    Void,
    /// The action means nothing on the current screen.
    Unapplicable,
}

/// Apply `action` to `state` without committing the result anywhere.
#[must_use]
pub fn classify(state: &Arc<NavigationState>, action: &Action) -> Effect {
    apply_classified(state, action).1
}

/// Apply `action` and label the outcome; callers decide whether to keep it.
#[must_use]
pub fn apply_classified(
    state: &Arc<NavigationState>,
    action: &Action,
) -> (Arc<NavigationState>, Effect) {
    let next = apply(state, action);
    let effect = if Arc::ptr_eq(state, &next) {
        Effect::Unapplicable
    } else if next.info() == state.info() {
        Effect::Void
    } else {
        Effect::Effective
    };
    (next, effect)
}
