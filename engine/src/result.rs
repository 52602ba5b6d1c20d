use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pulse_types::{Action, Effect, NavigationState, classify};

/// What the resolver made of an utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum ResolutionResult {
    Effective(Action),
    Void(Action),
    Unapplicable(Action),
    Fail(Option<String>),
    /// The touched element could not take the command, but the same words
    /// mean something without it.
    NeedPromptingToGlobalCommand {
        message: String,
        simulated: Box<ResolutionResult>,
    },
}

impl ResolutionResult {
    /// Label `action` by dry-running it against `state`.
    #[must_use]
    pub fn classified(state: &Arc<NavigationState>, action: Action) -> Self {
        match classify(state, &action) {
            Effect::Effective => Self::Effective(action),
            Effect::Void => Self::Void(action),
            Effect::Unapplicable => Self::Unapplicable(action),
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(Some(message.into()))
    }

    /// The resolved action, for the three classified outcomes.
    #[must_use]
    pub const fn action(&self) -> Option<&Action> {
        match self {
            Self::Effective(action) | Self::Void(action) | Self::Unapplicable(action) => {
                Some(action)
            }
            Self::Fail(_) | Self::NeedPromptingToGlobalCommand { .. } => None,
        }
    }

    #[must_use]
    pub const fn effect(&self) -> Option<Effect> {
        match self {
            Self::Effective(_) => Some(Effect::Effective),
            Self::Void(_) => Some(Effect::Void),
            Self::Unapplicable(_) => Some(Effect::Unapplicable),
            Self::Fail(_) | Self::NeedPromptingToGlobalCommand { .. } => None,
        }
    }

    /// Effective or Void: the action applies to the current screen.
    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        matches!(self, Self::Effective(_) | Self::Void(_))
    }

    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effective(action) => write!(f, "{action}"),
            Self::Void(action) => write!(f, "{action} (nothing changed)"),
            Self::Unapplicable(action) => write!(f, "{action} (not applicable here)"),
            Self::Fail(Some(message)) => f.write_str(message),
            Self::Fail(None) => f.write_str("Sorry, I couldn't understand that."),
            Self::NeedPromptingToGlobalCommand { message, simulated } => {
                write!(f, "{message} Did you mean: {simulated}?")
            }
        }
    }
}
