//! Command resolution and navigation for Pulse.
//!
//! [`CommandResolver`] turns an utterance, the element being touched and the
//! current [`NavigationState`](pulse_types::NavigationState) into a
//! [`ResolutionResult`]. [`Navigator`] holds the one current state, feeds it
//! to the resolver and commits whatever applies.

mod navigator;
mod options;
mod priority;
mod resolver;
mod result;

pub use navigator::Navigator;
pub use options::ResolveOptions;
pub use priority::{Prioritized, Priority, resolve_with_priority};
pub use resolver::{CommandResolver, resolve_preprocessed};
pub use result::ResolutionResult;

pub use pulse_config::{ConfigError, PulseConfig, config_path, log_path};
pub use pulse_nlu::{PreprocessError, Preprocessor, RulePreprocessor};
