//! Spoken > Touched > Implied cascade shared by every resolved slot.

use serde::{Deserialize, Serialize};

/// Where a candidate value came from. Later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Already present in the navigation state.
    Implied,
    /// Carried by the touched element.
    Touched,
    /// Said in the utterance.
    Spoken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prioritized<T> {
    pub value: T,
    pub priority: Priority,
}

/// Pick the present candidate with the highest priority.
///
/// Candidates with `None` are skipped. On equal priority the earlier
/// candidate wins.
pub fn resolve_with_priority<T>(
    candidates: impl IntoIterator<Item = (Option<T>, Priority)>,
) -> Option<Prioritized<T>> {
    candidates
        .into_iter()
        .filter_map(|(value, priority)| value.map(|value| Prioritized { value, priority }))
        .fold(None, |best, candidate| match best {
            Some(best) if best.priority >= candidate.priority => Some(best),
            _ => Some(candidate),
        })
}
