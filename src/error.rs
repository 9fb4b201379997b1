use thiserror::Error;

use crate::session::Screen;

/// Rejected requests at the session boundary.  The simulation itself never
/// fails; these only guard menu-level preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no archetype at index {index} (roster has {available})")]
    UnknownArchetype { index: usize, available: usize },

    #[error("archetype selection is only possible on the select screen (currently {actual:?})")]
    NotSelecting { actual: Screen },
}
