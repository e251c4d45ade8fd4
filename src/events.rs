// Events that flow from spawned store calls back to the TUI
//
// Every store call runs in its own task and reports its outcome on an mpsc
// channel. The UI loop applies them in arrival order, so when two calls race
// the one that resolves last wins.

use crate::facts::{CategorySelection, Fact, FactId};
use crate::store::StoreError;

/// Outcome of one store call
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A list query finished
    FactsLoaded {
        selection: CategorySelection,
        result: Result<Vec<Fact>, StoreError>,
    },

    /// A form submission's insert finished
    FactInserted { result: Result<Fact, StoreError> },

    /// A vote's update finished
    FactUpdated {
        id: FactId,
        result: Result<Fact, StoreError>,
    },
}

impl StoreEvent {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            StoreEvent::FactsLoaded { .. } => "facts_loaded",
            StoreEvent::FactInserted { .. } => "fact_inserted",
            StoreEvent::FactUpdated { .. } => "fact_updated",
        }
    }

    /// The error carried by this event, if the call failed
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            StoreEvent::FactsLoaded { result, .. } => result.as_ref().err(),
            StoreEvent::FactInserted { result } => result.as_ref().err(),
            StoreEvent::FactUpdated { result, .. } => result.as_ref().err(),
        }
    }
}
