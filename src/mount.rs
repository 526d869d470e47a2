use crate::view::ViewState;
use std::sync::{Arc, Mutex, PoisonError};

/// The one region every load writes into. Each call replaces whatever was
/// shown before.
pub trait Mount {
    fn replace(&self, state: ViewState);
}

/// Keeps every state it was given, most recent last.
#[derive(Debug, Clone, Default)]
pub struct MemoryMount {
    history: Arc<Mutex<Vec<ViewState>>>,
}

impl MemoryMount {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the region shows right now. Loading before the first write.
    pub fn current(&self) -> ViewState {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn history(&self) -> Vec<ViewState> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Mount for MemoryMount {
    fn replace(&self, state: ViewState) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(state);
    }
}
