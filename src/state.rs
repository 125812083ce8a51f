// src/state.rs
use std::sync::Arc;

use crate::services::assistant::Assistant;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant: Assistant::new(assistant_name),
        }
    }

    pub fn shared(assistant_name: impl Into<String>) -> SharedState {
        Arc::new(Self::new(assistant_name))
    }
}
