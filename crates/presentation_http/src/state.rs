//! Application state shared across handlers

use std::sync::Arc;

use application::ports::SkillRequestHandler;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Request router for skill requests
    pub skill: Arc<dyn SkillRequestHandler>,
}

impl AppState {
    /// Create state around a request handler
    pub fn new(skill: Arc<dyn SkillRequestHandler>) -> Self {
        Self { skill }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
