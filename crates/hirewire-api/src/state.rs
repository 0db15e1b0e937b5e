//! Application state shared across handlers

use std::sync::Arc;

use hirewire_agents::CoordinatorAgent;
use hirewire_llm::ProviderKind;
use hirewire_marketplace::SpecialistSelector;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The coordinating agent; holds no per-job state
    pub coordinator: Arc<CoordinatorAgent>,
}

impl AppState {
    pub fn new(coordinator: Arc<CoordinatorAgent>) -> Self {
        Self { coordinator }
    }

    pub fn selector(&self) -> &SpecialistSelector {
        self.coordinator.selector()
    }

    pub fn llm_provider(&self) -> ProviderKind {
        self.coordinator.brain().provider_kind()
    }
}
