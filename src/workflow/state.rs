use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;

use crate::{
    clinical::ClinicalInput,
    remote::EvaluationResult,
    specialists::SpecialistPanel,
    workflow::{report::RegistrationPrompt, types::WorkflowView},
};

pub type SharedPanel = Arc<AsyncMutex<SpecialistPanel>>;

/// Session state behind the workflow lock. Never held across an await.
#[derive(Default)]
pub struct WorkflowState {
    pub view: WorkflowView,
    pub generation: u64,
    pub result: Option<EvaluationResult>,
    pub submitted_input: Option<ClinicalInput>,
    pub panel: Option<SharedPanel>,
    pub registration: RegistrationPrompt,
}

impl WorkflowState {
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Starts a new session: everything tied to the previous one is dropped
    /// and responses tagged with the old generation become stale.
    pub fn reset(&mut self) -> u64 {
        self.generation += 1;
        self.view = WorkflowView::Form;
        self.result = None;
        self.submitted_input = None;
        self.panel = None;
        self.registration.reset();
        self.generation
    }

    pub fn registration_prompt_visible(&self) -> bool {
        self.view == WorkflowView::Result && self.registration.is_pending()
    }
}
