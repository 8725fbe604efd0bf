pub mod error;
pub mod facade;
pub mod gate;
pub mod report;
pub mod state;
pub mod types;

pub use error::WorkflowError;
pub use facade::EvaluationWorkflow;
pub use gate::{ActionGate, ActionPermit};
pub use report::{RegistrationPrompt, RiskReport, colour_band};
pub use state::SharedPanel;
pub use types::{
    Action, Dispatch, SkipReason, WorkflowSettings, WorkflowSnapshot, WorkflowView,
};
