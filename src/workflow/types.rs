use serde::Serialize;

use crate::{config::DirectoryConfig, workflow::report::RiskReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowView {
    #[default]
    Form,
    Result,
    Recommendations,
}

/// Remote-triggering actions. Each has its own in-flight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Submit,
    Recommend,
    Compare,
    Paginate,
}

impl Action {
    pub const ALL: [Self; 4] = [Self::Submit, Self::Recommend, Self::Compare, Self::Paginate];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Submit => 0,
            Self::Recommend => 1,
            Self::Compare => 2,
            Self::Paginate => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Recommend => "recommend",
            Self::Compare => "compare",
            Self::Paginate => "paginate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Same action already outstanding.
    InFlight,
    /// Response arrived after a session reset.
    Stale,
    /// Not offered from the current state.
    Unavailable,
}

/// Outcome of a workflow command that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<T = ()> {
    Applied(T),
    Skipped(SkipReason),
}

impl<T> Dispatch<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Applied(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub per_page: u32,
    pub remote_per_page: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            per_page: 10,
            remote_per_page: 10,
        }
    }
}

impl From<&DirectoryConfig> for WorkflowSettings {
    fn from(config: &DirectoryConfig) -> Self {
        Self {
            per_page: config.per_page,
            remote_per_page: config.remote_per_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSnapshot {
    pub view: WorkflowView,
    pub generation: u64,
    pub loading: bool,
    pub in_flight: Vec<Action>,
    pub report: Option<RiskReport>,
    pub can_recommend: bool,
    pub can_compare: bool,
    pub registration_prompt_visible: bool,
    pub has_specialists: bool,
}
