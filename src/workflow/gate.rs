use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::workflow::types::Action;

/// Per-action in-flight flags. A flag is only ever cleared by dropping the
/// permit that set it, so every exit path releases it.
#[derive(Debug, Default)]
pub struct ActionGate {
    flags: [AtomicBool; 4],
}

impl ActionGate {
    pub fn try_acquire(gate: &Arc<Self>, action: Action) -> Option<ActionPermit> {
        gate.flags[action.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ActionPermit {
                gate: Arc::clone(gate),
                action,
            })
    }

    pub fn is_in_flight(&self, action: Action) -> bool {
        self.flags[action.index()].load(Ordering::Acquire)
    }

    pub fn any_in_flight(&self) -> bool {
        Action::ALL.into_iter().any(|action| self.is_in_flight(action))
    }

    pub fn in_flight(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| self.is_in_flight(*action))
            .collect()
    }
}

#[derive(Debug)]
pub struct ActionPermit {
    gate: Arc<ActionGate>,
    action: Action,
}

impl ActionPermit {
    pub fn action(&self) -> Action {
        self.action
    }
}

impl Drop for ActionPermit {
    fn drop(&mut self) {
        self.gate.flags[self.action.index()].store(false, Ordering::Release);
    }
}
