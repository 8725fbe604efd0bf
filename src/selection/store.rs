use tokio::sync::watch;

use crate::remote::SpecialistId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_id: Option<SpecialistId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    List,
    Map,
}

/// Single write path for the highlighted specialist shared by the list and
/// the map. Writes are last-writer-wins; subscribers only wake on a real
/// change.
#[derive(Debug)]
pub struct SelectionSyncStore {
    sender: watch::Sender<SelectionState>,
}

impl Default for SelectionSyncStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSyncStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SelectionState::default());
        Self { sender }
    }

    /// Returns `true` when the selection moved.
    pub fn select(&self, id: SpecialistId, origin: SelectionOrigin) -> bool {
        let changed = self.sender.send_if_modified(|state| {
            if state.selected_id == Some(id) {
                return false;
            }
            state.selected_id = Some(id);
            true
        });
        if changed {
            tracing::debug!(target: "selection", id, origin = ?origin, "selected");
        }
        changed
    }

    pub fn clear(&self) -> bool {
        let changed = self.sender.send_if_modified(|state| state.selected_id.take().is_some());
        if changed {
            tracing::debug!(target: "selection", "cleared");
        }
        changed
    }

    pub fn selected(&self) -> Option<SpecialistId> {
        self.sender.borrow().selected_id
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.sender.subscribe()
    }
}
