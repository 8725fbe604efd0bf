mod directory;
mod map;
mod profile;

use std::sync::{Arc, Mutex, PoisonError};

use cardionet::map::{MapCommand, MapError, MapSurface, Marker};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Markers(Vec<i64>),
    Command(MapCommand),
}

/// Map surface that records what it was asked to draw.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
    fail_apply: bool,
}

impl RecordingSurface {
    pub fn failing() -> Self {
        Self {
            fail_apply: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn commands(&self) -> Vec<MapCommand> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Command(command) => Some(command),
                SurfaceCall::Markers(_) => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl MapSurface for RecordingSurface {
    fn show_markers(&mut self, markers: &[Marker]) -> Result<(), MapError> {
        self.record(SurfaceCall::Markers(
            markers.iter().map(|marker| marker.id).collect(),
        ));
        Ok(())
    }

    fn apply(&mut self, command: &MapCommand) -> Result<(), MapError> {
        if self.fail_apply {
            return Err(MapError::new("tile server unreachable"));
        }
        self.record(SurfaceCall::Command(command.clone()));
        Ok(())
    }
}
