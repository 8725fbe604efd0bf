use std::fmt::{Display, Formatter};

use crate::{
    map::{
        markers::{Marker, markers_for},
        reactor::{DEFAULT_CENTER, DEFAULT_ZOOM, MapTrigger, react},
        types::MapCommand,
    },
    remote::{SpecialistEntity, SpecialistId},
};

pub const MAP_UNAVAILABLE: &str = "Mapa no disponible";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapError {
    pub message: String,
}

impl MapError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "map surface failed: {}", self.message)
    }
}

impl std::error::Error for MapError {}

/// Rendering backend for the map region. Failures are confined to the region.
pub trait MapSurface: Send {
    fn show_markers(&mut self, markers: &[Marker]) -> Result<(), MapError>;
    fn apply(&mut self, command: &MapCommand) -> Result<(), MapError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapStatus {
    /// No surface attached; commands are still computed and recorded.
    Headless,
    Ready,
    Unavailable { reason: String },
}

pub struct MapRegion {
    surface: Option<Box<dyn MapSurface>>,
    status: MapStatus,
    markers: Vec<Marker>,
    last_command: Option<MapCommand>,
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::headless()
    }
}

impl MapRegion {
    /// A region with no surface yet, framed on the default city view.
    pub fn headless() -> Self {
        Self {
            surface: None,
            status: MapStatus::Headless,
            markers: Vec::new(),
            last_command: Some(MapCommand::SetView {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            }),
        }
    }

    /// Attaches a surface and replays the current markers and camera.
    pub fn attach(&mut self, mut surface: Box<dyn MapSurface>) {
        let replay = surface.show_markers(&self.markers).and_then(|()| {
            match &self.last_command {
                Some(command) => surface.apply(command),
                None => Ok(()),
            }
        });
        match replay {
            Ok(()) => {
                self.surface = Some(surface);
                self.status = MapStatus::Ready;
            }
            Err(err) => self.degrade(err),
        }
    }

    /// Replaces the markers with those of `entities` and refits the camera
    /// when the set actually changed. Markers of entities that left the
    /// collection are dropped, so clicks only resolve to what is listed.
    pub fn on_collection_changed(&mut self, entities: &[SpecialistEntity]) -> Option<MapCommand> {
        let markers = markers_for(entities);
        if markers == self.markers {
            return None;
        }
        self.markers = markers;
        if let Some(surface) = self.surface.as_mut() {
            if let Err(err) = surface.show_markers(&self.markers) {
                self.degrade(err);
            }
        }
        let command = react(MapTrigger::CollectionChanged(entities))?;
        self.dispatch(command.clone());
        Some(command)
    }

    pub fn on_selection_changed(&mut self, selected: Option<&SpecialistEntity>) -> Option<MapCommand> {
        let command = react(MapTrigger::SelectionChanged(selected))?;
        self.dispatch(command.clone());
        Some(command)
    }

    /// Maps a marker click back to a selectable id.
    pub fn marker_clicked(&self, id: SpecialistId) -> Option<SpecialistId> {
        self.markers
            .iter()
            .any(|marker| marker.id == id)
            .then_some(id)
    }

    pub fn status(&self) -> &MapStatus {
        &self.status
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.status, MapStatus::Unavailable { .. })
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        (!self.is_available()).then_some(MAP_UNAVAILABLE)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn last_command(&self) -> Option<&MapCommand> {
        self.last_command.as_ref()
    }

    fn dispatch(&mut self, command: MapCommand) {
        if let Some(surface) = self.surface.as_mut() {
            if let Err(err) = surface.apply(&command) {
                self.degrade(err);
            }
        }
        tracing::debug!(target: "map", command = ?command, "map_command");
        self.last_command = Some(command);
    }

    fn degrade(&mut self, err: MapError) {
        tracing::warn!(target: "map", error = %err, "map_unavailable");
        self.surface = None;
        self.status = MapStatus::Unavailable {
            reason: err.message,
        };
    }
}
