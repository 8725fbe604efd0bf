use std::time::Duration;

use crate::{
    map::types::{GeoBounds, GeoPoint, MapCommand},
    remote::SpecialistEntity,
};

pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(-12.0464, -77.0428);
pub const DEFAULT_ZOOM: u8 = 12;
pub const SINGLE_MARKER_ZOOM: u8 = 12;
pub const FIT_PADDING_PX: u16 = 40;
pub const FIT_MAX_ZOOM: u8 = 14;
pub const FOCUS_ZOOM: u8 = 15;
pub const FLY_DURATION: Duration = Duration::from_secs(2);

/// Which input moved. Auto-fit only answers collection changes and
/// auto-centre only answers selection changes, so the two never fight.
#[derive(Debug, Clone, Copy)]
pub enum MapTrigger<'a> {
    CollectionChanged(&'a [SpecialistEntity]),
    SelectionChanged(Option<&'a SpecialistEntity>),
}

pub fn react(trigger: MapTrigger<'_>) -> Option<MapCommand> {
    match trigger {
        MapTrigger::CollectionChanged(entities) => {
            let points = entities
                .iter()
                .filter_map(SpecialistEntity::coordinates)
                .collect::<Vec<_>>();
            match points.as_slice() {
                [] => None,
                [single] => Some(MapCommand::SetView {
                    center: *single,
                    zoom: SINGLE_MARKER_ZOOM,
                }),
                _ => GeoBounds::from_points(points.iter().copied()).map(|bounds| {
                    MapCommand::FitBounds {
                        bounds,
                        padding_px: FIT_PADDING_PX,
                        max_zoom: FIT_MAX_ZOOM,
                    }
                }),
            }
        }
        MapTrigger::SelectionChanged(selected) => selected
            .and_then(SpecialistEntity::coordinates)
            .map(|center| MapCommand::FlyTo {
                center,
                zoom: FOCUS_ZOOM,
                duration: FLY_DURATION,
            }),
    }
}
