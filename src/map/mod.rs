pub mod markers;
pub mod reactor;
pub mod region;
pub mod types;

pub use markers::{Marker, markers_for};
pub use reactor::{DEFAULT_CENTER, DEFAULT_ZOOM, MapTrigger, react};
pub use region::{MAP_UNAVAILABLE, MapError, MapRegion, MapStatus, MapSurface};
pub use types::{GeoBounds, GeoPoint, MapCommand};
