use serde::Serialize;

use crate::{
    map::types::GeoPoint,
    remote::{SpecialistEntity, SpecialistId},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: SpecialistId,
    pub position: GeoPoint,
    pub title: String,
    pub popup: Vec<String>,
}

impl Marker {
    pub fn for_entity(entity: &SpecialistEntity) -> Option<Self> {
        let position = entity.coordinates()?;
        let mut popup = vec![entity.name.clone()];
        if let Some(address) = entity.display_address() {
            popup.push(address.to_string());
        }
        if let Some(price) = entity.visit_price.as_deref().filter(|price| !price.is_empty()) {
            popup.push(format!("Precio: {price}"));
        }
        Some(Self {
            id: entity.id,
            position,
            title: entity.name.clone(),
            popup,
        })
    }
}

pub fn markers_for(entities: &[SpecialistEntity]) -> Vec<Marker> {
    entities.iter().filter_map(Marker::for_entity).collect()
}
