use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    directory::{CollectionMode, PaginatedCollectionResolver, PaginationControls},
    map::{MapRegion, Marker},
    remote::{SpecialistEntity, SpecialistId},
};

pub const EMPTY_MESSAGE: &str = "No se encontraron cardiólogos disponibles.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: SpecialistId,
    pub name: String,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub price: Option<String>,
    pub phone: Option<String>,
    pub selected: bool,
    pub recommended: bool,
    pub mappable: bool,
}

impl ListItem {
    fn from_entity(
        entity: &SpecialistEntity,
        selected: Option<SpecialistId>,
        recommended_ids: &BTreeSet<SpecialistId>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            specialty: entity.specialty.clone(),
            address: entity.display_address().map(str::to_string),
            rating: entity.rating.map(|rating| rating.clamp(0.0, 5.0)),
            review_count: entity.review_count,
            price: entity.visit_price.clone(),
            phone: entity.phone.clone(),
            selected: selected == Some(entity.id),
            recommended: recommended_ids.contains(&entity.id),
            mappable: entity.is_mappable(),
        }
    }
}

/// Everything the list and map collaborators need to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub banner: String,
    pub items: Vec<ListItem>,
    pub controls: PaginationControls,
    pub empty_message: Option<&'static str>,
    pub map_placeholder: Option<&'static str>,
    pub markers: Vec<Marker>,
}

impl PanelView {
    pub(crate) fn render(
        resolver: &PaginatedCollectionResolver,
        selected: Option<SpecialistId>,
        recommended_ids: &BTreeSet<SpecialistId>,
        detected_profile: Option<&str>,
        map: &MapRegion,
    ) -> Self {
        let window = resolver.window();
        let banner = match (resolver.mode(), detected_profile) {
            (CollectionMode::External, Some(profile)) => format!("Perfil Detectado: {profile}"),
            _ => format!("Todos los Cardiólogos ({})", window.total),
        };
        let items = resolver
            .page_entities()
            .iter()
            .map(|entity| ListItem::from_entity(entity, selected, recommended_ids))
            .collect::<Vec<_>>();
        let empty_message = items.is_empty().then_some(EMPTY_MESSAGE);
        let controls = PaginationControls::from(window);
        let pinned = resolver.mode() == CollectionMode::External
            && selected.and_then(|id| resolver.locate(id)) == Some(window.page);

        Self {
            banner,
            items,
            controls: if pinned { controls.pinned() } else { controls },
            empty_message,
            map_placeholder: map.placeholder(),
            markers: map.markers().to_vec(),
        }
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.items.iter().find(|item| item.selected)
    }
}
