use std::{collections::BTreeSet, sync::Arc};

use crate::{
    directory::{CollectionMode, DirectoryError, PageWindow, PaginatedCollectionResolver},
    map::{MapCommand, MapRegion, MapSurface},
    remote::{Recommendations, RemoteDataPort, SpecialistEntity, SpecialistId},
    selection::{SelectionOrigin, SelectionSyncStore},
    specialists::view::PanelView,
};

/// What a selection did to the rest of the panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionOutcome {
    pub changed: bool,
    pub navigated_to: Option<u32>,
    pub map_command: Option<MapCommand>,
}

/// List, map and shared selection over one resolver. The reconciliation
/// between them lives here and nowhere else.
pub struct SpecialistPanel {
    resolver: PaginatedCollectionResolver,
    selection: SelectionSyncStore,
    map: MapRegion,
    detected_profile: Option<String>,
    recommended_ids: BTreeSet<SpecialistId>,
}

impl SpecialistPanel {
    pub fn recommended(recommendations: Recommendations, per_page: u32) -> Self {
        let recommended_ids = recommendations
            .specialists
            .iter()
            .map(|entity| entity.id)
            .collect();
        let mut panel = Self::build(
            PaginatedCollectionResolver::external(recommendations.specialists, per_page),
            Some(recommendations.detected_profile),
        );
        panel.recommended_ids = recommended_ids;
        panel
    }

    pub fn directory(entities: Vec<SpecialistEntity>, per_page: u32) -> Self {
        Self::build(PaginatedCollectionResolver::external(entities, per_page), None)
    }

    /// Stand-alone directory: one bulk fetch, then paged locally.
    pub async fn load_directory(
        port: &dyn RemoteDataPort,
        bulk_per_page: u32,
        per_page: u32,
    ) -> Result<Self, DirectoryError> {
        let response = port
            .list_directory(1, bulk_per_page)
            .await
            .map_err(|cause| DirectoryError::new(1, cause))?;
        tracing::info!(
            target: "directory",
            fetched = response.specialists.len(),
            total = response.total,
            "directory_loaded"
        );
        Ok(Self::directory(response.specialists, per_page))
    }

    fn build(resolver: PaginatedCollectionResolver, detected_profile: Option<String>) -> Self {
        let mut panel = Self {
            resolver,
            selection: SelectionSyncStore::new(),
            map: MapRegion::headless(),
            detected_profile,
            recommended_ids: BTreeSet::new(),
        };
        panel.map.on_collection_changed(panel.resolver.collection());
        panel
    }

    pub fn attach_map(&mut self, surface: Box<dyn MapSurface>) {
        self.map.attach(surface);
    }

    pub async fn select(&mut self, id: SpecialistId, origin: SelectionOrigin) -> SelectionOutcome {
        if self.resolver.find(id).is_none() {
            tracing::debug!(target: "selection", id, "unknown_id_ignored");
            return SelectionOutcome::default();
        }

        let changed = self.selection.select(id, origin);
        let navigated_to = self.follow_selection().await;
        let map_command = if changed {
            self.map.on_selection_changed(self.resolver.find(id))
        } else {
            None
        };
        SelectionOutcome {
            changed,
            navigated_to,
            map_command,
        }
    }

    pub async fn marker_clicked(&mut self, id: SpecialistId) -> SelectionOutcome {
        match self.map.marker_clicked(id) {
            Some(id) => self.select(id, SelectionOrigin::Map).await,
            None => SelectionOutcome::default(),
        }
    }

    /// Page navigation. In external mode a located selection keeps its page
    /// on screen; the request only applies when nothing is selected there.
    pub async fn go_to_page(&mut self, requested: u32) -> Result<PageWindow, DirectoryError> {
        let target = match self.selected_page() {
            Some(page) if self.resolver.mode() == CollectionMode::External => {
                if page != requested {
                    tracing::debug!(target: "selection", requested, page, "selection_pins_page");
                }
                page
            }
            _ => requested,
        };
        self.resolve(target).await
    }

    pub async fn next_page(&mut self) -> Result<PageWindow, DirectoryError> {
        let page = self.resolver.window().page.saturating_add(1);
        self.go_to_page(page).await
    }

    pub async fn previous_page(&mut self) -> Result<PageWindow, DirectoryError> {
        let page = self.resolver.window().page.saturating_sub(1);
        self.go_to_page(page).await
    }

    /// Switches to the remote directory at page 1. Selection is kept and the
    /// detected-profile label is dropped. A failed fetch changes nothing.
    pub async fn view_all(
        &mut self,
        port: Arc<dyn RemoteDataPort>,
        per_page: u32,
    ) -> Result<PageWindow, DirectoryError> {
        let window = self.resolver.switch_to_remote(port, per_page).await?;
        self.detected_profile = None;
        self.map.on_collection_changed(self.resolver.collection());
        Ok(window)
    }

    pub fn mode(&self) -> CollectionMode {
        self.resolver.mode()
    }

    pub fn window(&self) -> PageWindow {
        self.resolver.window()
    }

    pub fn page_entities(&self) -> &[SpecialistEntity] {
        self.resolver.page_entities()
    }

    pub fn selected(&self) -> Option<SpecialistId> {
        self.selection.selected()
    }

    pub fn selection(&self) -> &SelectionSyncStore {
        &self.selection
    }

    pub fn map(&self) -> &MapRegion {
        &self.map
    }

    pub fn detected_profile(&self) -> Option<&str> {
        self.detected_profile.as_deref()
    }

    pub fn view(&self) -> PanelView {
        PanelView::render(
            &self.resolver,
            self.selected(),
            &self.recommended_ids,
            self.detected_profile.as_deref(),
            &self.map,
        )
    }

    /// Resolves a page and keeps the map on what the list now shows.
    async fn resolve(&mut self, page: u32) -> Result<PageWindow, DirectoryError> {
        let window = self.resolver.resolve_page(page).await?;
        self.map.on_collection_changed(self.resolver.collection());
        Ok(window)
    }

    fn selected_page(&self) -> Option<u32> {
        self.selected().and_then(|id| self.resolver.locate(id))
    }

    async fn follow_selection(&mut self) -> Option<u32> {
        if self.resolver.mode() != CollectionMode::External {
            return None;
        }
        let page = self.selected_page()?;
        if page == self.resolver.window().page {
            return None;
        }
        match self.resolve(page).await {
            Ok(window) => Some(window.page),
            Err(err) => {
                tracing::warn!(target: "selection", error = %err, "follow_selection_failed");
                None
            }
        }
    }
}
