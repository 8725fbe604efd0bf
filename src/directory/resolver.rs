use std::sync::Arc;

use crate::{
    directory::{error::DirectoryError, window::PageWindow},
    remote::{RemoteDataPort, SpecialistEntity, SpecialistId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionMode {
    /// Whole collection in memory, paged by slicing.
    External,
    /// Each page fetched from the directory service.
    Remote,
}

enum CollectionSource {
    External {
        entities: Vec<SpecialistEntity>,
    },
    Remote {
        port: Arc<dyn RemoteDataPort>,
        page_entities: Vec<SpecialistEntity>,
    },
}

/// One paging contract over two backing modes. Callers never branch on the
/// mode to page, locate or list; only [`CollectionMode`] is exposed for
/// presentation.
pub struct PaginatedCollectionResolver {
    source: CollectionSource,
    per_page: u32,
    window: PageWindow,
}

impl PaginatedCollectionResolver {
    pub fn external(entities: Vec<SpecialistEntity>, per_page: u32) -> Self {
        let window = PageWindow::clamped(entities.len() as u64, per_page, 1);
        Self {
            source: CollectionSource::External { entities },
            per_page: window.per_page,
            window,
        }
    }

    /// Starts in remote mode by fetching page 1.
    pub async fn remote(
        port: Arc<dyn RemoteDataPort>,
        per_page: u32,
    ) -> Result<Self, DirectoryError> {
        let per_page = per_page.max(1);
        let (window, page_entities) = fetch_remote_page(port.as_ref(), 1, per_page).await?;
        Ok(Self {
            source: CollectionSource::Remote {
                port,
                page_entities,
            },
            per_page,
            window,
        })
    }

    pub fn mode(&self) -> CollectionMode {
        match self.source {
            CollectionSource::External { .. } => CollectionMode::External,
            CollectionSource::Remote { .. } => CollectionMode::Remote,
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn page_entities(&self) -> &[SpecialistEntity] {
        match &self.source {
            CollectionSource::External { entities } => {
                let start = self.window.offset().min(entities.len());
                let end = (start + self.per_page as usize).min(entities.len());
                &entities[start..end]
            }
            CollectionSource::Remote { page_entities, .. } => page_entities,
        }
    }

    /// Everything currently known: the full collection in external mode,
    /// the fetched page in remote mode.
    pub fn collection(&self) -> &[SpecialistEntity] {
        match &self.source {
            CollectionSource::External { entities } => entities,
            CollectionSource::Remote { page_entities, .. } => page_entities,
        }
    }

    pub fn find(&self, id: SpecialistId) -> Option<&SpecialistEntity> {
        self.collection().iter().find(|entity| entity.id == id)
    }

    /// Page that contains `id`, if the resolver can tell without a remote
    /// call.
    pub fn locate(&self, id: SpecialistId) -> Option<u32> {
        match &self.source {
            CollectionSource::External { entities } => entities
                .iter()
                .position(|entity| entity.id == id)
                .map(|index| PageWindow::page_of_index(index, self.per_page)),
            CollectionSource::Remote { page_entities, .. } => page_entities
                .iter()
                .any(|entity| entity.id == id)
                .then_some(self.window.page),
        }
    }

    /// Resolves a logical page. Out-of-range requests are clamped. On failure
    /// the current page and window are left untouched.
    pub async fn resolve_page(&mut self, requested: u32) -> Result<PageWindow, DirectoryError> {
        let page = self.window.clamp_page(requested);
        match &mut self.source {
            CollectionSource::External { entities } => {
                self.window = PageWindow::clamped(entities.len() as u64, self.per_page, page);
            }
            CollectionSource::Remote {
                port,
                page_entities,
            } => {
                let port = Arc::clone(port);
                let (window, fetched) =
                    fetch_remote_page(port.as_ref(), page, self.per_page).await?;
                *page_entities = fetched;
                self.window = window;
            }
        }
        tracing::debug!(
            target: "directory",
            requested,
            page = self.window.page,
            total_pages = self.window.total_pages,
            mode = ?self.mode(),
            "page_resolved"
        );
        Ok(self.window)
    }

    /// Leaves whatever is loaded and restarts on remote page 1. The two
    /// entity sets are not reconciled. Nothing changes if the fetch fails.
    pub async fn switch_to_remote(
        &mut self,
        port: Arc<dyn RemoteDataPort>,
        per_page: u32,
    ) -> Result<PageWindow, DirectoryError> {
        let per_page = per_page.max(1);
        let (window, page_entities) = fetch_remote_page(port.as_ref(), 1, per_page).await?;
        self.source = CollectionSource::Remote {
            port,
            page_entities,
        };
        self.per_page = per_page;
        self.window = window;
        tracing::info!(
            target: "directory",
            total = window.total,
            total_pages = window.total_pages,
            "switched_to_remote"
        );
        Ok(window)
    }
}

async fn fetch_remote_page(
    port: &dyn RemoteDataPort,
    page: u32,
    per_page: u32,
) -> Result<(PageWindow, Vec<SpecialistEntity>), DirectoryError> {
    let response = port
        .list_directory(page, per_page)
        .await
        .map_err(|cause| DirectoryError::new(page, cause))?;
    let window = PageWindow::from_server(
        response.page,
        response.per_page.unwrap_or(per_page),
        response.total,
        response.total_pages,
    );
    Ok((window, response.specialists))
}
