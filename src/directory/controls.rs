use serde::Serialize;

use crate::directory::window::PageWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub label: String,
    pub previous_label: &'static str,
    pub next_label: &'static str,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Hidden when everything fits on one page.
    pub visible: bool,
    /// A selection holds the current page; neither direction moves.
    pub pinned: bool,
}

impl From<PageWindow> for PaginationControls {
    fn from(window: PageWindow) -> Self {
        Self {
            label: window.label(),
            previous_label: Self::PREVIOUS,
            next_label: Self::NEXT,
            previous_enabled: window.has_previous(),
            next_enabled: window.has_next(),
            visible: window.total_pages > 1,
            pinned: false,
        }
    }
}

impl PaginationControls {
    pub const PREVIOUS: &'static str = "Anterior";
    pub const NEXT: &'static str = "Siguiente";

    pub fn pinned(self) -> Self {
        Self {
            previous_enabled: false,
            next_enabled: false,
            pinned: true,
            ..self
        }
    }
}
