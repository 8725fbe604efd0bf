use serde::{Deserialize, Serialize};

/// Paging metadata shared by both collection modes.
///
/// Invariant: `1 <= page <= total_pages` and `total_pages >= 1`, even for an
/// empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PageWindow {
    pub fn total_pages_for(total: u64, per_page: u32) -> u32 {
        let per_page = u64::from(per_page.max(1));
        let pages = total.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Locally computed window; out-of-range requests are clamped.
    pub fn clamped(total: u64, per_page: u32, requested: u32) -> Self {
        let per_page = per_page.max(1);
        let total_pages = Self::total_pages_for(total, per_page);
        Self {
            page: requested.clamp(1, total_pages),
            per_page,
            total,
            total_pages,
        }
    }

    /// Server-reported window. `total_pages` is adopted as reported when
    /// present; the page is only pulled back into range.
    pub fn from_server(page: u32, per_page: u32, total: u64, total_pages: Option<u32>) -> Self {
        let per_page = per_page.max(1);
        let total_pages = match total_pages {
            Some(reported) if reported >= 1 => reported,
            _ => Self::total_pages_for(total, per_page),
        };
        Self {
            page: page.clamp(1, total_pages),
            per_page,
            total,
            total_pages,
        }
    }

    pub fn empty(per_page: u32) -> Self {
        Self::clamped(0, per_page, 1)
    }

    pub fn page_of_index(index: usize, per_page: u32) -> u32 {
        let page = index / per_page.max(1) as usize + 1;
        u32::try_from(page).unwrap_or(u32::MAX)
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    pub fn clamp_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn label(&self) -> String {
        format!("Página {} de {}", self.page, self.total_pages)
    }
}
