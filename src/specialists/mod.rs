pub mod panel;
pub mod view;

pub use panel::{SelectionOutcome, SpecialistPanel};
pub use view::{EMPTY_MESSAGE, ListItem, PanelView};
