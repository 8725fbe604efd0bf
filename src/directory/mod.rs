pub mod controls;
pub mod error;
pub mod resolver;
pub mod window;

pub use controls::PaginationControls;
pub use error::DirectoryError;
pub use resolver::{CollectionMode, PaginatedCollectionResolver};
pub use window::PageWindow;
