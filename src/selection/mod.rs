pub mod store;

pub use store::{SelectionOrigin, SelectionState, SelectionSyncStore};
