pub mod cli;
pub mod clinical;
pub mod comparison;
pub mod config;
pub mod directory;
pub mod logging;
pub mod map;
pub mod notify;
pub mod profile;
pub mod remote;
pub mod selection;
pub mod session;
pub mod specialists;
pub mod testing;
pub mod workflow;
