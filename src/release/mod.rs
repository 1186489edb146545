//! Go release index: types, HTTP client and upgrade selection

pub mod client;
pub mod selector;
pub mod types;

pub use client::ReleaseClient;
pub use selector::{available_for, select_upgrade, sort_newest_first, SelectOptions};
pub use types::{InstalledVersion, Release, ReleaseFile};
