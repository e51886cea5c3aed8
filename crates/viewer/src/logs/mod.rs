//! Log inspection pages: file listing and per-file view.

pub mod page;
pub mod route;
pub mod store;

pub use store::LogStore;
