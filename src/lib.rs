//! Core library surface for the Song Sorter TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the CSV-backed store, the domain type, and the interactive loop.

pub mod models;
pub mod store;
pub mod ui;

/// Convenience re-exports for the persistence layer.
pub use store::{SongStore, StoreError};

/// The domain type other layers manipulate.
pub use models::SongEntry;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
