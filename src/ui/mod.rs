//! Ratatui front-end for the Song Sorter. The presentation layer collects
//! raw field values, hands them to the store, and shows the returned message
//! in the footer; it owns all interactive state and none of the validation.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
