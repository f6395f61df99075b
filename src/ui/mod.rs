//! Rendering of the dashboard panels. Widgets read [`crate::state::AppState`]
//! and report selection changes back through its setters.

pub mod panels;
pub mod plot;
pub mod table;
