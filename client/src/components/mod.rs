//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `map_host` hosts the map engine; the rest are presentational pieces it
//! renders from the current `MapView` snapshot.

pub mod map_host;
pub mod marker_popup;
pub mod select_area_button;
pub mod selection_modal;
