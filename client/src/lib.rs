//! # entry-map-client
//!
//! Leptos + WASM frontend for the journal's entry map. Renders the map page,
//! its marker layer and popups, the "Select Area" lasso, and the selection
//! modal. All map state lives in the browser-independent `entry_map` crate;
//! the `EntryMap` host component bridges it to the DOM.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
