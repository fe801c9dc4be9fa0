//! Map page: the entry map plus its heading, or an empty state when no
//! entry has a location.
//!
//! The `?entry=<id>` query parameter deep-links to one entry; the map flies
//! to it and opens its popup once the markers are mounted.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::map_host::EntryMap;
use crate::state::map::{EMPTY_MAP_MESSAGE, MapInput, location_summary};

/// Query parameter naming the deep-linked entry.
pub const ENTRY_QUERY_PARAM: &str = "entry";

#[component]
pub fn MapPage() -> impl IntoView {
    let input = expect_context::<RwSignal<MapInput>>();
    let query = use_query_map();
    let target_entry_id = Signal::derive(move || query.with(|q| q.get(ENTRY_QUERY_PARAM)));

    let count = move || input.with(|i| i.entries.len());

    view! {
        <div class="map-page">
            <header class="map-page__header">
                <h1 class="map-page__title">"Map"</h1>
                <span class="map-page__summary">{move || location_summary(count())}</span>
            </header>
            <Show
                when={move || count() > 0}
                fallback={|| view! {
                    <div class="map-page__empty">
                        <p>{EMPTY_MAP_MESSAGE}</p>
                    </div>
                }}
            >
                <EntryMap target_entry_id=target_entry_id/>
            </Show>
        </div>
    }
}
