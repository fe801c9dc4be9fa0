//! "Select Area" map control toggling lasso draw mode.

use leptos::prelude::*;

/// Top-right map control. `active` mirrors the lasso draw mode.
#[component]
pub fn SelectAreaButton(#[prop(into)] active: Signal<bool>, on_toggle: Callback<()>) -> impl IntoView {
    view! {
        <div class="map-control map-control--select-area">
            <button
                class=move || {
                    if active.get() { "map-control__button map-control__button--active" } else { "map-control__button" }
                }
                aria-pressed=move || if active.get() { "true" } else { "false" }
                title=move || if active.get() { "Cancel area selection" } else { "Draw around entries to select them" }
                on:pointerdown=move |ev| ev.stop_propagation()
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_toggle.run(());
                }
            >
                {move || if active.get() { "Cancel" } else { "Select Area" }}
            </button>
        </div>
    }
}
