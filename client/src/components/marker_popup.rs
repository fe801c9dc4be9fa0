//! Marker popup card: media preview, title, kind badge, date, entry link.

use leptos::prelude::*;

use entry_map::marker::MediaPreview;

use crate::state::map::PopupAnchor;
use crate::util::map_input::position_style;

/// Popup anchored above its marker. `on_view` receives the entry id.
#[component]
pub fn MarkerPopup(anchor: PopupAnchor, on_close: Callback<()>, on_view: Callback<String>) -> impl IntoView {
    let PopupAnchor { popup, x, y } = anchor;
    let entry_id = popup.entry_id.clone();
    let on_link = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        on_view.run(entry_id.clone());
    };

    let preview = match popup.preview {
        MediaPreview::None => ().into_any(),
        MediaPreview::Image { url } => view! {
            <img class="marker-popup__image" src=url alt=popup.title.clone() loading="lazy"/>
        }
        .into_any(),
        MediaPreview::Video { url } => view! {
            <div class="marker-popup__video">
                <video src=url muted=true preload="metadata" playsinline=true></video>
                <span class="marker-popup__play" aria-hidden="true">"▶"</span>
            </div>
        }
        .into_any(),
    };

    view! {
        <div
            class="marker-popup"
            style=position_style(x, y)
            on:pointerdown=move |ev| ev.stop_propagation()
            on:wheel=move |ev| ev.stop_propagation()
        >
            <div class="marker-popup__card">
                <button class="marker-popup__close" title="Close" on:click=move |_| on_close.run(())>
                    "✕"
                </button>
                {preview}
                <h3 class="marker-popup__title">{popup.title}</h3>
                <div class="marker-popup__meta">
                    <span class=popup.badge_class>{popup.kind_label}</span>
                    <span class="marker-popup__date">{popup.date}</span>
                </div>
                <a class="marker-popup__link" href=popup.href on:click=on_link>
                    "View entry"
                </a>
            </div>
            <div class="marker-popup__tip"></div>
        </div>
    }
}
