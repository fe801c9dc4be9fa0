//! Modal listing lasso-selected entries, with an inline detail view.
//!
//! Closing the modal (button, backdrop, Escape) clears the drawn shape; the
//! host routes `on_close` to `MapEngine::dismiss_selection`.

use leptos::prelude::*;

use entry_map::format::kind_badge_class;
use entry_map::selection::{DetailBody, EntryDetail, SelectionRow};

use crate::state::map::ModalSnapshot;

#[component]
pub fn SelectionModal(
    snapshot: ModalSnapshot,
    on_close: Callback<()>,
    on_select: Callback<usize>,
    on_back: Callback<()>,
    on_view: Callback<String>,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    let (heading, body) = match snapshot {
        ModalSnapshot::List { heading, rows } => (heading, selection_list(rows, on_select, on_view).into_any()),
        ModalSnapshot::Detail { heading, detail } => (heading, entry_detail(detail, on_back, on_view).into_any()),
    };

    view! {
        <div class="selection-modal__backdrop" on:click=move |_| on_close.run(())>
            <div
                class="selection-modal"
                role="dialog"
                aria-modal="true"
                tabindex="0"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <div class="selection-modal__header">
                    <h2>{heading}</h2>
                    <button class="selection-modal__close" title="Close" on:click=move |_| on_close.run(())>
                        "✕"
                    </button>
                </div>
                <div class="selection-modal__body">{body}</div>
            </div>
        </div>
    }
}

fn selection_list(rows: Vec<SelectionRow>, on_select: Callback<usize>, on_view: Callback<String>) -> impl IntoView {
    view! {
        <ul class="selection-modal__list">
            {rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| {
                    let SelectionRow { id, title, kind, kind_label, date, href } = row;
                    // The link opens the entry; the rest of the row drills into it.
                    let open_entry = move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_view.run(id.clone());
                    };
                    view! {
                        <li class="selection-modal__row" on:click=move |_| on_select.run(index)>
                            <span class="selection-modal__row-title">{title}</span>
                            <span class=kind_badge_class(kind)>{kind_label}</span>
                            <span class="selection-modal__row-date">{date}</span>
                            <a class="btn selection-modal__row-view" href=href on:click=open_entry>
                                "View"
                            </a>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

fn entry_detail(detail: EntryDetail, on_back: Callback<()>, on_view: Callback<String>) -> impl IntoView {
    let entry_id = detail.id.clone();
    let open_entry = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        on_view.run(entry_id.clone());
    };
    let body = match detail.body {
        DetailBody::Text(text) => view! { <p class="selection-modal__text">{text}</p> }.into_any(),
        DetailBody::Media { kind } => view! {
            <p class="selection-modal__media-note">
                {format!("This {} entry opens in the full entry view.", kind.as_str())}
            </p>
        }
        .into_any(),
    };

    view! {
        <div class="selection-modal__detail">
            <button class="selection-modal__back" on:click=move |_| on_back.run(())>
                "← Back to list"
            </button>
            <h3 class="selection-modal__detail-title">{detail.title}</h3>
            <div class="selection-modal__detail-meta">
                <span class=kind_badge_class(detail.kind)>{detail.kind_label}</span>
                <span class="entry-badge entry-badge--visibility">{detail.visibility_label}</span>
                <span class="selection-modal__detail-date">{detail.date}</span>
            </div>
            {body}
            <a
                class="selection-modal__coords"
                href=detail.coordinates_link
                target="_blank"
                rel="noopener noreferrer"
            >
                {detail.coordinates_label}
            </a>
            <a class="btn selection-modal__open" href=detail.href on:click=open_entry>
                "View full entry"
            </a>
        </div>
    }
}
