//! Bridge component between Leptos and the sans-io `entry_map::engine::MapEngine`.
//!
//! ARCHITECTURE
//! ============
//! The engine owns every piece of map state. This host forwards pointer,
//! wheel, button, and timer events to it, applies the returned actions
//! (navigation, timers, the fly-to ticker), and publishes a fresh
//! [`MapView`] snapshot for the layers to render.
//!
//! The engine and its timers are hydrate-only. Server rendering produces the
//! empty frame from `MapView::default()`.

use leptos::prelude::*;

use entry_map::engine::{Action, MapEngine};

use crate::components::marker_popup::MarkerPopup;
use crate::components::select_area_button::SelectAreaButton;
use crate::components::selection_modal::SelectionModal;
#[cfg(feature = "hydrate")]
use crate::state::map::mount_entries;
use crate::state::map::{MapInput, MapView, MarkerView};
use crate::util::map_input::position_style;
#[cfg(feature = "hydrate")]
use crate::util::map_input::{is_primary_button, surface_point, surface_size, wheel_delta};

#[cfg(feature = "hydrate")]
use gloo_timers::callback::{Interval, Timeout};
#[cfg(feature = "hydrate")]
use js_sys::Date;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;
#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;
#[cfg(feature = "hydrate")]
use std::sync::Arc;
#[cfg(feature = "hydrate")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;

/// Fly-to animation frame interval.
#[cfg(feature = "hydrate")]
const FLIGHT_FRAME_MS: u32 = 16;

#[cfg(feature = "hydrate")]
#[derive(Default)]
struct MapTimers {
    focus_lookup: Option<Timeout>,
    popup: Option<Timeout>,
    flight: Option<Interval>,
}

/// Drop a timer on the next turn of the event loop. Timers may be released
/// from inside their own callback.
#[cfg(feature = "hydrate")]
fn release_later<T: 'static>(timer: T) {
    Timeout::new(0, move || drop(timer)).forget();
}

#[cfg(feature = "hydrate")]
#[derive(Clone)]
struct MapHost {
    engine: Rc<RefCell<MapEngine>>,
    timers: Rc<RefCell<MapTimers>>,
    view: RwSignal<MapView>,
    alive: Arc<AtomicBool>,
    navigate: Rc<dyn Fn(&str)>,
}

#[cfg(feature = "hydrate")]
impl MapHost {
    fn run(&self, op: impl FnOnce(&mut MapEngine) -> Vec<Action>) {
        if !self.alive.load(Ordering::Relaxed) {
            self.shutdown();
            return;
        }
        let actions = op(&mut self.engine.borrow_mut());
        if !actions.is_empty() {
            self.apply(actions);
        }
    }

    fn apply(&self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Navigate { href } => {
                    log::debug!("entry map: navigate to {href}");
                    (self.navigate)(&href);
                }
                Action::ScheduleFocusLookup { delay_ms } => {
                    let host = self.clone();
                    let timer = Timeout::new(delay_ms, move || host.run(MapEngine::focus_lookup));
                    if let Some(old) = self.timers.borrow_mut().focus_lookup.replace(timer) {
                        release_later(old);
                    }
                }
                Action::SchedulePopup { delay_ms } => {
                    let host = self.clone();
                    let timer = Timeout::new(delay_ms, move || host.run(MapEngine::focus_popup_due));
                    if let Some(old) = self.timers.borrow_mut().popup.replace(timer) {
                        release_later(old);
                    }
                }
                Action::StartFlight { duration_ms } => {
                    log::debug!("entry map: fly-to started ({duration_ms} ms)");
                    self.start_flight();
                }
                Action::FlightFinished => {
                    if let Some(ticker) = self.timers.borrow_mut().flight.take() {
                        release_later(ticker);
                    }
                }
                Action::SetPointerCapture(on) => {
                    log::debug!("entry map: draw layer {}", if on { "attached" } else { "detached" });
                }
                Action::SetCursor(_)
                | Action::SetMapDragging(_)
                | Action::ShowPreview
                | Action::ClearPreview
                | Action::OpenSelection
                | Action::CloseSelection
                | Action::ShowPopup { .. }
                | Action::ClosePopup
                | Action::RenderNeeded => {}
            }
        }
        self.view.set(MapView::from_engine(&self.engine.borrow()));
    }

    fn start_flight(&self) {
        let host = self.clone();
        let started_ms = Date::now();
        let ticker = Interval::new(FLIGHT_FRAME_MS, move || {
            let elapsed_ms = (Date::now() - started_ms).max(0.0);
            host.run(|engine| engine.tick_flight(elapsed_ms));
        });
        if let Some(old) = self.timers.borrow_mut().flight.replace(ticker) {
            release_later(old);
        }
    }

    /// The map unmounted: drop pending focus steps and every timer.
    fn shutdown(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.cancel_focus();
        }
        let mut timers = self.timers.borrow_mut();
        if let Some(timer) = timers.focus_lookup.take() {
            release_later(timer);
        }
        if let Some(timer) = timers.popup.take() {
            release_later(timer);
        }
        if let Some(ticker) = timers.flight.take() {
            release_later(ticker);
        }
    }
}

/// Copyable handle used by event handlers and callbacks.
#[derive(Clone, Copy)]
struct HostHandle {
    #[cfg(feature = "hydrate")]
    host: StoredValue<MapHost, LocalStorage>,
}

impl HostHandle {
    fn run(self, op: impl FnOnce(&mut MapEngine) -> Vec<Action>) {
        #[cfg(feature = "hydrate")]
        {
            let _ = self.host.try_with_value(|host| host.run(op));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = op;
        }
    }
}

/// Which engine entry point a pointer event feeds.
#[derive(Clone, Copy)]
enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Forward one kind of pointer event to the engine. `isolate` keeps the
/// event from reaching the surface's own handlers.
fn pointer_handler(
    handle: HostHandle,
    surface_ref: NodeRef<leptos::html::Div>,
    phase: PointerPhase,
    isolate: bool,
) -> impl Fn(leptos::ev::PointerEvent) + Copy + 'static {
    move |ev: leptos::ev::PointerEvent| {
        #[cfg(feature = "hydrate")]
        {
            if isolate {
                ev.stop_propagation();
            }
            if matches!(phase, PointerPhase::Down) && !is_primary_button(ev.button()) {
                return;
            }
            let Some(surface) = surface_ref.get() else {
                return;
            };
            let target = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok());
            let at = surface_point(&ev, &surface);
            match phase {
                PointerPhase::Down => {
                    if let Some(el) = &target {
                        let _ = el.set_pointer_capture(ev.pointer_id());
                    }
                    let (width, height) = surface_size(&surface);
                    handle.run(|engine| {
                        let mut actions = engine.set_size(width, height);
                        actions.extend(engine.on_pointer_down(at));
                        actions
                    });
                }
                PointerPhase::Move => handle.run(|engine| engine.on_pointer_move(at)),
                PointerPhase::Up => {
                    if let Some(el) = &target {
                        let _ = el.release_pointer_capture(ev.pointer_id());
                    }
                    handle.run(|engine| engine.on_pointer_up(at));
                }
                PointerPhase::Cancel => {
                    if let Some(el) = &target {
                        let _ = el.release_pointer_capture(ev.pointer_id());
                    }
                    handle.run(MapEngine::on_pointer_cancel);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, handle, surface_ref, phase, isolate);
        }
    }
}

/// Interactive entry map: tiles, markers and clusters, popups, the
/// "Select Area" lasso, and the selection modal.
///
/// `target_entry_id` is the deep-linked entry to fly to after mount.
#[component]
pub fn EntryMap(#[prop(into)] target_entry_id: Signal<Option<String>>) -> impl IntoView {
    let input = expect_context::<RwSignal<MapInput>>();
    let view = RwSignal::new(MapView::default());
    let surface_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    let handle = {
        let navigate = use_navigate();
        let alive = Arc::new(AtomicBool::new(true));
        let alive_for_cleanup = Arc::clone(&alive);
        on_cleanup(move || alive_for_cleanup.store(false, Ordering::Relaxed));

        let host = MapHost {
            engine: Rc::new(RefCell::new(MapEngine::new(input.get_untracked().config))),
            timers: Rc::default(),
            view,
            alive,
            navigate: Rc::new(move |href: &str| navigate(href, NavigateOptions::default())),
        };
        HostHandle { host: StoredValue::new_local(host) }
    };
    #[cfg(not(feature = "hydrate"))]
    let handle = {
        let _ = input;
        HostHandle {}
    };

    // Size the viewport once the surface exists.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let Some(surface) = surface_ref.get() else {
            return;
        };
        let (width, height) = surface_size(&surface);
        handle.run(|engine| engine.set_size(width, height));
    });

    // Entries, media URLs, and viewer identity.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let data = input.get();
        log::info!("entry map: {} entries", data.entries.len());
        handle.run(|engine| {
            let actions = mount_entries(engine, data);
            log::debug!("entry map: {} markers registered", engine.markers().len());
            actions
        });
    });

    // Deep-link focus.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let target = target_entry_id.get();
        handle.run(|engine| engine.on_map_mounted(target.as_deref()));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = target_entry_id;

    // Pan handlers live on the surface; lasso handlers on the draw layer,
    // which only exists while draw mode is on.
    let on_pan_down = pointer_handler(handle, surface_ref, PointerPhase::Down, false);
    let on_pan_move = pointer_handler(handle, surface_ref, PointerPhase::Move, false);
    let on_pan_up = pointer_handler(handle, surface_ref, PointerPhase::Up, false);
    let on_pan_cancel = pointer_handler(handle, surface_ref, PointerPhase::Cancel, false);
    let on_draw_down = pointer_handler(handle, surface_ref, PointerPhase::Down, true);
    let on_draw_move = pointer_handler(handle, surface_ref, PointerPhase::Move, true);
    let on_draw_up = pointer_handler(handle, surface_ref, PointerPhase::Up, true);
    let on_draw_cancel = pointer_handler(handle, surface_ref, PointerPhase::Cancel, true);

    let on_wheel = move |ev: leptos::ev::WheelEvent| {
        #[cfg(feature = "hydrate")]
        {
            ev.prevent_default();
            let Some(surface) = surface_ref.get() else {
                return;
            };
            let at = surface_point(&ev, &surface);
            let delta = wheel_delta(&ev);
            handle.run(|engine| engine.on_wheel(at, delta));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_toggle = Callback::new(move |()| handle.run(MapEngine::toggle_select_area));
    let on_close_popup = Callback::new(move |()| handle.run(MapEngine::close_popup));
    let on_view_entry = Callback::new(move |id: String| handle.run(|engine| engine.view_entry(&id)));
    let on_close_modal = Callback::new(move |()| handle.run(MapEngine::dismiss_selection));
    let on_select_row = Callback::new(move |index: usize| handle.run(|engine| engine.view_selection_detail(index)));
    let on_back = Callback::new(move |()| handle.run(MapEngine::back_to_selection_list));

    let draw_mode = Signal::derive(move || view.with(|v| v.draw_mode));

    let tiles = move || {
        view.with(|v| {
            v.tiles
                .iter()
                .map(|tile| {
                    let style = format!(
                        "left: {:.1}px; top: {:.1}px; width: {:.1}px; height: {:.1}px",
                        tile.left, tile.top, tile.size, tile.size
                    );
                    view! {
                        <img class="entry-map__tile" src=tile.url.clone() style=style alt="" draggable="false"/>
                    }
                })
                .collect_view()
        })
    };

    let markers = move || {
        view.with(|v| {
            v.markers
                .iter()
                .cloned()
                .map(|marker| match marker {
                    MarkerView::Pin { id, title, x, y, class, icon_url } => view! {
                        <button
                            class=class
                            style=position_style(x, y)
                            title=title.clone()
                            on:pointerdown=move |ev| ev.stop_propagation()
                            on:click=move |_| handle.run(|engine| engine.open_popup(&id))
                        >
                            <img src=icon_url alt=title.clone() draggable="false"/>
                        </button>
                    }
                    .into_any(),
                    MarkerView::Cluster { members, x, y, label, class, .. } => view! {
                        <button
                            class=class
                            style=position_style(x, y)
                            on:pointerdown=move |ev| ev.stop_propagation()
                            on:click=move |_| handle.run(|engine| engine.zoom_to_cluster(&members))
                        >
                            <span>{label}</span>
                        </button>
                    }
                    .into_any(),
                })
                .collect_view()
        })
    };

    let lasso = move || {
        view.with(|v| v.preview.clone()).map(|points| {
            view! {
                <svg class="entry-map__lasso" aria-hidden="true">
                    <polygon class="entry-map__lasso-shape" points=points></polygon>
                </svg>
            }
        })
    };

    let popup = move || {
        view.with(|v| v.popup.clone())
            .map(|anchor| view! { <MarkerPopup anchor=anchor on_close=on_close_popup on_view=on_view_entry/> })
    };

    let modal = move || {
        view.with(|v| v.modal.clone()).map(|snapshot| {
            view! {
                <SelectionModal
                    snapshot=snapshot
                    on_close=on_close_modal
                    on_select=on_select_row
                    on_back=on_back
                    on_view=on_view_entry
                />
            }
        })
    };

    view! {
        <div class="entry-map">
            <div
                class=move || {
                    if draw_mode.get() { "entry-map__surface entry-map__surface--drawing" } else { "entry-map__surface" }
                }
                style=move || view.with(|v| format!("cursor: {}", v.cursor))
                node_ref=surface_ref
                on:pointerdown=on_pan_down
                on:pointermove=on_pan_move
                on:pointerup=on_pan_up
                on:pointercancel=on_pan_cancel
                on:wheel=on_wheel
            >
                <div class="entry-map__tiles">{tiles}</div>
                {lasso}
                <div class="entry-map__markers">{markers}</div>
                <Show when=move || draw_mode.get()>
                    <div
                        class="entry-map__draw-layer"
                        on:pointerdown=on_draw_down
                        on:pointermove=on_draw_move
                        on:pointerup=on_draw_up
                        on:pointercancel=on_draw_cancel
                    ></div>
                </Show>
                {popup}

                <div
                    class="entry-map__controls"
                    on:pointerdown=move |ev| ev.stop_propagation()
                    on:wheel=move |ev| ev.stop_propagation()
                >
                    <div class="entry-map__zoom">
                        <button
                            class="entry-map__zoom-btn"
                            title="Zoom in"
                            disabled=move || view.with(|v| !v.can_zoom_in)
                            on:click=move |_| handle.run(|engine| engine.zoom_by(1.0))
                        >
                            "+"
                        </button>
                        <button
                            class="entry-map__zoom-btn"
                            title="Zoom out"
                            disabled=move || view.with(|v| !v.can_zoom_out)
                            on:click=move |_| handle.run(|engine| engine.zoom_by(-1.0))
                        >
                            "−"
                        </button>
                    </div>
                    <SelectAreaButton active=draw_mode on_toggle=on_toggle/>
                </div>

                <div class="entry-map__attribution">{move || view.with(|v| v.attribution.clone())}</div>
            </div>
            {modal}
        </div>
    }
}
