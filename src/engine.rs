//! Map engine: the single owner of all entry-map state.
//!
//! `MapEngine` is browser-independent. The host forwards DOM events (pointer,
//! wheel, resize, button clicks, timer callbacks) and applies the returned
//! [`Action`]s; everything the host renders is read back through the query
//! methods. The drawn shape belongs to the lasso controller and the map
//! dragging flag only changes through lasso transitions.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::cluster::{MarkerGroup, cluster_markers};
use crate::config::MapConfig;
use crate::entry::{GeoEntry, MediaUrls};
use crate::focus::{DeepLinkFocus, FocusStep};
use crate::format;
use crate::geo::{LatLng, LatLngBounds};
use crate::lasso::{Cursor, LassoAction, LassoController};
use crate::marker::{MarkerHandle, MarkerRegistry, MarkerStyle, PopupView};
use crate::selection::{EntryDetail, ModalEffect, SelectionModal, SelectionRow};
use crate::tiles::{Tile, tile_url, visible_tiles};
use crate::viewport::{FlyTo, Point, Viewport};

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCursor(Cursor),
    /// Enable or disable drag-to-pan on the map surface.
    SetMapDragging(bool),
    /// Attach or detach the draw-mode pointer handlers.
    SetPointerCapture(bool),
    /// The lasso outline changed; re-read [`MapEngine::preview_path`].
    ShowPreview,
    ClearPreview,
    /// The selection modal opened with a new result.
    OpenSelection,
    CloseSelection,
    /// Leave the map for the full entry page.
    Navigate { href: String },
    /// Call [`MapEngine::focus_lookup`] after `delay_ms`.
    ScheduleFocusLookup { delay_ms: u32 },
    /// Start ticking [`MapEngine::tick_flight`] until it reports completion.
    StartFlight { duration_ms: u32 },
    FlightFinished,
    /// Call [`MapEngine::focus_popup_due`] after `delay_ms`.
    SchedulePopup { delay_ms: u32 },
    ShowPopup { id: String },
    ClosePopup,
    RenderNeeded,
}

/// Wheel scroll amount in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive is down (zoom out).
    pub dy: f64,
}

/// Map drag-to-pan gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PanGesture {
    #[default]
    Idle,
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
}

pub struct MapEngine {
    config: MapConfig,
    entries: Vec<GeoEntry>,
    media_urls: MediaUrls,
    current_user_id: Option<String>,
    viewport: Viewport,
    markers: MarkerRegistry,
    lasso: LassoController,
    modal: SelectionModal,
    focus: DeepLinkFocus,
    dragging_enabled: bool,
    pan: PanGesture,
    flight: Option<FlyTo>,
    open_popup: Option<String>,
    needs_fit: bool,
}

impl Default for MapEngine {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl MapEngine {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        let mut viewport = Viewport::new(config.initial_center, config.initial_zoom, 0.0, 0.0);
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom);
        let focus = DeepLinkFocus::new(config.focus_timings());
        Self {
            config,
            entries: Vec::new(),
            media_urls: MediaUrls::new(),
            current_user_id: None,
            viewport,
            markers: MarkerRegistry::new(),
            lasso: LassoController::new(),
            modal: SelectionModal::new(),
            focus,
            dragging_enabled: true,
            pan: PanGesture::Idle,
            flight: None,
            open_popup: None,
            needs_fit: false,
        }
    }

    // --- Data inputs ---

    /// Replace the entry list and fit the view to it.
    pub fn load_entries(&mut self, entries: Vec<GeoEntry>) -> Vec<Action> {
        tracing::debug!(count = entries.len(), "entries loaded");
        self.entries = entries;
        if self.open_popup.as_ref().is_some_and(|id| !self.entries.iter().any(|e| &e.id == id)) {
            self.open_popup = None;
        }
        self.needs_fit = !self.entries.is_empty();
        self.try_fit();
        vec![Action::RenderNeeded]
    }

    pub fn set_media_urls(&mut self, media_urls: MediaUrls) -> Vec<Action> {
        self.media_urls = media_urls;
        vec![Action::RenderNeeded]
    }

    pub fn set_current_user(&mut self, user_id: Option<String>) -> Vec<Action> {
        self.current_user_id = user_id;
        vec![Action::RenderNeeded]
    }

    /// Update the map element size in CSS pixels.
    pub fn set_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport.set_size(width, height);
        self.try_fit();
        vec![Action::RenderNeeded]
    }

    fn try_fit(&mut self) {
        if !self.needs_fit || self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return;
        }
        let points: Vec<LatLng> = self.entries.iter().map(|e| e.coordinates).collect();
        if let Some(bounds) = LatLngBounds::from_points(&points) {
            self.viewport.fit_bounds(&bounds, self.config.fit_padding_px, self.config.fit_max_zoom);
            tracing::debug!(zoom = self.viewport.zoom, entries = points.len(), "fit to entry bounds");
        }
        self.needs_fit = false;
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen: Point) -> Vec<Action> {
        if self.lasso.is_draw_mode() {
            let at = self.viewport.screen_to_latlng(screen);
            let actions = self.lasso.pointer_down(at);
            return self.apply_lasso(actions);
        }
        if self.dragging_enabled {
            self.pan = PanGesture::Panning { last_screen: screen };
            if self.flight.take().is_some() {
                return vec![Action::FlightFinished];
            }
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        if self.lasso.is_dragging_locked() {
            let at = self.viewport.screen_to_latlng(screen);
            let actions = self.lasso.pointer_move(at);
            return self.apply_lasso(actions);
        }
        match self.pan {
            PanGesture::Panning { last_screen } if self.dragging_enabled => {
                self.viewport.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                self.pan = PanGesture::Panning { last_screen: screen };
                vec![Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _screen: Point) -> Vec<Action> {
        if self.lasso.is_dragging_locked() {
            let actions = self.lasso.pointer_up(&self.entries);
            return self.apply_lasso(actions);
        }
        self.pan = PanGesture::Idle;
        Vec::new()
    }

    /// The browser cancelled the pointer. A lasso drag is discarded, never completed.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if self.lasso.is_dragging_locked() {
            let actions = self.lasso.pointer_cancel();
            return self.apply_lasso(actions);
        }
        self.pan = PanGesture::Idle;
        Vec::new()
    }

    /// Zoom one level per wheel notch around the pointer. Ignored mid-gesture.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        if self.lasso.is_dragging_locked() || delta.dy == 0.0 {
            return Vec::new();
        }
        let zoom = (self.viewport.zoom - delta.dy.signum()).round();
        self.viewport.zoom_around(screen, zoom);
        vec![Action::RenderNeeded]
    }

    /// Zoom control buttons: `+1` / `-1` around the map center.
    pub fn zoom_by(&mut self, levels: f64) -> Vec<Action> {
        let center = Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5);
        let zoom = (self.viewport.zoom + levels).round();
        self.viewport.zoom_around(center, zoom);
        vec![Action::RenderNeeded]
    }

    // --- Lasso / selection ---

    /// The "Select Area" control.
    pub fn toggle_select_area(&mut self) -> Vec<Action> {
        let actions = self.lasso.toggle();
        self.apply_lasso(actions)
    }

    /// Close the selection modal, removing the drawn shape.
    pub fn dismiss_selection(&mut self) -> Vec<Action> {
        let Some(effect) = self.modal.dismiss() else {
            return Vec::new();
        };
        let mut out = vec![Action::CloseSelection];
        match effect {
            ModalEffect::ClearShape => {
                let actions = self.lasso.clear();
                out.extend(self.apply_lasso(actions));
            }
        }
        out
    }

    pub fn view_selection_detail(&mut self, index: usize) -> Vec<Action> {
        if self.modal.view_detail(index) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn back_to_selection_list(&mut self) -> Vec<Action> {
        self.modal.back_to_list();
        vec![Action::RenderNeeded]
    }

    /// Open the full page of entry `id`.
    #[must_use]
    pub fn view_entry(&self, id: &str) -> Vec<Action> {
        vec![Action::Navigate { href: format::entry_href(&self.config.entry_href_template, id) }]
    }

    fn apply_lasso(&mut self, actions: Vec<LassoAction>) -> Vec<Action> {
        let mut out = Vec::with_capacity(actions.len() + 1);
        for action in actions {
            let mapped = match action {
                LassoAction::SetCursor(cursor) => Action::SetCursor(cursor),
                LassoAction::SetMapDragging(enabled) => {
                    self.dragging_enabled = enabled;
                    if !enabled {
                        self.pan = PanGesture::Idle;
                    }
                    Action::SetMapDragging(enabled)
                }
                LassoAction::SetPointerCapture(on) => Action::SetPointerCapture(on),
                LassoAction::ShowPreview(_) => Action::ShowPreview,
                LassoAction::ClearPreview => {
                    // The result goes away with its shape.
                    if self.modal.dismiss().is_some() {
                        out.push(Action::CloseSelection);
                    }
                    Action::ClearPreview
                }
                LassoAction::SelectionMade(result) => {
                    self.open_popup = None;
                    self.modal.open(result);
                    Action::OpenSelection
                }
            };
            out.push(mapped);
        }
        if !out.is_empty() {
            out.push(Action::RenderNeeded);
        }
        out
    }

    // --- Markers / popups ---

    /// A marker mounted.
    pub fn register_marker(&mut self, id: impl Into<String>, handle: MarkerHandle) {
        self.markers.register(id, handle);
    }

    /// A marker unmounted.
    pub fn deregister_marker(&mut self, id: &str) {
        self.markers.deregister(id);
    }

    pub fn open_popup(&mut self, id: &str) -> Vec<Action> {
        if !self.entries.iter().any(|e| e.id == id) {
            return Vec::new();
        }
        self.open_popup = Some(id.to_owned());
        vec![Action::ShowPopup { id: id.to_owned() }, Action::RenderNeeded]
    }

    pub fn close_popup(&mut self) -> Vec<Action> {
        if self.open_popup.take().is_some() {
            vec![Action::ClosePopup, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Zoom in on a cluster's members.
    pub fn zoom_to_cluster(&mut self, members: &[usize]) -> Vec<Action> {
        let points: Vec<LatLng> =
            members.iter().filter_map(|&i| self.entries.get(i)).map(|e| e.coordinates).collect();
        let Some(bounds) = LatLngBounds::from_points(&points) else {
            return Vec::new();
        };
        self.viewport.fit_bounds(&bounds, self.config.fit_padding_px, self.config.max_zoom);
        vec![Action::RenderNeeded]
    }

    // --- Deep-link focus ---

    /// The map mounted, optionally with a deep-linked entry id.
    pub fn on_map_mounted(&mut self, target: Option<&str>) -> Vec<Action> {
        match self.focus.on_mount(target) {
            Some(FocusStep::Lookup { delay_ms }) => vec![Action::ScheduleFocusLookup { delay_ms }],
            _ => Vec::new(),
        }
    }

    /// The mount-delay timer fired.
    pub fn focus_lookup(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        for step in self.focus.lookup(&self.markers) {
            match step {
                FocusStep::FlyTo { coordinates, zoom, duration_ms } => {
                    self.flight = Some(FlyTo::new(&self.viewport, coordinates, zoom, f64::from(duration_ms)));
                    out.push(Action::StartFlight { duration_ms });
                }
                FocusStep::OpenPopup { delay_ms, .. } => out.push(Action::SchedulePopup { delay_ms }),
                FocusStep::Lookup { .. } | FocusStep::Done => {}
            }
        }
        out
    }

    /// The popup-delay timer fired.
    pub fn focus_popup_due(&mut self) -> Vec<Action> {
        match self.focus.popup_due() {
            Some(id) => self.open_popup(&id),
            None => Vec::new(),
        }
    }

    /// The map is unmounting; drop any pending focus step.
    pub fn cancel_focus(&mut self) {
        self.focus.cancel();
        self.flight = None;
    }

    /// Advance the current fly-to animation to `elapsed_ms` after its start.
    pub fn tick_flight(&mut self, elapsed_ms: f64) -> Vec<Action> {
        let Some(flight) = &self.flight else {
            return vec![Action::FlightFinished];
        };
        let (center, zoom) = flight.sample(elapsed_ms);
        let finished = flight.is_finished(elapsed_ms);
        self.viewport.set_view(center, zoom);
        if finished {
            self.flight = None;
            vec![Action::RenderNeeded, Action::FlightFinished]
        } else {
            vec![Action::RenderNeeded]
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[must_use]
    pub fn entries(&self) -> &[GeoEntry] {
        &self.entries
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn lasso(&self) -> &LassoController {
        &self.lasso
    }

    #[must_use]
    pub fn modal(&self) -> &SelectionModal {
        &self.modal
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    #[must_use]
    pub fn dragging_enabled(&self) -> bool {
        self.dragging_enabled
    }

    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.lasso.is_draw_mode() { Cursor::Crosshair } else { Cursor::Default }
    }

    /// Markers and clusters for the current view.
    #[must_use]
    pub fn marker_groups(&self) -> Vec<MarkerGroup> {
        cluster_markers(
            &self.entries,
            &self.viewport,
            self.config.cluster_radius_px,
            self.config.disable_clustering_at_zoom,
        )
    }

    #[must_use]
    pub fn marker_style(&self, entry: &GeoEntry) -> MarkerStyle {
        MarkerStyle::for_entry(entry, self.current_user_id.as_deref())
    }

    #[must_use]
    pub fn to_screen(&self, at: LatLng) -> Point {
        self.viewport.latlng_to_screen(at)
    }

    /// Tiles covering the view with their resolved URLs.
    #[must_use]
    pub fn tiles(&self) -> Vec<(Tile, String)> {
        visible_tiles(&self.viewport)
            .into_iter()
            .map(|tile| {
                let url = tile_url(&self.config.tile_url_template, &self.config.tile_subdomains, &tile);
                (tile, url)
            })
            .collect()
    }

    /// The lasso outline in screen pixels.
    #[must_use]
    pub fn preview_path(&self) -> Option<Vec<Point>> {
        self.lasso
            .preview()
            .map(|points| points.iter().map(|&p| self.viewport.latlng_to_screen(p)).collect())
    }

    /// The open popup and its anchor on screen.
    #[must_use]
    pub fn popup(&self) -> Option<(PopupView, Point)> {
        let id = self.open_popup.as_deref()?;
        let entry = self.entries.iter().find(|e| e.id == id)?;
        let view = PopupView::build(entry, &self.media_urls, &self.config.entry_href_template);
        Some((view, self.viewport.latlng_to_screen(entry.coordinates)))
    }

    #[must_use]
    pub fn selection_heading(&self) -> String {
        self.modal.heading()
    }

    #[must_use]
    pub fn selection_rows(&self) -> Vec<SelectionRow> {
        self.modal.rows(&self.config.entry_href_template)
    }

    #[must_use]
    pub fn selection_detail(&self) -> Option<EntryDetail> {
        self.modal.detail(&self.config.entry_href_template)
    }
}
