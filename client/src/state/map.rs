//! Entry map inputs and render snapshot.
//!
//! DESIGN
//! ======
//! `MapInput` is what the hosting page hands over (entries, media URLs, the
//! viewer, config). `MapView` is a plain-data snapshot of `MapEngine` taken
//! after every engine call; components read only the snapshot, so the engine
//! itself never needs to be reactive.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use entry_map::cluster::MarkerGroup;
use entry_map::config::MapConfig;
use entry_map::engine::{Action, MapEngine};
use entry_map::entry::{GeoEntry, MediaUrls};
use entry_map::marker::{MarkerHandle, PopupView};
use entry_map::selection::{EntryDetail, SelectionRow};
use entry_map::viewport::Point;

/// Data supplied by the hosting page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapInput {
    pub entries: Vec<GeoEntry>,
    pub media_urls: MediaUrls,
    pub current_user_id: Option<String>,
    pub config: MapConfig,
}

/// One tile image.
#[derive(Clone, Debug, PartialEq)]
pub struct TileView {
    pub key: String,
    pub url: String,
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

/// One thing drawn in the marker layer.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerView {
    Pin {
        id: String,
        title: String,
        x: f64,
        y: f64,
        class: &'static str,
        icon_url: &'static str,
    },
    Cluster {
        key: String,
        members: Vec<usize>,
        x: f64,
        y: f64,
        label: String,
        class: &'static str,
    },
}

/// Open popup and where to anchor it.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupAnchor {
    pub popup: PopupView,
    pub x: f64,
    pub y: f64,
}

/// Selection modal contents.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalSnapshot {
    List { heading: String, rows: Vec<SelectionRow> },
    Detail { heading: String, detail: EntryDetail },
}

/// Everything the map components render.
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub cursor: &'static str,
    pub draw_mode: bool,
    pub dragging_enabled: bool,
    pub zoom: f64,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub tiles: Vec<TileView>,
    pub markers: Vec<MarkerView>,
    /// SVG `points` attribute of the lasso outline.
    pub preview: Option<String>,
    pub popup: Option<PopupAnchor>,
    pub modal: Option<ModalSnapshot>,
    pub attribution: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            cursor: "grab",
            draw_mode: false,
            dragging_enabled: true,
            zoom: 0.0,
            can_zoom_in: true,
            can_zoom_out: true,
            tiles: Vec::new(),
            markers: Vec::new(),
            preview: None,
            popup: None,
            modal: None,
            attribution: String::new(),
        }
    }
}

impl MapView {
    /// Snapshot `engine` for rendering.
    pub fn from_engine(engine: &MapEngine) -> Self {
        let viewport = engine.viewport();
        Self {
            cursor: engine.cursor().css(),
            draw_mode: engine.lasso().is_draw_mode(),
            dragging_enabled: engine.dragging_enabled(),
            zoom: viewport.zoom,
            can_zoom_in: viewport.zoom < viewport.max_zoom,
            can_zoom_out: viewport.zoom > viewport.min_zoom,
            tiles: tile_views(engine),
            markers: marker_views(engine),
            preview: engine.preview_path().map(|path| svg_points(&path)),
            popup: engine.popup().map(|(popup, at)| PopupAnchor { popup, x: at.x, y: at.y }),
            modal: modal_snapshot(engine),
            attribution: engine.config().attribution.clone(),
        }
    }
}

fn tile_views(engine: &MapEngine) -> Vec<TileView> {
    engine
        .tiles()
        .into_iter()
        .map(|(tile, url)| TileView {
            key: format!("{}/{}/{}", tile.z, tile.x, tile.y),
            url,
            left: tile.left,
            top: tile.top,
            size: tile.size,
        })
        .collect()
}

fn marker_views(engine: &MapEngine) -> Vec<MarkerView> {
    let entries = engine.entries();
    engine
        .marker_groups()
        .into_iter()
        .filter_map(|group| {
            let at = engine.to_screen(group.position());
            match group {
                MarkerGroup::Single { index, .. } => {
                    let entry = entries.get(index)?;
                    let style = engine.marker_style(entry);
                    Some(MarkerView::Pin {
                        id: entry.id.clone(),
                        title: entry.title.clone(),
                        x: at.x,
                        y: at.y,
                        class: style.class(),
                        icon_url: style.icon_url(),
                    })
                }
                MarkerGroup::Cluster { ref members, .. } => Some(MarkerView::Cluster {
                    key: cluster_key(entries, members),
                    members: members.clone(),
                    x: at.x,
                    y: at.y,
                    label: group.badge(),
                    class: group.badge_class(),
                }),
            }
        })
        .collect()
}

/// Stable key for a cluster: the id of its seed entry.
fn cluster_key(entries: &[GeoEntry], members: &[usize]) -> String {
    members
        .first()
        .and_then(|&i| entries.get(i))
        .map_or_else(String::new, |e| format!("cluster:{}", e.id))
}

fn modal_snapshot(engine: &MapEngine) -> Option<ModalSnapshot> {
    if !engine.modal().is_open() {
        return None;
    }
    let heading = engine.selection_heading();
    Some(match engine.selection_detail() {
        Some(detail) => ModalSnapshot::Detail { heading, detail },
        None => ModalSnapshot::List { heading, rows: engine.selection_rows() },
    })
}

/// Load `input` into `engine`, registering a marker for every entry and
/// dropping the markers of entries that disappeared.
pub fn mount_entries(engine: &mut MapEngine, input: MapInput) -> Vec<Action> {
    let MapInput { entries, media_urls, current_user_id, .. } = input;
    let stale: Vec<String> = engine
        .entries()
        .iter()
        .filter(|old| !entries.iter().any(|e| e.id == old.id))
        .map(|old| old.id.clone())
        .collect();
    for id in &stale {
        engine.deregister_marker(id);
    }
    for entry in &entries {
        engine.register_marker(entry.id.clone(), MarkerHandle::new(entry.coordinates));
    }
    let mut actions = engine.set_current_user(current_user_id);
    actions.extend(engine.set_media_urls(media_urls));
    actions.extend(engine.load_entries(entries));
    actions
}

/// Shown instead of the map when no entry has a location.
pub const EMPTY_MAP_MESSAGE: &str =
    "No geotagged entries yet. Create a new entry and allow location access to see it on the map.";

/// Header line counting the entries on the map.
pub fn location_summary(count: usize) -> String {
    if count == 1 { "1 entry with a location".to_owned() } else { format!("{count} entries with a location") }
}

/// `x,y x,y ...` with one decimal.
pub fn svg_points(path: &[Point]) -> String {
    path.iter().map(|p| format!("{:.1},{:.1}", p.x, p.y)).collect::<Vec<_>>().join(" ")
}
