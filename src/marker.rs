//! Marker styling, popup content, and the marker handle registry.
//!
//! Rendering is driven by the entry list alone. The registry only records
//! which markers are currently mounted so the deep-link focus sequence can
//! find its target; registering or dropping a handle never changes what is
//! drawn.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use std::collections::HashMap;

use crate::entry::{EntryKind, GeoEntry, MediaUrls};
use crate::format;
use crate::geo::LatLng;

/// Marker color scheme, chosen by entry ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// The viewer's own entry (blue).
    Own,
    /// Someone else's public entry (red).
    Other,
}

impl MarkerStyle {
    #[must_use]
    pub fn for_entry(entry: &GeoEntry, current_user_id: Option<&str>) -> Self {
        match current_user_id {
            Some(user) if entry.is_owned_by(user) => Self::Own,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Own => "map-marker map-marker--own",
            Self::Other => "map-marker map-marker--other",
        }
    }

    /// Pin image for this style.
    #[must_use]
    pub fn icon_url(self) -> &'static str {
        match self {
            Self::Own => "/static/markers/marker-icon-blue.png",
            Self::Other => "/static/markers/marker-icon-red.png",
        }
    }
}

/// Visual preview shown at the top of a popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPreview {
    None,
    Image { url: String },
    /// Rendered muted with `preload="metadata"` and a play-icon overlay; never autoplays.
    Video { url: String },
}

impl MediaPreview {
    /// Preview for `entry`, when it is visual and its URL has been resolved.
    #[must_use]
    pub fn for_entry(entry: &GeoEntry, media_urls: &MediaUrls) -> Self {
        if !entry.kind.is_visual() {
            return Self::None;
        }
        let Some(url) = media_urls.get(&entry.id) else {
            return Self::None;
        };
        match entry.kind {
            EntryKind::Picture => Self::Image { url: url.clone() },
            EntryKind::Video => Self::Video { url: url.clone() },
            EntryKind::Text | EntryKind::Audio => Self::None,
        }
    }
}

/// Content of a marker popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub entry_id: String,
    pub preview: MediaPreview,
    pub title: String,
    pub kind_label: &'static str,
    pub badge_class: String,
    pub date: String,
    pub href: String,
}

impl PopupView {
    #[must_use]
    pub fn build(entry: &GeoEntry, media_urls: &MediaUrls, href_template: &str) -> Self {
        Self {
            entry_id: entry.id.clone(),
            preview: MediaPreview::for_entry(entry, media_urls),
            title: entry.title.clone(),
            kind_label: format::kind_label(entry.kind),
            badge_class: format::kind_badge_class(entry.kind),
            date: format::short_date(&entry.created_at),
            href: format::entry_href(href_template, &entry.id),
        }
    }
}

/// A mounted marker, as seen from outside the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    position: LatLng,
}

impl MarkerHandle {
    #[must_use]
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }

    /// Where the marker is anchored.
    #[must_use]
    pub fn position(&self) -> LatLng {
        self.position
    }
}

/// Read-only view of the mounted markers.
pub trait MarkerLookup {
    fn marker(&self, entry_id: &str) -> Option<&MarkerHandle>;
}

/// Mounted marker handles keyed by entry id.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    handles: HashMap<String, MarkerHandle>,
}

impl MarkerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mounted marker, replacing any earlier handle for the same id.
    pub fn register(&mut self, entry_id: impl Into<String>, handle: MarkerHandle) {
        self.handles.insert(entry_id.into(), handle);
    }

    /// Forget a marker on unmount.
    pub fn deregister(&mut self, entry_id: &str) -> Option<MarkerHandle> {
        self.handles.remove(entry_id)
    }

    #[must_use]
    pub fn get(&self, entry_id: &str) -> Option<&MarkerHandle> {
        self.handles.get(entry_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl MarkerLookup for MarkerRegistry {
    fn marker(&self, entry_id: &str) -> Option<&MarkerHandle> {
        self.get(entry_id)
    }
}
