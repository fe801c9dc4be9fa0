//! Display strings for popups, modal rows, and the detail view.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::entry::EntryKind;
use crate::geo::LatLng;

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    // Postgres text output: "2025-01-05 10:00:00.123+00" and friends.
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(raw, fmt) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}

/// `Jan 5, 2025`. Unparseable input is returned unchanged.
#[must_use]
pub fn short_date(created_at: &str) -> String {
    match parse_timestamp(created_at) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => {
            tracing::warn!(created_at, "unparseable entry timestamp");
            created_at.to_owned()
        }
    }
}

/// `Sunday, January 5, 2025 at 10:00 AM`. Unparseable input is returned unchanged.
#[must_use]
pub fn long_date(created_at: &str) -> String {
    parse_timestamp(created_at).map_or_else(
        || created_at.to_owned(),
        |dt| dt.format("%A, %B %-d, %Y at %-I:%M %p").to_string(),
    )
}

/// Capitalized kind name for badges.
#[must_use]
pub fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Text => "Text",
        EntryKind::Audio => "Audio",
        EntryKind::Picture => "Picture",
        EntryKind::Video => "Video",
    }
}

/// BEM modifier class for a kind badge.
#[must_use]
pub fn kind_badge_class(kind: EntryKind) -> String {
    format!("entry-badge entry-badge--{}", kind.as_str())
}

#[must_use]
pub fn visibility_label(is_public: bool) -> &'static str {
    if is_public { "Public" } else { "Private" }
}

/// Fill the `{id}` placeholder of an entry route template.
#[must_use]
pub fn entry_href(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}

/// `48.85660, 2.35220`
#[must_use]
pub fn coordinates_label(at: LatLng) -> String {
    format!("{:.5}, {:.5}", at.lat, at.lng)
}

/// OpenStreetMap link centered on `at`.
#[must_use]
pub fn coordinates_link(at: LatLng, zoom: u32) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lng:.6}#map={zoom}/{lat:.6}/{lng:.6}",
        lat = at.lat,
        lng = at.lng,
    )
}

/// Modal heading: `1 entry selected` / `3 entries selected`.
#[must_use]
pub fn selection_heading(count: usize) -> String {
    if count == 1 {
        "1 entry selected".to_owned()
    } else {
        format!("{count} entries selected")
    }
}
