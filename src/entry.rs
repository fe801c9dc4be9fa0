//! Journal entries as the map sees them.
//!
//! The hosting page hands over `EntryRecord` rows exactly as they come out of
//! the journal store: nullable coordinates, snake_case field names. Only rows
//! carrying both latitude and longitude become [`GeoEntry`]s; everything the
//! map renders, clusters, or selects is a `GeoEntry`.

#[cfg(test)]
#[path = "entry_test.rs"]
mod entry_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Resolved media URLs keyed by entry id. Entries missing here render without a preview.
pub type MediaUrls = HashMap<String, String>;

/// What an entry contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Text,
    Audio,
    Picture,
    Video,
}

impl EntryKind {
    /// Lowercase wire name, also used as the badge label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Picture => "picture",
            Self::Video => "video",
        }
    }

    /// Whether entries of this kind carry a media locator instead of a text body.
    #[must_use]
    pub fn has_media(self) -> bool {
        !matches!(self, Self::Text)
    }

    /// Whether the popup can show a visual preview for this kind.
    #[must_use]
    pub fn is_visual(self) -> bool {
        matches!(self, Self::Picture | Self::Video)
    }
}

/// A journal entry row as delivered by the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub entry_type: EntryKind,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub public: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One entry eligible for map display. Coordinates are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEntry {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub kind: EntryKind,
    pub text_body: Option<String>,
    pub media_ref: Option<String>,
    pub coordinates: LatLng,
    pub is_public: bool,
    pub created_at: String,
}

impl GeoEntry {
    /// Convert a record, or `None` when either coordinate is missing.
    #[must_use]
    pub fn from_record(record: EntryRecord) -> Option<Self> {
        let (Some(lat), Some(lng)) = (record.latitude, record.longitude) else {
            return None;
        };
        let text_body = if record.entry_type.has_media() { None } else { record.text_content };
        let media_ref = if record.entry_type.has_media() { record.media_url } else { None };
        Some(Self {
            id: record.id,
            owner_id: record.user_id,
            title: record.title,
            kind: record.entry_type,
            text_body,
            media_ref,
            coordinates: LatLng::new(lat, lng),
            is_public: record.public,
            created_at: record.created_at,
        })
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Errors decoding an entry list handed over by the hosting page.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("invalid entry list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Keep only records with both coordinates, preserving input order.
#[must_use]
pub fn geotagged(records: Vec<EntryRecord>) -> Vec<GeoEntry> {
    let total = records.len();
    let entries: Vec<GeoEntry> = records.into_iter().filter_map(GeoEntry::from_record).collect();
    if entries.len() < total {
        tracing::debug!(total, kept = entries.len(), "dropped entries without coordinates");
    }
    entries
}
