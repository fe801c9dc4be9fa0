use serde_json::json;

use super::*;

fn record(id: &str, lat: Option<f64>, lng: Option<f64>) -> EntryRecord {
    EntryRecord {
        id: id.to_owned(),
        user_id: "u1".to_owned(),
        title: format!("Entry {id}"),
        entry_type: EntryKind::Text,
        text_content: Some("hello".to_owned()),
        media_url: None,
        latitude: lat,
        longitude: lng,
        public: false,
        created_at: "2025-01-05T10:00:00Z".to_owned(),
        updated_at: None,
    }
}

// =============================================================
// EntryKind
// =============================================================

#[test]
fn kind_wire_names_are_lowercase() {
    assert_eq!(serde_json::to_value(EntryKind::Picture).unwrap(), json!("picture"));
    let kind: EntryKind = serde_json::from_value(json!("video")).unwrap();
    assert_eq!(kind, EntryKind::Video);
    assert_eq!(EntryKind::Audio.as_str(), "audio");
}

#[test]
fn unknown_kind_fails_decode() {
    assert!(serde_json::from_value::<EntryKind>(json!("sketch")).is_err());
}

#[test]
fn only_text_has_no_media() {
    assert!(!EntryKind::Text.has_media());
    assert!(EntryKind::Audio.has_media());
    assert!(EntryKind::Picture.has_media());
    assert!(EntryKind::Video.has_media());
}

#[test]
fn visual_kinds_are_picture_and_video() {
    assert!(EntryKind::Picture.is_visual());
    assert!(EntryKind::Video.is_visual());
    assert!(!EntryKind::Audio.is_visual());
    assert!(!EntryKind::Text.is_visual());
}

// =============================================================
// GeoEntry conversion
// =============================================================

#[test]
fn from_record_requires_both_coordinates() {
    assert!(GeoEntry::from_record(record("a", Some(1.0), None)).is_none());
    assert!(GeoEntry::from_record(record("a", None, Some(1.0))).is_none());
    assert!(GeoEntry::from_record(record("a", None, None)).is_none());
    let entry = GeoEntry::from_record(record("a", Some(1.0), Some(2.0))).unwrap();
    assert_eq!(entry.coordinates, LatLng::new(1.0, 2.0));
    assert_eq!(entry.owner_id, "u1");
}

#[test]
fn text_body_only_kept_for_text_entries() {
    let mut r = record("a", Some(0.0), Some(0.0));
    r.entry_type = EntryKind::Picture;
    r.media_url = Some("u1/a.jpg".to_owned());
    let entry = GeoEntry::from_record(r).unwrap();
    assert_eq!(entry.text_body, None);
    assert_eq!(entry.media_ref.as_deref(), Some("u1/a.jpg"));

    let mut r = record("b", Some(0.0), Some(0.0));
    r.media_url = Some("stray".to_owned());
    let entry = GeoEntry::from_record(r).unwrap();
    assert_eq!(entry.text_body.as_deref(), Some("hello"));
    assert_eq!(entry.media_ref, None);
}

#[test]
fn geotagged_filters_and_keeps_order() {
    let records = vec![
        record("a", Some(1.0), Some(1.0)),
        record("b", None, Some(1.0)),
        record("c", Some(2.0), Some(2.0)),
        record("d", Some(3.0), None),
        record("e", Some(0.0), Some(0.0)),
    ];
    let ids: Vec<String> = geotagged(records).into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["a", "c", "e"]);
}

#[test]
fn ownership_check_compares_user_id() {
    let entry = GeoEntry::from_record(record("a", Some(0.0), Some(0.0))).unwrap();
    assert!(entry.is_owned_by("u1"));
    assert!(!entry.is_owned_by("u2"));
}

// =============================================================
// JSON decoding
// =============================================================

#[test]
fn store_rows_decode_and_filter() {
    let raw = json!([
        {
            "id": "e1",
            "user_id": "u1",
            "title": "Beach",
            "entry_type": "picture",
            "text_content": null,
            "media_url": "u1/beach.jpg",
            "latitude": 36.5,
            "longitude": -4.9,
            "public": true,
            "created_at": "2025-03-01T09:30:00+00:00",
            "updated_at": "2025-03-01T09:30:00+00:00"
        },
        {
            "id": "e2",
            "user_id": "u2",
            "title": "No location",
            "entry_type": "text",
            "text_content": "hi",
            "latitude": null,
            "longitude": null,
            "created_at": "2025-03-02T09:30:00+00:00"
        }
    ]);
    let records: Vec<EntryRecord> = serde_json::from_value(raw).unwrap();
    let entries = geotagged(records);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "e1");
    assert!(entries[0].is_public);
    assert_eq!(entries[0].kind, EntryKind::Picture);
}
