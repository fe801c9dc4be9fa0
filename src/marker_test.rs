use super::*;

const HREF: &str = "/dashboard/entry/{id}";

fn entry(id: &str, owner: &str, kind: EntryKind) -> GeoEntry {
    GeoEntry {
        id: id.to_owned(),
        owner_id: owner.to_owned(),
        title: format!("Title {id}"),
        kind,
        text_body: None,
        media_ref: None,
        coordinates: LatLng::new(1.0, 2.0),
        is_public: true,
        created_at: "2025-01-05T10:00:00Z".to_owned(),
    }
}

fn urls(pairs: &[(&str, &str)]) -> MediaUrls {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

// =============================================================
// MarkerStyle
// =============================================================

#[test]
fn own_entries_are_blue() {
    let e = entry("a", "me", EntryKind::Text);
    let style = MarkerStyle::for_entry(&e, Some("me"));
    assert_eq!(style, MarkerStyle::Own);
    assert!(style.icon_url().contains("blue"));
    assert_eq!(style.class(), "map-marker map-marker--own");
}

#[test]
fn other_entries_are_red() {
    let e = entry("a", "someone", EntryKind::Text);
    assert_eq!(MarkerStyle::for_entry(&e, Some("me")), MarkerStyle::Other);
    assert!(MarkerStyle::Other.icon_url().contains("red"));
}

#[test]
fn anonymous_viewer_sees_only_other() {
    let e = entry("a", "me", EntryKind::Text);
    assert_eq!(MarkerStyle::for_entry(&e, None), MarkerStyle::Other);
}

// =============================================================
// Popup
// =============================================================

#[test]
fn picture_popup_uses_resolved_url() {
    let e = entry("p", "me", EntryKind::Picture);
    let popup = PopupView::build(&e, &urls(&[("p", "https://cdn/p.jpg")]), HREF);
    assert_eq!(popup.preview, MediaPreview::Image { url: "https://cdn/p.jpg".to_owned() });
    assert_eq!(popup.title, "Title p");
    assert_eq!(popup.kind_label, "Picture");
    assert_eq!(popup.badge_class, "entry-badge entry-badge--picture");
    assert_eq!(popup.date, "Jan 5, 2025");
    assert_eq!(popup.href, "/dashboard/entry/p");
}

#[test]
fn video_popup_gets_video_preview() {
    let e = entry("v", "me", EntryKind::Video);
    let popup = PopupView::build(&e, &urls(&[("v", "https://cdn/v.mp4")]), HREF);
    assert_eq!(popup.preview, MediaPreview::Video { url: "https://cdn/v.mp4".to_owned() });
}

#[test]
fn missing_url_means_no_preview() {
    let e = entry("p", "me", EntryKind::Picture);
    assert_eq!(PopupView::build(&e, &MediaUrls::new(), HREF).preview, MediaPreview::None);
}

#[test]
fn audio_and_text_never_preview() {
    let map = urls(&[("a", "https://cdn/a.mp3"), ("t", "https://cdn/t")]);
    assert_eq!(MediaPreview::for_entry(&entry("a", "me", EntryKind::Audio), &map), MediaPreview::None);
    assert_eq!(MediaPreview::for_entry(&entry("t", "me", EntryKind::Text), &map), MediaPreview::None);
}

// =============================================================
// Registry
// =============================================================

#[test]
fn register_and_lookup() {
    let mut registry = MarkerRegistry::new();
    registry.register("a", MarkerHandle::new(LatLng::new(1.0, 2.0)));
    assert_eq!(registry.len(), 1);
    let lookup: &dyn MarkerLookup = &registry;
    assert_eq!(lookup.marker("a").map(MarkerHandle::position), Some(LatLng::new(1.0, 2.0)));
    assert!(lookup.marker("b").is_none());
}

#[test]
fn deregister_removes_handle() {
    let mut registry = MarkerRegistry::new();
    registry.register("a", MarkerHandle::new(LatLng::new(1.0, 2.0)));
    assert!(registry.deregister("a").is_some());
    assert!(registry.get("a").is_none());
    assert!(registry.is_empty());
    assert!(registry.deregister("a").is_none());
}

#[test]
fn reregister_replaces_handle() {
    let mut registry = MarkerRegistry::new();
    registry.register("a", MarkerHandle::new(LatLng::new(1.0, 2.0)));
    registry.register("a", MarkerHandle::new(LatLng::new(3.0, 4.0)));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("a").map(MarkerHandle::position), Some(LatLng::new(3.0, 4.0)));
}
