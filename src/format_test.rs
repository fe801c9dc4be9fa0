use super::*;

#[test]
fn short_date_from_rfc3339() {
    assert_eq!(short_date("2025-01-05T10:00:00Z"), "Jan 5, 2025");
    assert_eq!(short_date("2024-12-31T23:59:59.123456+00:00"), "Dec 31, 2024");
}

#[test]
fn short_date_keeps_the_recorded_offset() {
    assert_eq!(short_date("2025-03-01T23:30:00-05:00"), "Mar 1, 2025");
}

#[test]
fn short_date_accepts_postgres_text_format() {
    assert_eq!(short_date("2025-07-04 08:15:00.5+00"), "Jul 4, 2025");
    assert_eq!(short_date("2025-07-04T08:15:00"), "Jul 4, 2025");
}

#[test]
fn unparseable_dates_pass_through() {
    assert_eq!(short_date("yesterday"), "yesterday");
    assert_eq!(long_date(""), "");
}

#[test]
fn long_date_spells_out_weekday_and_time() {
    assert_eq!(long_date("2025-01-05T10:00:00Z"), "Sunday, January 5, 2025 at 10:00 AM");
    assert_eq!(long_date("2025-01-05T15:07:00Z"), "Sunday, January 5, 2025 at 3:07 PM");
}

#[test]
fn kind_labels_and_badges() {
    assert_eq!(kind_label(EntryKind::Picture), "Picture");
    assert_eq!(kind_label(EntryKind::Text), "Text");
    assert_eq!(kind_badge_class(EntryKind::Video), "entry-badge entry-badge--video");
}

#[test]
fn visibility_labels() {
    assert_eq!(visibility_label(true), "Public");
    assert_eq!(visibility_label(false), "Private");
}

#[test]
fn entry_href_fills_id() {
    assert_eq!(entry_href("/dashboard/entry/{id}", "abc-123"), "/dashboard/entry/abc-123");
}

#[test]
fn coordinates_formatting() {
    let at = LatLng::new(48.856_614, 2.352_222);
    assert_eq!(coordinates_label(at), "48.85661, 2.35222");
    assert_eq!(
        coordinates_link(at, 15),
        "https://www.openstreetmap.org/?mlat=48.856614&mlon=2.352222#map=15/48.856614/2.352222"
    );
}

#[test]
fn selection_heading_pluralizes() {
    assert_eq!(selection_heading(1), "1 entry selected");
    assert_eq!(selection_heading(2), "2 entries selected");
    assert_eq!(selection_heading(0), "0 entries selected");
}
