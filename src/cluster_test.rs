use super::*;
use crate::entry::EntryKind;
use crate::viewport::project;

fn entry_at(id: &str, at: LatLng) -> GeoEntry {
    GeoEntry {
        id: id.to_owned(),
        owner_id: "u1".to_owned(),
        title: id.to_owned(),
        kind: EntryKind::Text,
        text_body: None,
        media_ref: None,
        coordinates: at,
        is_public: true,
        created_at: "2025-01-05T10:00:00Z".to_owned(),
    }
}

fn viewport(zoom: f64) -> Viewport {
    Viewport::new(LatLng::new(0.0, 0.0), zoom, 800.0, 600.0)
}

/// A position `dx` screen pixels east of the origin at `zoom`.
fn east_of_origin(dx: f64, zoom: f64) -> LatLng {
    let origin = project(LatLng::new(0.0, 0.0), zoom);
    crate::viewport::unproject(Point::new(origin.x + dx, origin.y), zoom)
}

#[test]
fn empty_input_gives_no_groups() {
    assert!(cluster_markers(&[], &viewport(5.0), 80.0, 16.0).is_empty());
}

#[test]
fn nearby_entries_cluster_at_low_zoom() {
    let entries = vec![
        entry_at("a", LatLng::new(0.0, 0.0)),
        entry_at("b", east_of_origin(10.0, 5.0)),
    ];
    let groups = cluster_markers(&entries, &viewport(5.0), 80.0, 16.0);
    assert_eq!(groups.len(), 1);
    let MarkerGroup::Cluster { members, .. } = &groups[0] else {
        panic!("expected cluster, got {groups:?}");
    };
    assert_eq!(members, &vec![0, 1]);
    assert_eq!(groups[0].count(), 2);
    assert_eq!(groups[0].badge(), "2");
}

#[test]
fn clustering_disabled_at_threshold_zoom() {
    let entries = vec![
        entry_at("a", LatLng::new(0.0, 0.0)),
        entry_at("b", east_of_origin(10.0, 16.0)),
    ];
    let groups = cluster_markers(&entries, &viewport(16.0), 80.0, 16.0);
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| matches!(g, MarkerGroup::Single { .. })));
}

#[test]
fn distant_entries_stay_single() {
    let entries = vec![
        entry_at("a", LatLng::new(0.0, 0.0)),
        entry_at("b", east_of_origin(200.0, 5.0)),
    ];
    let groups = cluster_markers(&entries, &viewport(5.0), 80.0, 16.0);
    assert_eq!(
        groups,
        vec![
            MarkerGroup::Single { index: 0, position: entries[0].coordinates },
            MarkerGroup::Single { index: 1, position: entries[1].coordinates },
        ]
    );
}

#[test]
fn cluster_position_is_member_mean() {
    let entries = vec![
        entry_at("a", LatLng::new(10.0, 20.0)),
        entry_at("b", LatLng::new(10.002, 20.004)),
    ];
    let groups = cluster_markers(&entries, &viewport(3.0), 80.0, 16.0);
    let p = groups[0].position();
    assert!((p.lat - 10.001).abs() < 1e-9);
    assert!((p.lng - 20.002).abs() < 1e-9);
}

#[test]
fn every_entry_appears_exactly_once() {
    let entries: Vec<GeoEntry> = (0..12)
        .map(|i| entry_at(&format!("e{i}"), east_of_origin(f64::from(i) * 30.0, 6.0)))
        .collect();
    let groups = cluster_markers(&entries, &viewport(6.0), 80.0, 16.0);
    let total: usize = groups.iter().map(MarkerGroup::count).sum();
    assert_eq!(total, entries.len());

    let mut seen: Vec<usize> = groups
        .iter()
        .flat_map(|g| match g {
            MarkerGroup::Single { index, .. } => vec![*index],
            MarkerGroup::Cluster { members, .. } => members.clone(),
        })
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..12).collect::<Vec<_>>());
}

#[test]
fn seed_order_follows_input() {
    // a and c are within range of b but not of each other; a seeds first and takes b.
    let entries = vec![
        entry_at("a", east_of_origin(0.0, 6.0)),
        entry_at("b", east_of_origin(60.0, 6.0)),
        entry_at("c", east_of_origin(120.0, 6.0)),
    ];
    let groups = cluster_markers(&entries, &viewport(6.0), 80.0, 16.0);
    assert!(matches!(&groups[0], MarkerGroup::Cluster { members, .. } if members == &vec![0, 1]));
    assert!(matches!(groups[1], MarkerGroup::Single { index: 2, .. }));
}

#[test]
fn badge_size_buckets() {
    let small = MarkerGroup::Cluster { members: vec![0, 1], position: LatLng::new(0.0, 0.0) };
    let large = MarkerGroup::Cluster { members: (0..150).collect(), position: LatLng::new(0.0, 0.0) };
    assert_eq!(small.badge_class(), "map-cluster map-cluster--small");
    assert_eq!(large.badge_class(), "map-cluster map-cluster--large");
}
