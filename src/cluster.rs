//! Screen-space marker clustering.
//!
//! Greedy, order-dependent: the first unclaimed entry seeds a cluster and
//! every other unclaimed entry within the radius of that seed joins it. The
//! result is stable for a given entry order and viewport, which keeps
//! clusters from flickering between renders.

#[cfg(test)]
#[path = "cluster_test.rs"]
mod cluster_test;

use crate::entry::GeoEntry;
use crate::geo::LatLng;
use crate::viewport::{Point, Viewport};

/// One thing drawn on the map: a lone marker or a count badge.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerGroup {
    /// Index into the entry slice passed to [`cluster_markers`].
    Single { index: usize, position: LatLng },
    /// Two or more entries; `position` is the mean of the members.
    Cluster { members: Vec<usize>, position: LatLng },
}

impl MarkerGroup {
    #[must_use]
    pub fn position(&self) -> LatLng {
        match self {
            Self::Single { position, .. } | Self::Cluster { position, .. } => *position,
        }
    }

    /// Number of entries behind this marker.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Cluster { members, .. } => members.len(),
        }
    }

    /// Text on the cluster badge.
    #[must_use]
    pub fn badge(&self) -> String {
        self.count().to_string()
    }

    /// BEM size modifier for the badge, mirroring the usual small/medium/large buckets.
    #[must_use]
    pub fn badge_class(&self) -> &'static str {
        match self.count() {
            0..10 => "map-cluster map-cluster--small",
            10..100 => "map-cluster map-cluster--medium",
            _ => "map-cluster map-cluster--large",
        }
    }
}

/// Group `entries` for display in `viewport`.
///
/// At or above `disable_at_zoom` every entry is its own marker.
#[must_use]
pub fn cluster_markers(
    entries: &[GeoEntry],
    viewport: &Viewport,
    radius_px: f64,
    disable_at_zoom: f64,
) -> Vec<MarkerGroup> {
    if viewport.zoom >= disable_at_zoom {
        return entries
            .iter()
            .enumerate()
            .map(|(index, e)| MarkerGroup::Single { index, position: e.coordinates })
            .collect();
    }

    let screen: Vec<Point> = entries.iter().map(|e| viewport.latlng_to_screen(e.coordinates)).collect();
    let mut claimed = vec![false; entries.len()];
    let mut groups = Vec::new();

    for seed in 0..entries.len() {
        if claimed[seed] {
            continue;
        }
        claimed[seed] = true;
        let mut members = vec![seed];
        for other in (seed + 1)..entries.len() {
            if !claimed[other] && screen[seed].distance_to(screen[other]) <= radius_px {
                claimed[other] = true;
                members.push(other);
            }
        }

        if members.len() == 1 {
            groups.push(MarkerGroup::Single { index: seed, position: entries[seed].coordinates });
        } else {
            let position = mean_position(entries, &members);
            groups.push(MarkerGroup::Cluster { members, position });
        }
    }

    groups
}

#[allow(clippy::cast_precision_loss)]
fn mean_position(entries: &[GeoEntry], members: &[usize]) -> LatLng {
    let n = members.len() as f64;
    let (lat, lng) = members.iter().fold((0.0, 0.0), |(lat, lng), &i| {
        (lat + entries[i].coordinates.lat, lng + entries[i].coordinates.lng)
    });
    LatLng::new(lat / n, lng / n)
}
