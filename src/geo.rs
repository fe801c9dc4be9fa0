//! Geographic primitives and the point-in-polygon test used by the lasso.
//!
//! Coordinates are plain decimal degrees. Polygons are open vertex lists in
//! draw order; the containment test wraps from the last vertex back to the
//! first, so callers never need to close a ring themselves.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use serde::{Deserialize, Serialize};

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Ordered polygon vertices, insertion order = draw order. Not closed.
pub type Polygon = Vec<LatLng>;

/// Even-odd ray-casting containment test.
///
/// Casts a ray from `(lat, lng)` toward increasing longitude and toggles on
/// every edge it crosses. Fewer than three vertices never contain anything.
/// Points exactly on an edge fall wherever the strict comparisons put them,
/// and NaN inputs are not special-cased.
#[must_use]
pub fn point_in_polygon(lat: f64, lng: f64, polygon: &[LatLng]) -> bool {
    if polygon.len() < crate::consts::LASSO_MIN_POINTS {
        return false;
    }
    let Some(&last) = polygon.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;
    for &cur in polygon {
        let (yi, xi) = (cur.lat, cur.lng);
        let (yj, xj) = (prev.lat, prev.lng);
        let intersect = (yi > lat) != (yj > lat) && lng < (xj - xi) * (lat - yi) / (yj - yi) + xi;
        if intersect {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

/// Axis-aligned lat/lng rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Smallest bounds covering every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self { south_west: *first, north_east: *first };
        for p in rest {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Grow the bounds to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }


    #[must_use]
    pub fn north_west(&self) -> LatLng {
        LatLng { lat: self.north_east.lat, lng: self.south_west.lng }
    }

    #[must_use]
    pub fn south_east(&self) -> LatLng {
        LatLng { lat: self.south_west.lat, lng: self.north_east.lng }
    }
}
