//! Web Mercator viewport: projection, pan/zoom, fit-to-bounds, fly-to.
//!
//! World pixels follow the slippy-map convention: at zoom `z` the whole world
//! is a square of `TILE_SIZE * 2^z` pixels with the origin at the north-west
//! corner (lng -180, lat ~85.05). Screen pixels are CSS pixels relative to the
//! top-left of the map element, with `center` drawn at the middle.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::f64::consts::PI;

use crate::consts::{MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::geo::{LatLng, LatLngBounds};

/// A point in screen or world pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Side length of the world square at `zoom`, in pixels.
#[must_use]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Project a position to world pixels at `zoom`.
#[must_use]
pub fn project(p: LatLng, zoom: f64) -> Point {
    let size = world_size(zoom);
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    Point { x, y }
}

/// Inverse of [`project`].
#[must_use]
pub fn unproject(p: Point, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lng = p.x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * p.y / size;
    let lat = n.sinh().atan().to_degrees();
    LatLng { lat, lng }
}

/// The visible map window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: crate::consts::DEFAULT_ZOOM,
            width: 0.0,
            height: 0.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(center: LatLng, zoom: f64, width: f64, height: f64) -> Self {
        Self { center, zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM), width, height, ..Self::default() }
    }

    /// Restrict zoom to `[min, max]` and clamp the current zoom into it.
    pub fn set_zoom_limits(&mut self, min: f64, max: f64) {
        let max = max.max(min);
        self.min_zoom = min;
        self.max_zoom = max;
        self.zoom = self.zoom.clamp(min, max);
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// World pixel of the screen's top-left corner.
    #[must_use]
    pub fn pixel_origin(&self) -> Point {
        let c = project(self.center, self.zoom);
        Point { x: c.x - self.width * 0.5, y: c.y - self.height * 0.5 }
    }

    #[must_use]
    pub fn latlng_to_screen(&self, p: LatLng) -> Point {
        let world = project(p, self.zoom);
        let origin = self.pixel_origin();
        Point { x: world.x - origin.x, y: world.y - origin.y }
    }

    #[must_use]
    pub fn screen_to_latlng(&self, screen: Point) -> LatLng {
        let origin = self.pixel_origin();
        unproject(Point { x: origin.x + screen.x, y: origin.y + screen.y }, self.zoom)
    }

    /// Move the map by a screen-space drag delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let c = project(self.center, self.zoom);
        self.center = unproject(Point { x: c.x - dx, y: c.y - dy }, self.zoom);
    }

    /// Zoom to `zoom` keeping the position under `anchor` fixed on screen.
    pub fn zoom_around(&mut self, anchor: Point, zoom: f64) {
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        let pinned = self.screen_to_latlng(anchor);
        self.zoom = zoom;
        let after = self.latlng_to_screen(pinned);
        self.pan_by(anchor.x - after.x, anchor.y - after.y);
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Largest whole zoom at which `bounds` fits inside the viewport minus
    /// `padding` on every side, capped at `max_zoom`.
    #[must_use]
    pub fn bounds_zoom(&self, bounds: &LatLngBounds, padding: f64, max_zoom: f64) -> f64 {
        let cap = max_zoom.min(self.max_zoom);
        let nw = project(bounds.north_west(), 0.0);
        let se = project(bounds.south_east(), 0.0);
        let span_x = (se.x - nw.x).abs();
        let span_y = (se.y - nw.y).abs();
        let avail_x = (self.width - 2.0 * padding).max(1.0);
        let avail_y = (self.height - 2.0 * padding).max(1.0);

        let scale = match (span_x > 0.0, span_y > 0.0) {
            (false, false) => return cap.max(self.min_zoom),
            (true, false) => avail_x / span_x,
            (false, true) => avail_y / span_y,
            (true, true) => (avail_x / span_x).min(avail_y / span_y),
        };
        scale.log2().floor().clamp(self.min_zoom, cap.max(self.min_zoom))
    }

    /// Center on `bounds` at the zoom given by [`Self::bounds_zoom`].
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64, max_zoom: f64) {
        let zoom = self.bounds_zoom(bounds, padding, max_zoom);
        let nw = project(bounds.north_west(), zoom);
        let se = project(bounds.south_east(), zoom);
        let mid = Point { x: (nw.x + se.x) * 0.5, y: (nw.y + se.y) * 0.5 };
        self.center = unproject(mid, zoom);
        self.zoom = zoom;
    }
}

/// A timed transition of the viewport's center and zoom.
///
/// The center moves in projected (zoom 0) space so the path is a straight
/// line on screen; both center and zoom follow an ease-in-out curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub from_center: LatLng,
    pub from_zoom: f64,
    pub to_center: LatLng,
    pub to_zoom: f64,
    pub duration_ms: f64,
}

impl FlyTo {
    #[must_use]
    pub fn new(from: &Viewport, to_center: LatLng, to_zoom: f64, duration_ms: f64) -> Self {
        Self {
            from_center: from.center,
            from_zoom: from.zoom,
            to_center,
            to_zoom: to_zoom.clamp(from.min_zoom, from.max_zoom),
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// Center and zoom `elapsed_ms` into the flight.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> (LatLng, f64) {
        if self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms {
            return (self.to_center, self.to_zoom);
        }
        let t = ease_in_out_cubic((elapsed_ms / self.duration_ms).clamp(0.0, 1.0));
        let a = project(self.from_center, 0.0);
        let b = project(self.to_center, 0.0);
        let p = Point { x: a.x + (b.x - a.x) * t, y: a.y + (b.y - a.y) * t };
        let zoom = self.from_zoom + (self.to_zoom - self.from_zoom) * t;
        (unproject(p, 0.0), zoom)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
