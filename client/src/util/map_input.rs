//! DOM event mapping for the map surface.

#[cfg(feature = "hydrate")]
use entry_map::engine::WheelDelta;
#[cfg(feature = "hydrate")]
use entry_map::viewport::Point;

/// Pointer position relative to the map surface's top-left corner.
///
/// Uses client coordinates so events targeting child elements (markers,
/// tiles, the draw layer) map to the same space.
#[cfg(feature = "hydrate")]
pub fn surface_point(ev: &leptos::ev::MouseEvent, surface: &web_sys::HtmlDivElement) -> Point {
    let rect = surface.get_bounding_client_rect();
    Point::new(f64::from(ev.client_x()) - rect.x(), f64::from(ev.client_y()) - rect.y())
}

#[cfg(feature = "hydrate")]
pub fn wheel_delta(ev: &leptos::ev::WheelEvent) -> WheelDelta {
    WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() }
}

/// Map element size in CSS pixels.
#[cfg(feature = "hydrate")]
pub fn surface_size(surface: &web_sys::HtmlDivElement) -> (f64, f64) {
    (f64::from(surface.client_width()), f64::from(surface.client_height()))
}

/// Only the primary button starts a pan or a lasso.
pub fn is_primary_button(button: i16) -> bool {
    button == 0
}

/// Inline style positioning an element at a screen point.
pub fn position_style(x: f64, y: f64) -> String {
    format!("transform: translate3d({x:.1}px, {y:.1}px, 0)")
}
