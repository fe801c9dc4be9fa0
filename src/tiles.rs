//! Slippy-map tiles covering the viewport.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use crate::consts::TILE_SIZE;
use crate::viewport::{Viewport, project};

/// One raster tile placed on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Column, already wrapped into `0..2^z`.
    pub x: u32,
    /// Row, `0..2^z`.
    pub y: u32,
    pub z: u32,
    /// Screen-space left edge in CSS pixels.
    pub left: f64,
    /// Screen-space top edge in CSS pixels.
    pub top: f64,
    /// Rendered edge length in CSS pixels (256 at integral zoom).
    pub size: f64,
}

/// Tiles needed to cover `viewport`, row-major from the top-left.
///
/// Tiles are fetched at the nearest whole zoom and scaled for fractional
/// zoom levels (during fly-to). Columns wrap around the antimeridian; rows
/// outside the world are skipped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn visible_tiles(viewport: &Viewport) -> Vec<Tile> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }
    let tile_zoom = viewport.zoom.round().clamp(viewport.min_zoom, viewport.max_zoom).max(0.0);
    let scale = (viewport.zoom - tile_zoom).exp2();
    let size = TILE_SIZE * scale;

    let center = project(viewport.center, tile_zoom);
    let origin_x = center.x - viewport.width * 0.5 / scale;
    let origin_y = center.y - viewport.height * 0.5 / scale;

    let first_col = (origin_x / TILE_SIZE).floor() as i64;
    let last_col = ((origin_x + viewport.width / scale) / TILE_SIZE).ceil() as i64 - 1;
    let first_row = (origin_y / TILE_SIZE).floor() as i64;
    let last_row = ((origin_y + viewport.height / scale) / TILE_SIZE).ceil() as i64 - 1;

    let z = tile_zoom as u32;
    let count = 1_i64 << z;
    let mut tiles = Vec::new();
    for row in first_row.max(0)..=last_row.min(count - 1) {
        for col in first_col..=last_col {
            let Ok(x) = u32::try_from(col.rem_euclid(count)) else {
                continue;
            };
            let Ok(y) = u32::try_from(row) else {
                continue;
            };
            tiles.push(Tile {
                x,
                y,
                z,
                left: (col as f64 * TILE_SIZE - origin_x) * scale,
                top: (row as f64 * TILE_SIZE - origin_y) * scale,
                size,
            });
        }
    }
    tiles
}

/// Expand a `{s}`/`{z}`/`{x}`/`{y}` URL template for `tile`.
///
/// `{s}` rotates through `subdomains` by `(x + y) % len`; an empty list
/// leaves it blank.
#[must_use]
pub fn tile_url(template: &str, subdomains: &[String], tile: &Tile) -> String {
    let sub = if subdomains.is_empty() {
        ""
    } else {
        let idx = (tile.x as usize + tile.y as usize) % subdomains.len();
        subdomains.get(idx).map_or("", String::as_str)
    };
    template
        .replace("{s}", sub)
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}
