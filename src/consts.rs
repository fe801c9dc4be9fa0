//! Shared numeric constants for the entry map.

// ── Projection ──────────────────────────────────────────────────

/// Edge length of one slippy-map tile in CSS pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Lowest zoom level the map allows.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom level the map allows.
pub const MAX_ZOOM: f64 = 19.0;

// ── Initial view ────────────────────────────────────────────────

/// Zoom used before the first fit-to-bounds.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Padding around the entry bounds when fitting the view, in pixels.
pub const FIT_PADDING_PX: f64 = 50.0;

/// Fit-to-bounds never zooms in past this level.
pub const FIT_MAX_ZOOM: f64 = 15.0;

// ── Clustering ──────────────────────────────────────────────────

/// Markers closer than this many screen pixels collapse into one cluster.
pub const CLUSTER_RADIUS_PX: f64 = 80.0;

/// At or above this zoom every entry gets its own marker.
pub const DISABLE_CLUSTERING_AT_ZOOM: f64 = 16.0;

// ── Deep-link focus ─────────────────────────────────────────────

/// Delay after mount before looking up the target marker.
pub const FOCUS_MOUNT_DELAY_MS: u32 = 500;

/// Zoom level the viewport flies to for a deep-linked entry.
pub const FOCUS_FLY_ZOOM: f64 = 17.0;

/// Duration of the fly-to animation.
pub const FOCUS_FLY_DURATION_MS: u32 = 1500;

/// Delay after the fly starts before the popup opens.
pub const FOCUS_POPUP_DELAY_MS: u32 = 1600;

// ── Lasso ───────────────────────────────────────────────────────

/// Fewest vertices a lasso polygon needs to enclose any area.
pub const LASSO_MIN_POINTS: usize = 3;
