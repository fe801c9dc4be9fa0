//! Map configuration: tile source, zoom limits, clustering, focus timings.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! `from_json` parses and validates; hosts that cannot surface an error log
//! it and fall back to [`MapConfig::default`].

use serde::{Deserialize, Serialize};

use crate::consts::{
    CLUSTER_RADIUS_PX, DEFAULT_ZOOM, DISABLE_CLUSTERING_AT_ZOOM, FIT_MAX_ZOOM, FIT_PADDING_PX,
    FOCUS_FLY_DURATION_MS, FOCUS_FLY_ZOOM, FOCUS_MOUNT_DELAY_MS, FOCUS_POPUP_DELAY_MS, MAX_ZOOM, MIN_ZOOM,
};
use crate::focus::FocusTimings;
use crate::geo::LatLng;

pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_ENTRY_HREF_TEMPLATE: &str = "/dashboard/entry/{id}";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid map config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cluster radius must be positive, got {0}")]
    ClusterRadius(f64),
    #[error("{field} = {value} is outside the supported zoom range")]
    ZoomOutOfRange { field: &'static str, value: f64 },
    #[error("{field} = {value} exceeds max_zoom = {max_zoom}")]
    AboveMaxZoom { field: &'static str, value: f64, max_zoom: f64 },
    #[error("{field} is missing the {placeholder} placeholder")]
    MissingPlaceholder { field: &'static str, placeholder: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Slippy-map tile URL with `{z}`, `{x}`, `{y}` and optional `{s}` placeholders.
    pub tile_url_template: String,
    /// Values substituted for `{s}`.
    pub tile_subdomains: Vec<String>,
    pub attribution: String,
    /// View before the first fit-to-bounds, and when there are no entries.
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub cluster_radius_px: f64,
    pub disable_clustering_at_zoom: f64,
    pub fit_padding_px: f64,
    pub fit_max_zoom: f64,
    pub fly_zoom: f64,
    pub fly_duration_ms: u32,
    pub mount_delay_ms: u32,
    pub popup_delay_ms: u32,
    /// Route of the full entry page, with an `{id}` placeholder.
    pub entry_href_template: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url_template: DEFAULT_TILE_URL_TEMPLATE.to_owned(),
            tile_subdomains: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            attribution: DEFAULT_ATTRIBUTION.to_owned(),
            initial_center: LatLng::new(0.0, 0.0),
            initial_zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            cluster_radius_px: CLUSTER_RADIUS_PX,
            disable_clustering_at_zoom: DISABLE_CLUSTERING_AT_ZOOM,
            fit_padding_px: FIT_PADDING_PX,
            fit_max_zoom: FIT_MAX_ZOOM,
            fly_zoom: FOCUS_FLY_ZOOM,
            fly_duration_ms: FOCUS_FLY_DURATION_MS,
            mount_delay_ms: FOCUS_MOUNT_DELAY_MS,
            popup_delay_ms: FOCUS_POPUP_DELAY_MS,
            entry_href_template: DEFAULT_ENTRY_HREF_TEMPLATE.to_owned(),
        }
    }
}

impl MapConfig {
    /// Parse a JSON object (missing fields take their defaults) and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and template placeholders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster_radius_px.is_nan() || self.cluster_radius_px <= 0.0 {
            return Err(ConfigError::ClusterRadius(self.cluster_radius_px));
        }
        for (field, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("initial_zoom", self.initial_zoom),
            ("disable_clustering_at_zoom", self.disable_clustering_at_zoom),
            ("fit_max_zoom", self.fit_max_zoom),
            ("fly_zoom", self.fly_zoom),
        ] {
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&value) {
                return Err(ConfigError::ZoomOutOfRange { field, value });
            }
        }
        for (field, value) in
            [("min_zoom", self.min_zoom), ("fit_max_zoom", self.fit_max_zoom), ("fly_zoom", self.fly_zoom)]
        {
            if value > self.max_zoom {
                return Err(ConfigError::AboveMaxZoom { field, value, max_zoom: self.max_zoom });
            }
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url_template.contains(placeholder) {
                return Err(ConfigError::MissingPlaceholder { field: "tile_url_template", placeholder });
            }
        }
        if !self.entry_href_template.contains("{id}") {
            return Err(ConfigError::MissingPlaceholder { field: "entry_href_template", placeholder: "{id}" });
        }
        Ok(())
    }

    #[must_use]
    pub fn focus_timings(&self) -> FocusTimings {
        FocusTimings {
            mount_delay_ms: self.mount_delay_ms,
            fly_zoom: self.fly_zoom,
            fly_duration_ms: self.fly_duration_ms,
            popup_delay_ms: self.popup_delay_ms,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
