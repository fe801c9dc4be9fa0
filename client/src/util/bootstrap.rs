//! Entry map bootstrap payload embedded by the hosting page.
//!
//! The page renders a `<script type="application/json" id="entry-map-data">`
//! block holding the entry rows, resolved media URLs, the viewer's user id,
//! and optional map config. Reading it is browser-only; parsing is pure so it
//! can be tested natively.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use entry_map::config::{ConfigError, MapConfig};
use entry_map::entry::{EntryError, EntryRecord, MediaUrls, geotagged};
use serde::Deserialize;

use crate::state::map::MapInput;

/// Id of the script element carrying the payload.
pub const BOOTSTRAP_ELEMENT_ID: &str = "entry-map-data";

#[derive(Deserialize)]
struct Payload {
    #[serde(default)]
    entries: Vec<EntryRecord>,
    #[serde(default)]
    media_urls: MediaUrls,
    #[serde(default)]
    current_user_id: Option<String>,
    #[serde(default)]
    config: Option<serde_json::Value>,
}

/// Parsed payload. A bad `config` block does not fail the whole payload;
/// defaults are used and the problem is reported in `config_error`.
#[derive(Debug)]
pub struct Bootstrap {
    pub input: MapInput,
    pub config_error: Option<ConfigError>,
}

/// Decode the payload JSON, keeping only geotagged entries.
pub fn parse_payload(raw: &str) -> Result<Bootstrap, EntryError> {
    let payload: Payload = serde_json::from_str(raw)?;
    let (config, config_error) = match payload.config.map(parse_config) {
        None => (MapConfig::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (MapConfig::default(), Some(err)),
    };
    Ok(Bootstrap {
        input: MapInput {
            entries: geotagged(payload.entries),
            media_urls: payload.media_urls,
            current_user_id: payload.current_user_id.filter(|id| !id.is_empty()),
            config,
        },
        config_error,
    })
}

fn parse_config(value: serde_json::Value) -> Result<MapConfig, ConfigError> {
    let config: MapConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

/// Read and parse the embedded payload. Falls back to an empty map.
pub fn load() -> MapInput {
    #[cfg(feature = "hydrate")]
    {
        let Some(raw) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(BOOTSTRAP_ELEMENT_ID))
            .and_then(|el| el.text_content())
        else {
            log::warn!("entry map: no #{BOOTSTRAP_ELEMENT_ID} payload on the page");
            return MapInput::default();
        };
        match parse_payload(&raw) {
            Ok(Bootstrap { input, config_error }) => {
                if let Some(err) = config_error {
                    log::warn!("entry map: {err}; using default map config");
                }
                log::info!("entry map: {} geotagged entries", input.entries.len());
                input
            }
            Err(err) => {
                log::error!("entry map: {err}");
                MapInput::default()
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        MapInput::default()
    }
}
