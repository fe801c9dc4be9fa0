//! Map area-selection core for the journal's entry map.
//!
//! This crate holds everything about the entry map that does not need a
//! browser: projecting geotagged entries onto a slippy map, grouping markers
//! into clusters, the free-hand lasso that selects entries by enclosure, the
//! selection modal's view model, and the deep-link "fly to and open popup"
//! sequence. The Leptos front end in `client/` wires DOM events into
//! [`engine::MapEngine`] and renders the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Owns all map state and routes host events to the controllers |
//! | [`geo`] | Lat/lng points, polygons, bounds, and the ray-casting containment test |
//! | [`entry`] | Journal entry rows and the geotagged entries shown on the map |
//! | [`viewport`] | Web Mercator projection, pan/zoom, fit-to-bounds, fly-to animation |
//! | [`tiles`] | Slippy-map tiles covering the viewport |
//! | [`lasso`] | Free-hand area-selection gesture state machine |
//! | [`cluster`] | Screen-space marker clustering |
//! | [`marker`] | Marker styling, popups, and the marker handle registry |
//! | [`selection`] | Selection result modal view model |
//! | [`focus`] | Deep-link auto-focus sequencing |
//! | [`config`] | Map configuration and validation |
//! | [`format`] | Date, badge, and link formatting |
//! | [`consts`] | Shared numeric constants (zoom limits, tile size, timings) |

pub mod cluster;
pub mod config;
pub mod consts;
pub mod engine;
pub mod entry;
pub mod focus;
pub mod format;
pub mod geo;
pub mod lasso;
pub mod marker;
pub mod selection;
pub mod tiles;
pub mod viewport;
