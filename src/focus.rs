//! Deep-link auto-focus: fly to a linked entry's marker and open its popup.
//!
//! The sequence is timer driven and the planner owns no timers itself. Each
//! call returns the next [`FocusStep`] with the delay the host should wait
//! before calling back:
//!
//! ```text
//!   on_mount(target) ──▶ Lookup { delay }         (wait for markers to mount)
//!   lookup(markers)  ──▶ FlyTo + OpenPopup { delay } | Done
//!   popup_due()      ──▶ Some(id)                  (open the popup)
//! ```
//!
//! A target runs at most once per planner; the planner lives as long as the
//! map does, so a remount starts fresh.

#[cfg(test)]
#[path = "focus_test.rs"]
mod focus_test;

use std::collections::HashSet;

use crate::consts::{FOCUS_FLY_DURATION_MS, FOCUS_FLY_ZOOM, FOCUS_MOUNT_DELAY_MS, FOCUS_POPUP_DELAY_MS};
use crate::geo::LatLng;
use crate::marker::MarkerLookup;

/// Delays and zoom for the focus sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTimings {
    pub mount_delay_ms: u32,
    pub fly_zoom: f64,
    pub fly_duration_ms: u32,
    pub popup_delay_ms: u32,
}

impl Default for FocusTimings {
    fn default() -> Self {
        Self {
            mount_delay_ms: FOCUS_MOUNT_DELAY_MS,
            fly_zoom: FOCUS_FLY_ZOOM,
            fly_duration_ms: FOCUS_FLY_DURATION_MS,
            popup_delay_ms: FOCUS_POPUP_DELAY_MS,
        }
    }
}

/// What the host should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum FocusStep {
    /// Call [`DeepLinkFocus::lookup`] after `delay_ms`.
    Lookup { delay_ms: u32 },
    /// Animate the viewport to the target marker.
    FlyTo { coordinates: LatLng, zoom: f64, duration_ms: u32 },
    /// Call [`DeepLinkFocus::popup_due`] after `delay_ms`, then open the popup for `id`.
    OpenPopup { id: String, delay_ms: u32 },
    /// Nothing left to do.
    Done,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum FocusPhase {
    #[default]
    Idle,
    AwaitingMarkers(String),
    Flying(String),
}

/// Planner for the deep-link focus sequence.
#[derive(Debug, Clone, Default)]
pub struct DeepLinkFocus {
    timings: FocusTimings,
    phase: FocusPhase,
    handled: HashSet<String>,
}

impl DeepLinkFocus {
    #[must_use]
    pub fn new(timings: FocusTimings) -> Self {
        Self { timings, ..Self::default() }
    }

    /// Whether a sequence is waiting on a timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !matches!(self.phase, FocusPhase::Idle)
    }

    /// Start the sequence for `target`. `None` when there is no target or it
    /// already ran.
    pub fn on_mount(&mut self, target: Option<&str>) -> Option<FocusStep> {
        let target = target.filter(|t| !t.is_empty())?;
        if !self.handled.insert(target.to_owned()) {
            tracing::debug!(target, "deep link already focused");
            return None;
        }
        tracing::debug!(target, delay_ms = self.timings.mount_delay_ms, "deep link focus scheduled");
        self.phase = FocusPhase::AwaitingMarkers(target.to_owned());
        Some(FocusStep::Lookup { delay_ms: self.timings.mount_delay_ms })
    }

    /// Look the target marker up. A missing marker ends the sequence quietly.
    pub fn lookup(&mut self, markers: &dyn MarkerLookup) -> Vec<FocusStep> {
        let FocusPhase::AwaitingMarkers(target) = std::mem::take(&mut self.phase) else {
            return vec![FocusStep::Done];
        };
        let Some(handle) = markers.marker(&target) else {
            tracing::debug!(target, "deep link target has no marker");
            return vec![FocusStep::Done];
        };
        tracing::info!(target, "flying to deep-linked entry");
        let steps = vec![
            FocusStep::FlyTo {
                coordinates: handle.position(),
                zoom: self.timings.fly_zoom,
                duration_ms: self.timings.fly_duration_ms,
            },
            FocusStep::OpenPopup { id: target.clone(), delay_ms: self.timings.popup_delay_ms },
        ];
        self.phase = FocusPhase::Flying(target);
        steps
    }

    /// The popup timer fired. Returns the entry whose popup should open.
    pub fn popup_due(&mut self) -> Option<String> {
        match std::mem::take(&mut self.phase) {
            FocusPhase::Flying(target) => Some(target),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Drop whatever is pending. Targets already started stay handled.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            tracing::debug!("deep link focus cancelled");
        }
        self.phase = FocusPhase::Idle;
    }
}
