//! Free-hand area selection ("lasso") over the map.
//!
//! The controller turns a pointer drag into a polygon and, when the drag
//! ends, tests every entry against it. It never touches the map directly:
//! each transition returns [`LassoAction`]s that the engine forwards to the
//! host (cursor, pan lock, pointer capture, preview shape, selection).
//!
//! ```text
//!            toggle                 pointer-down
//!   Idle ───────────────▶ Armed ─────────────────▶ Drawing ◀─┐ pointer-move
//!    ▲  ◀─────────────────  │  ◀──────────────────    │  ────┘
//!    │      toggle/clear       pointer-up (< 3 pts)    │
//!    └─────────────────────────────────────────────────┘
//!              pointer-up (≥ 3 pts) / toggle / clear
//! ```

#[cfg(test)]
#[path = "lasso_test.rs"]
mod lasso_test;

use crate::consts::LASSO_MIN_POINTS;
use crate::entry::GeoEntry;
use crate::geo::{LatLng, Polygon, point_in_polygon};
use crate::selection::SelectionResult;

/// Cursor affordance requested for the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// The map's normal grab cursor.
    #[default]
    Default,
    /// Draw mode is on.
    Crosshair,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "grab",
            Self::Crosshair => "crosshair",
        }
    }
}

/// Side effects requested by a lasso transition, in the order they apply.
#[derive(Debug, Clone, PartialEq)]
pub enum LassoAction {
    SetCursor(Cursor),
    /// Enable or disable the map's own drag-to-pan.
    SetMapDragging(bool),
    /// Attach (`true`) or detach (`false`) the draw pointer handlers.
    SetPointerCapture(bool),
    /// Replace the preview shape with this outline.
    ShowPreview(Polygon),
    /// Remove the preview shape from the map.
    ClearPreview,
    /// A completed gesture enclosed at least one entry.
    SelectionMade(SelectionResult),
}

/// Points of one in-progress drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawSession {
    pub points: Polygon,
}

/// Where the controller is in the gesture lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LassoPhase {
    /// Draw mode is off; the map pans normally.
    #[default]
    Idle,
    /// Draw mode is on, waiting for the first pointer-down.
    Armed,
    /// Pointer is held; points accumulate and map panning is locked.
    Drawing(DrawSession),
}

/// Lasso state machine. Owns the preview shape exclusively.
#[derive(Debug, Clone, Default)]
pub struct LassoController {
    phase: LassoPhase,
    /// Outline left on the map after a gesture that selected something.
    shape: Option<Polygon>,
}

impl LassoController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &LassoPhase {
        &self.phase
    }

    /// Whether the "Select Area" control is on.
    #[must_use]
    pub fn is_draw_mode(&self) -> bool {
        !matches!(self.phase, LassoPhase::Idle)
    }

    /// Whether map panning is currently locked by a drag.
    #[must_use]
    pub fn is_dragging_locked(&self) -> bool {
        matches!(self.phase, LassoPhase::Drawing(_))
    }

    /// The outline currently on the map, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&[LatLng]> {
        match &self.phase {
            LassoPhase::Drawing(session) => Some(&session.points),
            _ => self.shape.as_deref(),
        }
    }

    /// Flip the "Select Area" control.
    pub fn toggle(&mut self) -> Vec<LassoAction> {
        if self.is_draw_mode() {
            self.clear()
        } else {
            tracing::debug!("lasso armed");
            self.phase = LassoPhase::Armed;
            vec![LassoAction::SetCursor(Cursor::Crosshair), LassoAction::SetPointerCapture(true)]
        }
    }

    /// Start a gesture at `at`. Ignored unless armed.
    pub fn pointer_down(&mut self, at: LatLng) -> Vec<LassoAction> {
        if !matches!(self.phase, LassoPhase::Armed) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.shape.take().is_some() {
            actions.push(LassoAction::ClearPreview);
        }
        let points = vec![at];
        actions.push(LassoAction::SetMapDragging(false));
        actions.push(LassoAction::ShowPreview(points.clone()));
        self.phase = LassoPhase::Drawing(DrawSession { points });
        actions
    }

    /// Extend the gesture. Ignored unless drawing.
    pub fn pointer_move(&mut self, at: LatLng) -> Vec<LassoAction> {
        let LassoPhase::Drawing(session) = &mut self.phase else {
            return Vec::new();
        };
        session.points.push(at);
        vec![LassoAction::ShowPreview(session.points.clone())]
    }

    /// Finish the gesture and test `entries` against the drawn outline.
    ///
    /// Fewer than three points is an accidental click: the shape goes away
    /// and draw mode stays armed. Any completed gesture exits draw mode; a
    /// gesture enclosing nothing also removes its shape.
    pub fn pointer_up(&mut self, entries: &[GeoEntry]) -> Vec<LassoAction> {
        if !self.is_dragging_locked() {
            return Vec::new();
        }
        let LassoPhase::Drawing(session) = std::mem::replace(&mut self.phase, LassoPhase::Armed) else {
            return Vec::new();
        };
        let mut actions = vec![LassoAction::SetMapDragging(true)];

        if session.points.len() < LASSO_MIN_POINTS {
            tracing::debug!(points = session.points.len(), "lasso gesture too short, discarded");
            actions.push(LassoAction::ClearPreview);
            return actions;
        }

        self.phase = LassoPhase::Idle;
        let result = select_within(entries, &session.points);
        if result.is_empty() {
            tracing::debug!(points = session.points.len(), "lasso enclosed no entries");
            actions.push(LassoAction::ClearPreview);
        } else {
            tracing::info!(
                points = session.points.len(),
                selected = result.len(),
                ids = ?result.ids().collect::<Vec<_>>(),
                "lasso selection"
            );
            self.shape = Some(session.points);
            actions.push(LassoAction::SelectionMade(result));
        }
        actions.push(LassoAction::SetPointerCapture(false));
        actions.push(LassoAction::SetCursor(Cursor::Default));
        actions
    }

    /// The browser took the pointer away mid-drag: drop the gesture without
    /// selecting anything and stay armed.
    pub fn pointer_cancel(&mut self) -> Vec<LassoAction> {
        if !self.is_dragging_locked() {
            return Vec::new();
        }
        tracing::debug!("lasso gesture cancelled");
        self.phase = LassoPhase::Armed;
        vec![LassoAction::SetMapDragging(true), LassoAction::ClearPreview]
    }

    /// Drop any shape and leave draw mode, from whatever state.
    ///
    /// Used both by the toggle and by the selection modal's dismissal.
    pub fn clear(&mut self) -> Vec<LassoAction> {
        let previous = std::mem::take(&mut self.phase);
        let mut actions = Vec::new();
        if matches!(previous, LassoPhase::Drawing(_)) {
            actions.push(LassoAction::SetMapDragging(true));
        }
        let had_shape = self.shape.take().is_some();
        if had_shape || matches!(previous, LassoPhase::Drawing(_)) {
            actions.push(LassoAction::ClearPreview);
        }
        if !matches!(previous, LassoPhase::Idle) {
            tracing::debug!("lasso disarmed");
            actions.push(LassoAction::SetPointerCapture(false));
            actions.push(LassoAction::SetCursor(Cursor::Default));
        }
        actions
    }
}

/// Entries whose coordinates fall inside `polygon`, in input order.
#[must_use]
pub fn select_within(entries: &[GeoEntry], polygon: &[LatLng]) -> SelectionResult {
    entries
        .iter()
        .filter(|e| point_in_polygon(e.coordinates.lat, e.coordinates.lng, polygon))
        .cloned()
        .collect()
}
