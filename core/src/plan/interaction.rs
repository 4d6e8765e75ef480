//! Drag and hover selection over the anchor store.
//!
//! The frontend supplies a continuous pointer position plus discrete
//! pressed/released events; everything else lives here so presentation
//! layers stay thin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::Floorplan;
use crate::geometry::{dist_sq, Point2};

/// Squared pick distance for press and hover selection.
pub const PICK_RADIUS_SQ: f64 = 20.0;

/// Key toggles the prototype exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    ResetAll,
    TogglePins,
    ToggleParallel,
    ToggleAngle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Anchor currently being dragged, if any.
    pub drag_anchor: Option<usize>,
    /// Anchor under the cursor while not dragging; frontends use this for
    /// highlighting and to suppress camera panning.
    pub hover_anchor: Option<usize>,
}

impl InteractionState {
    /// Handle a pointer-press: record every anchor's drag-start position,
    /// then pick the nearest anchor within the pick radius as the drag
    /// target. Ties go to the first anchor found (strict less-than).
    pub fn pointer_pressed(&mut self, plan: &mut Floorplan, cursor: Point2) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (ndx, anchor) in plan.anchors.iter_mut().enumerate() {
            anchor.drag_start = anchor.position;
            let d = dist_sq(&anchor.position, &cursor);
            if d <= PICK_RADIUS_SQ && best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((ndx, d));
            }
        }
        self.drag_anchor = best.map(|(ndx, _)| ndx);
        debug!(anchor = ?self.drag_anchor, "pointer pressed");
        self.drag_anchor
    }

    pub fn pointer_released(&mut self) {
        if self.drag_anchor.take().is_some() {
            debug!("pointer released, drag cleared");
        }
    }

    /// Update hover tracking. Suspended while a drag is active.
    pub fn pointer_moved(&mut self, plan: &Floorplan, cursor: Point2) {
        if self.drag_anchor.is_some() {
            return;
        }
        let mut hover = None;
        for (ndx, anchor) in plan.anchors.iter().enumerate() {
            if dist_sq(&anchor.position, &cursor) <= PICK_RADIUS_SQ {
                hover = Some(ndx);
            }
        }
        self.hover_anchor = hover;
    }

    /// Force the dragged anchor to the pointer position. Runs once per
    /// frame, before relaxation; a pinned anchor can be dragged here but is
    /// snapped back inside the substep loop while pins are active.
    pub fn apply_drag(&self, plan: &mut Floorplan, cursor: Point2) {
        if let Some(ndx) = self.drag_anchor {
            plan.anchors[ndx].position = cursor;
        }
    }
}
