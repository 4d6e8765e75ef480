//! Debug overlay geometry for renderers.
//!
//! Purely read-only: the interpolation below is for drawing the corrective
//! rotation a parallel constraint would apply and never touches solved
//! state.

use serde::{Deserialize, Serialize};

use super::types::{Constraint, Floorplan};
use crate::geometry::{midpoint, rotate_around_point, segment_angle, wrap_angle, Point2, EPSILON};

/// Interpolation sub-frames per preview.
pub const PREVIEW_STEPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewSegment {
    pub a: Point2,
    pub b: Point2,
}

/// Interpolated poses of a parallel constraint's first segment as it would
/// rotate toward alignment. Returns an empty overlay for non-parallel
/// constraints and for degenerate segments.
pub fn parallel_preview(plan: &Floorplan, constraint: &Constraint) -> Vec<PreviewSegment> {
    let Constraint::Parallel { a, b, a2, b2 } = *constraint else {
        return Vec::new();
    };
    let pa = plan.anchors[a].position;
    let pb = plan.anchors[b].position;
    let pa2 = plan.anchors[a2].position;
    let pb2 = plan.anchors[b2].position;
    if (pb - pa).norm() < EPSILON || (pb2 - pa2).norm() < EPSILON {
        return Vec::new();
    }

    let ang_diff = wrap_angle(segment_angle(&pa2, &pb2) - segment_angle(&pa, &pb));
    let ctr = midpoint(&pa, &pb);

    (0..PREVIEW_STEPS)
        .map(|i| {
            let ang = ang_diff * 0.5 * (i as f64 / PREVIEW_STEPS as f64);
            PreviewSegment {
                a: rotate_around_point(pa, ctr, ang),
                b: rotate_around_point(pb, ctr, ang),
            }
        })
        .collect()
}
