use serde::{Deserialize, Serialize};

use super::types::{Constraint, Floorplan};
use crate::geometry::{
    dist, midpoint, rotate_around_point, segment_angle, wrap_angle, EPSILON,
};

/// Relaxation engine configuration.
///
/// `parallel_enabled` / `angle_enabled` are the debug toggles of the
/// prototype: they disable evaluation of a whole constraint *type*, not of
/// individual instances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Constraint passes per frame.
    pub substeps: usize,
    /// Total correction strength per frame; each substep applies
    /// `base_strength / substeps`.
    pub base_strength: f64,
    /// When enabled, pinned anchors snap back to their rest position after
    /// every substep.
    pub pins_active: bool,
    pub parallel_enabled: bool,
    pub angle_enabled: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            substeps: 100,
            base_strength: 5.0,
            pins_active: true,
            parallel_enabled: true,
            angle_enabled: true,
        }
    }
}

/// Per-frame relaxation summary.
///
/// The engine keeps no solved/unsolved state between frames; it always runs
/// the configured number of substeps and reports the residual it left
/// behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelaxReport {
    pub substeps: usize,
    /// Constraint evaluations actually performed (type-disabled constraints
    /// are not counted).
    pub constraints_evaluated: usize,
    /// Largest per-constraint error remaining after the final substep.
    pub max_residual: f64,
}

pub struct RelaxationSolver;

impl RelaxationSolver {
    /// Run one frame of Gauss-Seidel relaxation over the plan.
    ///
    /// Each substep evaluates every constraint once, in store order, mutating
    /// anchor positions in place, then snaps pinned anchors back to their
    /// rest positions. Later constraints in a substep see positions already
    /// updated by earlier ones.
    pub fn relax(plan: &mut Floorplan, config: &SolverConfig) -> RelaxReport {
        let substeps = config.substeps.max(1);
        let strength = config.base_strength / substeps as f64;
        let mut evaluated = 0usize;

        for _ in 0..substeps {
            for i in 0..plan.constraints.len() {
                match plan.constraints[i] {
                    Constraint::Parallel { .. } if !config.parallel_enabled => {}
                    Constraint::Angle { .. } if !config.angle_enabled => {}
                    Constraint::Length { a, b, target } => {
                        Self::eval_length(plan, a, b, target, strength);
                        evaluated += 1;
                    }
                    Constraint::Parallel { a, b, a2, b2 } => {
                        Self::eval_parallel(plan, a, b, a2, b2, strength);
                        evaluated += 1;
                    }
                    Constraint::Angle { a, b, c, target } => {
                        Self::eval_angle(plan, a, b, c, target, strength);
                        evaluated += 1;
                    }
                }
            }

            if config.pins_active {
                for anchor in &mut plan.anchors {
                    if anchor.pinned {
                        anchor.position = anchor.original;
                    }
                }
            }
        }

        let mut max_residual = 0.0f64;
        for constraint in &plan.constraints {
            max_residual = max_residual.max(Self::residual(plan, constraint));
        }

        RelaxReport {
            substeps,
            constraints_evaluated: evaluated,
            max_residual,
        }
    }

    /// Symmetrically contract/expand the pair toward the target length,
    /// split evenly between both endpoints.
    fn eval_length(plan: &mut Floorplan, a: usize, b: usize, target: f64, strength: f64) {
        let pa = plan.anchors[a].position;
        let pb = plan.anchors[b].position;
        let delta = pb - pa;
        let len = delta.norm();
        if len < EPSILON {
            // Coincident endpoints: no defined direction, contribute nothing.
            return;
        }
        let diff = len - target;
        let offset = delta / len * (strength * 0.5 * diff);
        plan.anchors[a].position += offset;
        plan.anchors[b].position -= offset;
    }

    /// Rotate both segments about their own midpoints, each by half the
    /// (wrapped) angle difference scaled by strength, in opposite senses.
    fn eval_parallel(
        plan: &mut Floorplan,
        a: usize,
        b: usize,
        a2: usize,
        b2: usize,
        strength: f64,
    ) {
        let pa = plan.anchors[a].position;
        let pb = plan.anchors[b].position;
        let pa2 = plan.anchors[a2].position;
        let pb2 = plan.anchors[b2].position;
        if (pb - pa).norm() < EPSILON || (pb2 - pa2).norm() < EPSILON {
            return;
        }

        let ang_diff = wrap_angle(segment_angle(&pa2, &pb2) - segment_angle(&pa, &pb));
        let ang = ang_diff * 0.5 * strength;

        let ctr1 = midpoint(&pa, &pb);
        plan.anchors[a].position = rotate_around_point(pa, ctr1, ang);
        plan.anchors[b].position = rotate_around_point(pb, ctr1, ang);

        let ctr2 = midpoint(&pa2, &pb2);
        plan.anchors[a2].position = rotate_around_point(pa2, ctr2, -ang);
        plan.anchors[b2].position = rotate_around_point(pb2, ctr2, -ang);
    }

    /// Rotate the two arms about the vertex, in opposite senses, toward the
    /// target opening angle.
    fn eval_angle(plan: &mut Floorplan, a: usize, b: usize, c: usize, target: f64, strength: f64) {
        let Some(current) = plan.angle_at(a, b, c) else {
            return;
        };
        let ang = (current - target) * 0.5 * strength;
        let pb = plan.anchors[b].position;
        plan.anchors[a].position = rotate_around_point(plan.anchors[a].position, pb, -ang);
        plan.anchors[c].position = rotate_around_point(plan.anchors[c].position, pb, ang);
    }

    /// Current error of a single constraint. Degenerate geometry reads as
    /// zero error, matching the evaluation-time skip.
    pub fn residual(plan: &Floorplan, constraint: &Constraint) -> f64 {
        match *constraint {
            Constraint::Length { a, b, target } => {
                (dist(&plan.anchors[a].position, &plan.anchors[b].position) - target).abs()
            }
            Constraint::Parallel { a, b, a2, b2 } => {
                let pa = plan.anchors[a].position;
                let pb = plan.anchors[b].position;
                let pa2 = plan.anchors[a2].position;
                let pb2 = plan.anchors[b2].position;
                if (pb - pa).norm() < EPSILON || (pb2 - pa2).norm() < EPSILON {
                    return 0.0;
                }
                wrap_angle(segment_angle(&pa2, &pb2) - segment_angle(&pa, &pb)).abs()
            }
            Constraint::Angle { a, b, c, target } => match plan.angle_at(a, b, c) {
                Some(current) => (current - target).abs(),
                None => 0.0,
            },
        }
    }
}
