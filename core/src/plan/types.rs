use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::geometry::{dist, Point2, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlanError {
    #[error("anchor capacity exceeded (max {0})")]
    AnchorCapacity(usize),
    #[error("wall capacity exceeded (max {0})")]
    WallCapacity(usize),
    #[error("constraint capacity exceeded (max {0})")]
    ConstraintCapacity(usize),
    #[error("anchor index {0} does not exist")]
    InvalidAnchor(usize),
}

/// A controllable 2D point, optionally pinned to its rest position.
///
/// Anchors are identified by their index in the plan's append-only anchor
/// store; indices are stable and anchors are never destroyed during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub position: Point2,
    /// Position at the moment the pointer was last pressed.
    pub drag_start: Point2,
    /// Rest position; pinned anchors snap back to it every substep.
    pub original: Point2,
    #[serde(default)]
    pub pinned: bool,
}

/// A purely visual edge between two anchors. Has no solver effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub anchor_a: usize,
    pub anchor_b: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Keep the distance between `a` and `b` at `target` (>= 0).
    Length { a: usize, b: usize, target: f64 },
    /// Drive segments (a, b) and (a2, b2) toward a shared direction.
    /// No stored target: the correction is recomputed from the current
    /// angle difference at every evaluation.
    Parallel { a: usize, b: usize, a2: usize, b2: usize },
    /// Keep the angle at vertex `b` between `a` and `c` at `target`
    /// radians, effectively in (0, PI].
    Angle { a: usize, b: usize, c: usize, target: f64 },
}

/// Store capacities. The original prototype used fixed-size tables that
/// silently overflowed; here the bound is explicit and adds past it are
/// rejected with a `PlanError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_anchors: usize,
    pub max_walls: usize,
    pub max_constraints: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_anchors: 100,
            max_walls: 50,
            max_constraints: 100,
        }
    }
}

/// The session/world object: anchor, wall and constraint stores.
///
/// Stores are ordered `Vec`s; insertion order is evaluation order and
/// indices are assigned sequentially from 0. The relaxation engine borrows
/// anchors mutably and walls/constraints read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    pub anchors: Vec<Anchor>,
    pub walls: Vec<Wall>,
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub limits: Limits,
}

impl Default for Floorplan {
    fn default() -> Self {
        Self::new()
    }
}

impl Floorplan {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            anchors: Vec::new(),
            walls: Vec::new(),
            constraints: Vec::new(),
            limits,
        }
    }

    fn check_anchor(&self, index: usize) -> Result<(), PlanError> {
        if index < self.anchors.len() {
            Ok(())
        } else {
            Err(PlanError::InvalidAnchor(index))
        }
    }

    fn check_constraint_capacity(&self) -> Result<(), PlanError> {
        if self.constraints.len() < self.limits.max_constraints {
            Ok(())
        } else {
            Err(PlanError::ConstraintCapacity(self.limits.max_constraints))
        }
    }

    /// Append a new anchor at (x, y) with its rest position set to the same
    /// point, unpinned. Returns the anchor's index.
    pub fn add_anchor(&mut self, x: f64, y: f64) -> Result<usize, PlanError> {
        if self.anchors.len() >= self.limits.max_anchors {
            return Err(PlanError::AnchorCapacity(self.limits.max_anchors));
        }
        let p = Point2::new(x, y);
        self.anchors.push(Anchor {
            position: p,
            drag_start: p,
            original: p,
            pinned: false,
        });
        Ok(self.anchors.len() - 1)
    }

    pub fn set_pinned(&mut self, index: usize, pinned: bool) -> Result<(), PlanError> {
        self.check_anchor(index)?;
        self.anchors[index].pinned = pinned;
        Ok(())
    }

    pub fn reset_to_original(&mut self, index: usize) -> Result<(), PlanError> {
        self.check_anchor(index)?;
        let anchor = &mut self.anchors[index];
        anchor.position = anchor.original;
        Ok(())
    }

    /// Snap every anchor back to its rest position. Idempotent.
    pub fn reset_all(&mut self) {
        for anchor in &mut self.anchors {
            anchor.position = anchor.original;
        }
    }

    pub fn add_wall(&mut self, a: usize, b: usize) -> Result<usize, PlanError> {
        self.check_anchor(a)?;
        self.check_anchor(b)?;
        if self.walls.len() >= self.limits.max_walls {
            return Err(PlanError::WallCapacity(self.limits.max_walls));
        }
        self.walls.push(Wall {
            anchor_a: a,
            anchor_b: b,
        });
        Ok(self.walls.len() - 1)
    }

    /// Add a length constraint between `a` and `b`. A non-positive `target`
    /// captures the current distance instead.
    pub fn add_length_constraint(
        &mut self,
        a: usize,
        b: usize,
        target: f64,
    ) -> Result<usize, PlanError> {
        self.check_anchor(a)?;
        self.check_anchor(b)?;
        self.check_constraint_capacity()?;

        let target = if target <= 0.0 {
            let captured = dist(&self.anchors[a].position, &self.anchors[b].position);
            debug!(a, b, target = captured, "captured length target");
            captured
        } else {
            target
        };
        self.constraints.push(Constraint::Length { a, b, target });
        Ok(self.constraints.len() - 1)
    }

    pub fn add_parallel_constraint(
        &mut self,
        a: usize,
        b: usize,
        a2: usize,
        b2: usize,
    ) -> Result<usize, PlanError> {
        self.check_anchor(a)?;
        self.check_anchor(b)?;
        self.check_anchor(a2)?;
        self.check_anchor(b2)?;
        self.check_constraint_capacity()?;

        self.constraints.push(Constraint::Parallel { a, b, a2, b2 });
        Ok(self.constraints.len() - 1)
    }

    /// Add an angle constraint at vertex `b`. A non-positive `target`
    /// captures the current angle `∠ABC` instead.
    pub fn add_angle_constraint(
        &mut self,
        a: usize,
        b: usize,
        c: usize,
        target: f64,
    ) -> Result<usize, PlanError> {
        self.check_anchor(a)?;
        self.check_anchor(b)?;
        self.check_anchor(c)?;
        self.check_constraint_capacity()?;

        let target = if target <= 0.0 {
            // Degenerate geometry at capture time falls back to a right
            // angle rather than storing NaN.
            let captured = self
                .angle_at(a, b, c)
                .unwrap_or(std::f64::consts::FRAC_PI_2);
            debug!(
                a,
                b,
                c,
                degrees = captured.to_degrees(),
                "captured angle target"
            );
            captured
        } else {
            target
        };
        self.constraints.push(Constraint::Angle { a, b, c, target });
        Ok(self.constraints.len() - 1)
    }

    /// Current angle `∠ABC` via the normalized dot product, or `None` when
    /// either arm is too short to define a direction.
    pub fn angle_at(&self, a: usize, b: usize, c: usize) -> Option<f64> {
        let ba = self.anchors[a].position - self.anchors[b].position;
        let bc = self.anchors[c].position - self.anchors[b].position;
        let (len_ba, len_bc) = (ba.norm(), bc.norm());
        if len_ba < EPSILON || len_bc < EPSILON {
            return None;
        }
        let dot = (ba / len_ba).dot(&(bc / len_bc)).clamp(-1.0, 1.0);
        Some(dot.acos())
    }
}
