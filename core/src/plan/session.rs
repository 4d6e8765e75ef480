//! Per-frame orchestration: input, then drag, then relaxation.
//!
//! Renderers read the plan afterwards through its public stores; the frame
//! ordering here is the single place that fixes the input/solve sequencing.

use tracing::debug;

use super::interaction::{InteractionState, KeyAction};
use super::solver::{RelaxReport, RelaxationSolver, SolverConfig};
use super::types::{Floorplan, PlanError};
use crate::geometry::Point2;

/// One frame's worth of external input.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    pub pointer: Point2,
    pub pressed: bool,
    pub released: bool,
    pub actions: Vec<KeyAction>,
}

impl FrameInput {
    /// Pointer movement only, no button or key events.
    pub fn idle(pointer: Point2) -> Self {
        Self {
            pointer,
            pressed: false,
            released: false,
            actions: Vec::new(),
        }
    }
}

pub struct Session {
    pub plan: Floorplan,
    pub config: SolverConfig,
    pub interaction: InteractionState,
}

impl Session {
    pub fn new(plan: Floorplan) -> Self {
        Self {
            plan,
            config: SolverConfig::default(),
            interaction: InteractionState::default(),
        }
    }

    /// Advance one frame. Deterministic order: key actions, press/release,
    /// hover, drag assignment, then relaxation.
    pub fn step(&mut self, input: &FrameInput) -> RelaxReport {
        for action in &input.actions {
            self.apply_action(*action);
        }
        if input.pressed {
            self.interaction.pointer_pressed(&mut self.plan, input.pointer);
        }
        if input.released {
            self.interaction.pointer_released();
        }
        self.interaction.pointer_moved(&self.plan, input.pointer);
        self.interaction.apply_drag(&mut self.plan, input.pointer);

        RelaxationSolver::relax(&mut self.plan, &self.config)
    }

    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::ResetAll => self.plan.reset_all(),
            KeyAction::TogglePins => {
                self.config.pins_active = !self.config.pins_active;
                debug!(active = self.config.pins_active, "pins toggled");
            }
            KeyAction::ToggleParallel => {
                self.config.parallel_enabled = !self.config.parallel_enabled;
                debug!(active = self.config.parallel_enabled, "parallel toggled");
            }
            KeyAction::ToggleAngle => {
                self.config.angle_enabled = !self.config.angle_enabled;
                debug!(active = self.config.angle_enabled, "angle toggled");
            }
        }
    }
}

/// The seed scene of the prototype: a 400x400 square of walls with one
/// pinned corner, a captured length constraint on the left edge and a
/// captured right angle at the top-right corner.
pub fn demo_scene() -> Result<Floorplan, PlanError> {
    let mut plan = Floorplan::new();

    let a = plan.add_anchor(50.0, 50.0)?;
    let b = plan.add_anchor(450.0, 50.0)?;
    let c = plan.add_anchor(450.0, 450.0)?;
    let d = plan.add_anchor(50.0, 450.0)?;
    plan.set_pinned(c, true)?;

    plan.add_wall(a, b)?;
    plan.add_wall(b, c)?;
    plan.add_wall(c, d)?;
    plan.add_wall(d, a)?;

    plan.add_length_constraint(d, a, -1.0)?;
    plan.add_angle_constraint(a, b, c, -1.0)?;

    Ok(plan)
}
