pub mod interaction;
pub mod preview;
pub mod session;
pub mod solver;
pub mod types;

pub use interaction::{InteractionState, KeyAction, PICK_RADIUS_SQ};
pub use preview::{parallel_preview, PreviewSegment, PREVIEW_STEPS};
pub use session::{demo_scene, FrameInput, Session};
pub use solver::{RelaxReport, RelaxationSolver, SolverConfig};
pub use types::{Anchor, Constraint, Floorplan, Limits, PlanError, Wall};

#[cfg(test)]
mod tests_solver;
