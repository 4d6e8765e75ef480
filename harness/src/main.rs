//! Headless frame-loop driver for the constraint prototype.
//!
//! Stands in for an interactive frontend: seeds the demo scene, scripts a
//! drag of the top-left corner, releases it and resets, logging residuals
//! along the way. The per-frame contract is the one a real renderer would
//! follow: input, drag assignment, relaxation, then reads.

use plan_core::geometry::Point2;
use plan_core::plan::{demo_scene, FrameInput, KeyAction, PlanError, Session};
use tracing::info;

fn main() -> Result<(), PlanError> {
    tracing_subscriber::fmt::init();

    let mut session = Session::new(demo_scene()?);
    info!(
        anchors = session.plan.anchors.len(),
        walls = session.plan.walls.len(),
        constraints = session.plan.constraints.len(),
        "demo scene seeded"
    );

    // A few idle frames; the seed layout already satisfies its constraints.
    for frame in 0..3 {
        let report = session.step(&FrameInput::idle(Point2::new(0.0, 0.0)));
        info!(frame, residual = report.max_residual, "idle");
    }

    // Grab the corner anchor near (50, 50)...
    let mut press = FrameInput::idle(Point2::new(52.0, 52.0));
    press.pressed = true;
    session.step(&press);
    info!(anchor = ?session.interaction.drag_anchor, "drag started");

    // ...and pull it toward (100, 100) over ten frames.
    for frame in 0..10 {
        let t = (frame + 1) as f64 / 10.0;
        let pointer = Point2::new(50.0 + 50.0 * t, 50.0 + 50.0 * t);
        let report = session.step(&FrameInput::idle(pointer));
        info!(
            frame,
            x = pointer.x,
            y = pointer.y,
            residual = report.max_residual,
            "dragging"
        );
    }

    let mut release = FrameInput::idle(Point2::new(100.0, 100.0));
    release.released = true;
    session.step(&release);
    info!("drag released");

    // Let the solver settle, then reset to the seed layout.
    for frame in 0..30 {
        let report = session.step(&FrameInput::idle(Point2::new(0.0, 0.0)));
        if frame % 10 == 0 {
            info!(frame, residual = report.max_residual, "settling");
        }
    }

    let mut reset = FrameInput::idle(Point2::new(0.0, 0.0));
    reset.actions.push(KeyAction::ResetAll);
    let report = session.step(&reset);
    info!(residual = report.max_residual, "reset to original layout");

    for (ndx, anchor) in session.plan.anchors.iter().enumerate() {
        info!(
            anchor = ndx,
            x = anchor.position.x,
            y = anchor.position.y,
            pinned = anchor.pinned,
            "final"
        );
    }

    Ok(())
}
