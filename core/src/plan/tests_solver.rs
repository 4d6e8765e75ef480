use crate::geometry::{dist, ApproxEq, Point2};
use crate::plan::solver::{RelaxationSolver, SolverConfig};
use crate::plan::types::Floorplan;

fn length_pair(d: f64, target: f64) -> Floorplan {
    let mut plan = Floorplan::new();
    plan.add_anchor(0.0, 0.0).unwrap();
    plan.add_anchor(d, 0.0).unwrap();
    plan.add_length_constraint(0, 1, target).unwrap();
    plan
}

#[test]
fn test_length_converges_within_epsilon() {
    let mut plan = length_pair(10.0, 9.0);
    let config = SolverConfig::default();

    let report = RelaxationSolver::relax(&mut plan, &config);

    let d = dist(&plan.anchors[0].position, &plan.anchors[1].position);
    assert!((d - 9.0).abs() < 0.01, "distance {} not near target", d);
    assert!(report.max_residual < 0.01);
    assert_eq!(report.substeps, 100);
    assert_eq!(report.constraints_evaluated, 100);
}

#[test]
fn test_length_error_shrinks_every_frame() {
    let mut plan = length_pair(10.0, 4.0);
    let config = SolverConfig::default();

    let mut previous = f64::MAX;
    for _ in 0..5 {
        let report = RelaxationSolver::relax(&mut plan, &config);
        assert!(report.max_residual < previous);
        previous = report.max_residual;
    }
}

#[test]
fn test_length_correction_is_symmetric() {
    let mut plan = length_pair(10.0, 8.0);
    RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    // Both endpoints moved toward the midpoint by the same amount.
    let left = plan.anchors[0].position.x;
    let right = plan.anchors[1].position.x;
    assert!(left.approx_eq(&(10.0 - right)));
    assert!(plan.anchors[0].position.y.approx_eq(&0.0));
}

#[test]
fn test_captured_length_target_is_noop() {
    // target <= 0 captures the current distance, so relaxation must leave
    // the pair where it is.
    let mut plan = length_pair(10.0, -1.0);
    let before = plan.anchors.clone();

    RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    assert!(plan.anchors[0].position.approx_eq(&before[0].position));
    assert!(plan.anchors[1].position.approx_eq(&before[1].position));
}

#[test]
fn test_degenerate_length_pair_is_skipped() {
    let mut plan = Floorplan::new();
    plan.add_anchor(5.0, 5.0).unwrap();
    plan.add_anchor(5.0, 5.0).unwrap();
    plan.add_length_constraint(0, 1, 10.0).unwrap();

    RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    // Coincident endpoints have no direction: no correction, no NaN.
    for anchor in &plan.anchors {
        assert!(anchor.position.x.is_finite() && anchor.position.y.is_finite());
        assert!(anchor.position.approx_eq(&Point2::new(5.0, 5.0)));
    }
}

#[test]
fn test_pinned_anchor_holds_rest_position() {
    let mut plan = length_pair(10.0, 4.0);
    plan.set_pinned(1, true).unwrap();
    let config = SolverConfig::default();

    RelaxationSolver::relax(&mut plan, &config);

    // The pin phase runs after every substep, so the pinned anchor ends each
    // substep (and the frame) exactly at its rest position.
    assert_eq!(plan.anchors[1].position, plan.anchors[1].original);
    // The free anchor did all the moving.
    assert!(plan.anchors[0].position.x > 0.5);
}

#[test]
fn test_pins_inactive_lets_pinned_anchor_move() {
    let mut plan = length_pair(10.0, 4.0);
    plan.set_pinned(1, true).unwrap();
    let config = SolverConfig {
        pins_active: false,
        ..SolverConfig::default()
    };

    RelaxationSolver::relax(&mut plan, &config);
    assert!(!plan.anchors[1].position.approx_eq(&plan.anchors[1].original));
}

fn parallel_scene(ang1: f64, ang2: f64) -> Floorplan {
    let mut plan = Floorplan::new();
    plan.add_anchor(0.0, 0.0).unwrap();
    plan.add_anchor(10.0 * ang1.cos(), 10.0 * ang1.sin()).unwrap();
    plan.add_anchor(0.0, 20.0).unwrap();
    plan.add_anchor(10.0 * ang2.cos(), 20.0 + 10.0 * ang2.sin())
        .unwrap();
    plan.add_parallel_constraint(0, 1, 2, 3).unwrap();
    plan
}

#[test]
fn test_parallel_aligns_segments() {
    let mut plan = parallel_scene(0.0, 0.6);
    let constraint = plan.constraints[0];
    let initial = RelaxationSolver::residual(&plan, &constraint);

    let report = RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    assert!(report.max_residual < 0.01, "residual {}", report.max_residual);
    assert!(report.max_residual < initial);
}

#[test]
fn test_parallel_takes_shortest_path_across_pi() {
    // Directions 3.0 and -3.0 rad differ by ~0.28 the short way round; the
    // raw difference of -6.0 would spin both segments the long way.
    let mut plan = parallel_scene(3.0, -3.0);
    let constraint = plan.constraints[0];
    assert!(RelaxationSolver::residual(&plan, &constraint) < 0.3);

    let report = RelaxationSolver::relax(&mut plan, &SolverConfig::default());
    assert!(report.max_residual < 0.01, "residual {}", report.max_residual);

    // Segment endpoints stayed in their own neighbourhood instead of
    // sweeping a half-turn.
    assert!(dist(&plan.anchors[1].position, &Point2::new(10.0 * 3.0_f64.cos(), 10.0 * 3.0_f64.sin())) < 2.0);
}

#[test]
fn test_parallel_preserves_midpoints_and_lengths() {
    let mut plan = parallel_scene(0.0, 0.6);
    RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    // Rotation about the midpoint changes neither the midpoint nor the
    // segment length.
    let mid1 = crate::geometry::midpoint(&plan.anchors[0].position, &plan.anchors[1].position);
    assert!(mid1.approx_eq(&Point2::new(5.0, 0.0)));
    let len1 = dist(&plan.anchors[0].position, &plan.anchors[1].position);
    assert!((len1 - 10.0).abs() < 1e-9);
}

#[test]
fn test_parallel_toggle_disables_evaluation() {
    let mut plan = parallel_scene(0.0, 0.6);
    let before = plan.anchors.clone();
    let config = SolverConfig {
        parallel_enabled: false,
        ..SolverConfig::default()
    };

    let report = RelaxationSolver::relax(&mut plan, &config);
    assert_eq!(report.constraints_evaluated, 0);
    assert_eq!(plan.anchors, before);
}

fn angle_scene(target: f64) -> Floorplan {
    let mut plan = Floorplan::new();
    plan.add_anchor(10.0, 0.0).unwrap();
    plan.add_anchor(0.0, 0.0).unwrap();
    plan.add_anchor(0.0, 10.0).unwrap();
    plan.add_angle_constraint(0, 1, 2, target).unwrap();
    plan
}

#[test]
fn test_angle_drives_toward_target() {
    // Right angle opened toward 120 degrees.
    let target = 2.0 * std::f64::consts::FRAC_PI_3;
    let mut plan = angle_scene(target);

    let report = RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    let current = plan.angle_at(0, 1, 2).unwrap();
    assert!((current - target).abs() < 0.01, "angle {} vs {}", current, target);
    assert!(report.max_residual < 0.01);
}

#[test]
fn test_captured_angle_target_is_noop() {
    let mut plan = angle_scene(-1.0);
    let before = plan.anchors.clone();

    RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    for (anchor, prev) in plan.anchors.iter().zip(&before) {
        assert!(anchor.position.approx_eq(&prev.position));
    }
}

#[test]
fn test_angle_toggle_disables_evaluation() {
    let mut plan = angle_scene(1.0);
    let before = plan.anchors.clone();
    let config = SolverConfig {
        angle_enabled: false,
        ..SolverConfig::default()
    };

    let report = RelaxationSolver::relax(&mut plan, &config);
    assert_eq!(report.constraints_evaluated, 0);
    assert_eq!(plan.anchors, before);
}

#[test]
fn test_angle_vertex_stays_put() {
    let mut plan = angle_scene(2.0);
    RelaxationSolver::relax(&mut plan, &SolverConfig::default());

    // Both arms rotate about the vertex; the vertex itself never moves.
    assert!(plan.anchors[1].position.approx_eq(&Point2::new(0.0, 0.0)));
}

#[test]
fn test_substeps_zero_clamped_to_one() {
    let mut plan = length_pair(10.0, 9.0);
    let config = SolverConfig {
        substeps: 0,
        ..SolverConfig::default()
    };

    let report = RelaxationSolver::relax(&mut plan, &config);
    assert_eq!(report.substeps, 1);
    assert!(plan.anchors[0].position.x.is_finite());
}
