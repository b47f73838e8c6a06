use approx::assert_relative_eq;
use dronehover::{
    utils::GRAVITY, CommandBounds, EffectivenessMatrices, Hover, HoverSolverConfig, HoverStatus,
    StandardAirframe,
};

use crate::common::{
    assert_commands_equal, assert_hover_balance, assert_matrices_identical, assert_result_finite,
    assert_within_bounds, create_tilted_hexacopter, create_underpowered_quad, seeded_config,
    solve, standard,
};

#[test]
fn test_symmetric_rings_hover_with_equal_commands() {
    for airframe in [
        StandardAirframe::Quadcopter,
        StandardAirframe::Hexacopter,
        StandardAirframe::Octacopter,
    ] {
        let (hover, result) = solve(standard(airframe));

        assert_eq!(result.status, HoverStatus::Static, "{}", airframe);
        assert_result_finite(&result);
        assert_within_bounds(&result, &CommandBounds::default());
        assert_commands_equal(&result, 1e-3);
        assert_hover_balance(&result, hover.matrices(), true);
    }
}

#[test]
fn test_static_result_reports_upward_thrust() {
    let (_, result) = solve(standard(StandardAirframe::Quadcopter));

    // Rotors push along -z in the body frame
    assert_relative_eq!(result.thrust_direction.z, -1.0, epsilon = 1e-4);
    assert!(result.cross_residual < 1e-3);
    assert!(result.constraint_violation <= seeded_config().constraint_tolerance);
}

#[test]
fn test_canted_hexacopter_hovers_statically() {
    let (hover, result) = solve(create_tilted_hexacopter());

    assert_eq!(result.status, HoverStatus::Static);
    assert_hover_balance(&result, hover.matrices(), true);
    assert_commands_equal(&result, 1e-3);
}

#[test]
fn test_thrust_to_weight_exceeds_one_for_feasible_hover() {
    let (_, result) = solve(standard(StandardAirframe::Hexacopter));
    let ratio = result.max_thrust_to_weight.expect("feasible result has a ratio");

    // Equal commands scale to full throttle on every rotor
    let airframe = standard(StandardAirframe::Hexacopter);
    let expected = airframe.total_max_thrust() / airframe.weight();
    assert_relative_eq!(ratio, expected, max_relative = 1e-2);
    assert!(ratio > 1.0);
}

#[test]
fn test_underpowered_airframe_cannot_hover() {
    let (hover, result) = solve(create_underpowered_quad());

    assert_eq!(result.status, HoverStatus::Infeasible);
    assert!(!result.is_feasible());
    assert_result_finite(&result);
    assert_within_bounds(&result, &hover.config().command_bounds);
    assert!(result.max_thrust_to_weight.is_none());
    assert!(result.specific_force() < GRAVITY);
    assert!(result.constraint_violation > hover.config().constraint_tolerance);

    let report = result.to_string();
    assert!(report.contains("Drone Cannot Hover"));
}

#[test]
fn test_static_attempt_reports_infeasible_instead_of_error() {
    let mut hover =
        Hover::new(standard(StandardAirframe::Tricopter), seeded_config()).unwrap();
    let result = hover.static_hover().unwrap();

    assert_eq!(result.status, HoverStatus::Infeasible);
    assert_eq!(hover.result(), Some(&result));
}

#[test]
fn test_matrices_are_rebuilt_identically() {
    let airframe = standard(StandardAirframe::Biquadcopter);
    let bounds = CommandBounds::default();
    let first = EffectivenessMatrices::build(&airframe, bounds).unwrap();
    let second = EffectivenessMatrices::build(&airframe, bounds).unwrap();

    assert_matrices_identical(&first, &second);
    assert_eq!(first.propeller_count(), 6);
}

#[test]
fn test_seeded_solves_are_reproducible() {
    let (_, first) = solve(standard(StandardAirframe::Tricopter));
    let (_, second) = solve(standard(StandardAirframe::Tricopter));

    assert_eq!(first, second);
}

#[test]
fn test_verdict_does_not_depend_on_seed() {
    let airframe = standard(StandardAirframe::Quadcopter);
    let mut a = Hover::new(airframe.clone(), HoverSolverConfig::default().with_seed(1)).unwrap();
    let mut b = Hover::new(airframe, HoverSolverConfig::default().with_seed(99)).unwrap();

    let a = a.compute_hover().unwrap();
    let b = b.compute_hover().unwrap();

    assert_eq!(a.status, b.status);
    for (x, y) in a.command.iter().zip(b.command.iter()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-3);
    }
}
