use approx::assert_relative_eq;
use dronehover::{utils::GRAVITY, Hover, HoverStatus, StandardAirframe};

use crate::common::{
    assert_hover_balance, assert_result_finite, seeded_config, solve, standard,
};

#[test]
fn test_tricopter_spins_to_hover() {
    let (hover, result) = solve(standard(StandardAirframe::Tricopter));

    assert_eq!(result.status, HoverStatus::Spinning);
    assert_result_finite(&result);
    assert_hover_balance(&result, hover.matrices(), false);

    // Net torque stays parallel to the thrust
    let scale = GRAVITY * hover.matrices().torque_scale();
    assert!(result.cross_residual <= 1e-4 * scale);
    assert!(result.specific_torque() > 1e-3);
}

#[test]
fn test_monocopter_falls_back_to_spinning() {
    let mut hover = Hover::new(standard(StandardAirframe::Monocopter), seeded_config()).unwrap();

    let static_result = hover.static_hover().unwrap();
    assert_eq!(static_result.status, HoverStatus::Infeasible);

    let result = hover.compute_hover().unwrap();
    assert_eq!(result.status, HoverStatus::Spinning);
    assert_eq!(result.eta.len(), 1);
    assert_relative_eq!(result.eta[0], GRAVITY / 10.0, epsilon = 1e-4);
    assert_relative_eq!(result.specific_force(), GRAVITY, max_relative = 1e-4);
    assert_relative_eq!(result.thrust_direction.z, 1.0, epsilon = 1e-9);
}

#[test]
fn test_countercopter_runs_one_rotor_at_the_floor() {
    let (hover, result) = solve(standard(StandardAirframe::Countercopter));

    assert_eq!(result.status, HoverStatus::Spinning);
    assert_hover_balance(&result, hover.matrices(), false);

    let (lo, _) = hover.matrices().eta_bounds();
    let (high, low) = if result.eta[0] > result.eta[1] {
        (result.eta[0], result.eta[1])
    } else {
        (result.eta[1], result.eta[0])
    };
    assert_relative_eq!(low, lo, epsilon = 1e-4);
    assert_relative_eq!(high, GRAVITY / 10.0 + lo, epsilon = 1e-4);
}

#[test]
fn test_spinning_report_includes_cross_product() {
    let (_, result) = solve(standard(StandardAirframe::Tricopter));
    let report = result.to_string();

    assert!(report.contains("Spinning Hover Achieved"));
    assert!(report.contains("Thrust vector direction"));
    assert!(result.max_thrust_to_weight.is_some());
}
