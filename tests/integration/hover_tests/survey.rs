use dronehover::{survey, sweep_arm_length, HoverStatus, StandardAirframe};

use crate::common::{create_underpowered_quad, seeded_config, solve, standard};

#[test]
fn test_survey_matches_individual_solves() {
    let airframes = vec![
        standard(StandardAirframe::Quadcopter),
        standard(StandardAirframe::Tricopter),
        create_underpowered_quad(),
        standard(StandardAirframe::Monocopter),
    ];

    let results = survey(&airframes, &seeded_config());
    assert_eq!(results.len(), airframes.len());

    for (airframe, surveyed) in airframes.into_iter().zip(results) {
        let surveyed = surveyed.expect("survey entry should solve");
        let (_, alone) = solve(airframe);
        assert_eq!(surveyed, alone);
    }
}

#[test]
fn test_survey_keeps_input_order() {
    let airframes: Vec<_> = [
        StandardAirframe::Monocopter,
        StandardAirframe::Hexacopter,
        StandardAirframe::Tricopter,
    ]
    .into_iter()
    .map(standard)
    .collect();

    let statuses: Vec<HoverStatus> = survey(&airframes, &seeded_config())
        .into_iter()
        .map(|r| r.unwrap().status)
        .collect();

    assert_eq!(
        statuses,
        vec![
            HoverStatus::Spinning,
            HoverStatus::Static,
            HoverStatus::Spinning
        ]
    );
}

#[test]
fn test_longer_arms_keep_hexacopter_static() {
    let lengths = [0.1, 0.15, 0.2, 0.25];
    let points =
        sweep_arm_length(StandardAirframe::Hexacopter, &lengths, &seeded_config()).unwrap();

    assert_eq!(points.len(), lengths.len());
    for (point, length) in points.iter().zip(lengths) {
        assert_eq!(point.arm_length, length);
        assert_eq!(point.result.status, HoverStatus::Static);
    }
}
