use dronehover::{
    components::{ConfigError, RawPropeller},
    AirframeSpec, Hover, HoverError, HoverStatus, RawAirframe, StandardAirframe,
};
use nalgebra::Matrix3;

use crate::common::{
    create_raw_propeller, create_raw_quad, seeded_config, standard, QUAD_YAML,
};

fn expect_config_error(raw: RawAirframe) -> ConfigError {
    match Hover::from_raw(raw, seeded_config()) {
        Err(HoverError::Config(err)) => err,
        Err(other) => panic!("Expected a configuration error, got {}", other),
        Ok(_) => panic!("Expected a configuration error, got a solver"),
    }
}

#[test]
fn test_missing_location_is_reported_with_index() {
    let mut raw = create_raw_quad();
    raw.props[1].loc = None;

    match expect_config_error(raw) {
        ConfigError::MissingField { field, index } => {
            assert_eq!(field, "loc");
            assert_eq!(index, 1);
        }
        other => panic!("Unexpected error {}", other),
    }
}

#[test]
fn test_missing_aero_data_names_constants() {
    let mut raw = create_raw_quad();
    raw.props[3] = RawPropeller {
        constants: None,
        wmax: None,
        ..create_raw_propeller(0.0, "cw")
    };

    assert!(matches!(
        expect_config_error(raw),
        ConfigError::MissingField {
            field: "constants",
            index: 3
        }
    ));
}

#[test]
fn test_invalid_spin_token_is_rejected() {
    let mut raw = create_raw_quad();
    raw.props[2].rotation = Some("clockwise".to_string());

    match expect_config_error(raw) {
        ConfigError::InvalidSpinSense { token, index } => {
            assert_eq!(token, "clockwise");
            assert_eq!(index, 2);
        }
        other => panic!("Unexpected error {}", other),
    }
}

#[test]
fn test_explicit_mass_requires_inertia() {
    let mut raw = create_raw_quad();
    raw.Iz = None;

    assert!(matches!(
        expect_config_error(raw),
        ConfigError::MissingAirframeField("Iz")
    ));
}

#[test]
fn test_airframe_without_propellers_is_rejected() {
    let mut raw = create_raw_quad();
    raw.props.clear();

    assert!(matches!(
        expect_config_error(raw),
        ConfigError::ValidationError(_)
    ));
}

#[test]
fn test_zero_thrust_direction_is_rejected() {
    let mut raw = create_raw_quad();
    raw.props[0].dir = Some(vec![0.0, 0.0, 0.0]);

    assert!(AirframeSpec::try_from(raw).is_err());
}

#[test]
fn test_invalid_solver_config_is_rejected() {
    let config = seeded_config().with_tolerance(0.0);
    let result = Hover::from_raw(create_raw_quad(), config);

    assert!(matches!(result, Err(HoverError::InvalidParameter(_))));
}

#[test]
fn test_yaml_airframe_hovers_statically() {
    let raw = RawAirframe::from_yaml(QUAD_YAML).expect("fixture should parse");
    assert_eq!(raw.name, "yaml_quad");
    assert_eq!(raw.props.len(), 4);

    let mut hover = Hover::from_raw(raw, seeded_config()).expect("fixture should validate");
    let result = hover.compute_hover().unwrap();

    assert_eq!(result.status, HoverStatus::Static);
    assert!(result.max_thrust_to_weight.unwrap() > 1.0);
}

#[test]
fn test_json_round_trip_of_raw_airframe() {
    let raw = create_raw_quad();
    let json = serde_json::to_string(&raw).unwrap();
    let parsed = RawAirframe::from_json(&json).unwrap();

    assert_eq!(parsed, raw);
}

#[test]
fn test_loaded_airframe_with_singular_inertia_is_rejected() {
    let airframe = standard(StandardAirframe::Quadcopter);
    let mut value = serde_json::to_value(&airframe).unwrap();
    value["mass"]["inertia"] = serde_json::to_value(Matrix3::<f64>::zeros()).unwrap();
    let loaded: AirframeSpec = serde_json::from_value(value).unwrap();

    assert!(matches!(
        Hover::new(loaded, seeded_config()),
        Err(HoverError::SingularInertia(_))
    ));
}
