use dronehover::{
    components::{MassModel, PropellerSpec, PropellerThrust, RawPropeller, SpinSense},
    utils::ring_location,
    AirframeSpec, RawAirframe,
};
use nalgebra::Vector3;
use std::f64::consts::PI;

/// YAML description of a quadcopter with library constants spelled out
pub const QUAD_YAML: &str = r#"
name: yaml_quad
mass: 0.5
Ix: 0.003
Iy: 0.003
Iz: 0.006
props:
  - loc: [0.0778, 0.0778, 0.0]
    dir: [0.0, 0.0, -1.0]
    rotation: ccw
    constants: [1.08e-06, 1.22e-08]
    wmax: 3142
  - loc: [-0.0778, 0.0778, 0.0]
    dir: [0.0, 0.0, -1.0]
    rotation: cw
    constants: [1.08e-06, 1.22e-08]
    wmax: 3142
  - loc: [-0.0778, -0.0778, 0.0]
    dir: [0.0, 0.0, -1.0]
    rotation: ccw
    constants: [1.08e-06, 1.22e-08]
    wmax: 3142
  - loc: [0.0778, -0.0778, 0.0]
    dir: [0.0, 0.0, -1.0]
    rotation: cw
    constants: [1.08e-06, 1.22e-08]
    wmax: 3142
"#;

/// Creates a complete raw propeller entry on a ring
pub fn create_raw_propeller(angle: f64, rotation: &str) -> RawPropeller {
    let loc = ring_location(0.1, angle);
    RawPropeller {
        loc: Some(vec![loc.x, loc.y, loc.z]),
        dir: Some(vec![0.0, 0.0, -1.0]),
        rotation: Some(rotation.to_string()),
        constants: Some(vec![7.24e-07, 8.20e-09]),
        wmax: Some(3927.0),
        ..Default::default()
    }
}

/// Creates a raw quadcopter with explicit unit mass properties
pub fn create_raw_quad() -> RawAirframe {
    RawAirframe {
        name: "raw_quad".to_string(),
        mass: Some(1.0),
        Ix: Some(0.01),
        Iy: Some(0.01),
        Iz: Some(0.02),
        props: (0..4)
            .map(|i| {
                let rotation = if i % 2 == 0 { "ccw" } else { "cw" };
                create_raw_propeller(PI / 4.0 + i as f64 * PI / 2.0, rotation)
            })
            .collect(),
        ..Default::default()
    }
}

/// Quadcopter whose rotors together cannot lift its weight
pub fn create_underpowered_quad() -> AirframeSpec {
    let props = (0..4)
        .map(|i| {
            let spin = if i % 2 == 0 {
                SpinSense::Ccw
            } else {
                SpinSense::Cw
            };
            PropellerSpec::new(
                ring_location(0.2, PI / 4.0 + i as f64 * PI / 2.0),
                -Vector3::z(),
                spin,
                PropellerThrust::MaxForce {
                    force: 1.0,
                    torque: 0.05,
                },
            )
        })
        .collect();
    AirframeSpec::new("underpowered", MassModel::unit(), Vector3::zeros(), props)
        .expect("valid airframe")
}

/// Hexacopter with every rotor canted 10 degrees alternately in and out
pub fn create_tilted_hexacopter() -> AirframeSpec {
    let tilt = 10f64.to_radians();
    let props = (0..6)
        .map(|i| {
            let angle = i as f64 * PI / 3.0;
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let radial = Vector3::new(angle.cos(), angle.sin(), 0.0);
            let direction = -Vector3::z() * tilt.cos() + radial * (sign * tilt.sin());
            let spin = if i % 2 == 0 {
                SpinSense::Ccw
            } else {
                SpinSense::Cw
            };
            PropellerSpec::new(
                ring_location(0.25, angle),
                direction,
                spin,
                PropellerThrust::MaxForce {
                    force: 6.0,
                    torque: 0.1,
                },
            )
        })
        .collect();
    AirframeSpec::new(
        "tilted_hexacopter",
        MassModel::principal(1.5, 0.02, 0.02, 0.04),
        Vector3::zeros(),
        props,
    )
    .expect("valid airframe")
}

/// Strong and weak rotor on opposite arms of a unit body, in the given order.
///
/// Drag torque is proportional to thrust and the spins are opposed, so static
/// hover needs equal thrust from both: `eta = mG / (2 F_i)` per rotor.
pub fn create_offset_pair(strong_first: bool) -> AirframeSpec {
    let strong = PropellerSpec::new(
        Vector3::new(0.2, 0.0, 0.0),
        -Vector3::z(),
        SpinSense::Ccw,
        PropellerThrust::MaxForce {
            force: 20.0,
            torque: 1.0,
        },
    );
    let weak = PropellerSpec::new(
        Vector3::new(-0.2, 0.0, 0.0),
        -Vector3::z(),
        SpinSense::Cw,
        PropellerThrust::MaxForce {
            force: 10.0,
            torque: 0.5,
        },
    );
    let props = if strong_first {
        vec![strong, weak]
    } else {
        vec![weak, strong]
    };
    AirframeSpec::new("offset_pair", MassModel::unit(), Vector3::zeros(), props)
        .expect("valid airframe")
}
