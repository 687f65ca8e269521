#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use sparx::{size_span, SpanConfig, SpanProfiles, Support};

#[derive(Debug, Clone, Copy)]
struct CantileverProperties {
    center_weight: f64,
    load_factor: f64,
    span: f64,
    delta: f64,
    root_moment: f64,
}

impl Default for CantileverProperties {
    fn default() -> Self {
        Self {
            center_weight: 800.0,
            load_factor: 3.8,
            span: 20.0,
            delta: 0.5,
            root_moment: 10_926.51,
        }
    }
}

fn build_cantilever_config(properties: &CantileverProperties) -> SpanConfig {
    SpanConfig {
        center_weight: properties.center_weight,
        load_factor: properties.load_factor,
        ..SpanConfig::default()
    }
    .with_span(properties.span)
    .with_delta(properties.delta)
    .with_root_moment(properties.root_moment)
}

fn size_cantilever() -> (SpanProfiles, CantileverProperties) {
    let properties = CantileverProperties::default();
    let profiles =
        size_span(build_cantilever_config(&properties)).expect("cantilever sizing succeeds");
    (profiles, properties)
}

#[test]
fn builds_expected_grid() {
    let (profiles, properties) = size_cantilever();

    assert_eq!(profiles.support, Support::Cantilever);
    assert_eq!(profiles.len(), 20);
    assert_relative_eq!(profiles.grid.step(), properties.delta);
    for (name, profile) in profiles.named_profiles() {
        assert_eq!(profile.len(), profiles.len(), "{name} is misaligned");
    }
}

#[test]
fn root_shear_is_half_the_factored_weight() {
    let (profiles, properties) = size_cantilever();

    assert_eq!(
        profiles.shear.first(),
        Some(-properties.load_factor * properties.center_weight / 2.0)
    );
}

#[test]
fn shear_and_moment_are_running_sums() {
    let (profiles, properties) = size_cantilever();

    let mut shear = -properties.load_factor * properties.center_weight / 2.0;
    let mut moment = properties.root_moment;
    assert_eq!(profiles.moment[0], moment);
    for index in 1..profiles.len() {
        shear += profiles.load[index] * properties.delta;
        moment += shear * properties.delta;
        assert_eq!(profiles.shear[index], shear);
        assert_eq!(profiles.moment[index], moment);
    }
}

#[test]
fn chord_is_uniform_inboard_of_the_knee() {
    let (profiles, properties) = size_cantilever();

    // The whole 10 m half-span lies inboard of the 11 m knee.
    let root = profiles.chord[0];
    assert!(profiles.chord.iter().all(|chord| chord == root));
    let total: f64 = profiles.load.iter().map(|load| load * properties.delta).sum();
    assert_relative_eq!(
        2.0 * total,
        properties.load_factor * properties.center_weight,
        max_relative = 1.0e-12
    );
}

#[test]
fn half_span_ending_at_the_chord_knee_sizes() {
    let properties = CantileverProperties {
        span: 22.0,
        root_moment: 5_000.0,
        ..CantileverProperties::default()
    };
    let profiles = size_span(build_cantilever_config(&properties))
        .expect("knee at the tip is a valid planform");

    assert_eq!(profiles.len(), 22);
    assert!(profiles.radius.iter().all(|radius| radius == 0.04 * 1.89));
    assert!(profiles.thickness.iter().all(f64::is_finite));
}

#[test]
fn fully_stressed_section_reaches_the_allowable() {
    let (profiles, _) = size_cantilever();

    let peak = profiles.max_axial_stress().expect("axial stress defined");
    assert_relative_eq!(
        peak.stress.get::<uom::si::pressure::megapascal>(),
        400.0,
        max_relative = 1.0e-9
    );
    assert_eq!(profiles.deflection.first(), Some(0.0));
    assert_eq!(profiles.slope.first(), Some(0.0));
    assert!(profiles.deflection.iter().all(f64::is_finite));
}
