use sparx::{size_span, SpanConfig};
use uom::si::f64::Length;
use uom::si::length::{centimeter, meter};
use uom::si::mass::kilogram;
use uom::si::pressure::megapascal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SpanConfig::default()
        .with_delta(0.5)
        .with_root_moment(13_676.51)
        .with_ply_thickness(0.0125);
    let profiles = size_span(config)?;

    for (index, y) in profiles.grid.positions().enumerate().step_by(4) {
        let thickness = Length::new::<meter>(profiles.thickness[index]);
        println!(
            "y = {y:5.1} m  V = {:9.1} N  M = {:10.1} N*m  t = {:.4} cm  w = {:+.4} m",
            profiles.shear[index],
            profiles.moment[index],
            thickness.get::<centimeter>(),
            profiles.deflection[index],
        );
    }

    if let Some(peak) = profiles.max_axial_stress() {
        println!(
            "max axial stress = {:.1} MPa at y = {:.1} m",
            peak.stress.get::<megapascal>(),
            peak.position
        );
    }
    println!("spar caps = {:.3} kg", profiles.spar_mass.get::<kilogram>());

    Ok(())
}
