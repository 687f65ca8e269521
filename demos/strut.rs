use sparx::{SpanConfig, SpanSizing};
use uom::si::mass::kilogram;
use uom::si::pressure::megapascal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SpanConfig::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/strut.yaml"))?;
    let profiles = SpanSizing::new(config)?.run()?;

    if let Some(torsion) = &profiles.torsion {
        println!("root torsion = {:.1} N*m", torsion[0]);
    }
    for (criterion, count) in criterion_counts(&profiles.governing) {
        println!("{criterion:?} governs {count} station(s)");
    }
    if let Some(peak) = profiles.max_shear_stress() {
        println!(
            "max shear stress = {:.2} MPa at y = {:.1} m",
            peak.stress.get::<megapascal>(),
            peak.position
        );
    }
    println!(
        "tip deflection = {:+.4} m, spar caps = {:.3} kg",
        profiles.deflection.last().unwrap_or(0.0),
        profiles.spar_mass.get::<kilogram>()
    );

    Ok(())
}

fn criterion_counts(governing: &[sparx::SizingCriterion]) -> Vec<(sparx::SizingCriterion, usize)> {
    let mut counts: Vec<(sparx::SizingCriterion, usize)> = Vec::new();
    for &criterion in governing {
        match counts.iter_mut().find(|(seen, _)| *seen == criterion) {
            Some((_, count)) => *count += 1,
            None => counts.push((criterion, 1)),
        }
    }
    counts
}
