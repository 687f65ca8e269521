use crate::analysis::AnalysisSummary;
use sparx::{StressPeak, Support};
use std::fmt::Write;
use uom::si::mass::kilogram;
use uom::si::pressure::{megapascal, pascal};

/// Render a textual summary of a spar sizing run.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();

    let support = match summary.support {
        Support::Cantilever => "cantilever".to_owned(),
        Support::Strut { location } => format!("strut at y = {location:.2} m"),
    };
    writeln!(
        &mut output,
        "Spar sizing ({support}, {} stations at {} m)",
        summary.stations, summary.step
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Root reactions: shear = {:+.1} N, moment = {:+.1} N*m (q = {:.1} Pa)",
        summary.root_shear,
        summary.root_moment,
        summary.dynamic_pressure.get::<pascal>()
    )
    .expect("writing to string cannot fail");

    let (thickness, position) = summary.max_thickness;
    writeln!(
        &mut output,
        "Max wall thickness: {:.4} cm at y = {position:.2} m",
        thickness * 100.0
    )
    .expect("writing to string cannot fail");

    writeln!(&mut output, "Tip deflection: {:+.4} m", summary.tip_deflection)
        .expect("writing to string cannot fail");

    write_peak(&mut output, "axial", summary.max_axial_stress);
    write_peak(&mut output, "shear", summary.max_shear_stress);

    writeln!(
        &mut output,
        "Weight of spar caps: {:.3} kg",
        summary.spar_mass.get::<kilogram>()
    )
    .expect("writing to string cannot fail");

    if summary.degenerate_stations > 0 {
        writeln!(
            &mut output,
            "Note: {} station(s) had zero inertia and no slope increment",
            summary.degenerate_stations
        )
        .expect("writing to string cannot fail");
    }

    output
}

/// Append one stress peak line.
fn write_peak(output: &mut String, kind: &str, peak: Option<StressPeak>) {
    match peak {
        Some(peak) => writeln!(
            output,
            "Max {kind} stress: {:.2} MPa at y = {:.2} m",
            peak.stress.get::<megapascal>(),
            peak.position
        )
        .expect("writing to string cannot fail"),
        None => writeln!(output, "Max {kind} stress: not defined (no loaded section)")
            .expect("writing to string cannot fail"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::f64::{Mass, Pressure};

    #[test]
    fn formats_human_readable_report() {
        let summary = AnalysisSummary {
            support: Support::Strut { location: 5.0 },
            stations: 40,
            step: 0.5,
            root_shear: -1_520.0,
            root_moment: 13_676.51,
            dynamic_pressure: Pressure::new::<pascal>(88.2),
            max_thickness: (0.0025, 0.0),
            tip_deflection: 0.75,
            max_axial_stress: Some(StressPeak {
                stress: Pressure::new::<megapascal>(400.0),
                index: 0,
                position: 0.0,
            }),
            max_shear_stress: None,
            spar_mass: Mass::new::<kilogram>(3.25),
            degenerate_stations: 2,
        };
        let report = render_summary(&summary);
        assert!(report.contains("strut at y = 5.00 m"));
        assert!(report.contains("shear = -1520.0 N"));
        assert!(report.contains("0.2500 cm"));
        assert!(report.contains("Max axial stress: 400.00 MPa"));
        assert!(report.contains("Max shear stress: not defined"));
        assert!(report.contains("3.250 kg"));
        assert!(report.contains("2 station(s)"));
    }
}
