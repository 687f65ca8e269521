//! Renderer-ready chart series and per-station tables of a sizing run.

use std::fmt::Write;

use serde::Serialize;

use crate::grid::Profile;
use crate::sizing::SpanProfiles;

/// Metres to centimetres.
const CENTIMETRES_PER_METRE: f64 = 100.0;

/// One curve against spanwise position, with the labels a chart renderer needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    /// Chart title.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Spanwise positions in metres.
    pub x: Vec<f64>,
    /// Values at each position.
    pub y: Vec<f64>,
}

impl Chart {
    /// Build a chart of `values` against the run's station positions.
    fn spanwise(profiles: &SpanProfiles, title: &str, y_label: &str, values: &Profile) -> Self {
        Self {
            title: title.to_owned(),
            x_label: "Spanwise Distance (m)".to_owned(),
            y_label: y_label.to_owned(),
            x: profiles.grid.positions().collect(),
            y: values.to_vec(),
        }
    }
}

/// All quantities at one station.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Station {
    /// Spanwise position in metres.
    pub position: f64,
    /// Chord in metres.
    pub chord: f64,
    /// Distributed lift in N/m.
    pub load: f64,
    /// Shear in newtons.
    pub shear: f64,
    /// Bending moment in N·m.
    pub moment: f64,
    /// Torsion in N·m, when computed.
    pub torsion: Option<f64>,
    /// Spar radius in metres.
    pub radius: f64,
    /// Wall thickness in centimetres.
    pub thickness_cm: f64,
    /// Second moment of area in m⁴.
    pub inertia: f64,
    /// Slope in radians.
    pub slope: f64,
    /// Deflection in metres.
    pub deflection: f64,
    /// Axial stress in pascals.
    pub axial_stress: f64,
    /// Shear stress in pascals.
    pub shear_stress: f64,
}

impl SpanProfiles {
    /// One chart per profile, titled and labelled for display.
    #[must_use]
    pub fn charts(&self) -> Vec<Chart> {
        let thickness_cm = self.thickness.map(|value| value * CENTIMETRES_PER_METRE);
        let mut charts = vec![
            Chart::spanwise(self, "EI vs Spanwise Distance", "EI (N*m^2)", &self.flexural_rigidity),
            Chart::spanwise(self, "Chord vs Spanwise Distance", "Chord (m)", &self.chord),
            Chart::spanwise(self, "Lifting Load vs Spanwise Distance", "Load (N/m)", &self.load),
            Chart::spanwise(self, "Shear vs Spanwise Distance", "Shear (N)", &self.shear),
            Chart::spanwise(self, "Moment vs Spanwise Distance", "Moment (N*m)", &self.moment),
            Chart::spanwise(
                self,
                "Wing Deflection vs Spanwise Distance",
                "Deflection (m)",
                &self.deflection,
            ),
            Chart::spanwise(
                self,
                "Spar Cap Thickness vs Spanwise Distance",
                "Thickness (cm)",
                &thickness_cm,
            ),
            Chart::spanwise(self, "Spar Radius vs Spanwise Distance", "Radius (m)", &self.radius),
        ];
        if let Some(torsion) = &self.torsion {
            charts.push(Chart::spanwise(
                self,
                "Torsion vs Spanwise Distance",
                "Torsion (N*m)",
                torsion,
            ));
        }
        charts
    }

    /// Every station as a `(position, values)` record, root first.
    #[must_use]
    pub fn stations(&self) -> Vec<Station> {
        (0..self.len())
            .map(|index| Station {
                position: self.grid.position(index),
                chord: self.chord[index],
                load: self.load[index],
                shear: self.shear[index],
                moment: self.moment[index],
                torsion: self.torsion.as_ref().map(|torsion| torsion[index]),
                radius: self.radius[index],
                thickness_cm: self.thickness[index] * CENTIMETRES_PER_METRE,
                inertia: self.inertia[index],
                slope: self.slope[index],
                deflection: self.deflection[index],
                axial_stress: self.stresses.axial[index],
                shear_stress: self.stresses.shear[index],
            })
            .collect()
    }

    /// Charts serialized as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised while serializing.
    pub fn charts_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.charts())
    }

    /// Per-station table as comma-separated values with a header row.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut output = String::from(
            "y_m,chord_m,load_n_per_m,shear_n,moment_nm,torsion_nm,radius_m,thickness_cm,\
             inertia_m4,slope_rad,deflection_m,axial_stress_pa,shear_stress_pa\n",
        );
        for station in self.stations() {
            let torsion = station
                .torsion
                .map_or_else(String::new, |torsion| torsion.to_string());
            writeln!(
                &mut output,
                "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                station.position,
                station.chord,
                station.load,
                station.shear,
                station.moment,
                torsion,
                station.radius,
                station.thickness_cm,
                station.inertia,
                station.slope,
                station.deflection,
                station.axial_stress,
                station.shear_stress,
            )
            .expect("writing to string cannot fail");
        }
        output
    }
}
