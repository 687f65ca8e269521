use std::path::Path;

use sparx::{SizingError, SpanConfig, SpanProfiles, SpanSizing, StressPeak, Support};
use uom::si::f64::{Mass, Pressure};

/// Summary of the results from one sizing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Support condition of the run.
    pub support: Support,
    /// Number of spanwise stations.
    pub stations: usize,
    /// Station spacing in metres.
    pub step: f64,
    /// Shear at the root in newtons.
    pub root_shear: f64,
    /// Bending moment at the root in N·m.
    pub root_moment: f64,
    /// Flight dynamic pressure.
    pub dynamic_pressure: Pressure,
    /// Largest wall thickness in metres and its position.
    pub max_thickness: (f64, f64),
    /// Deflection at the outermost station in metres.
    pub tip_deflection: f64,
    /// Span-wide peak axial stress.
    pub max_axial_stress: Option<StressPeak>,
    /// Span-wide peak shear stress.
    pub max_shear_stress: Option<StressPeak>,
    /// Thin-shell estimate of the spar cap mass.
    pub spar_mass: Mass,
    /// Stations whose slope increment was zeroed for degenerate inertia.
    pub degenerate_stations: usize,
}

impl AnalysisSummary {
    /// Pull the headline numbers out of a finished run.
    pub fn from_profiles(profiles: &SpanProfiles) -> Self {
        let max_thickness = profiles
            .thickness
            .max_abs()
            .map_or((0.0, 0.0), |(index, value)| {
                (value, profiles.grid.position(index))
            });
        Self {
            support: profiles.support,
            stations: profiles.len(),
            step: profiles.grid.step(),
            root_shear: profiles.shear.first().unwrap_or(0.0),
            root_moment: profiles.moment.first().unwrap_or(0.0),
            dynamic_pressure: profiles.constants.dynamic_pressure,
            max_thickness,
            tip_deflection: profiles.deflection.last().unwrap_or(0.0),
            max_axial_stress: profiles.max_axial_stress(),
            max_shear_stress: profiles.max_shear_stress(),
            spar_mass: profiles.spar_mass,
            degenerate_stations: profiles.degenerate_stations.len(),
        }
    }
}

/// Load the configuration at `path`, size the spar and summarize the result.
///
/// The profiles are returned alongside the summary so callers can export them.
pub fn run_analysis(path: &Path) -> Result<(AnalysisSummary, SpanProfiles), SizingError> {
    let config = SpanConfig::from_path(path)?;
    let profiles = SpanSizing::new(config)?.run()?;
    Ok((AnalysisSummary::from_profiles(&profiles), profiles))
}
