//! End-to-end sizing run: configuration in, aligned spanwise profiles out.

use tracing::info;
use uom::si::f64::Mass;
use uom::si::mass::kilogram;
use uom::si::pressure::pascal;

use crate::config::{SpanConfig, Support};
use crate::constants::DerivedConstants;
use crate::errors::SizingError;
use crate::grid::{Profile, SpanGrid};
use crate::integrate::StructuralIntegrator;
use crate::load::{LoadModel, SpanLoad};
use crate::section::{section_inertia, spar_cap_mass, RadiusSchedule, SizingCriterion, SizingRule};
use crate::stress::{StressPeak, StressProfiles};

/// Megapascal to pascal.
const MPA: f64 = 1.0e6;

/// Every profile produced by one sizing run, aligned on [`SpanProfiles::grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct SpanProfiles {
    /// Stations the profiles are sampled on.
    pub grid: SpanGrid,
    /// Support condition of the run.
    pub support: Support,
    /// Constants the run was derived from.
    pub constants: DerivedConstants,
    /// Local chord in metres.
    pub chord: Profile,
    /// Distributed lift in N/m.
    pub load: Profile,
    /// Shear in newtons.
    pub shear: Profile,
    /// Bending moment in N·m.
    pub moment: Profile,
    /// Torsion in N·m, when a pitching-moment coefficient is configured.
    pub torsion: Option<Profile>,
    /// Spar radius in metres.
    pub radius: Profile,
    /// Continuous required wall thickness in metres.
    pub required_thickness: Profile,
    /// Criterion governing the required thickness at each station.
    pub governing: Vec<SizingCriterion>,
    /// Wall thickness in metres after ply rounding, equal to the required thickness
    /// when no ply thickness is configured.
    pub thickness: Profile,
    /// Second moment of area in m⁴.
    pub inertia: Profile,
    /// Bending stiffness `E·I` in N·m².
    pub flexural_rigidity: Profile,
    /// Slope in radians.
    pub slope: Profile,
    /// Deflection in metres.
    pub deflection: Profile,
    /// Axial and shear stress with their span-wide peaks.
    pub stresses: StressProfiles,
    /// Stations whose slope increment was zeroed for degenerate inertia.
    pub degenerate_stations: Vec<usize>,
    /// Thin-shell mass estimate of both spar caps.
    pub spar_mass: Mass,
}

impl SpanProfiles {
    /// Number of stations shared by every profile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Return `true` when the run holds no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Every mandatory profile with its name, root to tip.
    #[must_use]
    pub fn named_profiles(&self) -> Vec<(&'static str, &Profile)> {
        let mut profiles = vec![
            ("chord", &self.chord),
            ("load", &self.load),
            ("shear", &self.shear),
            ("moment", &self.moment),
            ("radius", &self.radius),
            ("required thickness", &self.required_thickness),
            ("thickness", &self.thickness),
            ("inertia", &self.inertia),
            ("flexural rigidity", &self.flexural_rigidity),
            ("slope", &self.slope),
            ("deflection", &self.deflection),
            ("axial stress", &self.stresses.axial),
            ("shear stress", &self.stresses.shear),
        ];
        if let Some(torsion) = &self.torsion {
            profiles.push(("torsion", torsion));
        }
        profiles
    }

    /// Span-wide peak axial stress.
    #[must_use]
    pub fn max_axial_stress(&self) -> Option<StressPeak> {
        self.stresses.max_axial
    }

    /// Span-wide peak shear stress.
    #[must_use]
    pub fn max_shear_stress(&self) -> Option<StressPeak> {
        self.stresses.max_shear
    }

    /// Reject the run when any profile holds NaN or infinity.
    fn ensure_finite(&self) -> Result<(), SizingError> {
        for (profile, values) in self.named_profiles() {
            if let Some(index) = values.first_non_finite() {
                return Err(SizingError::NonFinite {
                    profile,
                    index,
                    position: self.grid.position(index),
                });
            }
        }
        if !self.spar_mass.get::<kilogram>().is_finite() {
            let index = self.len().saturating_sub(1);
            return Err(SizingError::NonFinite {
                profile: "spar mass",
                index,
                position: self.grid.position(index),
            });
        }
        Ok(())
    }
}

/// A validated configuration with its derived constants, ready to run.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanSizing {
    /// Inputs of the run.
    config: SpanConfig,
    /// Stations of the run.
    grid: SpanGrid,
    /// Load model selected by the configuration.
    load: SpanLoad,
    /// Constants derived from the configuration.
    constants: DerivedConstants,
    /// Spar radius by region.
    radius: RadiusSchedule,
    /// Thickness criteria and ply rounding.
    rule: SizingRule,
}

impl SpanSizing {
    /// Validate `config` and derive everything that does not depend on the station.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Config`] when the configuration is rejected.
    pub fn new(config: SpanConfig) -> Result<Self, SizingError> {
        config.validate()?;
        let grid = SpanGrid::new(config.half_span(), config.delta);
        let (load, constants) = DerivedConstants::with_load(&config, &grid);
        let radius = RadiusSchedule::from_config(&config, &load);
        let rule = SizingRule::from_config(&config);
        Ok(Self {
            config,
            grid,
            load,
            constants,
            radius,
            rule,
        })
    }

    /// Configuration of the run.
    #[must_use]
    pub fn config(&self) -> &SpanConfig {
        &self.config
    }

    /// Stations of the run.
    #[must_use]
    pub fn grid(&self) -> &SpanGrid {
        &self.grid
    }

    /// Load model of the run.
    #[must_use]
    pub fn load(&self) -> &SpanLoad {
        &self.load
    }

    /// Constants derived from the configuration.
    #[must_use]
    pub fn constants(&self) -> &DerivedConstants {
        &self.constants
    }

    /// Radius schedule of the run.
    #[must_use]
    pub fn radius(&self) -> &RadiusSchedule {
        &self.radius
    }

    /// Distributed pitching torque `N·q·c²·cm` in N·m/m, when `cm` is configured.
    #[must_use]
    pub fn torque_profile(&self) -> Option<Profile> {
        let coefficient = self.config.pitching_moment_coefficient?;
        let dynamic_pressure = self.constants.dynamic_pressure.get::<pascal>();
        let load_factor = self.config.load_factor;
        Some(self.grid.sample(|y| {
            load_factor * dynamic_pressure * self.load.chord(y).powi(2) * coefficient
        }))
    }

    /// Integrate, size and evaluate every profile.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::NonFinite`] when any station of any profile is NaN or
    /// infinite, for instance from a zero spar radius.
    pub fn run(&self) -> Result<SpanProfiles, SizingError> {
        let support = self.config.support();
        info!(
            stations = self.grid.len(),
            step = self.grid.step(),
            ?support,
            "starting spar sizing"
        );
        let integrator = StructuralIntegrator::new(self.grid, support);

        let chord = self.load.chord_profile(&self.grid);
        let load = self.load.load_profile(&self.grid);
        let shear = integrator.shear(&load, self.constants.root_shear);
        let moment = integrator.moment(&shear, self.constants.root_moment);
        let torsion = self
            .torque_profile()
            .map(|torque| integrator.torsion(&torque));

        let radius = self.radius.profile(&self.grid);
        let (required_thickness, governing) =
            self.rule.thickness_profile(&moment, &radius, torsion.as_ref());
        let thickness = self.rule.quantize(&required_thickness);
        let inertia = radius.zip_map(&thickness, section_inertia);

        let elastic_modulus = self.config.elastic_modulus * MPA;
        let flexural_rigidity = inertia.map(|inertia| elastic_modulus * inertia);
        let bending = integrator.deflection(&moment, &inertia, elastic_modulus);
        let stresses =
            StressProfiles::evaluate(&self.grid, &shear, &moment, &radius, &thickness, &inertia);
        let spar_mass = spar_cap_mass(&self.grid, &radius, &thickness, self.config.layup_density);

        let profiles = SpanProfiles {
            grid: self.grid,
            support,
            constants: self.constants,
            chord,
            load,
            shear,
            moment,
            torsion,
            radius,
            required_thickness,
            governing,
            thickness,
            inertia,
            flexural_rigidity,
            slope: bending.slope,
            deflection: bending.deflection,
            stresses,
            degenerate_stations: bending.degenerate_stations,
            spar_mass,
        };
        profiles.ensure_finite()?;
        info!(
            spar_mass_kg = profiles.spar_mass.get::<kilogram>(),
            tip_deflection_m = profiles.deflection.last().unwrap_or(0.0),
            "spar sizing complete"
        );
        Ok(profiles)
    }
}

/// Validate `config` and run one sizing pass.
///
/// # Errors
///
/// Returns [`SizingError`] when the configuration is rejected or a profile is not finite.
///
/// # Examples
/// ```
/// use sparx::{size_span, SpanConfig};
///
/// let profiles = size_span(SpanConfig::default().with_delta(0.5))?;
/// assert_eq!(profiles.shear.len(), profiles.grid.len());
/// assert_eq!(profiles.shear.first(), Some(-3.8 * 800.0 / 2.0));
/// # Ok::<(), sparx::SizingError>(())
/// ```
pub fn size_span(config: SpanConfig) -> Result<SpanProfiles, SizingError> {
    SpanSizing::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn every_profile_shares_the_grid() {
        let profiles = size_span(SpanConfig::default().with_pitching_moment(-0.1))
            .expect("reference run succeeds");
        assert_eq!(profiles.len(), 200);
        for (name, profile) in profiles.named_profiles() {
            assert_eq!(profile.len(), profiles.len(), "{name}");
        }
        assert_eq!(profiles.governing.len(), profiles.len());
    }

    #[test]
    fn thickness_sizes_root_to_allowable() {
        let config = SpanConfig::default().with_root_moment(10_926.51);
        let profiles = size_span(config).expect("reference run succeeds");
        let peak = profiles.max_axial_stress().expect("stress defined");
        assert_relative_eq!(peak.stress.get::<pascal>(), 400.0e6, max_relative = 1.0e-9);
        assert!(profiles.spar_mass.get::<kilogram>() > 0.0);
    }

    #[test]
    fn ply_rounding_applies_after_sizing() {
        let config = SpanConfig::default()
            .with_root_moment(10_926.51)
            .with_ply_thickness(0.02);
        let profiles = size_span(config).expect("run succeeds");
        for value in profiles.thickness.iter() {
            let plies = value / 0.0002;
            assert!((plies - plies.round()).abs() < 1.0e-9);
            assert!(value >= 0.0002 * (1.0 - 1.0e-12));
        }
    }

    #[test]
    fn torsion_only_with_pitching_moment() {
        let plain = size_span(SpanConfig::default()).expect("run succeeds");
        assert!(plain.torsion.is_none());
        let config = SpanConfig {
            allowed_shear_stress: Some(1.0e-3),
            ..SpanConfig::default().with_pitching_moment(-0.12)
        };
        let twisted = size_span(config).expect("run succeeds");
        let torsion = twisted.torsion.as_ref().expect("torsion requested");
        assert_eq!(torsion.last(), Some(0.0));
        assert!(twisted.governing.contains(&SizingCriterion::TorsionStrength));
    }

    #[test]
    fn tight_twist_limit_governs_inboard() {
        let config = SpanConfig {
            allowed_twist: Some(1.0e-3),
            ..SpanConfig::default()
                .with_delta(0.5)
                .with_root_moment(10_926.51)
                .with_pitching_moment(-0.12)
        };
        let profiles = size_span(config).expect("run succeeds");
        assert_eq!(profiles.governing[0], SizingCriterion::TorsionStiffness);
        let torsion = profiles.torsion.as_ref().expect("torsion requested");
        let expected =
            crate::section::torsion_stiffness_thickness(torsion[0], 0.05, 1.0, 5_000.0e6, 1.0e-3);
        assert_relative_eq!(profiles.required_thickness[0], expected);
    }

    #[test]
    fn zero_radius_aborts_the_run() {
        let config = SpanConfig {
            spar_radius: Some(1.0e-300),
            ..SpanConfig::default().with_root_moment(1_000.0)
        };
        let error = size_span(config).expect_err("degenerate section rejected");
        assert!(matches!(error, SizingError::NonFinite { .. }));
    }

    #[test]
    fn invalid_config_is_rejected_before_sizing() {
        let error = size_span(SpanConfig::default().with_delta(-1.0))
            .expect_err("negative step rejected");
        assert!(matches!(
            error,
            SizingError::Config(ConfigError::NonPositive { key: "delta", .. })
        ));
    }
}
