//! Spar cross-section: radius lookup, required wall thickness, ply rounding and mass.

use std::f64::consts::PI;

use uom::si::f64::Mass;
use uom::si::mass::kilogram;

use crate::config::SpanConfig;
use crate::grid::{Profile, SpanGrid};
use crate::load::LoadModel;

/// Geometric constant of the idealized tube section.
///
/// Section modulus is `k·r²·t` and second moment of area is `k·r³·t`.
pub const SECTION_CONSTANT: f64 = 1.913;

/// Spar radius as a fraction of the local chord when `radius_fraction` is absent.
pub const DEFAULT_RADIUS_FRACTION: f64 = 0.04;

/// Outboard ends of the inner constant-radius regions when `radius_breaks` is absent.
pub const DEFAULT_RADIUS_BREAKS: [f64; 2] = [7.5, 15.0];

/// Megapascal to pascal.
const MPA: f64 = 1.0e6;

/// Piecewise-constant spar radius by span region.
///
/// Each region holds one radius; a position belongs to the first region whose
/// outboard end it does not exceed. Positions past the last end take the last radius.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusSchedule {
    /// `(outboard end, radius)` pairs in metres, root first.
    regions: Vec<(f64, f64)>,
}

impl RadiusSchedule {
    /// Schedule built from explicit `(outboard end, radius)` regions.
    #[must_use]
    pub fn new(regions: Vec<(f64, f64)>) -> Self {
        Self { regions }
    }

    /// One radius for the whole half-span.
    #[must_use]
    pub fn constant(radius: f64) -> Self {
        Self {
            regions: vec![(f64::INFINITY, radius)],
        }
    }

    /// Schedule sized from the chord at the outboard end of each region.
    ///
    /// A configured `r_i` replaces the schedule with a constant radius.
    #[must_use]
    pub fn from_config<L: LoadModel>(config: &SpanConfig, load: &L) -> Self {
        if let Some(radius) = config.spar_radius {
            return Self::constant(radius);
        }
        let fraction = config.radius_fraction.unwrap_or(DEFAULT_RADIUS_FRACTION);
        let half_span = config.half_span();
        let mut ends: Vec<f64> = config
            .radius_breaks
            .clone()
            .unwrap_or_else(|| DEFAULT_RADIUS_BREAKS.to_vec())
            .into_iter()
            .filter(|&end| end < half_span)
            .collect();
        ends.push(half_span);
        Self::new(
            ends.into_iter()
                .map(|end| (end, fraction * load.chord(end)))
                .collect(),
        )
    }

    /// Spar radius in metres at `y`.
    #[must_use]
    pub fn radius(&self, y: f64) -> f64 {
        self.regions
            .iter()
            .find(|(end, _)| y <= *end)
            .or_else(|| self.regions.last())
            .map_or(0.0, |(_, radius)| *radius)
    }

    /// Sample the radius at every station of `grid`.
    #[must_use]
    pub fn profile(&self, grid: &SpanGrid) -> Profile {
        grid.sample(|y| self.radius(y))
    }
}

/// Wall thickness in metres that keeps bending stress at the allowable.
///
/// `t = |M| / (k·r²·σ_allow)`, with `allowable` in pascals.
#[must_use]
pub fn bending_strength_thickness(moment: f64, radius: f64, allowable: f64) -> f64 {
    moment.abs() / (SECTION_CONSTANT * radius.powi(2) * allowable)
}

/// Wall thickness in metres that keeps torsional shear stress at the allowable.
///
/// Thin-walled tube: `t = |T| / (2π·R²·τ_allow)`, with `allowable` in pascals.
#[must_use]
pub fn torsion_strength_thickness(torque: f64, outer_radius: f64, allowable: f64) -> f64 {
    torque.abs() / (2.0 * PI * outer_radius.powi(2) * allowable)
}

/// Wall thickness in metres that keeps the twist of a tube of `length` at `allowed_twist`.
///
/// Thin-walled tube with `J = 2π·R³·t`: `t = |T|·L / (2π·R³·G·θ_allow)`.
#[must_use]
pub fn torsion_stiffness_thickness(
    torque: f64,
    outer_radius: f64,
    length: f64,
    shear_modulus: f64,
    allowed_twist: f64,
) -> f64 {
    torque.abs() * length / (2.0 * PI * outer_radius.powi(3) * shear_modulus * allowed_twist)
}

/// Second moment of area in m⁴ of the idealized tube, `k·r³·t`.
#[must_use]
pub fn section_inertia(radius: f64, thickness: f64) -> f64 {
    radius.powi(3) * thickness * SECTION_CONSTANT
}

/// Round `thickness` to a whole number of plies of `quantum`.
///
/// A remainder below half a ply rounds down, anything else rounds up. A section
/// never ends up with zero plies. Exact multiples of `quantum` come back unchanged.
///
/// # Examples
/// ```
/// use sparx::quantize_to_ply;
///
/// assert_eq!(quantize_to_ply(0.0012, 0.001), 0.001);
/// assert_eq!(quantize_to_ply(0.0016, 0.001), 0.002);
/// assert_eq!(quantize_to_ply(0.0001, 0.001), 0.001);
/// ```
#[must_use]
pub fn quantize_to_ply(thickness: f64, quantum: f64) -> f64 {
    let plies = thickness / quantum;
    let whole = plies.floor();
    let rounded = if plies - whole < 0.5 { whole } else { whole + 1.0 };
    quantum * rounded.max(1.0)
}

/// Criterion that governs the wall thickness at a station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizingCriterion {
    /// Bending stress at the allowable axial stress.
    BendingStrength,
    /// Torsional shear stress at the allowable shear stress.
    TorsionStrength,
    /// Tube twist at the allowable twist.
    TorsionStiffness,
}

/// Allowables and tube geometry used to turn loads into wall thickness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingRule {
    /// Allowable axial stress in pascals.
    pub allowed_axial_stress: f64,
    /// Allowable shear stress in pascals, enabling the torsion strength criterion.
    pub allowed_shear_stress: Option<f64>,
    /// Allowable twist in radians, enabling the torsion stiffness criterion.
    pub allowed_twist: Option<f64>,
    /// Shear modulus in pascals.
    pub shear_modulus: f64,
    /// Outer radius of the torsion tube in metres.
    pub tube_outer_radius: f64,
    /// Length of the torsion tube in metres.
    pub tube_length: f64,
    /// Ply thickness in metres.
    pub ply_thickness: Option<f64>,
}

impl SizingRule {
    /// Collect allowables from the configuration, converting to SI.
    #[must_use]
    pub fn from_config(config: &SpanConfig) -> Self {
        Self {
            allowed_axial_stress: config.allowed_axial_stress * MPA,
            allowed_shear_stress: config.allowed_shear_stress.map(|stress| stress * MPA),
            allowed_twist: config.allowed_twist,
            shear_modulus: config.shear_modulus * MPA,
            tube_outer_radius: config.tube_outer_radius,
            tube_length: config.tube_length,
            ply_thickness: config.ply_thickness.map(|thickness| thickness * 0.01),
        }
    }

    /// Thickness and governing criterion at one station.
    #[must_use]
    pub fn required_thickness(
        &self,
        moment: f64,
        radius: f64,
        torque: Option<f64>,
    ) -> (f64, SizingCriterion) {
        let mut governing = (
            bending_strength_thickness(moment, radius, self.allowed_axial_stress),
            SizingCriterion::BendingStrength,
        );
        let Some(torque) = torque else {
            return governing;
        };
        if let Some(allowable) = self.allowed_shear_stress {
            let thickness = torsion_strength_thickness(torque, self.tube_outer_radius, allowable);
            if thickness > governing.0 {
                governing = (thickness, SizingCriterion::TorsionStrength);
            }
        }
        if let Some(allowed_twist) = self.allowed_twist {
            let thickness = torsion_stiffness_thickness(
                torque,
                self.tube_outer_radius,
                self.tube_length,
                self.shear_modulus,
                allowed_twist,
            );
            if thickness > governing.0 {
                governing = (thickness, SizingCriterion::TorsionStiffness);
            }
        }
        governing
    }

    /// Continuous required thickness and governing criterion along the span.
    #[must_use]
    pub fn thickness_profile(
        &self,
        moment: &Profile,
        radius: &Profile,
        torsion: Option<&Profile>,
    ) -> (Profile, Vec<SizingCriterion>) {
        let (thickness, criteria): (Vec<f64>, Vec<SizingCriterion>) = (0..moment.len())
            .map(|index| {
                let torque = torsion.map(|torsion| torsion[index]);
                self.required_thickness(moment[index], radius[index], torque)
            })
            .unzip();
        (Profile::from_vec(thickness), criteria)
    }

    /// Round a thickness profile to whole plies when a ply thickness is configured.
    #[must_use]
    pub fn quantize(&self, thickness: &Profile) -> Profile {
        match self.ply_thickness {
            Some(quantum) => thickness.map(|value| quantize_to_ply(value, quantum)),
            None => thickness.clone(),
        }
    }
}

/// Mass of both spar caps from a thin-shell estimate of the wall.
///
/// `Σ (1/3)·π·2·r_i·t_i·Δ·ρ`, doubled for the two caps. The estimate is reported
/// only; it never feeds back into the load.
#[must_use]
pub fn spar_cap_mass(
    grid: &SpanGrid,
    radius: &Profile,
    thickness: &Profile,
    layup_density: f64,
) -> Mass {
    let kilograms: f64 = radius
        .iter()
        .zip(thickness.iter())
        .map(|(radius, thickness)| {
            (1.0 / 3.0) * PI * 2.0 * radius * thickness * grid.step() * layup_density * 2.0
        })
        .sum();
    Mass::new::<kilogram>(kilograms)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::load::SpanLoad;

    #[test]
    fn reference_schedule_uses_region_end_chords() {
        let config = SpanConfig::default();
        let grid = SpanGrid::new(config.half_span(), config.delta);
        let load = SpanLoad::from_config(&config, &grid);
        let schedule = RadiusSchedule::from_config(&config, &load);
        assert_relative_eq!(schedule.radius(0.0), 0.04 * 1.89);
        assert_relative_eq!(schedule.radius(7.5), 0.04 * 1.89);
        assert_relative_eq!(schedule.radius(7.6), 0.04 * load.chord(15.0));
        assert_relative_eq!(schedule.radius(19.9), 0.04 * load.chord(20.0));
        assert_relative_eq!(schedule.radius(30.0), 0.04 * load.chord(20.0));
    }

    #[test]
    fn constant_radius_overrides_schedule() {
        let config = SpanConfig {
            spar_radius: Some(0.06),
            ..SpanConfig::default()
        };
        let grid = SpanGrid::new(config.half_span(), config.delta);
        let load = SpanLoad::from_config(&config, &grid);
        let schedule = RadiusSchedule::from_config(&config, &load);
        assert_relative_eq!(schedule.radius(3.0), 0.06);
        assert_relative_eq!(schedule.radius(19.0), 0.06);
    }

    #[test]
    fn bending_thickness_matches_section_modulus() {
        let thickness = bending_strength_thickness(1_000.0, 0.05, 400.0e6);
        let stress = 1_000.0 / (SECTION_CONSTANT * 0.05_f64.powi(2) * thickness);
        assert_relative_eq!(stress, 400.0e6, max_relative = 1.0e-12);
        assert_relative_eq!(
            bending_strength_thickness(-1_000.0, 0.05, 400.0e6),
            thickness
        );
    }

    #[test]
    fn torsion_criteria_scale_with_torque() {
        let strength = torsion_strength_thickness(200.0, 0.05, 100.0e6);
        assert_relative_eq!(
            strength,
            200.0 / (2.0 * PI * 0.0025 * 100.0e6),
            max_relative = 1.0e-12
        );
        let stiffness = torsion_stiffness_thickness(200.0, 0.05, 2.0, 5.0e9, 0.01);
        let twist = 200.0 * 2.0 / (5.0e9 * 2.0 * PI * 0.05_f64.powi(3) * stiffness);
        assert_relative_eq!(twist, 0.01, max_relative = 1.0e-12);
    }

    #[test]
    fn ply_rounding_follows_half_up_rule() {
        assert_relative_eq!(quantize_to_ply(0.24, 0.1), 0.2, epsilon = 1.0e-15);
        assert_relative_eq!(quantize_to_ply(0.26, 0.1), 0.3, epsilon = 1.0e-15);
        assert_relative_eq!(quantize_to_ply(0.3, 0.1), 0.3, epsilon = 1.0e-15);
        assert_relative_eq!(quantize_to_ply(0.0, 0.1), 0.1);
        assert_relative_eq!(quantize_to_ply(0.01, 0.1), 0.1);
    }

    #[test]
    fn rule_picks_governing_criterion() {
        let rule = SizingRule {
            allowed_axial_stress: 400.0e6,
            allowed_shear_stress: Some(1.0e6),
            allowed_twist: None,
            shear_modulus: 5.0e9,
            tube_outer_radius: 0.05,
            tube_length: 1.0,
            ply_thickness: None,
        };
        let (_, criterion) = rule.required_thickness(10.0, 0.05, Some(500.0));
        assert_eq!(criterion, SizingCriterion::TorsionStrength);
        let (thickness, criterion) = rule.required_thickness(10.0, 0.05, None);
        assert_eq!(criterion, SizingCriterion::BendingStrength);
        assert_relative_eq!(thickness, bending_strength_thickness(10.0, 0.05, 400.0e6));
    }

    #[test]
    fn mass_of_uniform_shell() {
        let grid = SpanGrid::new(10.0, 0.5);
        let radius = Profile::from_vec(vec![0.05; grid.len()]);
        let thickness = Profile::from_vec(vec![0.002; grid.len()]);
        let mass = spar_cap_mass(&grid, &radius, &thickness, 1_600.0);
        let expected = (1.0 / 3.0) * PI * 2.0 * 0.05 * 0.002 * 10.0 * 1_600.0 * 2.0;
        assert_relative_eq!(mass.get::<kilogram>(), expected, max_relative = 1.0e-12);
    }
}
