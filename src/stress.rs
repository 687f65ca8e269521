//! Pointwise bending and shear stress in the spar tube, and their span-wide maxima.

use uom::si::f64::Pressure;
use uom::si::pressure::pascal;

use crate::grid::{Profile, SpanGrid};

/// Maximum axial stress in pascals, `M·r_o / I`.
///
/// Returns `None` when the inertia is zero, where no finite stress is defined.
#[must_use]
pub fn axial_stress(moment: f64, outer_radius: f64, inertia: f64) -> Option<f64> {
    if inertia == 0.0 {
        return None;
    }
    Some(moment * outer_radius / inertia)
}

/// Maximum transverse shear stress in pascals at the neutral axis of a thin tube.
///
/// `τ = V·k·(r_o³ − r_i³) / (I·k·(r_o − r_i))`; the shape factor `k` appears in both
/// the first moment and the cut width, so it cancels. Returns `None` for zero inertia
/// or zero wall thickness.
///
/// # Examples
/// ```
/// use sparx::shear_stress;
///
/// let stress = shear_stress(2.0, 2.0, 1.0, 7.0).unwrap();
/// assert_eq!(stress, 2.0);
/// assert_eq!(shear_stress(2.0, 1.0, 1.0, 7.0), None);
/// ```
#[must_use]
pub fn shear_stress(shear: f64, outer_radius: f64, inner_radius: f64, inertia: f64) -> Option<f64> {
    let wall = outer_radius - inner_radius;
    if inertia == 0.0 || wall == 0.0 {
        return None;
    }
    let cubes = outer_radius.powi(3) - inner_radius.powi(3);
    Some(shear * cubes / (inertia * wall))
}

/// Largest stress magnitude along the span and where it occurs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StressPeak {
    /// Stress magnitude.
    pub stress: Pressure,
    /// Station index on the sizing grid.
    pub index: usize,
    /// Spanwise position in metres.
    pub position: f64,
}

/// Stress profiles of one sizing run.
#[derive(Clone, Debug, PartialEq)]
pub struct StressProfiles {
    /// Axial stress in pascals; zero where the section is degenerate.
    pub axial: Profile,
    /// Shear stress in pascals; zero where the section is degenerate.
    pub shear: Profile,
    /// Span-wide axial maximum, when any station has a finite stress.
    pub max_axial: Option<StressPeak>,
    /// Span-wide shear maximum, when any station has a finite stress.
    pub max_shear: Option<StressPeak>,
}

impl StressProfiles {
    /// Evaluate both stresses at every station.
    ///
    /// The inner radius at a station is the outer radius minus the wall thickness.
    #[must_use]
    pub fn evaluate(
        grid: &SpanGrid,
        shear: &Profile,
        moment: &Profile,
        radius: &Profile,
        thickness: &Profile,
        inertia: &Profile,
    ) -> Self {
        let len = grid.len();
        let axial: Vec<Option<f64>> = (0..len)
            .map(|index| axial_stress(moment[index], radius[index], inertia[index]))
            .collect();
        let transverse: Vec<Option<f64>> = (0..len)
            .map(|index| {
                let inner = (radius[index] - thickness[index]).max(0.0);
                shear_stress(shear[index], radius[index], inner, inertia[index])
            })
            .collect();
        Self {
            max_axial: peak(grid, &axial),
            max_shear: peak(grid, &transverse),
            axial: axial.iter().map(|stress| stress.unwrap_or(0.0)).collect(),
            shear: transverse.iter().map(|stress| stress.unwrap_or(0.0)).collect(),
        }
    }
}

/// Largest defined magnitude, first occurrence on ties.
fn peak(grid: &SpanGrid, stresses: &[Option<f64>]) -> Option<StressPeak> {
    stresses
        .iter()
        .enumerate()
        .filter_map(|(index, stress)| stress.map(|stress| (index, stress.abs())))
        .fold(None, |best: Option<(usize, f64)>, (index, stress)| match best {
            Some((_, current)) if current >= stress => best,
            _ => Some((index, stress)),
        })
        .map(|(index, stress)| StressPeak {
            stress: Pressure::new::<pascal>(stress),
            index,
            position: grid.position(index),
        })
}
