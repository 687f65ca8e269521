//! Forward-Euler integration of load into shear, moment, torsion, slope and deflection.
//!
//! Every recurrence reads station `i - 1` to produce station `i`, so stations are
//! always processed root to tip.

use tracing::warn;

use crate::config::Support;
use crate::grid::{Profile, SpanGrid};

/// Integrated slope and deflection of the spar.
#[derive(Clone, Debug, PartialEq)]
pub struct Deflection {
    /// Slope in radians.
    pub slope: Profile,
    /// Deflection in metres.
    pub deflection: Profile,
    /// Stations whose slope increment was zeroed because the inertia was degenerate.
    pub degenerate_stations: Vec<usize>,
}

/// Rectangle-rule integrator bound to one grid and support condition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructuralIntegrator {
    /// Stations to integrate over.
    grid: SpanGrid,
    /// Support condition that sets the boundary values.
    support: Support,
}

impl StructuralIntegrator {
    /// Bind an integrator to `grid` and `support`.
    #[must_use]
    pub const fn new(grid: SpanGrid, support: Support) -> Self {
        Self { grid, support }
    }

    /// Stations integrated over.
    #[must_use]
    pub const fn grid(&self) -> &SpanGrid {
        &self.grid
    }

    /// First station that is not inboard of the strut; zero for a cantilever.
    #[must_use]
    pub fn first_free_index(&self) -> usize {
        match self.support {
            Support::Cantilever => 0,
            Support::Strut { location } => self.grid.first_index_from(location),
        }
    }

    /// Shear in newtons from the distributed load.
    ///
    /// A cantilever starts from `root_shear`; a strut-supported spar is integrated
    /// outboard of the strut only and then shifted so the tip carries no shear.
    #[must_use]
    pub fn shear(&self, load: &Profile, root_shear: f64) -> Profile {
        match self.support {
            Support::Cantilever => cumulative(&self.grid, load, root_shear),
            Support::Strut { .. } => free_tip_shift(&self.outboard(load)),
        }
    }

    /// Bending moment in N·m from the shear.
    ///
    /// A cantilever starts from `root_moment`; a strut-supported spar follows the same
    /// outboard-then-shift rule as the shear.
    #[must_use]
    pub fn moment(&self, shear: &Profile, root_moment: f64) -> Profile {
        match self.support {
            Support::Cantilever => cumulative(&self.grid, shear, root_moment),
            Support::Strut { .. } => free_tip_shift(&self.outboard(shear)),
        }
    }

    /// Torsion in N·m from the distributed pitching torque, vanishing at the free tip.
    #[must_use]
    pub fn torsion(&self, torque: &Profile) -> Profile {
        free_tip_shift(&integrate_from(&self.grid, torque, self.first_free_index()))
    }

    /// Integrate a rate outboard of the strut, leaving every inboard station at zero.
    ///
    /// This is the profile before [`free_tip_shift`] is applied.
    #[must_use]
    pub fn outboard(&self, rate: &Profile) -> Profile {
        integrate_from(&self.grid, rate, self.first_free_index())
    }

    /// Slope and deflection from moment over flexural rigidity.
    ///
    /// `slope[i] = slope[i-1] + Δ·M[i] / (E·I[i])` and
    /// `deflection[i] = deflection[i-1] + Δ·slope[i]`. Both are pinned to zero at the
    /// root and, with a strut, at every station inboard of it. A station whose inertia
    /// is zero or not finite contributes no slope increment.
    #[must_use]
    pub fn deflection(
        &self,
        moment: &Profile,
        inertia: &Profile,
        elastic_modulus: f64,
    ) -> Deflection {
        let step = self.grid.step();
        let pinned = self.first_free_index();
        let len = self.grid.len();
        let mut slope = Profile::zeros(len);
        let mut degenerate_stations = Vec::new();
        {
            let values = slope.values_mut();
            for index in 1..len {
                if index < pinned {
                    continue;
                }
                let rigidity = elastic_modulus * inertia[index];
                let increment = if inertia[index] == 0.0 || !rigidity.is_finite() {
                    degenerate_stations.push(index);
                    0.0
                } else {
                    step * moment[index] / rigidity
                };
                values[index] = values[index - 1] + increment;
            }
        }
        if !degenerate_stations.is_empty() {
            warn!(
                stations = degenerate_stations.len(),
                first = degenerate_stations[0],
                "zero slope increment at stations with degenerate inertia"
            );
        }
        let mut deflection = Profile::zeros(len);
        {
            let values = deflection.values_mut();
            for index in 1..len {
                if index < pinned {
                    continue;
                }
                values[index] = values[index - 1] + step * slope[index];
            }
        }
        Deflection {
            slope,
            deflection,
            degenerate_stations,
        }
    }
}

/// Running sum `out[0] = seed`, `out[i] = out[i-1] + rate[i]·Δ`.
///
/// # Examples
/// ```
/// use sparx::{cumulative, Profile, SpanGrid};
///
/// let grid = SpanGrid::with_len(0.5, 3);
/// let rate = Profile::from_vec(vec![4.0, 4.0, 2.0]);
/// assert_eq!(cumulative(&grid, &rate, -3.0).to_vec(), vec![-3.0, -1.0, 0.0]);
/// ```
#[must_use]
pub fn cumulative(grid: &SpanGrid, rate: &Profile, seed: f64) -> Profile {
    let len = grid.len();
    let mut out = Profile::zeros(len);
    if len == 0 {
        return out;
    }
    let step = grid.step();
    let values = out.values_mut();
    values[0] = seed;
    for index in 1..len {
        values[index] = values[index - 1] + rate[index] * step;
    }
    out
}

/// Running sum that stays exactly zero for every station before `start`.
#[must_use]
pub fn integrate_from(grid: &SpanGrid, rate: &Profile, start: usize) -> Profile {
    let len = grid.len();
    let mut out = Profile::zeros(len);
    let step = grid.step();
    let values = out.values_mut();
    for index in start.max(1)..len {
        values[index] = values[index - 1] + rate[index] * step;
    }
    out
}

/// Subtract the tip value from every station so the free tip reads exactly zero.
#[must_use]
pub fn free_tip_shift(profile: &Profile) -> Profile {
    match profile.last() {
        Some(tip) => profile.map(|value| value - tip),
        None => profile.clone(),
    }
}
