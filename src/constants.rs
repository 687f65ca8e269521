//! Quantities derived once from a configuration and shared by every station.

use tracing::{debug, warn};
use uom::si::f64::Pressure;
use uom::si::pressure::pascal;

use crate::config::SpanConfig;
use crate::grid::SpanGrid;
use crate::load::{tapered_root_moment, SpanLoad};

/// Immutable values computed from a [`SpanConfig`] before integration starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedConstants {
    /// Flight dynamic pressure `½·ρ·V²`.
    pub dynamic_pressure: Pressure,
    /// Load per unit chord `kp` in N/m² for the chord-proportional model.
    pub kp: Option<f64>,
    /// Slope `m` of the linear load fit in N/m².
    pub load_slope: Option<f64>,
    /// Intercept `b` of the linear load fit in N/m.
    pub load_intercept: Option<f64>,
    /// Chord at the root in metres.
    pub root_chord: f64,
    /// Shear at the root of a cantilever, `−N·W/2`, in newtons.
    pub root_shear: f64,
    /// Bending moment at the root of a cantilever in N·m.
    pub root_moment: f64,
}

impl DerivedConstants {
    /// Derive the constants for `config` with its load model already built on `grid`.
    ///
    /// The root moment is the configured `root_moment`, else the closed-form tapered-wing
    /// value when a taper ratio is given, else zero.
    #[must_use]
    pub fn new(config: &SpanConfig, load: &SpanLoad) -> Self {
        let (kp, load_slope, load_intercept) = match load {
            SpanLoad::ChordProportional(model) => (Some(model.kp), None, None),
            SpanLoad::LinearFit(model) => (None, Some(model.slope), Some(model.intercept)),
        };
        let root_moment = config
            .root_moment
            .or_else(|| {
                config
                    .taper_ratio
                    .map(|taper_ratio| tapered_root_moment(config, taper_ratio))
            })
            .unwrap_or(0.0);
        if config.root_moment_unspecified() {
            warn!("no `root_moment` or `taper_ratio` given; the cantilever root moment is zero");
        }
        let constants = Self {
            dynamic_pressure: Pressure::new::<pascal>(
                0.5 * config.air_density * config.velocity.powi(2),
            ),
            kp,
            load_slope,
            load_intercept,
            root_chord: load.root_chord(),
            root_shear: -config.total_lift() / 2.0,
            root_moment,
        };
        debug!(
            kp = ?constants.kp,
            slope = ?constants.load_slope,
            intercept = ?constants.load_intercept,
            root_shear = constants.root_shear,
            root_moment = constants.root_moment,
            "derived constants"
        );
        constants
    }

    /// Derive the load model and constants together.
    #[must_use]
    pub fn with_load(config: &SpanConfig, grid: &SpanGrid) -> (SpanLoad, Self) {
        let load = SpanLoad::from_config(config, grid);
        let constants = Self::new(config, &load);
        (load, constants)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn dynamic_pressure_and_root_shear() {
        let config = SpanConfig::default();
        let grid = SpanGrid::new(config.half_span(), config.delta);
        let (_, constants) = DerivedConstants::with_load(&config, &grid);
        assert_relative_eq!(constants.dynamic_pressure.get::<pascal>(), 0.5 * 1.225 * 144.0);
        assert_eq!(constants.root_shear, -3.8 * 800.0 / 2.0);
        assert_eq!(constants.root_moment, 0.0);
        assert!(constants.kp.is_some());
        assert_eq!(constants.load_slope, None);
    }

    #[test]
    fn unseeded_cantilever_root_moment_is_flagged() {
        let config = SpanConfig::default();
        assert!(config.root_moment_unspecified());
        assert!(!config.clone().with_root_moment(1.0).root_moment_unspecified());
        assert!(!config.clone().with_taper_ratio(0.5).root_moment_unspecified());
        assert!(!config.with_strut(5.0).root_moment_unspecified());
    }

    #[test]
    fn root_moment_precedence() {
        let explicit = SpanConfig::default()
            .with_taper_ratio(0.5)
            .with_root_moment(10_926.51);
        let grid = SpanGrid::new(explicit.half_span(), explicit.delta);
        let (_, constants) = DerivedConstants::with_load(&explicit, &grid);
        assert_eq!(constants.root_moment, 10_926.51);

        let tapered = SpanConfig::default().with_taper_ratio(0.5);
        let (_, constants) = DerivedConstants::with_load(&tapered, &grid);
        assert_relative_eq!(constants.root_moment, tapered_root_moment(&tapered, 0.5));
        assert!(constants.load_slope.is_some());
    }
}
