//! Aerodynamic load models: local chord and distributed lift along the half-span.
//!
//! Two policies are available. [`ChordProportionalLoad`] scales a piecewise-linear
//! chord so that both half-wings together carry `N·W`; [`LinearFitLoad`] uses an
//! affine load `m·y + b` fitted from the planform taper. [`SpanLoad`] picks one from
//! the configuration.

use crate::config::{LoadModelKind, SpanConfig};
use crate::grid::{Profile, SpanGrid};

/// Chord inboard of the knee for the reference planform, in metres.
pub const DEFAULT_ROOT_CHORD: f64 = 1.89;
/// Tip chord for the reference planform, in metres.
pub const DEFAULT_TIP_CHORD: f64 = 0.95;
/// Start of the taper for the reference planform, in metres from the root.
pub const DEFAULT_CHORD_KNEE: f64 = 11.0;

/// Spanwise chord and lift distribution.
pub trait LoadModel {
    /// Local chord in metres at `y` metres from the root.
    fn chord(&self, y: f64) -> f64;

    /// Distributed lift in N/m at `y` metres from the root.
    fn load(&self, y: f64) -> f64;

    /// Sample the chord at every station of `grid`.
    fn chord_profile(&self, grid: &SpanGrid) -> Profile {
        grid.sample(|y| self.chord(y))
    }

    /// Sample the distributed lift at every station of `grid`.
    fn load_profile(&self, grid: &SpanGrid) -> Profile {
        grid.sample(|y| self.load(y))
    }
}

/// Chord constant up to a knee, then tapering linearly to the tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiecewiseChord {
    /// Chord inboard of the knee in metres.
    pub root: f64,
    /// Chord at the tip in metres.
    pub tip: f64,
    /// Start of the taper in metres.
    pub knee: f64,
    /// Position of the tip in metres.
    pub tip_position: f64,
}

impl PiecewiseChord {
    /// Build the planform described by the configuration, using reference values for
    /// any chord key that is absent.
    #[must_use]
    pub fn from_config(config: &SpanConfig) -> Self {
        Self {
            root: config.root_chord.unwrap_or(DEFAULT_ROOT_CHORD),
            tip: config.tip_chord.unwrap_or(DEFAULT_TIP_CHORD),
            knee: config.chord_knee.unwrap_or(DEFAULT_CHORD_KNEE),
            tip_position: config.half_span(),
        }
    }

    /// Chord in metres at `y`.
    ///
    /// A knee at or beyond the tip leaves the whole planform at the root chord.
    ///
    /// # Examples
    /// ```
    /// use sparx::PiecewiseChord;
    ///
    /// let planform = PiecewiseChord { root: 2.0, tip: 1.0, knee: 5.0, tip_position: 10.0 };
    /// assert_eq!(planform.chord(4.0), 2.0);
    /// assert_eq!(planform.chord(7.5), 1.5);
    /// ```
    #[must_use]
    pub fn chord(&self, y: f64) -> f64 {
        let taper_length = self.tip_position - self.knee;
        if y < self.knee || taper_length <= 0.0 {
            self.root
        } else {
            self.root - (self.root - self.tip) / taper_length * (y - self.knee)
        }
    }
}

/// Straight-tapered planform derived from wing area and taper ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaperedChord {
    /// Chord at the root in metres.
    pub root: f64,
    /// Tip chord over root chord.
    pub taper_ratio: f64,
    /// Half-span in metres.
    pub half_span: f64,
}

impl TaperedChord {
    /// Trapezoid with the configured area, span and taper ratio.
    ///
    /// The root chord is `2S / (b·(1 + λ))`.
    #[must_use]
    pub fn new(wing_area: f64, span: f64, taper_ratio: f64) -> Self {
        Self {
            root: 2.0 * wing_area / (span * (1.0 + taper_ratio)),
            taper_ratio,
            half_span: 0.5 * span,
        }
    }

    /// Chord in metres at `y`.
    #[must_use]
    pub fn chord(&self, y: f64) -> f64 {
        self.root * (1.0 - (1.0 - self.taper_ratio) * y / self.half_span)
    }
}

/// Closed-form root bending moment of a straight-tapered wing, in N·m.
///
/// `M_root = (W·N·b / 12) · (1 + 2λ) / (1 + λ)`.
#[must_use]
pub fn tapered_root_moment(config: &SpanConfig, taper_ratio: f64) -> f64 {
    config.total_lift() * config.span / 12.0 * (1.0 + 2.0 * taper_ratio) / (1.0 + taper_ratio)
}

/// Lift proportional to a piecewise-linear chord, `w(y) = kp · c(y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordProportionalLoad {
    /// Chord distribution.
    pub planform: PiecewiseChord,
    /// Load per unit chord in N/m².
    pub kp: f64,
}

impl ChordProportionalLoad {
    /// Solve `kp` so that both half-wings carry `total_lift`.
    ///
    /// The chord is integrated with the left-endpoint rectangle rule on `grid`, the
    /// same stations the integrators use, so the discrete shear closes on the same
    /// total: `kp = N·W / (2 · Σ c(y_i)·Δ)`.
    #[must_use]
    pub fn new(planform: PiecewiseChord, grid: &SpanGrid, total_lift: f64) -> Self {
        let chord_area = grid.rectangle_sum(|y| planform.chord(y));
        Self {
            planform,
            kp: total_lift / (2.0 * chord_area),
        }
    }
}

impl LoadModel for ChordProportionalLoad {
    fn chord(&self, y: f64) -> f64 {
        self.planform.chord(y)
    }

    fn load(&self, y: f64) -> f64 {
        self.kp * self.planform.chord(y)
    }
}

/// Affine lift `w(y) = m·y + b` over a straight-tapered planform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFitLoad {
    /// Chord distribution used for torsion and radius lookups.
    pub planform: TaperedChord,
    /// Load slope `m` in N/m².
    pub slope: f64,
    /// Root load `b` in N/m.
    pub intercept: f64,
}

impl LinearFitLoad {
    /// Fit the load to the planform: lift per unit area `N·W / S` times the local chord.
    ///
    /// This gives `b = N·W·c_r / S` and `m = -2·N·W·c_r·(1 − λ) / (S·b_span)`.
    #[must_use]
    pub fn fitted(planform: TaperedChord, wing_area: f64, total_lift: f64) -> Self {
        let intercept = total_lift * planform.root / wing_area;
        let slope = -intercept * (1.0 - planform.taper_ratio) / planform.half_span;
        Self {
            planform,
            slope,
            intercept,
        }
    }
}

impl LoadModel for LinearFitLoad {
    fn chord(&self, y: f64) -> f64 {
        self.planform.chord(y)
    }

    fn load(&self, y: f64) -> f64 {
        self.slope * y + self.intercept
    }
}

/// Load model chosen by the shape of the configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpanLoad {
    /// Piecewise-linear chord scaled by `kp`.
    ChordProportional(ChordProportionalLoad),
    /// Affine load over a tapered planform.
    LinearFit(LinearFitLoad),
}

impl SpanLoad {
    /// Build the model named by [`SpanConfig::load_model_kind`].
    ///
    /// For the linear fit, explicit `m`/`b` override the fitted coefficients. When no
    /// taper ratio is given the planform falls back to a rectangle (`λ = 1`).
    #[must_use]
    pub fn from_config(config: &SpanConfig, grid: &SpanGrid) -> Self {
        match config.load_model_kind() {
            LoadModelKind::PiecewiseChord => Self::ChordProportional(ChordProportionalLoad::new(
                PiecewiseChord::from_config(config),
                grid,
                config.total_lift(),
            )),
            LoadModelKind::LinearFit => {
                let taper_ratio = config.taper_ratio.unwrap_or(1.0);
                let planform = TaperedChord::new(config.wing_area, config.span, taper_ratio);
                let mut model =
                    LinearFitLoad::fitted(planform, config.wing_area, config.total_lift());
                if let (Some(slope), Some(intercept)) = (config.load_slope, config.load_intercept)
                {
                    model.slope = slope;
                    model.intercept = intercept;
                }
                Self::LinearFit(model)
            }
        }
    }

    /// Chord at the root in metres.
    #[must_use]
    pub fn root_chord(&self) -> f64 {
        self.chord(0.0)
    }
}

impl LoadModel for SpanLoad {
    fn chord(&self, y: f64) -> f64 {
        match self {
            Self::ChordProportional(model) => model.chord(y),
            Self::LinearFit(model) => model.chord(y),
        }
    }

    fn load(&self, y: f64) -> f64 {
        match self {
            Self::ChordProportional(model) => model.load(y),
            Self::LinearFit(model) => model.load(y),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reference_planform() -> PiecewiseChord {
        PiecewiseChord {
            root: DEFAULT_ROOT_CHORD,
            tip: DEFAULT_TIP_CHORD,
            knee: DEFAULT_CHORD_KNEE,
            tip_position: 20.0,
        }
    }

    #[test]
    fn piecewise_chord_matches_reference_taper() {
        let planform = reference_planform();
        assert_relative_eq!(planform.chord(0.0), 1.89);
        assert_relative_eq!(planform.chord(10.99), 1.89);
        assert_relative_eq!(planform.chord(20.0), 0.95, epsilon = 1.0e-12);
        assert_relative_eq!(planform.chord(15.5), 1.89 - 0.94 / 9.0 * 4.5, epsilon = 1.0e-12);
    }

    #[test]
    fn knee_at_tip_keeps_root_chord() {
        let planform = PiecewiseChord {
            tip_position: DEFAULT_CHORD_KNEE,
            ..reference_planform()
        };
        assert_eq!(planform.chord(DEFAULT_CHORD_KNEE), 1.89);
        assert_eq!(planform.chord(5.0), 1.89);

        let beyond = PiecewiseChord {
            tip_position: 8.0,
            ..reference_planform()
        };
        assert_eq!(beyond.chord(8.0), 1.89);
    }

    #[test]
    fn kp_closes_total_lift_on_the_grid() {
        let grid = SpanGrid::new(20.0, 0.1);
        let model = ChordProportionalLoad::new(reference_planform(), &grid, 3.8 * 800.0);
        let half_lift = grid.rectangle_sum(|y| model.load(y));
        assert_relative_eq!(2.0 * half_lift, 3.8 * 800.0, max_relative = 1.0e-12);
    }

    #[test]
    fn tapered_planform_has_configured_area() {
        let planform = TaperedChord::new(30.0, 20.0, 0.4);
        let area = 2.0 * 0.5 * (planform.chord(0.0) + planform.chord(10.0)) * 10.0;
        assert_relative_eq!(area, 30.0, max_relative = 1.0e-12);
        assert_relative_eq!(planform.chord(10.0) / planform.chord(0.0), 0.4, epsilon = 1.0e-12);
    }

    #[test]
    fn linear_fit_carries_total_lift() {
        let planform = TaperedChord::new(30.0, 20.0, 0.4);
        let model = LinearFitLoad::fitted(planform, 30.0, 1_000.0);
        // Exact integral of an affine load over the half-span.
        let half_lift = model.intercept * 10.0 + 0.5 * model.slope * 100.0;
        assert_relative_eq!(2.0 * half_lift, 1_000.0, max_relative = 1.0e-12);
        assert!(model.slope < 0.0);
    }

    #[test]
    fn explicit_fit_coefficients_override() {
        let config = SpanConfig {
            load_slope: Some(-5.0),
            load_intercept: Some(120.0),
            ..SpanConfig::default()
        };
        let grid = SpanGrid::new(config.half_span(), config.delta);
        let model = SpanLoad::from_config(&config, &grid);
        assert!(matches!(model, SpanLoad::LinearFit(_)));
        assert_relative_eq!(model.load(2.0), 110.0);
    }

    #[test]
    fn default_config_selects_chord_proportional_load() {
        let config = SpanConfig::default();
        let grid = SpanGrid::new(config.half_span(), config.delta);
        let model = SpanLoad::from_config(&config, &grid);
        assert!(matches!(model, SpanLoad::ChordProportional(_)));
        assert_relative_eq!(model.root_chord(), DEFAULT_ROOT_CHORD);
    }

    #[test]
    fn tapered_root_moment_for_rectangular_wing() {
        let config = SpanConfig::default();
        // λ = 1 reduces to N·W·b/8.
        assert_relative_eq!(
            tapered_root_moment(&config, 1.0),
            config.total_lift() * config.span / 8.0
        );
    }
}
