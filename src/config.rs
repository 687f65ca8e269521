//! Run configuration: the named physical scalars of one sizing study.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Immutable set of physical inputs for one sizing run.
///
/// Field names follow the keys of the parameter document; the short physical
/// symbols (`N`, `V`, `p`, `E`, `G`, `R_outer`, `R_inner`, `m`, `b`, `r_i`, `cm`) are
/// renamed to readable Rust identifiers.
///
/// Units: lengths in metres, forces in newtons, `E`, `G` and every allowable stress in
/// megapascals, `p` and `layup_density` in kg/m³, `V` in m/s, `carb_thick` in
/// centimetres, `allowed_twist` in radians.
///
/// # Examples
/// ```
/// use sparx::SpanConfig;
///
/// let config = SpanConfig::default().with_delta(0.5);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.half_span(), 20.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpanConfig {
    /// Weight carried by the wing in newtons.
    pub center_weight: f64,
    /// Load factor.
    #[serde(rename = "N")]
    pub load_factor: f64,
    /// Tip-to-tip span in metres.
    pub span: f64,
    /// Total wing planform area in square metres.
    pub wing_area: f64,
    /// Flight speed in metres per second.
    #[serde(rename = "V")]
    pub velocity: f64,
    /// Air density in kg/m³.
    #[serde(rename = "p")]
    pub air_density: f64,
    /// Outer radius of the torsion tube in metres.
    #[serde(rename = "R_outer")]
    pub tube_outer_radius: f64,
    /// Length of the torsion tube in metres.
    #[serde(rename = "length")]
    pub tube_length: f64,
    /// Shear modulus in megapascals.
    #[serde(rename = "G")]
    pub shear_modulus: f64,
    /// Elastic modulus in megapascals.
    #[serde(rename = "E")]
    pub elastic_modulus: f64,
    /// Allowable axial stress in megapascals.
    #[serde(rename = "allowed_ax_stress")]
    pub allowed_axial_stress: f64,
    /// Spanwise discretization step in metres.
    pub delta: f64,
    /// Inner radius of the torsion tube in metres.
    #[serde(rename = "R_inner")]
    pub tube_inner_radius: f64,
    /// Density of the composite layup in kg/m³.
    pub layup_density: f64,
    /// Spanwise position of the strut attachment in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strut_loc: Option<f64>,
    /// Thickness of one ply in centimetres.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "carb_thick")]
    pub ply_thickness: Option<f64>,
    /// Tip chord over root chord.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taper_ratio: Option<f64>,
    /// Slope of the linear load fit in N/m².
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "m")]
    pub load_slope: Option<f64>,
    /// Intercept of the linear load fit in N/m.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "b")]
    pub load_intercept: Option<f64>,
    /// Constant spar radius in metres, replacing the regional radius schedule.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "r_i")]
    pub spar_radius: Option<f64>,
    /// Bending moment at the root in N·m.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_moment: Option<f64>,
    /// Chord inboard of the knee in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_chord: Option<f64>,
    /// Chord at the tip in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_chord: Option<f64>,
    /// Spanwise position where the chord starts to taper in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord_knee: Option<f64>,
    /// Spar radius as a fraction of the local chord.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_fraction: Option<f64>,
    /// Outboard ends of the constant-radius regions in metres; the tip closes the last one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_breaks: Option<Vec<f64>>,
    /// Section pitching-moment coefficient; enables torsion sizing.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "cm")]
    pub pitching_moment_coefficient: Option<f64>,
    /// Allowable shear stress in megapascals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_shear_stress: Option<f64>,
    /// Allowable tube twist in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_twist: Option<f64>,
}

/// How the spar is supported along the half-span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Support {
    /// Clamped at the root, free at the tip.
    Cantilever,
    /// Carried by a strut at `location` metres from the root, free at the tip.
    Strut {
        /// Spanwise strut position in metres.
        location: f64,
    },
}

/// Which aerodynamic load model the configuration selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadModelKind {
    /// Load proportional to a piecewise-linear chord.
    PiecewiseChord,
    /// Affine load fitted from the planform taper.
    LinearFit,
}

impl Default for SpanConfig {
    /// Reference light-aircraft parameter set with a 40 m span.
    fn default() -> Self {
        Self {
            center_weight: 800.0,
            load_factor: 3.8,
            span: 40.0,
            wing_area: 67.0,
            velocity: 12.0,
            air_density: 1.225,
            tube_outer_radius: 0.05,
            tube_length: 1.0,
            shear_modulus: 5_000.0,
            elastic_modulus: 70_000.0,
            allowed_axial_stress: 400.0,
            delta: 0.1,
            tube_inner_radius: 0.045,
            layup_density: 1_600.0,
            strut_loc: None,
            ply_thickness: None,
            taper_ratio: None,
            load_slope: None,
            load_intercept: None,
            spar_radius: None,
            root_moment: None,
            root_chord: None,
            tip_chord: None,
            chord_knee: None,
            radius_fraction: None,
            radius_breaks: None,
            pitching_moment_coefficient: None,
            allowed_shear_stress: None,
            allowed_twist: None,
        }
    }
}

impl SpanConfig {
    /// Load and validate a configuration from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, has an unknown extension,
    /// misses a required key or holds a value rejected by [`SpanConfig::validate`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed documents or missing keys, and the
    /// validation errors of [`SpanConfig::validate`].
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed documents or missing keys, and the
    /// validation errors of [`SpanConfig::validate`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Half of the tip-to-tip span in metres.
    #[must_use]
    pub fn half_span(&self) -> f64 {
        0.5 * self.span
    }

    /// Total lift the half-wings carry together, `N·W`, in newtons.
    #[must_use]
    pub fn total_lift(&self) -> f64 {
        self.load_factor * self.center_weight
    }

    /// Support condition selected by the presence of `strut_loc`.
    #[must_use]
    pub fn support(&self) -> Support {
        match self.strut_loc {
            Some(location) => Support::Strut { location },
            None => Support::Cantilever,
        }
    }

    /// Load model selected by the presence of `taper_ratio` or of `m` and `b`.
    #[must_use]
    pub fn load_model_kind(&self) -> LoadModelKind {
        let explicit_fit = self.load_slope.is_some() && self.load_intercept.is_some();
        if explicit_fit || self.taper_ratio.is_some() {
            LoadModelKind::LinearFit
        } else {
            LoadModelKind::PiecewiseChord
        }
    }

    /// Return `true` for a cantilever whose root moment falls back to zero because
    /// neither `root_moment` nor `taper_ratio` is given.
    #[must_use]
    pub fn root_moment_unspecified(&self) -> bool {
        self.support() == Support::Cantilever
            && self.root_moment.is_none()
            && self.taper_ratio.is_none()
    }

    /// Check that every value is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("center_weight", self.center_weight),
            ("N", self.load_factor),
            ("span", self.span),
            ("wing_area", self.wing_area),
            ("R_outer", self.tube_outer_radius),
            ("length", self.tube_length),
            ("G", self.shear_modulus),
            ("E", self.elastic_modulus),
            ("allowed_ax_stress", self.allowed_axial_stress),
            ("delta", self.delta),
            ("layup_density", self.layup_density),
        ];
        for (key, value) in positive {
            require_positive(key, value)?;
        }
        for (key, value) in [
            ("V", self.velocity),
            ("p", self.air_density),
            ("R_inner", self.tube_inner_radius),
        ] {
            require_finite(key, value)?;
        }

        let optional_positive = [
            ("carb_thick", self.ply_thickness),
            ("taper_ratio", self.taper_ratio),
            ("r_i", self.spar_radius),
            ("root_chord", self.root_chord),
            ("tip_chord", self.tip_chord),
            ("radius_fraction", self.radius_fraction),
            ("allowed_shear_stress", self.allowed_shear_stress),
            ("allowed_twist", self.allowed_twist),
        ];
        for (key, value) in optional_positive {
            if let Some(value) = value {
                require_positive(key, value)?;
            }
        }
        for (key, value) in [
            ("m", self.load_slope),
            ("b", self.load_intercept),
            ("root_moment", self.root_moment),
            ("cm", self.pitching_moment_coefficient),
        ] {
            if let Some(value) = value {
                require_finite(key, value)?;
            }
        }
        if self.load_slope.is_some() != self.load_intercept.is_some() {
            return Err(ConfigError::IncompleteLinearFit);
        }

        let half_span = self.half_span();
        if half_span < self.delta {
            return Err(ConfigError::EmptyGrid {
                delta: self.delta,
                half_span,
            });
        }
        for (key, value) in [("strut_loc", self.strut_loc), ("chord_knee", self.chord_knee)] {
            if let Some(value) = value {
                require_on_half_span(key, value, half_span)?;
            }
        }
        if let Some(breaks) = &self.radius_breaks {
            for &value in breaks {
                require_on_half_span("radius_breaks", value, half_span)?;
            }
            if breaks.windows(2).any(|pair| pair[1] <= pair[0]) {
                return Err(ConfigError::UnorderedRadiusBreaks);
            }
        }
        Ok(())
    }

    /// Attach a strut at `location` metres from the root.
    #[must_use]
    pub fn with_strut(mut self, location: f64) -> Self {
        self.strut_loc = Some(location);
        self
    }

    /// Quantize thickness to plies of `thickness` centimetres.
    #[must_use]
    pub fn with_ply_thickness(mut self, thickness: f64) -> Self {
        self.ply_thickness = Some(thickness);
        self
    }

    /// Switch to the linear-fit load model with the given taper ratio.
    #[must_use]
    pub fn with_taper_ratio(mut self, taper_ratio: f64) -> Self {
        self.taper_ratio = Some(taper_ratio);
        self
    }

    /// Seed the moment integration with `moment` N·m at the root.
    #[must_use]
    pub fn with_root_moment(mut self, moment: f64) -> Self {
        self.root_moment = Some(moment);
        self
    }

    /// Set the discretization step.
    #[must_use]
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Set the tip-to-tip span.
    #[must_use]
    pub fn with_span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }

    /// Enable torsion sizing with a section pitching-moment coefficient.
    #[must_use]
    pub fn with_pitching_moment(mut self, coefficient: f64) -> Self {
        self.pitching_moment_coefficient = Some(coefficient);
        self
    }
}

/// Reject zero, negative and non-finite values.
fn require_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    require_finite(key, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { key, value });
    }
    Ok(())
}

/// Reject NaN and infinity.
fn require_finite(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { key, value })
    }
}

/// Reject locations outside `[0, half_span)`.
fn require_on_half_span(key: &'static str, value: f64, half_span: f64) -> Result<(), ConfigError> {
    require_finite(key, value)?;
    if value < 0.0 || value >= half_span {
        return Err(ConfigError::OutsideHalfSpan {
            key,
            value,
            half_span,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "
center_weight: 800
N: 3.8
span: 40
wing_area: 67
V: 12
p: 1.225
R_outer: 0.05
length: 1.0
G: 5000
E: 70000
allowed_ax_stress: 400
delta: 0.1
R_inner: 0.045
layup_density: 1600
";

    #[test]
    fn parses_required_yaml_keys() {
        let config = SpanConfig::from_yaml_str(YAML).expect("valid document");
        assert_eq!(config, SpanConfig::default());
        assert_eq!(config.support(), Support::Cantilever);
        assert_eq!(config.load_model_kind(), LoadModelKind::PiecewiseChord);
    }

    #[test]
    fn optional_keys_select_variants() {
        let text = format!("{YAML}strut_loc: 5.0\ncarb_thick: 0.02\ntaper_ratio: 0.5\n");
        let config = SpanConfig::from_yaml_str(&text).expect("valid document");
        assert_eq!(config.support(), Support::Strut { location: 5.0 });
        assert_eq!(config.ply_thickness, Some(0.02));
        assert_eq!(config.load_model_kind(), LoadModelKind::LinearFit);
    }

    #[test]
    fn missing_key_is_fatal() {
        let text = YAML.replace("delta: 0.1\n", "");
        let error = SpanConfig::from_yaml_str(&text).expect_err("delta is required");
        assert!(matches!(error, ConfigError::Yaml(_)));
        assert!(error.to_string().contains("delta"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let config = SpanConfig::default().with_strut(4.0);
        let text = serde_json::to_string(&config).expect("serializable");
        assert!(text.contains("\"strut_loc\":4.0"));
        assert!(text.contains("\"N\":3.8"));
        let parsed = SpanConfig::from_json_str(&text).expect("valid document");
        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_non_positive_step() {
        let error = SpanConfig::default()
            .with_delta(0.0)
            .validate()
            .expect_err("zero step rejected");
        assert!(matches!(
            error,
            ConfigError::NonPositive { key: "delta", .. }
        ));
    }

    #[test]
    fn rejects_strut_beyond_tip() {
        let error = SpanConfig::default()
            .with_strut(25.0)
            .validate()
            .expect_err("strut outside half-span rejected");
        assert!(matches!(
            error,
            ConfigError::OutsideHalfSpan {
                key: "strut_loc",
                ..
            }
        ));
    }

    #[test]
    fn rejects_half_linear_fit() {
        let config = SpanConfig {
            load_slope: Some(-2.0),
            ..SpanConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IncompleteLinearFit)
        ));
    }

    #[test]
    fn rejects_step_longer_than_half_span() {
        let error = SpanConfig::default()
            .with_delta(30.0)
            .validate()
            .expect_err("empty grid rejected");
        assert!(matches!(error, ConfigError::EmptyGrid { .. }));
    }

    #[test]
    fn rejects_unordered_radius_breaks() {
        let config = SpanConfig {
            radius_breaks: Some(vec![10.0, 5.0]),
            ..SpanConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnorderedRadiusBreaks)
        ));
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let path = std::env::temp_dir().join("sparx-config-test.toml");
        fs::write(&path, YAML).expect("temp file writable");
        let error = SpanConfig::from_path(&path).expect_err("toml is not supported");
        assert!(matches!(error, ConfigError::UnsupportedFormat(_)));
        let _ = fs::remove_file(path);
    }
}
