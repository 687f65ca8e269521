#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod grid;
pub mod integrate;
pub mod load;
pub mod section;
pub mod sizing;
pub mod stress;

pub use config::{LoadModelKind, SpanConfig, Support};
pub use constants::DerivedConstants;
pub use errors::{ConfigError, SizingError};
pub use export::{Chart, Station};
pub use grid::{Profile, SpanGrid};
pub use integrate::{cumulative, free_tip_shift, integrate_from, Deflection, StructuralIntegrator};
pub use load::{
    ChordProportionalLoad, LinearFitLoad, LoadModel, PiecewiseChord, SpanLoad, TaperedChord,
};
pub use section::{
    bending_strength_thickness, quantize_to_ply, section_inertia, spar_cap_mass,
    torsion_stiffness_thickness, torsion_strength_thickness, RadiusSchedule, SizingCriterion,
    SizingRule, SECTION_CONSTANT,
};
pub use sizing::{size_span, SpanProfiles, SpanSizing};
pub use stress::{axial_stress, shear_stress, StressPeak, StressProfiles};
