//! Vowel formant model and filter bank.
//!
//! Data flows leaf-first: a [`FormantTable`] holds the four reference vowels,
//! [`interpolate`] blends them at an articulation point, [`FormantDesign`]
//! turns the blend into biquad coefficients, and [`FormantFilterBank`] runs
//! the parallel branches over audio.

/// Single-owner bank: design plus filter memory.
pub mod bank;
/// Audio-rate parallel branches.
pub mod branches;
/// Control-rate parameter state and coefficient design.
pub mod design;
/// Bilinear vowel morphing.
pub mod interpolate;
/// Reference vowel data.
pub mod table;

pub use bank::FormantFilterBank;
pub use branches::FormantBranches;
pub use design::{BankCoefficients, BranchCoefficients, FilterState, FormantDesign, GlobalModifiers};
pub use interpolate::{bilinear, interpolate, ArticulationPoint, InterpolatedFormantParams};
pub use table::{FormantSpec, FormantTable, VowelCorner, NUM_FORMANTS};
