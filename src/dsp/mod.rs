//! Low-level DSP primitives used by the formant filter bank.
//!
//! These components are allocation-free on their processing paths and keep to
//! the signal-processing math, so the formant layer can focus on parameter
//! interpolation and coefficient publishing.

/// Decibel conversion helpers.
pub mod amplify;
/// Bandpass biquad design, bandwidth→Q conversion and DFI state.
pub mod biquad;
/// Transfer-function evaluation for response displays.
pub mod response;

pub use biquad::{BiquadCoeffs, BiquadFilter};
pub use response::{FrequencyResponseSampler, ResponseGrid};
