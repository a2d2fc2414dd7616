pub mod dsp; // Biquad design and response evaluation
pub mod error;
pub mod formant; // Vowel data, interpolation and the filter bank
pub mod realtime; // Control/audio thread handoff

pub use error::{FormantError, FormantResult};
pub use formant::{
    ArticulationPoint, FilterState, FormantFilterBank, FormantTable, GlobalModifiers, VowelCorner,
    NUM_FORMANTS,
};
