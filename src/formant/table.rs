//! Reference formant data for the four vowel corners.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FormantError, FormantResult};

/// Number of formant branches in every table and bank.
pub const NUM_FORMANTS: usize = 5;

/// The four reference vowels, laid out on the unit square.
///
/// ```text
///   I ─── A      y = 0
///   │     │
///   U ─── O      y = 1
/// x = 0   x = 1
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VowelCorner {
    I,
    A,
    U,
    O,
}

impl VowelCorner {
    pub const ALL: [VowelCorner; 4] = [VowelCorner::I, VowelCorner::A, VowelCorner::U, VowelCorner::O];

    /// Position of this vowel on the articulation square.
    pub fn position(self) -> (f32, f32) {
        match self {
            VowelCorner::I => (0.0, 0.0),
            VowelCorner::A => (1.0, 0.0),
            VowelCorner::U => (0.0, 1.0),
            VowelCorner::O => (1.0, 1.0),
        }
    }
}

/// One formant of one vowel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantSpec {
    pub frequency_hz: f32,
    /// Level relative to the first formant.
    pub amplitude_db: f32,
    pub bandwidth_hz: f32,
}

impl FormantSpec {
    pub const fn new(frequency_hz: f32, amplitude_db: f32, bandwidth_hz: f32) -> Self {
        Self {
            frequency_hz,
            amplitude_db,
            bandwidth_hz,
        }
    }
}

const fn vowel(freq: [f32; NUM_FORMANTS], amp: [f32; NUM_FORMANTS], bw: [f32; NUM_FORMANTS]) -> [FormantSpec; NUM_FORMANTS] {
    [
        FormantSpec::new(freq[0], amp[0], bw[0]),
        FormantSpec::new(freq[1], amp[1], bw[1]),
        FormantSpec::new(freq[2], amp[2], bw[2]),
        FormantSpec::new(freq[3], amp[3], bw[3]),
        FormantSpec::new(freq[4], amp[4], bw[4]),
    ]
}

// Bass voice, from the csound manual's formant appendix.
const BASS_I: [FormantSpec; NUM_FORMANTS] = vowel(
    [250.0, 1750.0, 2600.0, 3050.0, 3340.0],
    [0.0, -30.0, -16.0, -22.0, -28.0],
    [60.0, 90.0, 100.0, 120.0, 120.0],
);
const BASS_A: [FormantSpec; NUM_FORMANTS] = vowel(
    [600.0, 1040.0, 2250.0, 2450.0, 2750.0],
    [0.0, -7.0, -9.0, -9.0, -20.0],
    [60.0, 70.0, 110.0, 120.0, 130.0],
);
const BASS_U: [FormantSpec; NUM_FORMANTS] = vowel(
    [350.0, 600.0, 2400.0, 2675.0, 2950.0],
    [0.0, -20.0, -32.0, -28.0, -36.0],
    [40.0, 80.0, 100.0, 120.0, 120.0],
);
const BASS_O: [FormantSpec; NUM_FORMANTS] = vowel(
    [400.0, 750.0, 2400.0, 2600.0, 2900.0],
    [0.0, -11.0, -21.0, -20.0, -40.0],
    [40.0, 80.0, 100.0, 120.0, 120.0],
);

/// Formant data for the four corners of the articulation square.
///
/// Swapping voices means swapping tables; nothing else in the bank depends on
/// the data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FormantTable {
    /// Indexed by `VowelCorner as usize`.
    corners: [[FormantSpec; NUM_FORMANTS]; 4],
}

impl FormantTable {
    pub const fn new(corners: [[FormantSpec; NUM_FORMANTS]; 4]) -> Self {
        Self { corners }
    }

    /// The bass voice.
    pub const fn bass() -> Self {
        Self::new([BASS_I, BASS_A, BASS_U, BASS_O])
    }

    pub fn get(&self, corner: VowelCorner, formant: usize) -> FormantResult<FormantSpec> {
        self.corners[corner as usize]
            .get(formant)
            .copied()
            .ok_or_else(|| FormantError::index(formant, NUM_FORMANTS))
    }

    /// All formants of one vowel.
    pub fn corner(&self, corner: VowelCorner) -> &[FormantSpec; NUM_FORMANTS] {
        &self.corners[corner as usize]
    }
}

impl Default for FormantTable {
    fn default() -> Self {
        Self::bass()
    }
}
