//! Bilinear morphing between the four vowel corners.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::formant::table::{FormantSpec, FormantTable, VowelCorner, NUM_FORMANTS};

/*
Articulation Square
===================

    (0,0) I ─────────── A (1,0)
          │      ·p      │
          │              │
    (0,1) U ─────────── O (1,1)

Every formant channel (frequency, level, bandwidth) is blended from the four
corners with bilinear weights:

    w_I = (1-x)(1-y)     w_A = x(1-y)
    w_U = (1-x)y         w_O = xy

The weights sum to one, reproduce a corner exactly when p sits on it, and make
the result affine along each axis. Points outside the square are not clamped:
they extrapolate linearly, which lets a controller overshoot a vowel.
*/

/// Control coordinate on the articulation square.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticulationPoint {
    pub x: f32,
    pub y: f32,
}

impl ArticulationPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for ArticulationPoint {
    /// Center of the square, an even blend of all four vowels.
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// Physical parameters of one formant at an articulation point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterpolatedFormantParams {
    pub frequency_hz: f32,
    pub amplitude_db: f32,
    pub bandwidth_hz: f32,
}

/// Bilinear blend of four corner values.
#[inline]
pub fn bilinear(x: f32, y: f32, i: f32, a: f32, u: f32, o: f32) -> f32 {
    i * (1.0 - x) * (1.0 - y) + a * x * (1.0 - y) + u * (1.0 - x) * y + o * x * y
}

/// Derive every formant's parameters at `(x, y)`.
pub fn interpolate(table: &FormantTable, x: f32, y: f32) -> [InterpolatedFormantParams; NUM_FORMANTS] {
    let i = table.corner(VowelCorner::I);
    let a = table.corner(VowelCorner::A);
    let u = table.corner(VowelCorner::U);
    let o = table.corner(VowelCorner::O);

    let blend = |channel: fn(&FormantSpec) -> f32, n: usize| {
        bilinear(x, y, channel(&i[n]), channel(&a[n]), channel(&u[n]), channel(&o[n]))
    };

    std::array::from_fn(|n| InterpolatedFormantParams {
        frequency_hz: blend(|s| s.frequency_hz, n),
        amplitude_db: blend(|s| s.amplitude_db, n),
        bandwidth_hz: blend(|s| s.bandwidth_hz, n),
    })
}
