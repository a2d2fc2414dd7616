//! Bandpass biquad design and direct-form-I evaluation.

use std::f64::consts::{LN_2, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Bandpass Biquad
===============

A biquad is a second-order recursive filter. Five numbers describe it:

    y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]

Each formant is one of these tuned as a bandpass: it passes a band around a
center frequency and rolls off on both sides at 6 dB/octave.

    level
      0 dB ─────────╱╲─────────
                   ╱  ╲
                  ╱    ╲         ← skirts
                 ╱      ╲
      ──────────╱        ╲──────
                    f0          freq


Design (Audio EQ Cookbook, 0 dB peak variant)
---------------------------------------------

    ω     = 2π · f0 / fs
    α     = sin(ω) / (2Q)

    b0 =  α      a0 = 1 + α
    b1 =  0      a1 = -2 cos(ω)
    b2 = -α      a2 = 1 - α

Everything is divided by a0 so the recursion above can skip it. At ω the
numerator and denominator have the same magnitude, so the peak is exactly
unity no matter how narrow the band is. Level is applied separately.


Bandwidth → Q
-------------

Formant data gives bandwidth in Hz. The bilinear transform warps frequency, so
the octave bandwidth is corrected by ω/sin(ω) before converting:

    bw_oct = log₂((f0 + bw/2) / (f0 - bw/2))
    1/Q    = 2 · sinh( (ln 2 / 2) · bw_oct · ω / sin(ω) )

Both logs need f0 - bw/2 > 0, i.e. bw < 2·f0, and the warp needs sin(ω) > 0,
i.e. 0 < f0 < fs/2. Callers clamp into that region before designing.


Why Direct Form I?
------------------

DFI keeps the last two inputs and the last two outputs. It never overflows its
internal state when coefficients jump between blocks, which happens every time
the articulation point moves. Formant poles sit close to the unit circle at
low frequencies, so coefficients and state are kept in f64.
*/

/// Normalized biquad coefficients (a0 already divided out).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Bandpass with unity gain at `center_hz`.
    ///
    /// `q` must be positive and `center_hz` inside (0, fs/2).
    pub fn bandpass(center_hz: f64, q: f64, sample_rate: f64) -> Self {
        let omega = TAU * center_hz / sample_rate;
        let (sin_omega, cos_omega) = omega.sin_cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = alpha;
        let b1 = 0.0;
        let b2 = -alpha;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Convert a bandwidth in Hz around `center_hz` into a biquad Q.
///
/// Requires `0 < bandwidth_hz < 2 * center_hz` and `0 < center_hz < fs / 2`;
/// outside that region the result is NaN or negative.
pub fn bandwidth_to_q(center_hz: f64, bandwidth_hz: f64, sample_rate: f64) -> f64 {
    let omega = TAU * center_hz / sample_rate;
    let half = bandwidth_hz / 2.0;
    let bw_octaves = ((center_hz + half) / (center_hz - half)).log2();
    let inv_q = 2.0 * ((LN_2 / 2.0) * bw_octaves * (omega / omega.sin())).sinh();
    1.0 / inv_q
}

/// Biquad state plus the coefficients currently driving it.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    /// Swap coefficients without touching the delay memory.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}
