//! Frequency-response evaluation for biquad branches.

use std::f64::consts::TAU;

use rustfft::num_complex::Complex;

use crate::dsp::{amplify::gain_to_db, biquad::BiquadCoeffs};

/*
Reading a Filter's Curve
========================

A display wants to draw what each formant does to the spectrum. Rather than
measure it (feed noise, run an FFT, average), we evaluate the transfer
function directly. It is exact, cheap and needs no audio.

    H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)

On the unit circle z = e^{jω}, ω = 2π·f / fs, so

    z⁻¹ = cos ω - j sin ω
    z⁻² = cos 2ω - j sin 2ω

and |H| is the ratio of two complex magnitudes. The readout is

    dB(f) = branch_gain_db + 20·log₁₀|H(e^{jω})|

using the same coefficients and the same gain the audio path uses, so the
drawn curve is the curve you hear.


Display Grid
------------

Visualizations sample a linear grid, one point per pixel column:

    f_i = min + (max - min) · i / ticks      i = 0 .. ticks-1

The upper edge is excluded. The default display range is 0–4 kHz, where the
first five formants of a low voice live.
*/

/// Lower edge of the default display range.
pub const DISPLAY_MIN_HZ: f32 = 0.0;
/// Upper edge of the default display range.
pub const DISPLAY_MAX_HZ: f32 = 4_000.0;

/// Linear magnitude of `coeffs` at `frequency_hz`.
pub fn magnitude(coeffs: &BiquadCoeffs, frequency_hz: f64, sample_rate: f64) -> f64 {
    let omega = TAU * frequency_hz / sample_rate;
    let z1 = Complex::from_polar(1.0, -omega);
    let z2 = Complex::from_polar(1.0, -2.0 * omega);

    let num = z1 * coeffs.b1 + z2 * coeffs.b2 + coeffs.b0;
    let den = z1 * coeffs.a1 + z2 * coeffs.a2 + 1.0;

    let den = den.norm();
    if den <= 0.0 {
        return 0.0;
    }
    num.norm() / den
}

/// Evaluates branch responses at a fixed sample rate.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyResponseSampler {
    sample_rate: f64,
}

impl FrequencyResponseSampler {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate: sample_rate as f64,
        }
    }

    /// Level in dB of a branch (`gain_db` followed by `coeffs`) at one frequency.
    #[inline]
    pub fn level_db(&self, coeffs: &BiquadCoeffs, gain_db: f64, frequency_hz: f32) -> f32 {
        let mag = magnitude(coeffs, frequency_hz as f64, self.sample_rate);
        (gain_db + gain_to_db(mag)) as f32
    }

    /// One dB value per query frequency.
    pub fn response(&self, coeffs: &BiquadCoeffs, gain_db: f64, frequencies: &[f32]) -> Vec<f32> {
        frequencies
            .iter()
            .map(|&f| self.level_db(coeffs, gain_db, f))
            .collect()
    }

    /// Like [`response`](Self::response) but writes into `out`.
    ///
    /// `out` and `frequencies` must have the same length.
    pub fn response_into(
        &self,
        coeffs: &BiquadCoeffs,
        gain_db: f64,
        frequencies: &[f32],
        out: &mut [f32],
    ) {
        debug_assert_eq!(frequencies.len(), out.len());

        for (o, &f) in out.iter_mut().zip(frequencies.iter()) {
            *o = self.level_db(coeffs, gain_db, f);
        }
    }
}

/// Query frequencies for a response display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseGrid {
    frequencies: Vec<f32>,
}

impl ResponseGrid {
    /// `ticks` points from `min_hz` (inclusive) toward `max_hz` (exclusive).
    pub fn linear(ticks: usize, min_hz: f32, max_hz: f32) -> Self {
        let frequencies = (0..ticks)
            .map(|i| {
                let t = i as f32 / ticks as f32;
                min_hz + (max_hz - min_hz) * t
            })
            .collect();
        Self { frequencies }
    }

    /// Linear grid over the default 0–4 kHz display range.
    pub fn display(ticks: usize) -> Self {
        Self::linear(ticks, DISPLAY_MIN_HZ, DISPLAY_MAX_HZ)
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
