//! Decibel conversion and gain primitives.

/*
Gain in Decibels
================

Formant tables describe each resonance's relative level in decibels because
that is how the ear compares them. The filter bank needs a plain multiplier.

Vocabulary
----------

  gain          A multiplier applied to amplitude.
                  gain > 1.0  →  louder
                  gain = 1.0  →  unchanged (unity, 0 dB)
                  gain < 1.0  →  quieter

  decibel       Logarithmic level ratio.

                    dB   = 20 × log₁₀(gain)
                    gain = 10^(dB / 20)

Reference points:
    ×1.0    =   0 dB
    ×0.5    ≈  -6 dB
    ×0.1    = -20 dB
    ×0.001  = -60 dB

A formant table entry of -30 dB therefore scales its branch by ~0.0316.


Silence and -∞
--------------

log₁₀(0) is -∞. Bandpass magnitudes are exactly zero at DC and at Nyquist, so
any dB readout that may land there floors the magnitude first. MIN_MAGNITUDE
(1e-12, i.e. -240 dB) sits far below anything a display or the ear resolves.
*/

/// Magnitude floor used before taking a logarithm.
pub const MIN_MAGNITUDE: f64 = 1e-12;

/// Convert a level in dB to a linear gain factor.
#[inline]
pub fn db_to_gain(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert a linear magnitude to dB, flooring at [`MIN_MAGNITUDE`].
#[inline]
pub fn gain_to_db(gain: f64) -> f64 {
    20.0 * gain.max(MIN_MAGNITUDE).log10()
}
