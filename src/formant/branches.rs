//! The audio-rate half of the bank: parallel gain + bandpass branches.

use crate::{
    dsp::biquad::BiquadFilter,
    formant::{design::BankCoefficients, table::NUM_FORMANTS},
};

/*
Parallel Branches
=================

             ┌─ ×g0 ─→ [BP f0,Q0] ─┐
             ├─ ×g1 ─→ [BP f1,Q1] ─┤
    input ───┼─ ×g2 ─→ [BP f2,Q2] ─┼──→ Σ ──→ output
             ├─ ×g3 ─→ [BP f3,Q3] ─┤
             └─ ×g4 ─→ [BP f4,Q4] ─┘

Every branch hears the same input; outputs are summed. Nothing here computes
a sine or a logarithm: coefficients arrive precomputed as one BankCoefficients
value, so a swap is a plain copy between samples and can never be observed
half-applied.
*/

/// Filter memory and current coefficients for all branches.
#[derive(Debug, Clone)]
pub struct FormantBranches {
    filters: [BiquadFilter; NUM_FORMANTS],
    gains: [f64; NUM_FORMANTS],
}

impl FormantBranches {
    pub fn new(coefficients: &BankCoefficients) -> Self {
        Self {
            filters: std::array::from_fn(|n| BiquadFilter::new(coefficients.branches[n].coeffs)),
            gains: std::array::from_fn(|n| coefficients.branches[n].linear_gain),
        }
    }

    /// Install a new coefficient set. Filter memory carries over.
    pub fn apply(&mut self, coefficients: &BankCoefficients) {
        for ((filter, gain), branch) in self
            .filters
            .iter_mut()
            .zip(self.gains.iter_mut())
            .zip(coefficients.branches.iter())
        {
            filter.set_coeffs(branch.coeffs);
            *gain = branch.linear_gain;
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input = input as f64;
        let mut sum = 0.0;
        for (filter, &gain) in self.filters.iter_mut().zip(self.gains.iter()) {
            sum += filter.process(input * gain);
        }
        sum as f32
    }

    /// Filter `buffer` in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }
}
