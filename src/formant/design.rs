//! Control-rate formant design: parameters in, coefficient sets out.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        amplify::db_to_gain,
        biquad::{bandwidth_to_q, BiquadCoeffs},
        response::{FrequencyResponseSampler, ResponseGrid},
    },
    error::{FormantError, FormantResult},
    formant::{
        interpolate::{interpolate, ArticulationPoint, InterpolatedFormantParams},
        table::{FormantTable, NUM_FORMANTS},
    },
};

/*
From Vowel Data to Coefficients
===============================

Each formant branch is redesigned whenever anything it depends on moves:

    articulation (x, y) ──→ interpolate ──→ f, level, bw
                                             │
    frequency shift ───────────────────────→ f' = max(50, f + 500·shift)
    Q factor ──────────────────────────────→ bw' = bw · 4^(-q)
                                             │
                                             ▼
                                       Q = bw_to_q(f', bw')
                                       biquad = bandpass(f', Q)
                                       gain = 10^(level / 20)

Shift moves every formant by the same number of Hz, which sounds like a larger
or smaller vocal tract. The Q factor scales all bandwidths in quarter steps:
+1 makes every band four times narrower, -1 four times wider.


Clamping
--------

The bandwidth→Q formula has two singularities:

  - bw ≥ 2·f   →  f - bw/2 ≤ 0, the log is undefined
  - bw ≤ 0     →  zero or negative octave bandwidth, Q is ∞ or negative

and the frequency warp needs 0 < f < fs/2. None of these occur for real vowel
data in the nominal control range, but extreme Q factors get there, so the
design clamps instead of failing:

    MIN_CENTER_HZ            ≤ f'  ≤ MAX_CENTER_RATIO · fs
    MIN_BANDWIDTH_HZ         ≤ bw' ≤ MAX_BANDWIDTH_RATIO · f'
    MIN_GAIN_DB              ≤ level ≤ MAX_GAIN_DB

Levels are extrapolated too: far outside the square a branch can reach
thousands of dB, which overflows the linear gain and poisons the filter
memory with inf/NaN. NaN anywhere maps to the lower bound.

Inside the normal range the clamps never engage, so they are inaudible.
*/

/// Lowest center frequency any branch may take.
pub const MIN_CENTER_HZ: f64 = 50.0;
/// Hz added per unit of frequency shift.
pub const FREQUENCY_SHIFT_HZ: f64 = 500.0;
/// Bandwidth is divided by this base raised to the Q factor.
pub const Q_FACTOR_BASE: f64 = 4.0;
/// Narrowest bandwidth handed to the Q conversion.
pub const MIN_BANDWIDTH_HZ: f64 = 0.01;
/// Widest bandwidth, as a multiple of the center frequency.
pub const MAX_BANDWIDTH_RATIO: f64 = 1.99;
/// Highest center frequency, as a fraction of the sample rate.
pub const MAX_CENTER_RATIO: f64 = 0.49;
/// Quietest branch level; matches the response readout floor.
pub const MIN_GAIN_DB: f64 = -240.0;
/// Loudest branch level.
pub const MAX_GAIN_DB: f64 = 24.0;
/// Lowest sample rate the design accepts.
pub const MIN_SAMPLE_RATE: f32 = 1_000.0;

/// Process-wide modifiers applied on top of the interpolated data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalModifiers {
    /// Nominally -1..=1; each unit moves every formant by 500 Hz.
    pub frequency_shift: f32,
    /// Nominally -1..=1; each unit narrows every band by 4×.
    pub q_factor: f32,
}

impl GlobalModifiers {
    pub const fn new(frequency_shift: f32, q_factor: f32) -> Self {
        Self {
            frequency_shift,
            q_factor,
        }
    }

    fn is_finite(&self) -> bool {
        self.frequency_shift.is_finite() && self.q_factor.is_finite()
    }
}

/// Designed filter for one branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    /// Always ≥ [`MIN_CENTER_HZ`].
    pub center_hz: f64,
    /// Bandwidth after Q scaling and clamping.
    pub bandwidth_hz: f64,
    /// Always positive and finite.
    pub q: f64,
    pub gain_db: f64,
    pub linear_gain: f64,
    pub coeffs: BiquadCoeffs,
}

impl FilterState {
    /// Design one branch from its interpolated parameters.
    pub fn design(
        params: &InterpolatedFormantParams,
        modifiers: &GlobalModifiers,
        sample_rate: f32,
    ) -> Self {
        let sample_rate = sample_rate as f64;

        let shifted =
            params.frequency_hz as f64 + FREQUENCY_SHIFT_HZ * modifiers.frequency_shift as f64;
        let center_hz = shifted
            .max(MIN_CENTER_HZ)
            .min(MAX_CENTER_RATIO * sample_rate);
        if center_hz != shifted {
            log::debug!("center {:.1} Hz clamped to {:.1} Hz", shifted, center_hz);
        }

        let scaled =
            params.bandwidth_hz as f64 * Q_FACTOR_BASE.powf(-(modifiers.q_factor as f64));
        let bandwidth_hz = clamp_bandwidth(scaled, center_hz);
        if bandwidth_hz != scaled {
            log::debug!(
                "bandwidth {:.3} Hz clamped to {:.3} Hz at {:.1} Hz",
                scaled,
                bandwidth_hz,
                center_hz
            );
        }

        let q = bandwidth_to_q(center_hz, bandwidth_hz, sample_rate);
        let level = params.amplitude_db as f64;
        let gain_db = clamp_gain_db(level);
        if gain_db != level {
            log::debug!("level {:.1} dB clamped to {:.1} dB", level, gain_db);
        }

        Self {
            center_hz,
            bandwidth_hz,
            q,
            gain_db,
            linear_gain: db_to_gain(gain_db),
            coeffs: BiquadCoeffs::bandpass(center_hz, q, sample_rate),
        }
    }

    pub fn branch(&self) -> BranchCoefficients {
        BranchCoefficients {
            coeffs: self.coeffs,
            linear_gain: self.linear_gain,
        }
    }
}

fn clamp_bandwidth(bandwidth_hz: f64, center_hz: f64) -> f64 {
    let ceiling = MAX_BANDWIDTH_RATIO * center_hz;
    if bandwidth_hz.is_nan() || bandwidth_hz < MIN_BANDWIDTH_HZ {
        MIN_BANDWIDTH_HZ
    } else {
        bandwidth_hz.min(ceiling)
    }
}

fn clamp_gain_db(gain_db: f64) -> f64 {
    if gain_db.is_nan() {
        MIN_GAIN_DB
    } else {
        gain_db.clamp(MIN_GAIN_DB, MAX_GAIN_DB)
    }
}

/// What the audio path needs from one branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchCoefficients {
    pub coeffs: BiquadCoeffs,
    pub linear_gain: f64,
}

/// A complete, self-consistent coefficient set for the whole bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankCoefficients {
    pub branches: [BranchCoefficients; NUM_FORMANTS],
}

/// Parameter state and derived filter design for a formant bank.
///
/// Every setter re-derives all branches, so the states and any cached response
/// curves always describe the current parameters. Holds no audio memory; see
/// [`FormantFilterBank`](crate::formant::FormantFilterBank) and
/// [`FormantProcessor`](crate::realtime::FormantProcessor) for that.
#[derive(Debug, Clone)]
pub struct FormantDesign {
    table: FormantTable,
    sample_rate: f32,
    sampler: FrequencyResponseSampler,
    point: ArticulationPoint,
    modifiers: GlobalModifiers,
    interpolated: [InterpolatedFormantParams; NUM_FORMANTS],
    states: [FilterState; NUM_FORMANTS],
    grid: Option<ResponseGrid>,
    curves: [Vec<f32>; NUM_FORMANTS],
}

impl FormantDesign {
    pub fn new(table: FormantTable, sample_rate: f32) -> FormantResult<Self> {
        if !sample_rate.is_finite() || sample_rate < MIN_SAMPLE_RATE {
            return Err(FormantError::SampleRate { rate: sample_rate });
        }

        let point = ArticulationPoint::default();
        let modifiers = GlobalModifiers::default();
        let interpolated = interpolate(&table, point.x, point.y);
        let states =
            std::array::from_fn(|n| FilterState::design(&interpolated[n], &modifiers, sample_rate));

        log::debug!(
            "formant design at {} Hz, articulation ({}, {})",
            sample_rate,
            point.x,
            point.y
        );

        Ok(Self {
            table,
            sample_rate,
            sampler: FrequencyResponseSampler::new(sample_rate),
            point,
            modifiers,
            interpolated,
            states,
            grid: None,
            curves: Default::default(),
        })
    }

    /// Keep one response curve per formant over `grid`, refreshed on every update.
    pub fn with_response_grid(mut self, grid: ResponseGrid) -> Self {
        self.curves = std::array::from_fn(|_| vec![0.0; grid.len()]);
        self.grid = Some(grid);
        self.refresh_curves();
        self
    }

    /// Move the articulation point. Returns `false` if the input was rejected.
    pub fn set_articulation(&mut self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            log::warn!("ignoring non-finite articulation ({}, {})", x, y);
            return false;
        }
        self.point = ArticulationPoint::new(x, y);
        self.interpolated = interpolate(&self.table, x, y);
        self.recompute();
        true
    }

    pub fn set_frequency_shift(&mut self, value: f32) -> bool {
        self.set_modifiers(GlobalModifiers {
            frequency_shift: value,
            ..self.modifiers
        })
    }

    pub fn set_q_factor(&mut self, value: f32) -> bool {
        self.set_modifiers(GlobalModifiers {
            q_factor: value,
            ..self.modifiers
        })
    }

    pub fn set_modifiers(&mut self, modifiers: GlobalModifiers) -> bool {
        if !modifiers.is_finite() {
            log::warn!("ignoring non-finite modifiers {:?}", modifiers);
            return false;
        }
        self.modifiers = modifiers;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        for (state, params) in self.states.iter_mut().zip(self.interpolated.iter()) {
            *state = FilterState::design(params, &self.modifiers, self.sample_rate);
        }
        self.refresh_curves();
    }

    fn refresh_curves(&mut self) {
        let Some(grid) = &self.grid else {
            return;
        };
        for (curve, state) in self.curves.iter_mut().zip(self.states.iter()) {
            self.sampler
                .response_into(&state.coeffs, state.gain_db, grid.frequencies(), curve);
        }
    }

    fn state(&self, formant: usize) -> FormantResult<&FilterState> {
        self.states
            .get(formant)
            .ok_or_else(|| FormantError::index(formant, NUM_FORMANTS))
    }

    /// Level in dB of one branch at each query frequency.
    pub fn frequency_response(&self, formant: usize, frequencies: &[f32]) -> FormantResult<Vec<f32>> {
        let state = self.state(formant)?;
        Ok(self.sampler.response(&state.coeffs, state.gain_db, frequencies))
    }

    pub fn frequency_response_into(
        &self,
        formant: usize,
        frequencies: &[f32],
        out: &mut [f32],
    ) -> FormantResult<()> {
        let state = self.state(formant)?;
        if out.len() != frequencies.len() {
            return Err(FormantError::LengthMismatch {
                expected: frequencies.len(),
                found: out.len(),
            });
        }
        self.sampler
            .response_into(&state.coeffs, state.gain_db, frequencies, out);
        Ok(())
    }

    /// Cached curve over the response grid; empty when no grid was configured.
    pub fn cached_response(&self, formant: usize) -> FormantResult<&[f32]> {
        self.curves
            .get(formant)
            .map(Vec::as_slice)
            .ok_or_else(|| FormantError::index(formant, NUM_FORMANTS))
    }

    pub fn response_grid(&self) -> Option<&ResponseGrid> {
        self.grid.as_ref()
    }

    pub fn coefficients(&self) -> BankCoefficients {
        BankCoefficients {
            branches: std::array::from_fn(|n| self.states[n].branch()),
        }
    }

    pub fn filter_state(&self, formant: usize) -> FormantResult<FilterState> {
        self.state(formant).copied()
    }

    pub fn filter_states(&self) -> &[FilterState; NUM_FORMANTS] {
        &self.states
    }

    pub fn interpolated(&self) -> &[InterpolatedFormantParams; NUM_FORMANTS] {
        &self.interpolated
    }

    pub fn articulation(&self) -> ArticulationPoint {
        self.point
    }

    pub fn modifiers(&self) -> GlobalModifiers {
        self.modifiers
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn table(&self) -> &FormantTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn params(frequency_hz: f32, amplitude_db: f32, bandwidth_hz: f32) -> InterpolatedFormantParams {
        InterpolatedFormantParams {
            frequency_hz,
            amplitude_db,
            bandwidth_hz,
        }
    }

    fn design() -> FormantDesign {
        FormantDesign::new(FormantTable::bass(), SAMPLE_RATE).unwrap()
    }

    #[test]
    fn test_negative_shift_floors_at_min_center() {
        let state = FilterState::design(
            &params(600.0, 0.0, 60.0),
            &GlobalModifiers::new(-1.0, 0.0),
            SAMPLE_RATE,
        );
        assert_eq!(state.center_hz, 100.0);

        let state = FilterState::design(
            &params(250.0, 0.0, 60.0),
            &GlobalModifiers::new(-1.0, 0.0),
            SAMPLE_RATE,
        );
        assert_eq!(state.center_hz, MIN_CENTER_HZ);
    }

    #[test]
    fn test_center_never_below_min_for_any_shift() {
        for shift in [-10.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0] {
            for freq in [50.0, 250.0, 600.0, 3_340.0] {
                let state = FilterState::design(
                    &params(freq, 0.0, 40.0),
                    &GlobalModifiers::new(shift, 0.0),
                    SAMPLE_RATE,
                );
                assert!(state.center_hz >= MIN_CENTER_HZ, "shift={}, freq={}", shift, freq);
            }
        }
    }

    #[test]
    fn test_zero_q_factor_keeps_bandwidth() {
        let state = FilterState::design(
            &params(600.0, 0.0, 60.0),
            &GlobalModifiers::default(),
            SAMPLE_RATE,
        );
        assert_eq!(state.bandwidth_hz, 60.0);
    }

    #[test]
    fn test_q_factor_scales_bandwidth_by_powers_of_four() {
        let narrow = FilterState::design(
            &params(600.0, 0.0, 60.0),
            &GlobalModifiers::new(0.0, 1.0),
            SAMPLE_RATE,
        );
        let wide = FilterState::design(
            &params(600.0, 0.0, 60.0),
            &GlobalModifiers::new(0.0, -1.0),
            SAMPLE_RATE,
        );
        assert!((narrow.bandwidth_hz - 15.0).abs() < 1e-9);
        assert!((wide.bandwidth_hz - 240.0).abs() < 1e-9);
        assert!(narrow.q > wide.q);
    }

    #[test]
    fn test_extreme_q_factor_is_clamped() {
        let wide = FilterState::design(
            &params(100.0, 0.0, 60.0),
            &GlobalModifiers::new(0.0, -8.0),
            SAMPLE_RATE,
        );
        assert!(wide.bandwidth_hz < 2.0 * wide.center_hz);
        assert!(wide.q.is_finite() && wide.q > 0.0);

        let narrow = FilterState::design(
            &params(100.0, 0.0, 60.0),
            &GlobalModifiers::new(0.0, 40.0),
            SAMPLE_RATE,
        );
        assert_eq!(narrow.bandwidth_hz, MIN_BANDWIDTH_HZ);
        assert!(narrow.q.is_finite() && narrow.q > 0.0);
    }

    #[test]
    fn test_center_stays_below_nyquist() {
        let state = FilterState::design(
            &params(3_000.0, 0.0, 100.0),
            &GlobalModifiers::new(20.0, 0.0),
            8_000.0,
        );
        assert!(state.center_hz < 4_000.0);
        assert!(state.q.is_finite() && state.q > 0.0);
    }

    #[test]
    fn test_extreme_level_is_clamped() {
        let loud = FilterState::design(
            &params(600.0, 22_970.0, 60.0),
            &GlobalModifiers::default(),
            SAMPLE_RATE,
        );
        assert_eq!(loud.gain_db, MAX_GAIN_DB);
        assert!(loud.linear_gain.is_finite());

        let quiet = FilterState::design(
            &params(600.0, -1e9, 60.0),
            &GlobalModifiers::default(),
            SAMPLE_RATE,
        );
        assert_eq!(quiet.gain_db, MIN_GAIN_DB);
        assert!(quiet.linear_gain > 0.0);
    }

    #[test]
    fn test_nan_parameters_map_to_floors() {
        let state = FilterState::design(
            &params(f32::NAN, f32::NAN, f32::NAN),
            &GlobalModifiers::default(),
            SAMPLE_RATE,
        );
        assert_eq!(state.center_hz, MIN_CENTER_HZ);
        assert_eq!(state.bandwidth_hz, MIN_BANDWIDTH_HZ);
        assert_eq!(state.gain_db, MIN_GAIN_DB);
        assert!(state.q.is_finite() && state.q > 0.0);
    }

    #[test]
    fn test_gain_is_linear_level() {
        let state = FilterState::design(
            &params(1_040.0, -20.0, 70.0),
            &GlobalModifiers::default(),
            SAMPLE_RATE,
        );
        assert_eq!(state.gain_db, -20.0);
        assert!((state.linear_gain - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        for rate in [0.0, -48_000.0, f32::NAN, f32::INFINITY, 500.0] {
            let err = FormantDesign::new(FormantTable::bass(), rate).unwrap_err();
            assert!(matches!(err, FormantError::SampleRate { .. }));
        }
    }

    #[test]
    fn test_starts_at_center_with_neutral_modifiers() {
        let design = design();
        assert_eq!(design.articulation(), ArticulationPoint::new(0.5, 0.5));
        assert_eq!(design.modifiers(), GlobalModifiers::default());
        assert_eq!(design.interpolated(), &interpolate(design.table(), 0.5, 0.5));
    }

    #[test]
    fn test_set_articulation_is_idempotent() {
        let mut design = design();
        design.set_articulation(0.2, 0.9);
        let first = *design.filter_states();
        design.set_articulation(0.2, 0.9);
        assert_eq!(&first, design.filter_states());
    }

    #[test]
    fn test_modifiers_reuse_stored_articulation() {
        let mut design = design();
        design.set_articulation(1.0, 0.0);
        design.set_frequency_shift(0.2);
        // Corner A formant 0 is 600 Hz.
        assert!((design.filter_states()[0].center_hz - 700.0).abs() < 1e-3);
        design.set_q_factor(1.0);
        assert!((design.filter_states()[0].bandwidth_hz - 15.0).abs() < 1e-6);
        assert_eq!(design.modifiers(), GlobalModifiers::new(0.2, 1.0));
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut design = design();
        design.set_articulation(0.1, 0.2);
        let before = *design.filter_states();
        assert!(!design.set_articulation(f32::NAN, 0.5));
        assert!(!design.set_frequency_shift(f32::INFINITY));
        assert!(!design.set_q_factor(f32::NAN));
        assert_eq!(design.articulation(), ArticulationPoint::new(0.1, 0.2));
        assert_eq!(&before, design.filter_states());
    }

    #[test]
    fn test_response_at_center_equals_gain() {
        let mut design = design();
        design.set_articulation(0.3, 0.6);
        for (n, state) in design.filter_states().iter().enumerate() {
            let db = design.frequency_response(n, &[state.center_hz as f32]).unwrap()[0];
            assert!(
                (db as f64 - state.gain_db).abs() < 1e-2,
                "formant {}: expected {} dB, got {}",
                n,
                state.gain_db,
                db
            );
        }
    }

    #[test]
    fn test_response_rejects_bad_index() {
        let design = design();
        let err = design.frequency_response(NUM_FORMANTS, &[100.0]).unwrap_err();
        assert_eq!(err, FormantError::index(NUM_FORMANTS, NUM_FORMANTS));
        assert!(design.filter_state(9).is_err());
        assert!(design.cached_response(5).is_err());
    }

    #[test]
    fn test_response_into_checks_length() {
        let design = design();
        let mut out = [0.0; 2];
        let err = design
            .frequency_response_into(0, &[100.0, 200.0, 300.0], &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            FormantError::LengthMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_cached_curves_follow_updates() {
        let grid = ResponseGrid::display(400);
        let mut design = design().with_response_grid(grid.clone());
        let before = design.cached_response(1).unwrap().to_vec();
        assert_eq!(before.len(), 400);
        assert_eq!(before, design.frequency_response(1, grid.frequencies()).unwrap());

        design.set_articulation(0.0, 1.0);
        let after = design.cached_response(1).unwrap();
        assert_ne!(before.as_slice(), after);
        assert_eq!(after, design.frequency_response(1, grid.frequencies()).unwrap().as_slice());
    }

    #[test]
    fn test_no_grid_means_empty_cache() {
        let design = design();
        assert!(design.response_grid().is_none());
        assert!(design.cached_response(0).unwrap().is_empty());
    }

    #[test]
    fn test_coefficients_mirror_states() {
        let design = design();
        let coefficients = design.coefficients();
        for (branch, state) in coefficients.branches.iter().zip(design.filter_states()) {
            assert_eq!(branch.coeffs, state.coeffs);
            assert_eq!(branch.linear_gain, state.linear_gain);
        }
    }
}
