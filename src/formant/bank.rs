//! Single-threaded formant filter bank.

use crate::{
    dsp::response::ResponseGrid,
    error::FormantResult,
    formant::{
        branches::FormantBranches,
        design::{FilterState, FormantDesign, GlobalModifiers},
        interpolate::{ArticulationPoint, InterpolatedFormantParams},
        table::{FormantTable, NUM_FORMANTS},
    },
};

/// Vowel formant filter: parameter design and audio processing in one owner.
///
/// Setters run at control rate and redesign every branch before returning, so
/// the next processed sample and the next response query both see the new
/// state. For a separate audio thread use
/// [`formant_channel`](crate::realtime::formant_channel) instead.
///
/// ```
/// use formant_dsp::FormantFilterBank;
///
/// let mut bank = FormantFilterBank::new(48_000.0).unwrap();
/// bank.set_articulation(1.0, 0.0); // "a"
/// let mut block = [0.0f32; 64];
/// block[0] = 1.0;
/// bank.render(&mut block);
/// ```
#[derive(Debug, Clone)]
pub struct FormantFilterBank {
    design: FormantDesign,
    branches: FormantBranches,
}

impl FormantFilterBank {
    /// Bass voice at the center of the articulation square.
    pub fn new(sample_rate: f32) -> FormantResult<Self> {
        Self::with_table(FormantTable::bass(), sample_rate)
    }

    pub fn with_table(table: FormantTable, sample_rate: f32) -> FormantResult<Self> {
        FormantDesign::new(table, sample_rate).map(Self::from_design)
    }

    pub fn from_design(design: FormantDesign) -> Self {
        let branches = FormantBranches::new(&design.coefficients());
        Self { design, branches }
    }

    /// Keep a cached response curve per formant over `grid`.
    pub fn with_response_grid(self, grid: ResponseGrid) -> Self {
        Self {
            design: self.design.with_response_grid(grid),
            ..self
        }
    }

    pub fn set_articulation(&mut self, x: f32, y: f32) {
        if self.design.set_articulation(x, y) {
            self.publish();
        }
    }

    pub fn set_frequency_shift(&mut self, value: f32) {
        if self.design.set_frequency_shift(value) {
            self.publish();
        }
    }

    pub fn set_q_factor(&mut self, value: f32) {
        if self.design.set_q_factor(value) {
            self.publish();
        }
    }

    pub fn set_modifiers(&mut self, modifiers: GlobalModifiers) {
        if self.design.set_modifiers(modifiers) {
            self.publish();
        }
    }

    fn publish(&mut self) {
        self.branches.apply(&self.design.coefficients());
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.branches.process(input)
    }

    /// Filter a block in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        self.branches.render(buffer);
    }

    /// Clear all filter memory.
    pub fn reset(&mut self) {
        self.branches.reset();
    }

    /// Level in dB of one branch at each query frequency.
    pub fn get_frequency_response(
        &self,
        formant: usize,
        frequencies: &[f32],
    ) -> FormantResult<Vec<f32>> {
        self.design.frequency_response(formant, frequencies)
    }

    pub fn frequency_response_into(
        &self,
        formant: usize,
        frequencies: &[f32],
        out: &mut [f32],
    ) -> FormantResult<()> {
        self.design.frequency_response_into(formant, frequencies, out)
    }

    pub fn cached_response(&self, formant: usize) -> FormantResult<&[f32]> {
        self.design.cached_response(formant)
    }

    pub fn filter_state(&self, formant: usize) -> FormantResult<FilterState> {
        self.design.filter_state(formant)
    }

    pub fn filter_states(&self) -> &[FilterState; NUM_FORMANTS] {
        self.design.filter_states()
    }

    pub fn interpolated(&self) -> &[InterpolatedFormantParams; NUM_FORMANTS] {
        self.design.interpolated()
    }

    pub fn articulation(&self) -> ArticulationPoint {
        self.design.articulation()
    }

    pub fn modifiers(&self) -> GlobalModifiers {
        self.design.modifiers()
    }

    pub fn sample_rate(&self) -> f32 {
        self.design.sample_rate()
    }

    pub fn table(&self) -> &FormantTable {
        self.design.table()
    }

    pub fn design(&self) -> &FormantDesign {
        &self.design
    }
}
