use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{
    error::{FormantError, FormantResult},
    formant::{FilterState, FormantDesign, GlobalModifiers, NUM_FORMANTS},
    realtime::{message::FormantMessage, processor::FormantProcessor},
};

/// Control-thread side of a formant channel.
///
/// Owns the parameter state and publishes a full coefficient set after every
/// accepted change. Response queries read the state most recently designed
/// here, which is the state the processor converges to once it drains.
pub struct FormantController {
    design: FormantDesign,
    tx: Producer<FormantMessage>,
    pending: bool,
    pending_reset: bool,
    dropped: u64,
}

/// Split a design into a controller and an audio-thread processor.
///
/// `capacity` bounds how many updates may queue between two audio blocks.
pub fn formant_channel(
    design: FormantDesign,
    capacity: usize,
) -> (FormantController, FormantProcessor<Consumer<FormantMessage>>) {
    let (tx, rx) = RingBuffer::new(capacity.max(1));
    let processor = FormantProcessor::new(&design.coefficients(), rx);
    let controller = FormantController {
        design,
        tx,
        pending: false,
        pending_reset: false,
        dropped: 0,
    };
    (controller, processor)
}

impl FormantController {
    fn send(&mut self, msg: FormantMessage) -> FormantResult<()> {
        match self.tx.push(msg) {
            Ok(()) => Ok(()),
            Err(PushError::Full(_)) => {
                self.dropped += 1;
                log::warn!("formant queue full, {} updates dropped so far", self.dropped);
                Err(FormantError::QueueFull)
            }
        }
    }

    fn publish(&mut self) -> FormantResult<()> {
        let result = self.send(FormantMessage::Coefficients(self.design.coefficients()));
        self.pending = result.is_err();
        result
    }

    /// Retry whatever a [`FormantError::QueueFull`] left unsent.
    ///
    /// A dropped reset goes out before the coefficient set.
    pub fn flush(&mut self) -> FormantResult<()> {
        if self.pending_reset {
            self.reset()?;
        }
        if self.pending {
            self.publish()
        } else {
            Ok(())
        }
    }

    pub fn set_articulation(&mut self, x: f32, y: f32) -> FormantResult<()> {
        if self.design.set_articulation(x, y) {
            self.publish()
        } else {
            Ok(())
        }
    }

    pub fn set_frequency_shift(&mut self, value: f32) -> FormantResult<()> {
        if self.design.set_frequency_shift(value) {
            self.publish()
        } else {
            Ok(())
        }
    }

    pub fn set_q_factor(&mut self, value: f32) -> FormantResult<()> {
        if self.design.set_q_factor(value) {
            self.publish()
        } else {
            Ok(())
        }
    }

    pub fn set_modifiers(&mut self, modifiers: GlobalModifiers) -> FormantResult<()> {
        if self.design.set_modifiers(modifiers) {
            self.publish()
        } else {
            Ok(())
        }
    }

    /// Ask the processor to clear its filter memory.
    pub fn reset(&mut self) -> FormantResult<()> {
        let result = self.send(FormantMessage::Reset);
        self.pending_reset = result.is_err();
        result
    }

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

    pub fn filter_states(&self) -> &[FilterState; NUM_FORMANTS] {
        self.design.filter_states()
    }

    pub fn design(&self) -> &FormantDesign {
        &self.design
    }

    /// Whether the latest state or a reset still has to reach the processor.
    pub fn is_pending(&self) -> bool {
        self.pending || self.pending_reset
    }

    pub fn dropped_updates(&self) -> u64 {
        self.dropped
    }
}
