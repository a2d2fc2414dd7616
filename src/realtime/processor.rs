use crate::{
    formant::{BankCoefficients, FormantBranches},
    realtime::message::{FormantMessage, MessageReceiver},
};

/// Audio-thread side of a formant channel.
///
/// Pending messages are drained before every block (or sample). Only the
/// newest coefficient set is installed, so a burst of control updates costs one
/// copy. Draining never blocks and never allocates.
pub struct FormantProcessor<R> {
    branches: FormantBranches,
    rx: R,
}

impl<R: MessageReceiver> FormantProcessor<R> {
    pub fn new(coefficients: &BankCoefficients, rx: R) -> Self {
        Self {
            branches: FormantBranches::new(coefficients),
            rx,
        }
    }

    fn drain(&mut self) {
        let mut latest = None;
        while let Some(msg) = self.rx.pop() {
            match msg {
                FormantMessage::Coefficients(coefficients) => latest = Some(coefficients),
                FormantMessage::Reset => self.branches.reset(),
            }
        }
        if let Some(coefficients) = latest {
            self.branches.apply(&coefficients);
        }
    }

    /// Filter a block in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        self.drain();
        self.branches.render(buffer);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.drain();
        self.branches.process(input)
    }
}
