#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::formant::BankCoefficients;

/// Control → audio messages.
#[derive(Debug, Clone, Copy)]
pub enum FormantMessage {
    /// A complete coefficient set replacing the current one.
    Coefficients(BankCoefficients),
    /// Clear all branch memory.
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<FormantMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<FormantMessage> {
    fn pop(&mut self) -> Option<FormantMessage> {
        Consumer::pop(self).ok()
    }
}
