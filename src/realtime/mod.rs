//! Lock-free handoff between a control thread and the audio callback.
//!
//! The control side redesigns all branches and pushes the whole coefficient
//! set through a wait-free SPSC ring; the audio side drains the ring at the
//! top of each block. A set is one `Copy` value, so the audio thread either
//! sees all of an update or none of it.
//!
//! ```
//! # #[cfg(feature = "rtrb")]
//! # fn main() -> formant_dsp::FormantResult<()> {
//! use formant_dsp::{formant::{FormantDesign, FormantTable}, realtime::formant_channel};
//!
//! let design = FormantDesign::new(FormantTable::bass(), 48_000.0)?;
//! let (mut controller, mut processor) = formant_channel(design, 16);
//!
//! // UI thread
//! controller.set_articulation(0.2, 0.8)?;
//!
//! // audio callback
//! let mut block = [0.0f32; 128];
//! processor.render(&mut block);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "rtrb"))]
//! # fn main() {}
//! ```

#[cfg(feature = "rtrb")]
mod controller;
mod message;
mod processor;

#[cfg(feature = "rtrb")]
pub use controller::{formant_channel, FormantController};
pub use message::{FormantMessage, MessageReceiver};
pub use processor::FormantProcessor;
