// Purpose: the phase-modulation oscillator and how the outside world changes it.
// The oscillator itself is plain single-threaded state; `engine` splits it
// into a control handle and an audio-thread renderer.

pub mod control;
#[cfg(feature = "rtrb")]
pub mod engine;
pub mod message;
pub mod oscillator;
pub mod params;

pub use control::OscillatorControl;
#[cfg(feature = "rtrb")]
pub use engine::{pm_channel, PmEngine, PmHandle};
pub use message::{MessageReceiver, ParamMessage};
pub use oscillator::{OscillatorSnapshot, PmOscillator};
pub use params::PmParams;
