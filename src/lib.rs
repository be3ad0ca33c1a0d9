pub mod config;
pub mod dsp;
pub mod error;
pub mod io;
pub mod mapping; // Control signal -> musical targets
pub mod synth; // Phase-modulation oscillator and its control surface

pub use config::{EngineConfig, MapperConfig, DEFAULT_QUEUE_CAPACITY};
pub use error::{Result, SynthError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
