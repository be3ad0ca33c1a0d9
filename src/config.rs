//! Startup configuration for the engine and the parameter mapper.
//!
//! Defaults describe the stock instrument: a 440 Hz drone at 44.1 kHz,
//! sixteen-step tables, and the spatial ranges of a hand-tracking controller
//! (millimetres above and across the sensor).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{synth::params::PmParams, DEFAULT_SAMPLE_RATE};

/// Default control -> audio ring capacity: a few seconds of control updates
/// at 60 Hz with room for several messages per update.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Oscillator engine settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Samples per second. Replaced by the device rate when one is opened.
    pub sample_rate: f32,
    /// Parameters the oscillator starts with.
    pub initial: PmParams,
    /// Capacity of the control -> audio message ring.
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            initial: PmParams::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_initial(mut self, initial: PmParams) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

/// A closed or half-open span of one input axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
    /// Whether `max` itself is inside the range.
    pub inclusive_max: bool,
}

impl AxisRange {
    /// `[min, max)`
    pub const fn half_open(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            inclusive_max: false,
        }
    }

    /// `[min, max]`
    pub const fn closed(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            inclusive_max: true,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        if value < self.min {
            return false;
        }
        if self.inclusive_max {
            value <= self.max
        } else {
            value < self.max
        }
    }
}

/// Parameter mapper settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    /// Number of partitions per axis and entries per target table.
    pub bins: usize,
    /// Lowest pitch of the scale, Hz.
    pub base_frequency: f32,
    /// Scale pattern in semitones, cycled.
    pub scale_steps: Vec<u32>,
    /// Vertical span split into pitch partitions.
    pub vertical_partition: (f32, f32),
    /// Vertical values outside this range are ignored.
    pub vertical_gate: AxisRange,
    /// Horizontal span split into index partitions.
    pub horizontal_partition: (f32, f32),
    /// Horizontal values outside this range are ignored.
    pub horizontal_gate: AxisRange,
    /// Modulation index table span, `[min, max)`.
    pub index_range: (f32, f32),
    /// Modulation ratio table span, `[min, max)`.
    pub ratio_range: (f32, f32),
    /// Lerp fraction applied on every control update.
    pub interpolation_speed: f32,
    /// Let the left hand's height pick the modulation ratio.
    pub left_hand_ratio: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            bins: 16,
            base_frequency: 440.0,
            scale_steps: vec![2, 1, 2, 2, 1, 2, 2],
            vertical_partition: (50.0, 400.0),
            vertical_gate: AxisRange::half_open(0.0, 500.0),
            horizontal_partition: (-300.0, 300.0),
            horizontal_gate: AxisRange::closed(-300.0, 300.0),
            index_range: (0.5, 5.0),
            ratio_range: (0.1, 2.0),
            interpolation_speed: 0.1,
            left_hand_ratio: false,
        }
    }
}

impl MapperConfig {
    pub fn with_interpolation_speed(mut self, speed: f32) -> Self {
        self.interpolation_speed = speed;
        self
    }

    pub fn with_left_hand_ratio(mut self, enabled: bool) -> Self {
        self.left_hand_ratio = enabled;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_base_frequency(mut self, frequency: f32) -> Self {
        self.base_frequency = frequency;
        self
    }
}
