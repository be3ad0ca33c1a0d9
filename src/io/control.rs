use std::{
    thread,
    time::{Duration, Instant},
};

use crate::error::{Result, SynthError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One tracked hand: which hand it is and where its palm is.
///
/// Coordinates are in the tracker's frame, millimetres: x across the sensor,
/// y height above it, z toward the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    pub handedness: Handedness,
    pub position: [f32; 3],
}

impl Hand {
    pub fn new(handedness: Handedness, position: [f32; 3]) -> Self {
        Self {
            handedness,
            position,
        }
    }

    pub fn right(x: f32, y: f32) -> Self {
        Self::new(Handedness::Right, [x, y, 0.0])
    }

    pub fn left(x: f32, y: f32) -> Self {
        Self::new(Handedness::Left, [x, y, 0.0])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position[1]
    }

    pub fn is_right(&self) -> bool {
        self.handedness == Handedness::Right
    }

    pub fn is_left(&self) -> bool {
        self.handedness == Handedness::Left
    }
}

/// Everything the tracker saw in one poll. Zero hands is a normal frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlFrame {
    pub hands: Vec<Hand>,
}

impl ControlFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hands.push(hand);
        self
    }

    pub fn right_hands(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter().filter(|h| h.is_right())
    }

    pub fn left_hands(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter().filter(|h| h.is_left())
    }
}

/// A device that produces control frames (hand tracker, pointer, script).
pub trait ControlSource {
    fn is_connected(&self) -> bool;

    /// Latest frame. Called once per control update.
    fn poll_frame(&mut self) -> ControlFrame;
}

/// Block until `source` reports connected, checking every `poll_interval`.
///
/// Gives up with `ConnectionFailed` after `timeout`.
pub fn wait_for_connection<S: ControlSource + ?Sized>(
    source: &S,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<()> {
    let start = Instant::now();
    loop {
        if source.is_connected() {
            tracing::debug!(waited = ?start.elapsed(), "control source connected");
            return Ok(());
        }

        let waited = start.elapsed();
        if waited >= timeout {
            tracing::warn!(?waited, "control source did not connect");
            return Err(SynthError::ConnectionFailed { waited });
        }

        thread::sleep(poll_interval.min(timeout - waited));
    }
}
