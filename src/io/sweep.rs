//! A scripted control source for demos and tests.
//!
//! Moves a right hand along a slow Lissajous path that crosses every pitch and
//! index bin, so the instrument can play itself without a tracker attached.

use std::{
    f32::consts::TAU,
    time::{Duration, Instant},
};

use crate::io::control::{ControlFrame, ControlSource, Hand};

pub struct SweepSource {
    /// Frames for one full vertical cycle.
    period_frames: u32,
    frame: u32,
    /// Vertical travel, mm.
    y_span: (f32, f32),
    /// Horizontal travel, mm.
    x_span: (f32, f32),
    connected_at: Instant,
}

impl SweepSource {
    /// A sweep covering the default tracker ranges.
    pub fn new(period_frames: u32) -> Self {
        Self {
            period_frames: period_frames.max(1),
            frame: 0,
            y_span: (40.0, 420.0),
            x_span: (-300.0, 300.0),
            connected_at: Instant::now(),
        }
    }

    pub fn with_spans(mut self, x_span: (f32, f32), y_span: (f32, f32)) -> Self {
        self.x_span = x_span;
        self.y_span = y_span;
        self
    }

    /// Report disconnected until `delay` has passed.
    pub fn connect_after(mut self, delay: Duration) -> Self {
        self.connected_at = Instant::now() + delay;
        self
    }

    /// Position of the hand at frame `n`.
    pub fn position_at(&self, n: u32) -> (f32, f32) {
        let t = (n % self.period_frames) as f32 / self.period_frames as f32;

        // y: triangle, x: sine at 3/2 the rate so the path doesn't retrace itself
        let tri = 1.0 - (2.0 * t - 1.0).abs();
        let y = self.y_span.0 + (self.y_span.1 - self.y_span.0) * tri;

        let s = 0.5 + 0.5 * (TAU * 1.5 * t).sin();
        let x = self.x_span.0 + (self.x_span.1 - self.x_span.0) * s;

        (x, y)
    }
}

impl ControlSource for SweepSource {
    fn is_connected(&self) -> bool {
        Instant::now() >= self.connected_at
    }

    fn poll_frame(&mut self) -> ControlFrame {
        let (x, y) = self.position_at(self.frame);
        self.frame = self.frame.wrapping_add(1);
        ControlFrame::empty().with_hand(Hand::right(x, y))
    }
}
