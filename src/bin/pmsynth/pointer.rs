//! The terminal pointer as a stand-in hand tracker.
//!
//! While the left button is held the pointer is a right hand hovering over
//! the sensor: columns span the horizontal range, rows the height (top row
//! highest). Releasing the button takes the hand away.

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use pmsynth::io::{ControlFrame, ControlSource, Hand};

/// Horizontal travel, mm.
const X_SPAN: (f32, f32) = (-300.0, 300.0);
/// Vertical travel, mm. Tops out inside the gate so the top rows clamp to the
/// highest note instead of falling silent.
const Y_SPAN: (f32, f32) = (0.0, 450.0);

pub struct PointerSource {
    columns: u16,
    rows: u16,
    held_at: Option<(u16, u16)>,
}

impl PointerSource {
    pub fn from_terminal() -> EyreResult<Self> {
        let (columns, rows) = crossterm::terminal::size()?;
        Ok(Self {
            columns,
            rows,
            held_at: None,
        })
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.held_at = Some((event.column, event.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.held_at = None;
            }
            _ => {}
        }
    }

    pub fn is_held(&self) -> bool {
        self.held_at.is_some()
    }

    /// Tracker coordinates for a terminal cell.
    fn to_position(&self, column: u16, row: u16) -> (f32, f32) {
        let fx = column as f32 / self.columns.saturating_sub(1).max(1) as f32;
        let fy = row as f32 / self.rows.saturating_sub(1).max(1) as f32;

        let x = X_SPAN.0 + (X_SPAN.1 - X_SPAN.0) * fx.min(1.0);
        let y = Y_SPAN.1 - (Y_SPAN.1 - Y_SPAN.0) * fy.min(1.0);
        (x, y)
    }
}

impl ControlSource for PointerSource {
    fn is_connected(&self) -> bool {
        self.columns > 0 && self.rows > 0
    }

    fn poll_frame(&mut self) -> ControlFrame {
        match self.held_at {
            Some((column, row)) => {
                let (x, y) = self.to_position(column, row);
                ControlFrame::empty().with_hand(Hand::right(x, y))
            }
            None => ControlFrame::empty(),
        }
    }
}
